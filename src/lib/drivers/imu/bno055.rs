// BNO055 absolute orientation sensor, I2C interface.
// Datasheet: https://www.bosch-sensortec.com/media/boschsensortec/downloads/datasheets/bst-bno055-ds000.pdf

pub use crate::drivers::imu::bno055_constants::*;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    I2c(E),
    WrongId(u8),
    // device reports a different mode than the one just requested
    ModeMismatch { requested: OperationMode, actual: u8 },
}

// calibration level per subsystem, 0 (uncalibrated) to 3 (fully calibrated)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalibrationStatus {
    pub sys: u8,
    pub gyro: u8,
    pub accel: u8,
    pub mag: u8,
}

impl From<u8> for CalibrationStatus {
    fn from(data: u8) -> Self {
        CalibrationStatus {
            sys: (data >> 6) & 0x03,
            gyro: (data >> 4) & 0x03,
            accel: (data >> 2) & 0x03,
            mag: data & 0x03,
        }
    }
}

pub struct Bno055<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Bno055<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    // verify the chip and bring it into 9-axis fusion mode
    pub fn init<D: DelayMs<u32>>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        self.check_id()?;
        self.set_mode(OperationMode::Config, delay)?;
        self.set_mode(OperationMode::Ndof, delay)?;
        Ok(())
    }

    pub fn check_id(&mut self) -> Result<(), Error<E>> {
        let id = self.read_byte(REG_CHIP_ID)?;
        if id != CHIP_ID {
            return Err(Error::WrongId(id));
        }
        Ok(())
    }

    pub fn set_mode<D: DelayMs<u32>>(
        &mut self,
        mode: OperationMode,
        delay: &mut D,
    ) -> Result<(), Error<E>> {
        self.write_byte(REG_OPR_MODE, mode as u8)?;
        delay.delay_ms(MODE_SWITCH_DELAY_MS);
        let actual = self.get_mode()?;
        if actual != mode as u8 {
            return Err(Error::ModeMismatch {
                requested: mode,
                actual,
            });
        }
        Ok(())
    }

    pub fn get_mode(&mut self) -> Result<u8, Error<E>> {
        Ok(self.read_byte(REG_OPR_MODE)? & 0x0F)
    }

    pub fn calibration_status(&mut self) -> Result<CalibrationStatus, Error<E>> {
        Ok(CalibrationStatus::from(self.read_byte(REG_CALIB_STAT)?))
    }

    // Euler heading in degrees. The sensor is mounted upside down, so the
    // sign is flipped to make counter-clockwise rotation positive.
    pub fn read_heading_deg(&mut self) -> Result<f32, Error<E>> {
        let mut buf = [0u8; 2];
        self.read(REG_EUL_HEADING_LSB, &mut buf)?;
        let raw = i16::from_le_bytes(buf);
        Ok(-(raw as f32) / LSB_PER_DEG)
    }

    fn read(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Error<E>> {
        self.i2c
            .write_read(self.address, &[reg], data)
            .map_err(Error::I2c)
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.read(reg, &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Error::I2c)
    }
}
