use core::f32::consts::PI;
use core::fmt::Debug;
use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::drivers::imu::bno055::{self, Bno055, CalibrationStatus};
use crate::navigation::heading::{normalize, wrap360};
use crate::share::Writer;

// Absolute heading in degrees, counter-clockwise positive
pub trait HeadingSource {
    type Error: Debug;
    fn read_heading_deg(&mut self) -> Result<f32, Self::Error>;
    fn calibration(&mut self) -> Result<CalibrationStatus, Self::Error>;
}

impl<I2C, E> HeadingSource for Bno055<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    type Error = bno055::Error<E>;

    fn read_heading_deg(&mut self) -> Result<f32, Self::Error> {
        Bno055::read_heading_deg(self)
    }

    fn calibration(&mut self) -> Result<CalibrationStatus, Self::Error> {
        self.calibration_status()
    }
}

// Publishes the heading relative to the direction the robot faced at
// start, in radians within [0, 2pi).
pub struct HeadingTask<'a, H> {
    imu: H,
    reference_deg: Option<f32>,
    yaw: Writer<'a, f32>,
}

impl<'a, H> HeadingTask<'a, H>
where
    H: HeadingSource,
{
    pub fn new(imu: H, yaw: Writer<'a, f32>) -> Self {
        Self {
            imu,
            reference_deg: None,
            yaw,
        }
    }

    pub fn step(&mut self) {
        let heading = match self.imu.read_heading_deg() {
            Ok(deg) => deg,
            Err(e) => {
                // keep publishing the last good value
                log::warn!("imu: heading read failed: {:?}", e);
                return;
            }
        };
        let reference = match self.reference_deg {
            Some(r) => r,
            None => {
                log::info!("imu: zero heading at {} deg", heading);
                match self.imu.calibration() {
                    Ok(c) => log::info!(
                        "imu: calibration sys {} gyro {} accel {} mag {}",
                        c.sys,
                        c.gyro,
                        c.accel,
                        c.mag
                    ),
                    Err(e) => log::warn!("imu: calibration read failed: {:?}", e),
                }
                self.reference_deg = Some(heading);
                heading
            }
        };
        let yaw = normalize(wrap360(heading - reference) * PI / 180.0);
        self.yaw.put(yaw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::imu::bno055::tests::{FakeBus, Nack};
    use crate::drivers::imu::bno055::DEFAULT_I2C_ADDR;
    use crate::share::Share;
    use core::f32::consts::FRAC_PI_2;
    use mockall::mock;
    use mockall::Sequence;

    mock! {
        Imu {}
        impl HeadingSource for Imu {
            type Error = Nack;
            fn read_heading_deg(&mut self) -> Result<f32, Nack>;
            fn calibration(&mut self) -> Result<CalibrationStatus, Nack>;
        }
    }

    // calibration is only looked at once, when the zero reference is taken
    fn calibrated_once(imu: &mut MockImu) {
        imu.expect_calibration()
            .times(1)
            .returning(|| Ok(CalibrationStatus::default()));
    }

    #[test]
    fn first_reading_is_zero() {
        let cell: Share<f32> = Share::new();
        let mut imu = MockImu::new();
        let mut seq = Sequence::new();
        for deg in [-30.0, -120.0, 50.0] {
            imu.expect_read_heading_deg()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || Ok(deg));
        }
        calibrated_once(&mut imu);
        let mut task = HeadingTask::new(imu, cell.writer().unwrap());

        task.step();
        assert_eq!(cell.reader().get(), 0.0);
        // -90 deg from start wraps to 270
        task.step();
        assert!((cell.reader().get() - 3.0 * FRAC_PI_2).abs() < 1e-5);
        task.step();
        assert!((cell.reader().get() - 80.0 * PI / 180.0).abs() < 1e-5);
    }

    #[test]
    fn read_error_keeps_last_value() {
        let cell: Share<f32> = Share::new();
        let mut imu = MockImu::new();
        let mut seq = Sequence::new();
        imu.expect_read_heading_deg()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(10.0));
        imu.expect_read_heading_deg()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(100.0));
        imu.expect_read_heading_deg()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(Nack));
        calibrated_once(&mut imu);
        let mut task = HeadingTask::new(imu, cell.writer().unwrap());
        task.step();
        task.step();
        let before = cell.reader().get();
        task.step();
        assert_eq!(cell.reader().get(), before);
        assert!((before - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn calibration_read_failure_still_sets_reference() {
        let cell: Share<f32> = Share::new();
        let mut imu = MockImu::new();
        let mut seq = Sequence::new();
        for deg in [200.0, 290.0] {
            imu.expect_read_heading_deg()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || Ok(deg));
        }
        imu.expect_calibration().times(1).returning(|| Err(Nack));
        let mut task = HeadingTask::new(imu, cell.writer().unwrap());
        task.step();
        assert_eq!(cell.reader().get(), 0.0);
        task.step();
        assert!((cell.reader().get() - FRAC_PI_2).abs() < 1e-5);
    }

    fn imu_at(raw: i16) -> Bno055<FakeBus> {
        let mut bus = FakeBus::new();
        bus.set_heading_raw(raw);
        Bno055::new(bus, DEFAULT_I2C_ADDR)
    }

    #[test]
    fn reads_through_bno055() {
        let cell: Share<f32> = Share::new();
        let mut task = HeadingTask::new(imu_at(0), cell.writer().unwrap());
        task.step();
        // raw +90 deg reads as -90 deg after the mounting flip
        task.imu = imu_at(16 * 90);
        task.step();
        assert!((cell.reader().get() - 3.0 * FRAC_PI_2).abs() < 1e-5);
    }
}
