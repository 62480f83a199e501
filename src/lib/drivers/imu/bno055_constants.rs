pub const DEFAULT_I2C_ADDR: u8 = 0x28;

pub const CHIP_ID: u8 = 0xA0;

// page 0 register map
pub const REG_CHIP_ID: u8 = 0x00;
pub const REG_EUL_HEADING_LSB: u8 = 0x1A;
pub const REG_CALIB_STAT: u8 = 0x35;
pub const REG_OPR_MODE: u8 = 0x3D;

// 1 LSB = 1/16 degree for Euler angles in default units
pub const LSB_PER_DEG: f32 = 16.0;

// datasheet: 7 ms into a fusion mode, 19 ms back to config
pub const MODE_SWITCH_DELAY_MS: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum OperationMode {
    Config = 0x00,
    // 9-axis fusion with fast magnetometer calibration
    Ndof = 0x0C,
}
