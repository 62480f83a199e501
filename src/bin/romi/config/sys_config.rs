use log::LevelFilter;

pub const SYSCLK_HZ: u32 = 48_000_000;
pub const SECONDS_PER_TICK: f32 = 0.001;

// task periods, ms
pub const NAVIGATION_PERIOD_MS: u64 = 1;
pub const HEADING_PERIOD_MS: u64 = 1;
pub const SERVO_PERIOD_MS: u64 = 5;
pub const RANGING_PERIOD_MS: u64 = 5;
// let the IMU settle in fusion mode before the first read
pub const STARTUP_DELAY_MS: u64 = 100;

pub const MOTOR_PWM_HZ: u32 = 20_000;
pub const SERVO_PWM_HZ: u32 = 50;

// Qei leaves the auto-reload at the counter width
pub const LEFT_ENCODER_COUNTER_MAX: u32 = u32::MAX; // TIM2, 32 bit
pub const RIGHT_ENCODER_COUNTER_MAX: u32 = u16::MAX as u32; // TIM1, 16 bit

pub const IMU_ADDRESS: u8 = romi::drivers::imu::bno055::DEFAULT_I2C_ADDR;
pub const I2C_FREQUENCY_KHZ: u32 = 100;

// longest echo is ~25 ms at 4 m
pub const ECHO_TIMEOUT_US: u32 = 30_000;
// published until the first echo comes back
pub const RANGE_UNKNOWN_CM: f32 = f32::INFINITY;

pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;
