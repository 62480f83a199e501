use crate::controller::drive::{Direction, MotorDirections};
use crate::controller::pid::TuningParams;

pub const WHEEL_PID_KP: f32 = 3.0;
pub const WHEEL_PID_KI: f32 = 0.5;
pub const WHEEL_PID_KD: f32 = 0.5;
// None keeps the integral unbounded
pub const WHEEL_PID_I_LIM: Option<f32> = None;

pub const WHEEL_TUNING: TuningParams = TuningParams {
    kp: WHEEL_PID_KP,
    ki: WHEEL_PID_KI,
    kd: WHEEL_PID_KD,
    i_lim: WHEEL_PID_I_LIM,
};

pub const MOTOR_DIRECTIONS: MotorDirections = MotorDirections {
    left: Direction::Forward,
    right: Direction::Forward,
};

// Speed profile: linear speed in m/s, yaw rate in rad/s
pub const V_STOP: f32 = 0.0;
pub const V_PIVOT: f32 = 0.0;
pub const V_WALL1: f32 = 0.125;
pub const V_WALL2: f32 = 0.225;
pub const V_90: f32 = 0.125;
pub const V_REALLY_HARD: f32 = 0.1;
pub const V_HARD: f32 = 0.125;
pub const V_SOFT: f32 = 0.2;
pub const V_STRAIGHT: f32 = 0.25;
pub const V_STRAIGHT_FAST: f32 = 0.3;
pub const V_DONE: f32 = 0.0;

pub const Y_STOP: f32 = 0.0;
pub const Y_STRAIGHT: f32 = 0.0;
pub const Y_PIVOT: f32 = 1.0;
pub const Y_WALL: f32 = 1.2;
pub const Y_90: f32 = 2.5;
pub const Y_REALLY_HARD: f32 = 2.25;
pub const Y_HARD: f32 = 2.0;
pub const Y_SOFT: f32 = 1.0;
pub const Y_DONE: f32 = 2.0;
