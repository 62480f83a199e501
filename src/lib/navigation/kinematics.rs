use crate::config::sys_config::{HALF_TRACK_M, WHEEL_RADIUS_M};
use crate::controller::drive::WheelSetPoints;

// (v m/s, yaw rate rad/s) -> wheel angular velocities, rad/s
pub fn wheel_speeds(v: f32, yaw_rate: f32) -> WheelSetPoints {
    WheelSetPoints {
        left: (v - HALF_TRACK_M * yaw_rate) / WHEEL_RADIUS_M,
        right: (v + HALF_TRACK_M * yaw_rate) / WHEEL_RADIUS_M,
    }
}
