use core::f32::consts::PI;
use libm::{cosf, sinf, sqrtf};

use crate::config::sys_config::{ENCODER_TICKS_PER_REV, WHEEL_DIAMETER_M};

const METERS_PER_TICK: f32 = PI * WHEEL_DIAMETER_M / ENCODER_TICKS_PER_REV;

// Dead-reckoned position in the start frame, meters. Heading is taken
// from the IMU rather than from wheel differences.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Odometry {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    pub dx: f32,
    pub dy: f32,
}

impl Displacement {
    pub fn length(&self) -> f32 {
        sqrtf(self.dx * self.dx + self.dy * self.dy)
    }
}

impl Odometry {
    pub fn new() -> Self {
        Self::default()
    }

    // Advance by one control period of encoder ticks along `yaw`.
    // The whole step uses the single heading sample. The wheel average
    // truncates toward zero, so a lone tick on one wheel while pivoting
    // is not counted as travel.
    pub fn integrate(&mut self, left_delta: i32, right_delta: i32, yaw: f32) -> Displacement {
        let ticks = (right_delta + left_delta) / 2;
        let distance = ticks as f32 * METERS_PER_TICK;
        let step = Displacement {
            dx: distance * cosf(yaw),
            dy: distance * sinf(yaw),
        };
        self.x += step.dx;
        self.y += step.dy;
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;
    use rstest::rstest;

    #[test]
    fn straight_run_along_x() {
        let mut odo = Odometry::new();
        let deltas = [10, 25, -4, 144, 0];
        for d in deltas {
            odo.integrate(d, d, 0.0);
        }
        let sum: i32 = deltas.iter().sum();
        let want = sum as f32 * (PI * 0.070 / 1440.0);
        assert!((odo.x - want).abs() < 1e-6);
        assert_eq!(odo.y, 0.0);
    }

    #[test]
    fn heading_rotates_step() {
        let mut odo = Odometry::new();
        let step = odo.integrate(1440, 1440, FRAC_PI_2);
        // one wheel turn
        assert!((step.dy - PI * 0.070).abs() < 1e-5);
        assert!(step.dx.abs() < 1e-6);
        assert!((step.length() - PI * 0.070).abs() < 1e-5);
    }

    #[test]
    fn wheel_average_truncates_toward_zero() {
        let mut odo = Odometry::new();
        // (3 + 4) / 2 = 3.5 -> 3 ticks
        odo.integrate(3, 4, 0.0);
        assert!((odo.x - 3.0 * METERS_PER_TICK).abs() < 1e-9);
        // -3.5 -> -3 ticks
        odo.integrate(-3, -4, 0.0);
        assert!(odo.x.abs() < 1e-9);
        // pivot in place does not move the robot
        let step = odo.integrate(-50, 50, 0.0);
        assert_eq!(step.length(), 0.0);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(0, 1)]
    #[case(-1, 0)]
    #[case(0, -1)]
    #[case(-25, 26)]
    #[case(26, -25)]
    fn lone_tick_while_pivoting_is_not_travel(#[case] left: i32, #[case] right: i32) {
        let mut odo = Odometry::new();
        for yaw in [0.0, FRAC_PI_2, PI, 4.0] {
            let step = odo.integrate(left, right, yaw);
            assert_eq!(step, Displacement::default());
        }
        assert_eq!(odo, Odometry::new());
    }
}
