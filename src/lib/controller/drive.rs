use crate::controller::pid::{Pid, TuningParams};
use crate::drivers::motor::l6206;
use core::ops::Mul;

// Differential drive: one speed loop per wheel, closed on encoder rad/s
pub struct Drive<ML, MR> {
    left: MotorController<ML>,
    right: MotorController<MR>,
    directions: MotorDirections,
}

impl<ML, MR> Drive<ML, MR>
where
    ML: l6206::Start + l6206::SetDuty,
    MR: l6206::Start + l6206::SetDuty,
{
    pub fn new(left: ML, right: MR, tune: TuningParams, directions: MotorDirections) -> Self {
        let mut drive = Drive {
            left: MotorController::new(left, tune),
            right: MotorController::new(right, tune),
            directions,
        };
        drive.left.start();
        drive.right.start();
        drive
    }

    pub fn set_speed_targets(&mut self, targets: &WheelSetPoints) {
        self.left
            .set_speed_target(self.directions.left * targets.left);
        self.right
            .set_speed_target(self.directions.right * targets.right);
    }

    // one control period; returns the duty commands (percent)
    pub fn step(&mut self, vels: &VelocityMeasurement) -> (f32, f32) {
        (
            self.left.step(self.directions.left * vels.left),
            self.right.step(self.directions.right * vels.right),
        )
    }

    pub fn stop(&mut self) {
        self.left.stop();
        self.right.stop();
    }
}

struct MotorController<MotorT> {
    motor: MotorT,
    pid: Pid,
    target: f32,
}

impl<MotorT> MotorController<MotorT>
where
    MotorT: l6206::Start + l6206::SetDuty,
{
    fn new(motor: MotorT, t: TuningParams) -> MotorController<MotorT> {
        MotorController {
            motor,
            pid: Pid::new(t),
            target: 0.0,
        }
    }

    fn start(&mut self) {
        self.motor.start();
    }

    fn set_speed_target(&mut self, target: f32) {
        self.target = target;
    }

    fn step(&mut self, current_velocity: f32) -> f32 {
        let output = self.pid.update(self.target, current_velocity);
        self.motor.set_duty(output);
        output
    }

    fn stop(&mut self) {
        self.target = 0.0;
        self.motor.set_duty(0.0);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityMeasurement {
    pub left: f32,
    pub right: f32,
}

// wheel angular velocity targets, rad/s
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelSetPoints {
    pub left: f32,
    pub right: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Backward = -1,
    Forward = 1,
}
impl Mul<f32> for Direction {
    type Output = f32;
    fn mul(self, rhs: f32) -> Self::Output {
        self as i32 as f32 * rhs
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MotorDirections {
    pub left: Direction,
    pub right: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::*;

    mock! {
        Motor {}
        impl l6206::Start for Motor {
            fn start(&mut self);
        }
        impl l6206::SetDuty for Motor {
            fn set_duty(&mut self, percent: f32);
        }
    }

    const P_ONLY: TuningParams = TuningParams {
        kp: 2.0,
        ki: 0.0,
        kd: 0.0,
        i_lim: None,
    };

    const SAME: MotorDirections = MotorDirections {
        left: Direction::Forward,
        right: Direction::Forward,
    };

    fn started() -> MockMotor {
        let mut m = MockMotor::new();
        m.expect_start().times(1).return_const(());
        m
    }

    #[test]
    fn motors_start_on_construction() {
        let _drive = Drive::new(started(), started(), P_ONLY, SAME);
    }

    #[test]
    fn step_drives_each_wheel_toward_target() {
        let mut left = started();
        let mut right = started();
        left.expect_set_duty()
            .with(eq(6.0))
            .times(1)
            .return_const(());
        right
            .expect_set_duty()
            .with(eq(-2.0))
            .times(1)
            .return_const(());

        let mut drive = Drive::new(left, right, P_ONLY, SAME);
        drive.set_speed_targets(&WheelSetPoints {
            left: 4.0,
            right: 1.0,
        });
        let out = drive.step(&VelocityMeasurement {
            left: 1.0,
            right: 2.0,
        });
        assert_eq!(out, (6.0, -2.0));
    }

    #[test]
    fn mirrored_wheel_flips_target_and_measurement() {
        let mut left = started();
        let mut right = started();
        left.expect_set_duty().return_const(());
        // error = (-3) - (-1) = -2
        right
            .expect_set_duty()
            .with(eq(-4.0))
            .times(1)
            .return_const(());

        let dirs = MotorDirections {
            left: Direction::Forward,
            right: Direction::Backward,
        };
        let mut drive = Drive::new(left, right, P_ONLY, dirs);
        drive.set_speed_targets(&WheelSetPoints {
            left: 0.0,
            right: 3.0,
        });
        drive.step(&VelocityMeasurement {
            left: 0.0,
            right: 1.0,
        });
    }

    #[test]
    fn stop_zeroes_duty_and_targets() {
        let mut left = started();
        let mut right = started();
        // once from stop(), once from the next step at standstill
        left.expect_set_duty()
            .with(eq(0.0))
            .times(2)
            .return_const(());
        right
            .expect_set_duty()
            .with(eq(0.0))
            .times(2)
            .return_const(());

        let mut drive = Drive::new(left, right, P_ONLY, SAME);
        drive.set_speed_targets(&WheelSetPoints {
            left: 5.0,
            right: 5.0,
        });
        drive.stop();
        let out = drive.step(&VelocityMeasurement::default());
        assert_eq!(out, (0.0, 0.0));
    }
}
