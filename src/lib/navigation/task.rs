use crate::config::sys_config::CALIBRATION_THRESHOLD;
use crate::controller::drive::{Drive, VelocityMeasurement};
use crate::drivers::encoder::quadrature::WheelEncoder;
use crate::drivers::motor::l6206;
use crate::navigation::kinematics::wheel_speeds;
use crate::navigation::line_sensor::LineReadings;
use crate::navigation::speed_profile::{profile, Maneuver};
use crate::navigation::state_machine::{Inputs, NavState, Navigator};
use crate::share::{Reader, Writer};
use crate::tasks::servo::{Blindfold, ServoDirection};

// Analog inputs sampled by the navigation task
#[cfg_attr(test, mockall::automock)]
pub trait SensorBank {
    fn read_line(&mut self) -> LineReadings;
    // calibration jumper, raw ADC counts
    fn read_calibration(&mut self) -> u16;
}

pub struct NavigationTask<'a, ML, MR, EL, ER, S> {
    drive: Drive<ML, MR>,
    left_encoder: EL,
    right_encoder: ER,
    sensors: S,
    navigator: Navigator,
    seconds_per_tick: f32,
    prev_ticks: Option<u64>,
    yaw: Reader<'a, f32>,
    range: Reader<'a, f32>,
    servo: Writer<'a, ServoDirection>,
    blindfold: Writer<'a, Blindfold>,
}

impl<'a, ML, MR, EL, ER, S> NavigationTask<'a, ML, MR, EL, ER, S>
where
    ML: l6206::Start + l6206::SetDuty,
    MR: l6206::Start + l6206::SetDuty,
    EL: WheelEncoder,
    ER: WheelEncoder,
    S: SensorBank,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        drive: Drive<ML, MR>,
        left_encoder: EL,
        right_encoder: ER,
        sensors: S,
        seconds_per_tick: f32,
        yaw: Reader<'a, f32>,
        range: Reader<'a, f32>,
        servo: Writer<'a, ServoDirection>,
        blindfold: Writer<'a, Blindfold>,
    ) -> Self {
        Self {
            drive,
            left_encoder,
            right_encoder,
            sensors,
            navigator: Navigator::new(),
            seconds_per_tick,
            prev_ticks: None,
            yaw,
            range,
            servo,
            blindfold,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn state(&self) -> NavState {
        self.navigator.state()
    }

    // One navigation cycle; now_ticks is the monotonic timer count. Only
    // the difference between samples is converted to seconds.
    pub fn step(&mut self, now_ticks: u64) {
        let dt = match self.prev_ticks {
            Some(prev) => now_ticks.saturating_sub(prev) as f32 * self.seconds_per_tick,
            None => 0.0,
        };
        self.prev_ticks = Some(now_ticks);
        self.left_encoder.update(dt);
        self.right_encoder.update(dt);

        let inputs = Inputs {
            yaw: self.yaw.get(),
            range_cm: self.range.get(),
            calibration_active: self.sensors.read_calibration() < CALIBRATION_THRESHOLD,
            line: self.sensors.read_line(),
            left_delta: self.left_encoder.delta(),
            right_delta: self.right_encoder.delta(),
        };
        let fx = self.navigator.step(&inputs);

        if let Some(direction) = fx.servo {
            self.servo.put(direction);
        }
        if let Some(blindfold) = fx.blindfold {
            self.blindfold.put(blindfold);
        }
        if inputs.calibration_active && fx.maneuver == Some(Maneuver::Stop) {
            // override: cut the bridges rather than servo to zero
            self.drive.stop();
        } else if let Some(maneuver) = fx.maneuver {
            let (v, yaw_rate) = profile(maneuver);
            self.drive.set_speed_targets(&wheel_speeds(v, yaw_rate));
            self.drive.step(&VelocityMeasurement {
                left: self.left_encoder.rad_per_s(),
                right: self.right_encoder.rad_per_s(),
            });
        }
    }
}
