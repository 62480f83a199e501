use embedded_hal::PwmPin;

// servo frame at 50 Hz
const PERIOD_MS: f32 = 20.0;
const CENTER_PULSE_MS: f32 = 1.5;

#[cfg_attr(test, mockall::automock)]
pub trait SetAngle {
    // degrees in [-90, 90]
    fn set_angle(&mut self, degrees: f32);
}

// fraction of the PWM period that positions the horn at `degrees`
pub fn angle_to_duty_fraction(degrees: f32) -> f32 {
    let pulse_ms = CENTER_PULSE_MS + degrees.clamp(-90.0, 90.0) / 90.0;
    pulse_ms / PERIOD_MS
}

pub struct MG90S<PWM> {
    pwm: PWM,
}

impl<PWM> MG90S<PWM>
where
    PWM: PwmPin<Duty = u16>,
{
    // pwm must already run at 50 Hz
    pub fn new(mut pwm: PWM) -> Self {
        pwm.set_duty(0);
        pwm.enable();
        Self { pwm }
    }
}

impl<PWM> SetAngle for MG90S<PWM>
where
    PWM: PwmPin<Duty = u16>,
{
    fn set_angle(&mut self, degrees: f32) {
        let max = self.pwm.get_max_duty();
        let duty = angle_to_duty_fraction(degrees) * max as f32;
        self.pwm.set_duty(libm::roundf(duty) as u16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct FakePwm {
        duty: u16,
    }

    impl PwmPin for FakePwm {
        type Duty = u16;

        fn disable(&mut self) {}
        fn enable(&mut self) {}
        fn get_duty(&self) -> u16 {
            self.duty
        }
        fn get_max_duty(&self) -> u16 {
            20_000
        }
        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    #[rstest]
    #[case(0.0, 1500)]
    #[case(90.0, 2500)]
    #[case(-90.0, 500)]
    #[case(-45.0, 1000)]
    #[case(180.0, 2500)]
    fn pulse_width_in_microseconds(#[case] degrees: f32, #[case] want: u16) {
        // 20_000 counts per 20 ms frame = 1 count per microsecond
        let mut servo = MG90S::new(FakePwm { duty: 0 });
        servo.set_angle(degrees);
        assert_eq!(servo.pwm.get_duty(), want);
    }
}
