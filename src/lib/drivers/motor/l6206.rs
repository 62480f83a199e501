use core::convert::Infallible;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::PwmPin;

pub trait Start {
    fn start(&mut self);
}

#[cfg_attr(test, mockall::automock)]
pub trait SetDuty {
    // percent in [-100, 100], sign selects direction
    fn set_duty(&mut self, percent: f32);
}

/*
Helper Function
input: any float, clamped to -100 < f < 100; NaN and infinities give 0
out: (duty, reverse) where duty is in [0, max_duty]
*/
pub fn convert_percent_to_duty(percent: f32, max_duty: u16) -> (u16, bool) {
    if !percent.is_finite() {
        return (0, false);
    }
    let reverse = percent < 0.0;
    let magnitude = libm::fabsf(percent).min(100.0);
    let duty = (magnitude / 100.0 * max_duty as f32) as u16; // truncate
    (duty.min(max_duty), reverse)
}

// L6206 half of a dual H-bridge: one PWM channel for speed, DIR for
// rotation sense and an active-high SLP (enable) line. The pins must be
// infallible, as the MCU's GPIO outputs are.
pub struct L6206<PWM, DIR, SLP> {
    pwm: PWM,
    dir: DIR,
    slp: SLP,
}

impl<PWM, DIR, SLP> L6206<PWM, DIR, SLP>
where
    PWM: PwmPin<Duty = u16>,
    DIR: OutputPin<Error = Infallible>,
    SLP: OutputPin<Error = Infallible>,
{
    pub fn new(mut pwm: PWM, dir: DIR, mut slp: SLP) -> Self {
        pwm.set_duty(0);
        // keep the bridge asleep until start()
        slp.set_low().unwrap_or_else(|e| match e {});
        Self { pwm, dir, slp }
    }
}

impl<PWM, DIR, SLP> Start for L6206<PWM, DIR, SLP>
where
    PWM: PwmPin<Duty = u16>,
    DIR: OutputPin<Error = Infallible>,
    SLP: OutputPin<Error = Infallible>,
{
    fn start(&mut self) {
        self.pwm.enable();
        self.slp.set_high().unwrap_or_else(|e| match e {});
    }
}

impl<PWM, DIR, SLP> SetDuty for L6206<PWM, DIR, SLP>
where
    PWM: PwmPin<Duty = u16>,
    DIR: OutputPin<Error = Infallible>,
    SLP: OutputPin<Error = Infallible>,
{
    fn set_duty(&mut self, percent: f32) {
        let (duty, reverse) = convert_percent_to_duty(percent, self.pwm.get_max_duty());
        if duty == 0 {
            self.pwm.set_duty(0);
            return;
        }
        let set = if reverse {
            self.dir.set_high()
        } else {
            self.dir.set_low()
        };
        set.unwrap_or_else(|e| match e {});
        self.pwm.set_duty(duty);
    }
}
