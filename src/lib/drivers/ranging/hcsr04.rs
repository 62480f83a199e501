// HC-SR04 ultrasonic ranging.
//
// The echo pulse is timed from pin-change interrupts. A measurement that
// never completes is abandoned after a timeout.
//
// All timestamps are microseconds from a free-running wrapping counter.

use core::convert::Infallible;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

pub const TRIGGER_PULSE_US: u32 = 10;
// speed of sound, m/s
const SOUND_SPEED: f32 = 343.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangingError {
    // no complete echo within the allowed window
    Timeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EchoState {
    Idle,
    Triggered { at: u32 },
    Echo { at: u32, start: u32 },
    Done { duration_us: u32 },
}

// Echo edge timestamps, written from the echo pin interrupt and consumed by
// the ranging task.
#[derive(Debug)]
pub struct EchoCapture {
    state: EchoState,
}

impl EchoCapture {
    pub const fn new() -> Self {
        Self {
            state: EchoState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == EchoState::Idle
    }

    pub fn arm(&mut self, now_us: u32) {
        self.state = EchoState::Triggered { at: now_us };
    }

    // called on every echo pin edge with the pin level after the edge
    pub fn on_edge(&mut self, high: bool, now_us: u32) {
        self.state = match (self.state, high) {
            (EchoState::Triggered { at }, true) => EchoState::Echo { at, start: now_us },
            (EchoState::Echo { start, .. }, false) => EchoState::Done {
                duration_us: now_us.wrapping_sub(start),
            },
            // stray edge, keep waiting
            (state, _) => state,
        };
    }

    // Ok(distance in cm) once the echo is complete. The capture returns to
    // idle after a result or a timeout.
    pub fn poll(&mut self, now_us: u32, timeout_us: u32) -> nb::Result<f32, RangingError> {
        match self.state {
            EchoState::Idle => Err(nb::Error::WouldBlock),
            EchoState::Done { duration_us } => {
                self.state = EchoState::Idle;
                Ok(echo_to_cm(duration_us))
            }
            EchoState::Triggered { at } | EchoState::Echo { at, .. } => {
                if now_us.wrapping_sub(at) > timeout_us {
                    self.state = EchoState::Idle;
                    Err(nb::Error::Other(RangingError::Timeout))
                } else {
                    Err(nb::Error::WouldBlock)
                }
            }
        }
    }
}

impl Default for EchoCapture {
    fn default() -> Self {
        Self::new()
    }
}

// round trip time to one-way distance in centimeters
pub fn echo_to_cm(duration_us: u32) -> f32 {
    duration_us as f32 * SOUND_SPEED / 2.0 / 10_000.0
}

pub struct HcSr04<TRIG> {
    trig: TRIG,
}

impl<TRIG> HcSr04<TRIG>
where
    TRIG: OutputPin<Error = Infallible>,
{
    pub fn new(mut trig: TRIG) -> Self {
        trig.set_low().unwrap_or_else(|e| match e {});
        Self { trig }
    }

    // fire a 10 us trigger pulse and arm the capture for the echo
    pub fn trigger<D: DelayUs<u32>>(
        &mut self,
        delay: &mut D,
        capture: &mut EchoCapture,
        now_us: u32,
    ) {
        self.trig.set_high().unwrap_or_else(|e| match e {});
        delay.delay_us(TRIGGER_PULSE_US);
        self.trig.set_low().unwrap_or_else(|e| match e {});
        capture.arm(now_us);
    }
}
