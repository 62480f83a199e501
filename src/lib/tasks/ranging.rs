use core::convert::Infallible;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::drivers::ranging::hcsr04::{EchoCapture, HcSr04, RangingError};
use crate::share::Writer;

// Keeps one ultrasonic measurement in flight and publishes each result.
// A missing echo is logged and the previous distance stays published.
pub struct RangingTask<'a, TRIG> {
    sensor: HcSr04<TRIG>,
    distance: Writer<'a, f32>,
    timeout_us: u32,
}

impl<'a, TRIG> RangingTask<'a, TRIG>
where
    TRIG: OutputPin<Error = Infallible>,
{
    pub fn new(sensor: HcSr04<TRIG>, distance: Writer<'a, f32>, timeout_us: u32) -> Self {
        Self {
            sensor,
            distance,
            timeout_us,
        }
    }

    pub fn step<D: DelayUs<u32>>(&mut self, capture: &mut EchoCapture, delay: &mut D, now_us: u32) {
        match capture.poll(now_us, self.timeout_us) {
            Ok(cm) => self.distance.put(cm),
            Err(nb::Error::Other(RangingError::Timeout)) => {
                log::warn!("ranging: no echo within {} us", self.timeout_us)
            }
            Err(nb::Error::WouldBlock) => {}
        }
        if capture.is_idle() {
            self.sensor.trigger(delay, capture, now_us);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::Share;
    use core::cell::RefCell;

    const TIMEOUT_US: u32 = 30_000;

    struct TrigPin<'a>(&'a RefCell<Vec<bool>>);

    impl OutputPin for TrigPin<'_> {
        type Error = Infallible;
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(false);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(true);
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayUs<u32> for NoDelay {
        fn delay_us(&mut self, _us: u32) {}
    }

    #[test]
    fn triggers_then_publishes_distance() {
        let levels = RefCell::new(Vec::new());
        let cell: Share<f32> = Share::new();
        let mut capture = EchoCapture::new();
        let mut task = RangingTask::new(
            HcSr04::new(TrigPin(&levels)),
            cell.writer().unwrap(),
            TIMEOUT_US,
        );

        task.step(&mut capture, &mut NoDelay, 0);
        assert_eq!(*levels.borrow(), vec![false, true, false]);
        assert!(!capture.is_idle());

        // still waiting for the echo: no new trigger
        task.step(&mut capture, &mut NoDelay, 5_000);
        assert_eq!(levels.borrow().len(), 3);

        capture.on_edge(true, 5_100);
        capture.on_edge(false, 5_100 + 1_166);
        task.step(&mut capture, &mut NoDelay, 10_000);
        assert!((cell.reader().get() - 20.0).abs() < 0.01);
        // next measurement started in the same step
        assert_eq!(levels.borrow().len(), 5);
    }

    #[test]
    fn timeout_keeps_previous_distance() {
        let levels = RefCell::new(Vec::new());
        let cell: Share<f32> = Share::new();
        let mut capture = EchoCapture::new();
        let mut task = RangingTask::new(
            HcSr04::new(TrigPin(&levels)),
            cell.writer().unwrap(),
            TIMEOUT_US,
        );

        task.step(&mut capture, &mut NoDelay, 0);
        capture.on_edge(true, 100);
        capture.on_edge(false, 683);
        task.step(&mut capture, &mut NoDelay, 5_000);
        let before = cell.reader().get();
        assert!((before - 10.0).abs() < 0.01);

        // sensor unplugged: nothing comes back
        task.step(&mut capture, &mut NoDelay, 10_000);
        task.step(&mut capture, &mut NoDelay, 5_000 + TIMEOUT_US + 1);
        assert_eq!(cell.reader().get(), before);
        // a fresh trigger went out after giving up
        assert!(!capture.is_idle());
        assert_eq!(levels.borrow().len(), 7);
    }
}
