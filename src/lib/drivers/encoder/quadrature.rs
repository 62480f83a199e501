use core::f32::consts::PI;
use embedded_hal::Qei;

use crate::config::sys_config::ENCODER_TICKS_PER_REV;

pub trait WheelEncoder {
    // sample the hardware counter; dt is the time since the previous
    // sample in seconds, 0 when unknown
    fn update(&mut self, dt: f32);
    // ticks since the previous update
    fn delta(&self) -> i32;
    // angular velocity over the previous update interval
    fn rad_per_s(&self) -> f32;
}

// Signed distance between two counter samples on a counter that wraps
// after `max`. Steps larger than half the range are taken as a wrap.
pub fn unwrap_delta(old: u32, new: u32, max: u32) -> i32 {
    let range = max as i64 + 1;
    let mut delta = new as i64 - old as i64;
    if delta > range / 2 {
        delta -= range;
    } else if delta < -(range / 2) {
        delta += range;
    }
    delta as i32
}

pub fn ticks_to_rad(ticks: i32) -> f32 {
    ticks as f32 / ENCODER_TICKS_PER_REV * 2.0 * PI
}

pub struct QeiWrapper<X> {
    encoder: X,
    counter_max: u32,
    old: u32,
    delta: i32,
    velocity: f32,
}

impl<X> QeiWrapper<X>
where
    X: Qei,
    X::Count: Into<u32>,
{
    // counter_max is the timer auto-reload value
    pub fn new(qei: X, counter_max: u32) -> Self {
        let old = qei.count().into();
        Self {
            encoder: qei,
            counter_max,
            old,
            delta: 0,
            velocity: 0.0,
        }
    }
}

impl<X> WheelEncoder for QeiWrapper<X>
where
    X: Qei,
    X::Count: Into<u32>,
{
    fn update(&mut self, dt: f32) {
        let new: u32 = self.encoder.count().into();
        self.delta = unwrap_delta(self.old, new, self.counter_max);
        self.old = new;
        self.velocity = if dt > 0.0 {
            ticks_to_rad(self.delta) / dt
        } else {
            0.0
        };
    }

    fn delta(&self) -> i32 {
        self.delta
    }

    fn rad_per_s(&self) -> f32 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal::Direction as RotaryDirection;
    use rstest::rstest;

    struct FakeQei<'a>(&'a Cell<u16>);

    impl Qei for FakeQei<'_> {
        type Count = u16;

        fn count(&self) -> u16 {
            self.0.get()
        }

        fn direction(&self) -> RotaryDirection {
            RotaryDirection::Upcounting
        }
    }

    #[rstest]
    #[case(100, 250, 5000, 150)]
    #[case(250, 100, 5000, -150)]
    #[case(4990, 10, 5000, 21)]
    #[case(10, 4990, 5000, -21)]
    #[case(65_530, 5, 65_535, 11)]
    #[case(0, u32::MAX, u32::MAX, -1)]
    fn unwraps_counter(#[case] old: u32, #[case] new: u32, #[case] max: u32, #[case] want: i32) {
        assert_eq!(unwrap_delta(old, new, max), want);
    }

    #[test]
    fn tracks_delta_across_updates() {
        let count = Cell::new(0u16);
        let mut enc = QeiWrapper::new(FakeQei(&count), 5000);
        count.set(1440);
        enc.update(0.001);
        assert_eq!(enc.delta(), 1440);
        count.set(1000);
        enc.update(0.001);
        assert_eq!(enc.delta(), -440);
        enc.update(0.001);
        assert_eq!(enc.delta(), 0);
    }

    #[test]
    fn velocity_from_interval() {
        let count = Cell::new(0u16);
        let mut enc = QeiWrapper::new(FakeQei(&count), 5000);
        count.set(720);
        // half a turn in half a second
        enc.update(0.5);
        assert!((enc.rad_per_s() - 2.0 * PI).abs() < 1e-4);
        count.set(730);
        enc.update(0.001);
        // 10 ticks per ms
        assert!((enc.rad_per_s() - 43.633).abs() < 1e-2);
    }

    #[test]
    fn unknown_interval_reads_as_standstill() {
        let count = Cell::new(0u16);
        let mut enc = QeiWrapper::new(FakeQei(&count), 5000);
        count.set(10);
        enc.update(0.0);
        assert_eq!(enc.delta(), 10);
        assert_eq!(enc.rad_per_s(), 0.0);
    }
}
