use crate::config::sys_config::{FORWARD_THRESHOLD, LINE_THRESHOLD};
use crate::navigation::speed_profile::Maneuver;

// Raw reflectance readings, low = dark line under the sensor.
// h is the forward-looking sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineReadings {
    pub l2: u16,
    pub l1: u16,
    pub m: u16,
    pub r1: u16,
    pub r2: u16,
    pub h: u16,
}

fn on_line(reading: u16) -> bool {
    reading < LINE_THRESHOLD
}

fn off_line(reading: u16) -> bool {
    reading > LINE_THRESHOLD
}

// First matching pattern wins, so wider patterns are listed before the
// narrower ones they contain.
pub fn classify(r: &LineReadings) -> Maneuver {
    let (l2, l1, m, r1, r2) = (
        on_line(r.l2),
        on_line(r.l1),
        on_line(r.m),
        on_line(r.r1),
        on_line(r.r2),
    );
    let ahead_clear = r.h > FORWARD_THRESHOLD;

    if l2 && l1 && m && r1 && r2 {
        Maneuver::Cross
    } else if l2 && l1 && m {
        Maneuver::NinetyLeft
    } else if m && r1 && r2 {
        Maneuver::NinetyRight
    } else if l2 && l1 {
        Maneuver::HardLeft
    } else if r2 && r1 {
        Maneuver::HardRight
    } else if l2 {
        Maneuver::ReallyHardLeft
    } else if r2 {
        Maneuver::ReallyHardRight
    } else if l1 {
        Maneuver::SoftLeft
    } else if r1 {
        Maneuver::SoftRight
    } else if m && ahead_clear {
        Maneuver::StraightFast
    } else if m || ahead_clear {
        Maneuver::Straight
    } else if [r.l2, r.l1, r.m, r.r1, r.r2].into_iter().all(off_line) && r.h < FORWARD_THRESHOLD {
        Maneuver::Explore
    } else {
        Maneuver::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ON: u16 = 500;
    const OFF: u16 = 3500;

    fn readings(l2: u16, l1: u16, m: u16, r1: u16, r2: u16, h: u16) -> LineReadings {
        LineReadings {
            l2,
            l1,
            m,
            r1,
            r2,
            h,
        }
    }

    #[rstest]
    #[case(readings(ON, ON, ON, ON, ON, 0), Maneuver::Cross)]
    #[case(readings(ON, ON, ON, OFF, OFF, 0), Maneuver::NinetyLeft)]
    #[case(readings(OFF, OFF, ON, ON, ON, 0), Maneuver::NinetyRight)]
    #[case(readings(ON, ON, OFF, OFF, OFF, 0), Maneuver::HardLeft)]
    #[case(readings(OFF, OFF, OFF, ON, ON, 0), Maneuver::HardRight)]
    #[case(readings(ON, OFF, OFF, OFF, OFF, 0), Maneuver::ReallyHardLeft)]
    #[case(readings(OFF, OFF, OFF, OFF, ON, 0), Maneuver::ReallyHardRight)]
    #[case(readings(OFF, ON, OFF, OFF, OFF, 0), Maneuver::SoftLeft)]
    #[case(readings(OFF, OFF, OFF, ON, OFF, 0), Maneuver::SoftRight)]
    #[case(readings(OFF, OFF, ON, OFF, OFF, 900), Maneuver::StraightFast)]
    #[case(readings(OFF, OFF, ON, OFF, OFF, 100), Maneuver::Straight)]
    #[case(readings(OFF, OFF, OFF, OFF, OFF, 900), Maneuver::Straight)]
    #[case(readings(OFF, OFF, OFF, OFF, OFF, 100), Maneuver::Explore)]
    fn classifies_patterns(#[case] r: LineReadings, #[case] want: Maneuver) {
        assert_eq!(classify(&r), want);
    }

    #[test]
    fn full_cross_beats_ninety_degree_patterns() {
        // both 90 patterns are subsets of this one
        assert_eq!(classify(&readings(0, 0, 0, 0, 0, 4000)), Maneuver::Cross);
    }

    #[test]
    fn left_pattern_wins_over_right() {
        assert_eq!(
            classify(&readings(ON, ON, OFF, ON, ON, 0)),
            Maneuver::HardLeft
        );
    }

    #[rstest]
    // exactly at threshold is neither on nor off the line
    #[case(readings(OFF, OFF, OFF, OFF, LINE_THRESHOLD, 100))]
    // forward sensor exactly at its threshold
    #[case(readings(OFF, OFF, OFF, OFF, OFF, FORWARD_THRESHOLD))]
    fn boundary_readings_stop(#[case] r: LineReadings) {
        assert_eq!(classify(&r), Maneuver::Stop);
    }
}
