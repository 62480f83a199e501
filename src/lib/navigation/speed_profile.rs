use crate::config::tuning::*;

// Discrete drive command chosen each navigation cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Maneuver {
    Cross,
    NinetyLeft,
    NinetyRight,
    ReallyHardLeft,
    ReallyHardRight,
    HardLeft,
    HardRight,
    SoftLeft,
    SoftRight,
    StraightFast,
    Straight,
    Backup,
    Explore,
    PivotLeft,
    PivotRight,
    Wall1,
    Wall2,
    Stop,
    Done,
}

// (linear velocity m/s, yaw rate rad/s), positive yaw turns left
pub fn profile(maneuver: Maneuver) -> (f32, f32) {
    match maneuver {
        Maneuver::Cross => (V_STRAIGHT, Y_STRAIGHT),
        Maneuver::NinetyLeft => (V_90, Y_90),
        Maneuver::NinetyRight => (V_90, -Y_90),
        Maneuver::ReallyHardLeft => (V_REALLY_HARD, Y_REALLY_HARD),
        Maneuver::ReallyHardRight => (V_REALLY_HARD, -Y_REALLY_HARD),
        Maneuver::HardLeft => (V_HARD, Y_HARD),
        Maneuver::HardRight => (V_HARD, -Y_HARD),
        Maneuver::SoftLeft => (V_SOFT, Y_SOFT),
        Maneuver::SoftRight => (V_SOFT, -Y_SOFT),
        Maneuver::StraightFast => (V_STRAIGHT_FAST, Y_STRAIGHT),
        Maneuver::Straight => (V_STRAIGHT, Y_STRAIGHT),
        Maneuver::Backup => (-V_STRAIGHT, Y_STRAIGHT),
        Maneuver::Explore => (V_STRAIGHT, Y_STRAIGHT),
        Maneuver::PivotLeft => (V_PIVOT, Y_PIVOT),
        Maneuver::PivotRight => (V_PIVOT, -Y_PIVOT),
        Maneuver::Wall1 => (V_WALL1, Y_WALL),
        Maneuver::Wall2 => (V_WALL2, -Y_WALL),
        Maneuver::Stop => (V_STOP, Y_STOP),
        Maneuver::Done => (V_DONE, Y_DONE),
    }
}
