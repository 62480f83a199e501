use crate::drivers::servo::mg90s::SetAngle;
use crate::share::{Reader, ShareValue};

// where the ultrasonic sensor looks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServoDirection {
    Forward = 0,
    Right = 1,
    Left = -1,
}

impl ServoDirection {
    pub fn angle_deg(self) -> f32 {
        match self {
            ServoDirection::Forward => 0.0,
            ServoDirection::Right => -90.0,
            ServoDirection::Left => 90.0,
        }
    }
}

impl ShareValue for ServoDirection {
    fn to_bits(self) -> u32 {
        self as i32 as u32
    }
    fn from_bits(bits: u32) -> Self {
        match bits as i32 {
            1 => ServoDirection::Right,
            -1 => ServoDirection::Left,
            _ => ServoDirection::Forward,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blindfold {
    Open = 0,
    Closed = 1,
}

impl Blindfold {
    pub fn angle_deg(self) -> f32 {
        match self {
            Blindfold::Open => -45.0,
            Blindfold::Closed => 90.0,
        }
    }
}

impl ShareValue for Blindfold {
    fn to_bits(self) -> u32 {
        self as u32
    }
    fn from_bits(bits: u32) -> Self {
        if bits == 0 {
            Blindfold::Open
        } else {
            Blindfold::Closed
        }
    }
}

// Points the ranging sensor and the blindfold as requested by navigation
pub struct ServoTask<'a, S1, S2> {
    sensor_servo: S1,
    blindfold_servo: S2,
    direction: Reader<'a, ServoDirection>,
    blindfold: Reader<'a, Blindfold>,
    last: Option<(ServoDirection, Blindfold)>,
}

impl<'a, S1, S2> ServoTask<'a, S1, S2>
where
    S1: SetAngle,
    S2: SetAngle,
{
    pub fn new(
        sensor_servo: S1,
        blindfold_servo: S2,
        direction: Reader<'a, ServoDirection>,
        blindfold: Reader<'a, Blindfold>,
    ) -> Self {
        Self {
            sensor_servo,
            blindfold_servo,
            direction,
            blindfold,
            last: None,
        }
    }

    pub fn step(&mut self) {
        let direction = self.direction.get();
        let blindfold = self.blindfold.get();
        self.blindfold_servo.set_angle(blindfold.angle_deg());
        self.sensor_servo.set_angle(direction.angle_deg());
        if self.last != Some((direction, blindfold)) {
            log::debug!("servo: sensor {:?}, blindfold {:?}", direction, blindfold);
            self.last = Some((direction, blindfold));
        }
    }
}
