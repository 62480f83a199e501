// Robot geometry and sensing thresholds. Distances in meters unless noted.

// drivetrain
pub const WHEEL_RADIUS_M: f32 = 0.035;
pub const WHEEL_DIAMETER_M: f32 = 0.070;
pub const HALF_TRACK_M: f32 = 0.075;
pub const ENCODER_TICKS_PER_REV: f32 = 1440.0;

// line sensors (raw ADC counts)
// a reflectance reading below this means the sensor sits over the line
pub const LINE_THRESHOLD: u16 = 2000;
// forward sensor reads above this when the track ahead is clear
pub const FORWARD_THRESHOLD: u16 = 500;
// calibration jumper pulls the input below this
pub const CALIBRATION_THRESHOLD: u16 = 10;

// ultrasonic ranging, centimeters
pub const OBSTACLE_DISTANCE_CM: f32 = 15.0;
pub const WALL_CLEAR_DISTANCE_CM: f32 = 30.0;

pub const HEADING_TOLERANCE_RAD: f32 = 0.1;
pub const HOME_TOLERANCE_M: f32 = 0.02;
// distance driven without seeing a line before the target is declared
pub const EXPLORE_LIMIT_M: f32 = 0.15;

// headings held while dead reckoning back to the origin
pub const RETURN_X_HEADING_RAD: f32 = core::f32::consts::PI;
pub const RETURN_Y_HEADING_RAD: f32 = core::f32::consts::FRAC_PI_2;
