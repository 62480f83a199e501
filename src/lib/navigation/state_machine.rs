// Line following, wall avoidance and the return to the start point.
//
// `Navigator::step` is one control cycle: it takes a snapshot of the
// sensors and returns what the actuators should do. It never touches
// hardware, so the whole sequence can be replayed on the host.
//
// HUB is a decision-only state. Every other state runs for one cycle and
// either hands back to HUB or stays put until its exit condition holds.
//
//   INIT -> HUB -> PATH -> HUB ...
//            |-> WALL1 -> WALL2 -> WALL3 -> WALL4 -> HUB
//            |-> RETURN_X / RETURN_Y -> HUB
//            |-> HOME_DONE -> HUB

use core::f32::consts::FRAC_PI_2;
use libm::fabsf;

use crate::config::sys_config::{
    EXPLORE_LIMIT_M, HEADING_TOLERANCE_RAD, HOME_TOLERANCE_M, OBSTACLE_DISTANCE_CM,
    RETURN_X_HEADING_RAD, RETURN_Y_HEADING_RAD, WALL_CLEAR_DISTANCE_CM,
};
use crate::navigation::heading::{heading_error, is_aligned, normalize};
use crate::navigation::line_sensor::{classify, LineReadings};
use crate::navigation::odometry::{Displacement, Odometry};
use crate::navigation::speed_profile::Maneuver;
use crate::tasks::servo::{Blindfold, ServoDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    Init,
    Hub,
    Path,
    Wall1,
    Wall2,
    Wall3,
    Wall4,
    ReturnX,
    ReturnY,
    HomeDone,
}

// progress through the course; cleared together by the calibration override
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    // obstacle already avoided
    pub wall: bool,
    // explored past the end of the line
    pub target: bool,
    // back within tolerance of the start point
    pub home: bool,
}

// One cycle's view of the world
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Inputs {
    // rad, [0, 2pi)
    pub yaw: f32,
    pub range_cm: f32,
    pub calibration_active: bool,
    pub line: LineReadings,
    // encoder ticks since the previous cycle
    pub left_delta: i32,
    pub right_delta: i32,
}

// What the actuators should do this cycle. `None` leaves the actuator as
// it is: no wheel update, no write to the shared cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    pub maneuver: Option<Maneuver>,
    pub servo: Option<ServoDirection>,
    pub blindfold: Option<Blindfold>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnDecision {
    ReturnX,
    ReturnY,
    Home,
}

// Y is closed first, then X; home only when both are inside tolerance
pub fn check_return(x: f32, y: f32) -> ReturnDecision {
    if fabsf(y) > HOME_TOLERANCE_M {
        ReturnDecision::ReturnY
    } else if fabsf(x) > HOME_TOLERANCE_M {
        ReturnDecision::ReturnX
    } else {
        ReturnDecision::Home
    }
}

// pivot onto `target_yaw`, then drive along it until `offset` is closed
fn return_maneuver(yaw: f32, target_yaw: f32, offset: f32, forward_closes: bool) -> Maneuver {
    let error = heading_error(yaw, target_yaw);
    if error > HEADING_TOLERANCE_RAD {
        Maneuver::PivotRight
    } else if error < -HEADING_TOLERANCE_RAD {
        Maneuver::PivotLeft
    } else if fabsf(offset) > HOME_TOLERANCE_M {
        if (offset > 0.0) == forward_closes {
            Maneuver::Straight
        } else {
            Maneuver::Backup
        }
    } else {
        Maneuver::Stop
    }
}

#[derive(Debug)]
pub struct Navigator {
    state: NavState,
    flags: Flags,
    odometry: Odometry,
    // heading when the obstacle was seen, and the two side-step headings
    old_yaw: f32,
    wall1_yaw: f32,
    wall2_yaw: f32,
    explore_distance: f32,
    last_maneuver: Maneuver,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            state: NavState::Init,
            flags: Flags::default(),
            odometry: Odometry::new(),
            old_yaw: 0.0,
            wall1_yaw: 0.0,
            wall2_yaw: 0.0,
            explore_distance: 0.0,
            last_maneuver: Maneuver::Stop,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn pose(&self) -> Odometry {
        self.odometry
    }

    pub fn old_yaw(&self) -> f32 {
        self.old_yaw
    }

    pub fn wall1_yaw(&self) -> f32 {
        self.wall1_yaw
    }

    pub fn wall2_yaw(&self) -> f32 {
        self.wall2_yaw
    }

    pub fn explore_distance(&self) -> f32 {
        self.explore_distance
    }

    pub fn step(&mut self, inputs: &Inputs) -> Effects {
        let mut fx = Effects::default();
        if self.state == NavState::Init {
            log::debug!("nav: ready");
            self.state = NavState::Hub;
            return fx;
        }

        let moved = self
            .odometry
            .integrate(inputs.left_delta, inputs.right_delta, inputs.yaw);

        match self.state {
            NavState::Init => {}
            NavState::Hub => self.hub(inputs, &mut fx),
            NavState::Path => self.path(inputs, moved, &mut fx),
            NavState::Wall1
            | NavState::Wall2
            | NavState::Wall3
            | NavState::Wall4
            | NavState::ReturnX
            | NavState::ReturnY
                if inputs.calibration_active =>
            {
                self.abort(&mut fx)
            }
            NavState::Wall1 => self.wall1(inputs, &mut fx),
            NavState::Wall2 => self.wall2(inputs, &mut fx),
            NavState::Wall3 => self.wall3(inputs, &mut fx),
            NavState::Wall4 => self.wall4(inputs, &mut fx),
            NavState::ReturnX => self.return_x(inputs, &mut fx),
            NavState::ReturnY => self.return_y(inputs, &mut fx),
            NavState::HomeDone => self.home_done(inputs, &mut fx),
        }

        if let Some(m) = fx.maneuver {
            self.last_maneuver = m;
        }
        fx
    }

    fn set_state(&mut self, next: NavState) {
        if next != self.state {
            log::debug!("nav: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn abort(&mut self, fx: &mut Effects) {
        log::info!("nav: calibration override in {:?}", self.state);
        fx.maneuver = Some(Maneuver::Stop);
        self.set_state(NavState::Hub);
    }

    fn hub(&mut self, inputs: &Inputs, fx: &mut Effects) {
        if inputs.calibration_active {
            if self.flags != Flags::default() {
                log::info!("nav: calibration override, progress cleared");
            }
            fx.maneuver = Some(Maneuver::Stop);
            fx.servo = Some(ServoDirection::Forward);
            self.flags = Flags::default();
            return;
        }

        let Flags { wall, target, home } = self.flags;
        if home && target {
            self.set_state(NavState::HomeDone);
        } else if !target {
            if inputs.range_cm > OBSTACLE_DISTANCE_CM {
                // PATH and HUB alternate every cycle while following the line
                self.state = NavState::Path;
            } else {
                self.old_yaw = inputs.yaw;
                self.wall1_yaw = normalize(self.old_yaw + FRAC_PI_2);
                if wall {
                    self.state = NavState::Path;
                } else {
                    log::info!(
                        "nav: obstacle at {} cm, heading {} rad",
                        inputs.range_cm,
                        self.old_yaw
                    );
                    self.set_state(NavState::Wall1);
                }
            }
        } else {
            let pose = self.odometry;
            match check_return(pose.x, pose.y) {
                ReturnDecision::ReturnY => self.set_state(NavState::ReturnY),
                ReturnDecision::ReturnX => self.set_state(NavState::ReturnX),
                ReturnDecision::Home => {
                    log::info!("nav: home reached at ({}, {})", pose.x, pose.y);
                    self.flags.home = true;
                }
            }
        }
    }

    fn path(&mut self, inputs: &Inputs, moved: Displacement, fx: &mut Effects) {
        let mut maneuver = classify(&inputs.line);
        if maneuver == Maneuver::Explore {
            self.explore_distance += moved.length();
            if self.explore_distance > EXPLORE_LIMIT_M {
                maneuver = Maneuver::Stop;
                if !self.flags.target {
                    let pose = self.odometry;
                    log::info!("nav: target reached at ({}, {})", pose.x, pose.y);
                }
                self.flags.target = true;
            }
        } else {
            self.explore_distance = 0.0;
        }
        fx.maneuver = Some(maneuver);
        fx.servo = Some(ServoDirection::Forward);
        self.state = NavState::Hub;
    }

    // turn away from the obstacle, then drive until it is no longer beside us
    fn wall1(&mut self, inputs: &Inputs, fx: &mut Effects) {
        fx.servo = Some(ServoDirection::Right);
        if !is_aligned(inputs.yaw, self.wall1_yaw, HEADING_TOLERANCE_RAD) {
            fx.maneuver = Some(Maneuver::Wall1);
        } else if inputs.range_cm < WALL_CLEAR_DISTANCE_CM {
            fx.maneuver = Some(Maneuver::Straight);
        } else {
            fx.maneuver = Some(self.last_maneuver);
            self.set_state(NavState::Wall2);
        }
    }

    // back onto the original heading, past the obstacle
    fn wall2(&mut self, inputs: &Inputs, fx: &mut Effects) {
        fx.servo = Some(ServoDirection::Right);
        if !is_aligned(inputs.yaw, self.old_yaw, HEADING_TOLERANCE_RAD) {
            fx.maneuver = Some(Maneuver::Wall2);
        } else if inputs.range_cm < WALL_CLEAR_DISTANCE_CM {
            fx.maneuver = Some(Maneuver::Straight);
        } else {
            self.old_yaw = inputs.yaw;
            self.wall2_yaw = normalize(self.old_yaw - FRAC_PI_2);
            fx.maneuver = Some(self.last_maneuver);
            self.set_state(NavState::Wall3);
        }
    }

    // turn back toward the line and search for it
    fn wall3(&mut self, inputs: &Inputs, fx: &mut Effects) {
        fx.servo = Some(ServoDirection::Right);
        if !is_aligned(inputs.yaw, self.wall2_yaw, HEADING_TOLERANCE_RAD) {
            fx.maneuver = Some(Maneuver::Wall2);
            return;
        }
        let maneuver = classify(&inputs.line);
        fx.maneuver = Some(maneuver);
        if maneuver != Maneuver::Explore {
            self.set_state(NavState::Wall4);
        }
    }

    // line found; square up with the course again
    fn wall4(&mut self, inputs: &Inputs, fx: &mut Effects) {
        fx.servo = Some(ServoDirection::Left);
        if !is_aligned(inputs.yaw, self.old_yaw, HEADING_TOLERANCE_RAD) {
            fx.maneuver = Some(Maneuver::Wall1);
        } else {
            log::info!("nav: wall cleared");
            self.flags.wall = true;
            fx.maneuver = Some(self.last_maneuver);
            self.set_state(NavState::Hub);
        }
    }

    fn return_x(&mut self, inputs: &Inputs, fx: &mut Effects) {
        fx.servo = Some(ServoDirection::Forward);
        fx.blindfold = Some(Blindfold::Open);
        fx.maneuver = Some(return_maneuver(
            inputs.yaw,
            RETURN_X_HEADING_RAD,
            self.odometry.x,
            true,
        ));
        self.set_state(NavState::Hub);
    }

    fn return_y(&mut self, inputs: &Inputs, fx: &mut Effects) {
        fx.servo = Some(ServoDirection::Forward);
        fx.blindfold = Some(Blindfold::Closed);
        fx.maneuver = Some(return_maneuver(
            inputs.yaw,
            RETURN_Y_HEADING_RAD,
            self.odometry.y,
            false,
        ));
        self.set_state(NavState::Hub);
    }

    fn home_done(&mut self, inputs: &Inputs, fx: &mut Effects) {
        fx.blindfold = Some(Blindfold::Closed);
        if inputs.calibration_active {
            self.flags.home = false;
            fx.maneuver = Some(Maneuver::Stop);
        } else {
            fx.maneuver = Some(Maneuver::Done);
        }
        self.set_state(NavState::Hub);
    }
}
