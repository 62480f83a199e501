#![cfg_attr(not(test), no_std)]

pub mod config {
    pub mod sys_config;
    pub mod tuning;
}

pub mod controller {
    pub mod drive;
    pub mod pid;
}

pub mod drivers {
    pub mod encoder {
        pub mod quadrature;
    }
    pub mod imu {
        pub mod bno055;
        pub mod bno055_constants;
    }
    pub mod motor {
        pub mod l6206;
    }
    pub mod ranging {
        pub mod hcsr04;
    }
    pub mod servo {
        pub mod mg90s;
    }
}

pub mod navigation {
    pub mod heading;
    pub mod kinematics;
    pub mod line_sensor;
    pub mod odometry;
    pub mod speed_profile;
    pub mod state_machine;
    pub mod task;
}

pub mod share;

pub mod tasks {
    pub mod heading;
    pub mod ranging;
    pub mod servo;
}
