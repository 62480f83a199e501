// Discrete PID loop run once per control period. The derivative is the
// difference of consecutive errors, so the gains assume a fixed call period.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TuningParams {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    // clamps the accumulated error to +/- i_lim when set
    pub i_lim: Option<f32>,
}

#[derive(Debug)]
pub struct Pid {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    i_lim: Option<f32>,
    integral: f32,
    prev_error: f32,
}

impl Pid {
    pub fn new(t: TuningParams) -> Pid {
        Pid {
            kp: t.kp,
            ki: t.ki,
            kd: t.kd,
            i_lim: t.i_lim,
            integral: 0.0,
            prev_error: 0.0,
        }
    }

    pub fn update(&mut self, setpoint: f32, measured: f32) -> f32 {
        let error = setpoint - measured;
        self.integral += error;
        if let Some(lim) = self.i_lim {
            self.integral = self.integral.clamp(-lim, lim);
        }
        let derivative = error - self.prev_error;
        self.prev_error = error;
        self.kp * error + self.ki * self.integral + self.kd * derivative
    }

    pub fn integral(&self) -> f32 {
        self.integral
    }
}
