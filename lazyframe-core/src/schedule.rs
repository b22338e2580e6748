//! Schedules of scalar hyperparameters over environment steps.
//!
//! Used for the exploration rate and the learning rate multiplier of a
//! training loop. A schedule is a pure function of the step counter.
use crate::LazyFrameError;
use serde::{Deserialize, Serialize};

/// A scalar value as a function of the step counter.
pub trait Schedule {
    /// Value at step `t`.
    fn value(&self, t: usize) -> f64;
}

/// A schedule returning the same value at every step.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ConstantSchedule {
    /// The value.
    pub value: f64,
}

impl ConstantSchedule {
    /// Creates a constant schedule.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Schedule for ConstantSchedule {
    fn value(&self, _t: usize) -> f64 {
        self.value
    }
}

/// Linear interpolation from `initial_p` to `final_p` over
/// `schedule_timesteps` steps, constant at `final_p` afterwards.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct LinearSchedule {
    /// Number of steps to reach `final_p`.
    pub schedule_timesteps: usize,

    /// Value at step 0.
    pub initial_p: f64,

    /// Value from step `schedule_timesteps` on.
    pub final_p: f64,
}

impl LinearSchedule {
    /// Creates a schedule starting from 1.0.
    pub fn new(schedule_timesteps: usize, final_p: f64) -> Self {
        Self {
            schedule_timesteps,
            initial_p: 1.0,
            final_p,
        }
    }

    /// Sets the value at step 0.
    pub fn initial_p(mut self, initial_p: f64) -> Self {
        self.initial_p = initial_p;
        self
    }
}

impl Schedule for LinearSchedule {
    fn value(&self, t: usize) -> f64 {
        if self.schedule_timesteps == 0 {
            return self.final_p;
        }
        let fraction = (t as f64 / self.schedule_timesteps as f64).min(1.0);
        self.initial_p + fraction * (self.final_p - self.initial_p)
    }
}

/// Piecewise linear schedule through `(step, value)` endpoints.
///
/// Between `endpoints[i]` and `endpoints[i + 1]` the value is interpolated
/// linearly. Outside of the endpoints, `outside_value` is returned if set,
/// otherwise the value of the nearest endpoint.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PiecewiseSchedule {
    endpoints: Vec<(usize, f64)>,
    outside_value: Option<f64>,
}

impl PiecewiseSchedule {
    /// Creates a schedule. Steps of `endpoints` must be strictly increasing.
    pub fn new(
        endpoints: Vec<(usize, f64)>,
        outside_value: Option<f64>,
    ) -> Result<Self, LazyFrameError> {
        if endpoints.is_empty() {
            return Err(LazyFrameError::BadSchedule("no endpoints".to_string()));
        }
        if endpoints.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(LazyFrameError::BadSchedule(format!(
                "steps of endpoints are not increasing: {:?}",
                endpoints
            )));
        }
        Ok(Self {
            endpoints,
            outside_value,
        })
    }

    /// Endpoints of the schedule.
    pub fn endpoints(&self) -> &[(usize, f64)] {
        &self.endpoints
    }
}

impl Schedule for PiecewiseSchedule {
    fn value(&self, t: usize) -> f64 {
        for w in self.endpoints.windows(2) {
            let ((l_t, l), (r_t, r)) = (w[0], w[1]);
            if l_t <= t && t < r_t {
                let alpha = (t - l_t) as f64 / (r_t - l_t) as f64;
                return l + alpha * (r - l);
            }
        }

        if let Some(v) = self.outside_value {
            return v;
        }
        match (self.endpoints.first(), self.endpoints.last()) {
            (Some(&(first_t, first)), _) if t < first_t => first,
            (_, Some(&(_, last))) => last,
            _ => 0.0,
        }
    }
}

/// Any of the schedules, for use in configuration files.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum ScheduleConfig {
    /// Constant schedule.
    Constant(ConstantSchedule),

    /// Linear schedule.
    Linear(LinearSchedule),

    /// Piecewise linear schedule.
    Piecewise(PiecewiseSchedule),
}

impl Schedule for ScheduleConfig {
    fn value(&self, t: usize) -> f64 {
        match self {
            Self::Constant(s) => s.value(t),
            Self::Linear(s) => s.value(t),
            Self::Piecewise(s) => s.value(t),
        }
    }
}

impl From<ConstantSchedule> for ScheduleConfig {
    fn from(s: ConstantSchedule) -> Self {
        Self::Constant(s)
    }
}

impl From<LinearSchedule> for ScheduleConfig {
    fn from(s: LinearSchedule) -> Self {
        Self::Linear(s)
    }
}

impl From<PiecewiseSchedule> for ScheduleConfig {
    fn from(s: PiecewiseSchedule) -> Self {
        Self::Piecewise(s)
    }
}
