use serde::{Deserialize, Serialize};

/// One exponential smoothing step with a rate limit.
///
/// The output moves from `previous` towards `target` by the fraction
/// `min(1, factor * sample_time)`, and the move is clamped to `rate_limit * sample_time`
/// in magnitude. A non-positive (or `NaN`) `sample_time` leaves `previous` unchanged.
pub fn smooth(sample_time: f64, factor: f64, rate_limit: f64, previous: f64, target: f64) -> f64 {
    if sample_time.is_nan() || sample_time <= 0.0 {
        return previous;
    }
    let gain = (factor * sample_time).clamp(0.0, 1.0);
    let max_step = rate_limit.abs() * sample_time;
    let step = ((target - previous) * gain).clamp(-max_step, max_step);
    previous + step
}

/// Flight director command on the three director axes, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorCommand {
    pub pitch: f64,
    pub bank: f64,
    pub yaw: f64,
}

/// Smooths the flight director needles tick to tick.
///
/// Holds the last published command per axis. While disabled the raw command is passed
/// through and still remembered, so enabling later continues from the displayed value.
#[derive(Debug, Clone)]
pub struct DirectorSmoother {
    enabled: bool,
    factor: f64,
    rate_limit: f64,
    last: DirectorCommand,
}

impl DirectorSmoother {
    pub fn new(enabled: bool, factor: f64, rate_limit: f64) -> Self {
        Self { enabled, factor, rate_limit, last: DirectorCommand::default() }
    }

    pub fn is_enabled(&self) -> bool { self.enabled }

    pub fn set_enabled(&mut self, enabled: bool) { self.enabled = enabled; }

    pub fn last(&self) -> DirectorCommand { self.last }

    /// Advances the smoother by `sample_time` towards `raw` and returns the published command.
    pub fn apply(&mut self, sample_time: f64, raw: DirectorCommand) -> DirectorCommand {
        if !self.enabled {
            self.last = raw;
            return raw;
        }
        let step = |prev: f64, target: f64| {
            smooth(sample_time, self.factor, self.rate_limit, prev, target)
        };
        self.last = DirectorCommand {
            pitch: step(self.last.pitch, raw.pitch),
            bank: step(self.last.bank, raw.bank),
            yaw: step(self.last.yaw, raw.yaw),
        };
        self.last
    }
}
