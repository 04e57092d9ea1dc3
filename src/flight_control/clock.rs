use serde::{Deserialize, Serialize};

/// Host time as seen by the pipeline, in seconds since session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    previous_time: f64,
    current_time: f64,
    sample_time: f64,
}

impl SimulationClock {
    /// A clock whose first sample is measured from `start`.
    pub fn new(start: f64) -> Self {
        Self { previous_time: start, current_time: start, sample_time: 0.0 }
    }

    pub fn previous_time(&self) -> f64 { self.previous_time }
    pub fn current_time(&self) -> f64 { self.current_time }
    pub fn sample_time(&self) -> f64 { self.sample_time }

    /// Takes the host time of a new tick and returns the sample time since the last
    /// committed tick. May be zero, negative or `NaN`.
    pub fn advance(&mut self, host_time: f64) -> f64 {
        self.current_time = host_time;
        self.sample_time = host_time - self.previous_time;
        self.sample_time
    }

    /// Closes the tick: the current time becomes the reference for the next sample.
    pub fn commit(&mut self) { self.previous_time = self.current_time; }
}

/// Per tick anomaly state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyFlags {
    /// No model, smoother or debouncer advances on this tick.
    pub pause_detected: bool,
    /// The vehicle is being slewed. Surface and thrust laws are held.
    pub was_in_slew: bool,
}

impl AnomalyFlags {
    /// A tick is a pause if the host says so or the clock did not move forward.
    pub fn detect(host_paused: bool, slew_active: bool, sample_time: f64) -> Self {
        Self {
            pause_detected: host_paused || sample_time.is_nan() || sample_time <= 0.0,
            was_in_slew: slew_active,
        }
    }

    pub fn pause_entered(&self, previous: &Self) -> bool { self.pause_detected && !previous.pause_detected }
    pub fn pause_left(&self, previous: &Self) -> bool { !self.pause_detected && previous.pause_detected }
    pub fn slew_entered(&self, previous: &Self) -> bool { self.was_in_slew && !previous.was_in_slew }
    pub fn slew_left(&self, previous: &Self) -> bool { !self.was_in_slew && previous.was_in_slew }
}
