use serde::Serialize;

/// Hysteresis on a discrete published value.
///
/// A candidate different from the published value is only published once it was
/// continuously requested for at least `dwell_time` seconds. Dwell accumulates from the
/// sample times handed to [`Debouncer::update`], so ticks the caller skips (a paused
/// simulation) do not count. Any interruption restarts the dwell.
#[derive(Debug, Clone, Serialize)]
pub struct Debouncer<T> {
    dwell_time: f64,
    published: T,
    last_change_time: f64,
    pending: Option<(T, f64)>,
}

impl<T: Copy + PartialEq> Debouncer<T> {
    pub fn new(initial: T, dwell_time: f64) -> Self {
        Self { dwell_time: dwell_time.max(0.0), published: initial, last_change_time: 0.0, pending: None }
    }

    pub fn published(&self) -> T { self.published }

    /// Host time of the last published change.
    pub fn last_change_time(&self) -> f64 { self.last_change_time }

    /// The candidate currently waiting for its dwell, with the seconds it was held so far.
    pub fn pending(&self) -> Option<(T, f64)> { self.pending }

    /// Feeds the candidate observed on a tick at host time `now`, `sample_time` seconds
    /// after the previous update. The tick a candidate first appears on counts as zero.
    /// Non positive or `NaN` sample times add nothing.
    ///
    /// # Returns
    /// - `Some(value)` on the tick the published value changes to `value`.
    /// - `None` otherwise.
    pub fn update(&mut self, now: f64, sample_time: f64, candidate: T) -> Option<T> {
        if candidate == self.published {
            self.pending = None;
            return None;
        }
        let held = match self.pending {
            Some((pending, held)) if pending == candidate => {
                held + if sample_time > 0.0 { sample_time } else { 0.0 }
            }
            _ => 0.0,
        };
        if held >= self.dwell_time {
            self.published = candidate;
            self.last_change_time = now;
            self.pending = None;
            Some(candidate)
        } else {
            self.pending = Some((candidate, held));
            None
        }
    }
}
