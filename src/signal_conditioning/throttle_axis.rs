use super::lookup_table::{GridTable, LookupTable, TableError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Thrust lever angle at full reverse, in degrees.
pub const TLA_REVERSE_FULL: f64 = -20.0;
/// Thrust lever angle at reverse idle, in degrees.
pub const TLA_REVERSE_IDLE: f64 = -6.0;
/// Thrust lever angle at forward idle, in degrees.
pub const TLA_IDLE: f64 = 0.0;
/// Thrust lever angle in the CL detent, in degrees.
pub const TLA_CLIMB: f64 = 25.0;
/// Thrust lever angle in the FLX/MCT detent, in degrees.
pub const TLA_FLEX_MCT: f64 = 35.0;
/// Thrust lever angle in the TOGA detent, in degrees.
pub const TLA_TOGA: f64 = 45.0;

/// Cockpit lever animation position at forward idle.
const LEVER_POSITION_IDLE: f64 = 20.0;

/// Detent context coordinate with the reverser locked.
const CONTEXT_REVERSE_LOCKED: f64 = 0.0;
/// Detent context coordinate with the reverser armed.
const CONTEXT_REVERSE_ARMED: f64 = 1.0;

/// Discrete lever zones. A zone is the highest detent at or below the current lever angle.
#[derive(Debug, Display, EnumIter, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum DetentZone {
    Reverse,
    Idle,
    Climb,
    FlexMct,
    Toga,
}

impl DetentZone {
    /// Classifies a thrust lever angle.
    pub fn from_tla(tla: f64) -> Self {
        if tla < TLA_IDLE {
            DetentZone::Reverse
        } else if tla < TLA_CLIMB {
            DetentZone::Idle
        } else if tla < TLA_FLEX_MCT {
            DetentZone::Climb
        } else if tla < TLA_TOGA {
            DetentZone::FlexMct
        } else {
            DetentZone::Toga
        }
    }

    /// Numeric code published to the host.
    pub fn code(self) -> f64 {
        match self {
            DetentZone::Reverse => 0.0,
            DetentZone::Idle => 1.0,
            DetentZone::Climb => 2.0,
            DetentZone::FlexMct => 3.0,
            DetentZone::Toga => 4.0,
        }
    }
}

/// Raw lever interval inside which a detent holds its lever angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetentRange {
    pub low: f64,
    pub high: f64,
}

impl DetentRange {
    pub const fn new(low: f64, high: f64) -> Self { Self { low, high } }
}

/// Raw lever calibration of one engine. Raw positions are normalized to `[-1, 1]`,
/// the reverse sub-range sitting below forward idle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrottleDetents {
    pub reverse_full: DetentRange,
    pub reverse_idle: DetentRange,
    pub idle: DetentRange,
    pub climb: DetentRange,
    pub flex_mct: DetentRange,
    pub toga: DetentRange,
}

impl Default for ThrottleDetents {
    fn default() -> Self {
        Self {
            reverse_full: DetentRange::new(-1.00, -0.95),
            reverse_idle: DetentRange::new(-0.72, -0.62),
            idle: DetentRange::new(-0.50, -0.40),
            climb: DetentRange::new(-0.03, 0.07),
            flex_mct: DetentRange::new(0.42, 0.52),
            toga: DetentRange::new(0.95, 1.00),
        }
    }
}

impl ThrottleDetents {
    /// Piecewise linear `(raw, tla)` curve for the given detent context.
    /// Each detent contributes a flat plateau across its range.
    ///
    /// # Errors
    /// [`TableError::NotStrictlyIncreasing`] for a range whose `high` lies below its `low`.
    fn curve(&self, reverse_armed: bool) -> Result<Vec<(f64, f64)>, TableError> {
        let (rev_full, rev_idle) =
            if reverse_armed { (TLA_REVERSE_FULL, TLA_REVERSE_IDLE) } else { (TLA_IDLE, TLA_IDLE) };
        let detents = [
            (self.reverse_full, rev_full),
            (self.reverse_idle, rev_idle),
            (self.idle, TLA_IDLE),
            (self.climb, TLA_CLIMB),
            (self.flex_mct, TLA_FLEX_MCT),
            (self.toga, TLA_TOGA),
        ];
        let mut points = Vec::with_capacity(detents.len() * 2);
        for (range, tla) in detents {
            if range.high < range.low {
                return Err(TableError::NotStrictlyIncreasing { axis: 0, index: points.len() + 1 });
            }
            points.push((range.low, tla));
            if range.high > range.low {
                points.push((range.high, tla));
            }
        }
        Ok(points)
    }
}

/// Per tick throttle state of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrottleAxisState {
    pub raw_position: f64,
    pub reverse_armed: bool,
    pub tla: f64,
    pub zone: DetentZone,
    pub lever_position_3d: f64,
}

impl Default for ThrottleAxisState {
    fn default() -> Self {
        Self {
            raw_position: 0.0,
            reverse_armed: false,
            tla: TLA_IDLE,
            zone: DetentZone::Idle,
            lever_position_3d: LEVER_POSITION_IDLE,
        }
    }
}

/// Maps raw lever positions to thrust lever angles for every engine.
///
/// The mapping is a 3-D [`GridTable`] over (raw position, engine index, detent context).
/// The raw axis is the union of all engines' detent breakpoints, so every engine's own
/// piecewise linear curve is reproduced exactly, detent plateaus included.
/// A second 1-D table turns the lever angle into the cockpit lever animation position.
#[derive(Debug, Clone)]
pub struct ThrottleAxisMapper {
    tla_table: GridTable<3>,
    lever_table: LookupTable,
    engines: usize,
}

impl ThrottleAxisMapper {
    /// Builds the mapper for one calibration per engine.
    ///
    /// # Errors
    /// Returns a [`TableError`] if no engine is given or a calibration has overlapping
    /// or unordered detent ranges.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(detents: &[ThrottleDetents]) -> Result<Self, TableError> {
        if detents.is_empty() {
            return Err(TableError::Empty);
        }
        let mut curves = Vec::with_capacity(detents.len() * 2);
        for d in detents {
            for armed in [false, true] {
                curves.push(LookupTable::new(&d.curve(armed)?)?);
            }
        }
        let raw_axis: Vec<f64> = curves
            .iter()
            .flat_map(|c| c.breakpoints().iter().copied())
            .sorted_by(f64::total_cmp)
            .dedup()
            .collect();
        let engine_axis: Vec<f64> = (0..detents.len()).map(|i| i as f64).collect();
        let context_axis = vec![CONTEXT_REVERSE_LOCKED, CONTEXT_REVERSE_ARMED];

        // row major: raw, engine, context
        let mut values = Vec::with_capacity(raw_axis.len() * detents.len() * 2);
        for raw in &raw_axis {
            for engine in 0..detents.len() {
                values.push(curves[engine * 2].evaluate(*raw));
                values.push(curves[engine * 2 + 1].evaluate(*raw));
            }
        }
        let tla_table = GridTable::new([raw_axis, engine_axis, context_axis], values)?;
        let lever_table = LookupTable::new(&[
            (TLA_REVERSE_FULL, 0.0),
            (TLA_REVERSE_IDLE, 12.0),
            (TLA_IDLE, LEVER_POSITION_IDLE),
            (TLA_CLIMB, 55.0),
            (TLA_FLEX_MCT, 75.0),
            (TLA_TOGA, 100.0),
        ])?;
        Ok(Self { tla_table, lever_table, engines: detents.len() })
    }

    pub fn engines(&self) -> usize { self.engines }

    /// Maps one engine's raw lever position. Engines beyond the calibrated count use the
    /// last calibration.
    #[allow(clippy::cast_precision_loss)]
    pub fn map(&self, engine: usize, raw_position: f64, reverse_armed: bool) -> ThrottleAxisState {
        let context = if reverse_armed { CONTEXT_REVERSE_ARMED } else { CONTEXT_REVERSE_LOCKED };
        let tla = self.tla_table.evaluate([raw_position, engine as f64, context]);
        ThrottleAxisState {
            raw_position,
            reverse_armed,
            tla,
            zone: DetentZone::from_tla(tla),
            lever_position_3d: self.lever_table.evaluate(tla),
        }
    }
}
