//! Stateless and lightly stateful signal conditioning used by the tick pipeline:
//! interpolating lookup tables, throttle lever mapping, flight director smoothing and
//! the approach capability debouncer.

mod debouncer;
mod lookup_table;
mod smoother;
mod throttle_axis;

pub use debouncer::Debouncer;
pub use lookup_table::{GridTable, LookupTable, TableError};
pub use smoother::{DirectorCommand, DirectorSmoother, smooth};
pub use throttle_axis::{
    DetentRange, DetentZone, TLA_CLIMB, TLA_FLEX_MCT, TLA_IDLE, TLA_REVERSE_FULL, TLA_REVERSE_IDLE,
    TLA_TOGA, ThrottleAxisMapper, ThrottleAxisState, ThrottleDetents,
};
