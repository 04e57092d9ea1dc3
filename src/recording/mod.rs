//! Per tick data recording.

mod recorder;
mod snapshot;
#[cfg(test)]
mod tests;

pub use recorder::{BincodeRecorder, DataRecorder, MemoryRecorder, NullRecorder};
pub use snapshot::TickSnapshot;
