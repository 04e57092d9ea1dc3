//! Boundary to the simulation host: the variable store abstraction, the catalogue of
//! variables used by the pipeline and an in-memory store.

mod host_store;
mod memory_store;
pub(crate) mod variables;
#[cfg(test)]
mod tests;

pub use host_store::{HostError, HostVariableStore, VarHandle};
pub use memory_store::MemoryHostStore;
pub use variables::HostVariables;
