use super::host_store::{HostError, HostVariableStore, VarHandle};
use std::collections::{HashMap, HashSet};

/// In-process host variable store.
///
/// Variables spring into existence on first resolve, initialised to zero, unless their
/// name was marked unavailable. Used by the bench binary and as a test double; the
/// connection can be dropped to exercise failure paths.
#[derive(Debug, Default)]
pub struct MemoryHostStore {
    values: Vec<f64>,
    names: HashMap<String, u32>,
    live: HashSet<VarHandle>,
    unavailable: HashSet<String>,
    failing_reads: HashSet<u32>,
    disconnected: bool,
}

impl MemoryHostStore {
    pub fn new() -> Self { Self::default() }

    fn slot(&mut self, name: &str) -> u32 {
        if let Some(idx) = self.names.get(name) {
            return *idx;
        }
        #[allow(clippy::cast_possible_truncation)]
        let idx = self.values.len() as u32;
        self.values.push(0.0);
        self.names.insert(name.to_string(), idx);
        idx
    }

    /// Sets a variable by name, creating it if needed.
    pub fn set(&mut self, name: &str, value: f64) {
        let idx = self.slot(name);
        self.values[idx as usize] = value;
    }

    pub fn set_bool(&mut self, name: &str, value: bool) { self.set(name, if value { 1.0 } else { 0.0 }); }

    /// Reads a variable by name, `None` if it was never created.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names.get(name).map(|idx| self.values[*idx as usize])
    }

    /// Makes resolving `name` fail from now on.
    pub fn mark_unavailable(&mut self, name: &str) { self.unavailable.insert(name.to_string()); }

    /// Simulates losing (or regaining) the host connection.
    pub fn set_disconnected(&mut self, disconnected: bool) { self.disconnected = disconnected; }

    /// Makes reads of `name` fail as if the connection dropped, while every other variable
    /// stays readable. `false` restores it.
    pub fn set_read_failure(&mut self, name: &str, failing: bool) {
        let idx = self.slot(name);
        if failing {
            self.failing_reads.insert(idx);
        } else {
            self.failing_reads.remove(&idx);
        }
    }

    /// Number of handles currently resolved and not yet released.
    pub fn live_handles(&self) -> usize { self.live.len() }

    fn check(&self, handle: VarHandle) -> Result<usize, HostError> {
        if self.disconnected {
            return Err(HostError::Disconnected);
        }
        if !self.live.contains(&handle) {
            return Err(HostError::InvalidHandle(handle));
        }
        Ok(handle.raw() as usize)
    }
}

impl HostVariableStore for MemoryHostStore {
    fn resolve(&mut self, name: &str) -> Result<VarHandle, HostError> {
        if self.disconnected {
            return Err(HostError::Disconnected);
        }
        if self.unavailable.contains(name) {
            return Err(HostError::UnknownVariable(name.to_string()));
        }
        let handle = VarHandle::new(self.slot(name));
        self.live.insert(handle);
        Ok(handle)
    }

    fn read(&self, handle: VarHandle) -> Result<f64, HostError> {
        let idx = self.check(handle)?;
        if self.failing_reads.contains(&handle.raw()) {
            return Err(HostError::Disconnected);
        }
        Ok(self.values[idx])
    }

    fn write(&mut self, handle: VarHandle, value: f64) -> Result<(), HostError> {
        let idx = self.check(handle)?;
        self.values[idx] = value;
        Ok(())
    }

    fn release(&mut self, handle: VarHandle) { self.live.remove(&handle); }
}
