use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Opaque handle of a resolved host variable.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct VarHandle(u32);

impl VarHandle {
    pub const fn new(raw: u32) -> Self { Self(raw) }
    pub const fn raw(self) -> u32 { self.0 }
}

/// Failures talking to the host variable store.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum HostError {
    /// The host does not know a variable of that name.
    UnknownVariable(String),
    /// The handle was never resolved or was already released.
    InvalidHandle(VarHandle),
    /// The connection to the host was lost.
    Disconnected,
    /// `update` was called without a successful `connect`.
    NotConnected,
}

impl std::error::Error for HostError {}

/// Named scalar slots shared with the simulation host.
///
/// Names are resolved once into handles; every later access goes through the handle.
pub trait HostVariableStore {
    /// Resolves `name` into a handle that stays valid until released.
    ///
    /// # Errors
    /// [`HostError::UnknownVariable`] if the host cannot provide the variable.
    fn resolve(&mut self, name: &str) -> Result<VarHandle, HostError>;

    /// Reads the current value behind `handle`.
    ///
    /// # Errors
    /// [`HostError::InvalidHandle`] for unresolved handles, [`HostError::Disconnected`] on a
    /// lost connection.
    fn read(&self, handle: VarHandle) -> Result<f64, HostError>;

    /// Writes `value` to the slot behind `handle`.
    ///
    /// # Errors
    /// Same as [`HostVariableStore::read`].
    fn write(&mut self, handle: VarHandle, value: f64) -> Result<(), HostError>;

    /// Releases a handle. Releasing an unknown handle is a no-op.
    fn release(&mut self, handle: VarHandle);

    /// Reads a boolean slot, any value of at least one half counting as set.
    ///
    /// # Errors
    /// Same as [`HostVariableStore::read`].
    fn read_bool(&self, handle: VarHandle) -> Result<bool, HostError> { Ok(self.read(handle)? >= 0.5) }

    /// Writes a boolean slot as `0.0` or `1.0`.
    ///
    /// # Errors
    /// Same as [`HostVariableStore::write`].
    fn write_bool(&mut self, handle: VarHandle, value: bool) -> Result<(), HostError> {
        self.write(handle, if value { 1.0 } else { 0.0 })
    }
}
