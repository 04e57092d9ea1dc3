use super::snapshot::TickSnapshot;
use crate::{error, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sink for per tick snapshots.
///
/// Recording is fire and forget. A recorder that fails must not disturb the control loop,
/// so `record` has no error path.
pub trait DataRecorder {
    fn record(&mut self, snapshot: &TickSnapshot);

    /// Pushes buffered data out, called at disconnect.
    fn flush(&mut self) {}
}

impl<R: DataRecorder + ?Sized> DataRecorder for Box<R> {
    fn record(&mut self, snapshot: &TickSnapshot) { (**self).record(snapshot); }

    fn flush(&mut self) { (**self).flush(); }
}

/// Discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl DataRecorder for NullRecorder {
    fn record(&mut self, _snapshot: &TickSnapshot) {}
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecorder {
    snapshots: Vec<TickSnapshot>,
}

impl MemoryRecorder {
    pub fn new() -> Self { Self::default() }
    pub fn snapshots(&self) -> &[TickSnapshot] { &self.snapshots }
    pub fn last(&self) -> Option<&TickSnapshot> { self.snapshots.last() }
    pub fn len(&self) -> usize { self.snapshots.len() }
    pub fn is_empty(&self) -> bool { self.snapshots.is_empty() }
    pub fn clear(&mut self) { self.snapshots.clear(); }
}

impl DataRecorder for MemoryRecorder {
    fn record(&mut self, snapshot: &TickSnapshot) { self.snapshots.push(snapshot.clone()); }
}

/// Streams snapshots as consecutive `bincode` records (standard configuration, serde encoding).
///
/// The first write error is logged and disables the recorder for the rest of its life.
#[derive(Debug)]
pub struct BincodeRecorder<W: Write> {
    writer: W,
    written: u64,
    failed: bool,
}

impl BincodeRecorder<BufWriter<File>> {
    /// Creates (or truncates) the recording file at `path`.
    ///
    /// # Errors
    /// Any I/O error from creating the file.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path.as_ref())?;
        info!("Recording ticks to {}", path.as_ref().display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> BincodeRecorder<W> {
    pub fn new(writer: W) -> Self { Self { writer, written: 0, failed: false } }

    /// Number of snapshots written successfully.
    pub fn written(&self) -> u64 { self.written }

    pub fn is_failed(&self) -> bool { self.failed }

    pub fn into_inner(self) -> W { self.writer }
}

impl<W: Write> DataRecorder for BincodeRecorder<W> {
    fn record(&mut self, snapshot: &TickSnapshot) {
        if self.failed {
            return;
        }
        let config = bincode::config::standard();
        match bincode::serde::encode_into_std_write(snapshot, &mut self.writer, config) {
            Ok(_) => self.written += 1,
            Err(e) => {
                error!("Recording disabled after tick {}: {e}", snapshot.tick);
                self.failed = true;
            }
        }
    }

    fn flush(&mut self) {
        if self.failed {
            return;
        }
        if let Err(e) = self.writer.flush() {
            error!("Flushing recording failed: {e}");
            self.failed = true;
        }
    }
}
