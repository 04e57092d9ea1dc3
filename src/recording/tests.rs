use super::{BincodeRecorder, DataRecorder, MemoryRecorder, NullRecorder, TickSnapshot};
use crate::models::records::ApproachCapability;
use std::io::{self, Write};

struct FailingWriter {
    attempts: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.attempts += 1;
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

fn snapshot(tick: u64) -> TickSnapshot {
    let mut snap = TickSnapshot { tick, host_time: 0.016 * tick as f64, ..TickSnapshot::default() };
    snap.sample_time = 0.016;
    snap.approach_capability = ApproachCapability::Cat2;
    snap.flight_director.pitch = 2.5;
    snap.mode_logic.output.ap_1_active = true;
    snap
}

#[test]
fn test_memory_recorder_keeps_order() {
    let mut recorder = MemoryRecorder::new();
    assert!(recorder.is_empty());
    for tick in 0..5 {
        recorder.record(&snapshot(tick));
    }
    assert_eq!(recorder.len(), 5);
    assert!(recorder.snapshots().iter().enumerate().all(|(i, s)| s.tick == i as u64));
    assert_eq!(recorder.last().map(|s| s.tick), Some(4));
    recorder.clear();
    assert!(recorder.last().is_none());
}

#[test]
fn test_null_recorder_accepts_everything() {
    let mut recorder = NullRecorder;
    recorder.record(&snapshot(0));
    recorder.flush();
}

#[test]
fn test_bincode_recorder_stream_decodes() {
    let mut recorder = BincodeRecorder::new(Vec::<u8>::new());
    let written: Vec<TickSnapshot> = (0..3).map(snapshot).collect();
    for snap in &written {
        recorder.record(snap);
    }
    recorder.flush();
    assert_eq!(recorder.written(), 3);
    let bytes = recorder.into_inner();

    let config = bincode::config::standard();
    let mut offset = 0;
    let mut decoded = Vec::new();
    while offset < bytes.len() {
        let (snap, read): (TickSnapshot, usize) =
            bincode::serde::decode_from_slice(&bytes[offset..], config).unwrap();
        offset += read;
        decoded.push(snap);
    }
    assert_eq!(decoded, written);
}

#[test]
fn test_bincode_recorder_disables_after_error() {
    let mut recorder = BincodeRecorder::new(FailingWriter { attempts: 0 });
    recorder.record(&snapshot(0));
    assert!(recorder.is_failed());
    let attempts = recorder.into_inner().attempts;
    assert!(attempts > 0);

    let mut recorder = BincodeRecorder::new(FailingWriter { attempts: 0 });
    for tick in 0..10 {
        recorder.record(&snapshot(tick));
    }
    assert_eq!(recorder.written(), 0);
    assert_eq!(recorder.into_inner().attempts, attempts);
}
