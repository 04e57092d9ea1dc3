use super::variables::{EngineVariables, OutputVariables, SimInputs};
use super::{HostError, HostVariableStore, HostVariables, MemoryHostStore, VarHandle};
use itertools::Itertools;

#[test]
fn test_memory_store_resolve_read_write() {
    let mut host = MemoryHostStore::new();
    host.set("SIMULATION TIME", 12.5);
    let handle = host.resolve("SIMULATION TIME").unwrap();
    assert!((host.read(handle).unwrap() - 12.5).abs() < f64::EPSILON);
    host.write(handle, 13.0).unwrap();
    assert_eq!(host.get("SIMULATION TIME"), Some(13.0));
    host.write_bool(handle, true).unwrap();
    assert!(host.read_bool(handle).unwrap());
    host.set("SIMULATION TIME", 0.49);
    assert!(!host.read_bool(handle).unwrap());
}

#[test]
fn test_memory_store_failures() {
    let mut host = MemoryHostStore::new();
    host.mark_unavailable("RADIO HEIGHT");
    assert_eq!(
        host.resolve("RADIO HEIGHT"),
        Err(HostError::UnknownVariable("RADIO HEIGHT".into()))
    );
    let unknown = VarHandle::new(42);
    assert_eq!(host.read(unknown), Err(HostError::InvalidHandle(unknown)));

    let handle = host.resolve("G FORCE").unwrap();
    host.release(handle);
    assert_eq!(host.read(handle), Err(HostError::InvalidHandle(handle)));

    let handle = host.resolve("G FORCE").unwrap();
    host.set_disconnected(true);
    assert_eq!(host.read(handle), Err(HostError::Disconnected));
    assert_eq!(host.write(handle, 1.0), Err(HostError::Disconnected));
    assert_eq!(host.resolve("G FORCE"), Err(HostError::Disconnected));
}

#[test]
fn test_memory_store_single_read_failure() {
    let mut host = MemoryHostStore::new();
    let g = host.resolve("G FORCE").unwrap();
    let ias = host.resolve("AIRSPEED INDICATED").unwrap();
    host.set_read_failure("G FORCE", true);
    assert_eq!(host.read(g), Err(HostError::Disconnected));
    assert_eq!(host.write(g, 1.5), Ok(()));
    assert_eq!(host.read(ias), Ok(0.0));
    host.set_read_failure("G FORCE", false);
    assert_eq!(host.read(g), Ok(1.5));
}

#[test]
fn test_catalogue_names_are_unique() {
    let names = [SimInputs::NAMES, OutputVariables::NAMES, EngineVariables::NAMES].concat();
    assert_eq!(names.iter().unique().count(), names.len());
}

#[test]
fn test_catalogue_resolve_and_release() {
    let mut host = MemoryHostStore::new();
    let vars = HostVariables::resolve(&mut host).unwrap();
    assert_eq!(host.live_handles(), vars.handles().len());
    assert_ne!(vars.engines[0].raw_throttle, vars.engines[1].raw_throttle);
    assert!(host.get("A32NX_THROTTLE_MAPPING_INPUT:1").is_some());
    assert!(host.get("A32NX_THROTTLE_MAPPING_INPUT:2").is_some());
    vars.release(&mut host);
    assert_eq!(host.live_handles(), 0);
}

#[test]
fn test_catalogue_partial_resolve_releases_handles() {
    let mut host = MemoryHostStore::new();
    host.mark_unavailable("A32NX_THROTTLE_DETENT:2");
    let res = HostVariables::resolve(&mut host);
    assert_eq!(
        res.map(|_| ()),
        Err(HostError::UnknownVariable("A32NX_THROTTLE_DETENT:2".into()))
    );
    assert_eq!(host.live_handles(), 0);
}
