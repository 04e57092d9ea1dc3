#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod flight_control;
mod host;
mod logger;
mod models;
mod recording;
mod signal_conditioning;

use crate::config::IniFileSource;
use crate::flight_control::FlightComputer;
use crate::host::MemoryHostStore;
use crate::models::{
    ModelSet, ReferenceAutothrustLaw, ReferenceFlightControlLaw, ReferenceGuidanceLaw,
    ReferenceModeLogic,
};
use crate::recording::{BincodeRecorder, DataRecorder, NullRecorder};
use std::{env, time::Duration};
use tokio::time::{Instant, MissedTickBehavior};

const FRAME_RATE_ENV: &str = "FBW_FRAME_RATE";
const RECORDER_PATH_ENV: &str = "FBW_RECORDER_PATH";
const DEFAULT_FRAME_RATE: f64 = 60.0;
const STATUS_INTERVAL: Duration = Duration::from_secs(10);

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let frame_rate_var = env::var(FRAME_RATE_ENV);
    let frame_rate = frame_rate_var
        .as_ref()
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(DEFAULT_FRAME_RATE);

    let recorder: Box<dyn DataRecorder> = match env::var(RECORDER_PATH_ENV) {
        Ok(path) => match BincodeRecorder::create(&path) {
            Ok(rec) => Box::new(rec),
            Err(e) => fatal!("Could not create recording {path}: {e}"),
        },
        Err(_) => Box::new(NullRecorder),
    };

    let models = ModelSet::new(
        Box::new(ReferenceModeLogic::default()),
        Box::new(ReferenceGuidanceLaw),
        Box::new(ReferenceFlightControlLaw::default()),
        Box::new(ReferenceAutothrustLaw::default()),
    );
    let mut fc = FlightComputer::new(
        bench_host(),
        models,
        recorder,
        Box::new(IniFileSource::from_env()),
    );
    if let Err(e) = fc.connect() {
        fatal!("Bench host connect failed: {e:?}");
    }
    info!("Bench host running at {frame_rate} Hz");

    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / frame_rate));
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let start = Instant::now();
    let mut last_status = start;
    loop {
        tokio::select! {
            now = frames.tick() => {
                let host_time = now.duration_since(start).as_secs_f64();
                if let Err(e) = fc.update(host_time) {
                    error!("Tick at {host_time:.3}s failed: {e:?}");
                    break;
                }
                if now.duration_since(last_status) >= STATUS_INTERVAL {
                    last_status = now;
                    if let Some(fd) = fc.flight_director() {
                        log!(
                            "t={host_time:.1}s FD pitch {:.2} bank {:.2}, capability {:?}",
                            fd.pitch,
                            fd.bank,
                            fc.approach_capability()
                        );
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }
    fc.disconnect();
}

/// In-memory host in level cruise with the autopilot engaged in HDG/VS.
fn bench_host() -> MemoryHostStore {
    let mut host = MemoryHostStore::new();
    let state = [
        ("PLANE HEADING DEGREES MAGNETIC", 90.0),
        ("GPS GROUND MAGNETIC TRACK", 92.0),
        ("G FORCE", 1.0),
        ("AIRSPEED INDICATED", 250.0),
        ("AIRSPEED TRUE", 320.0),
        ("GPS GROUND SPEED", 330.0),
        ("INDICATED ALTITUDE", 10_000.0),
        ("RADIO HEIGHT", 9_500.0),
        ("A32NX_AUTOPILOT_HEADING_SELECTED", 120.0),
        ("A32NX_AUTOPILOT_ALTITUDE_SELECTED", 12_000.0),
        ("A32NX_AUTOPILOT_SPEED_SELECTED", 250.0),
        ("A32NX_AUTOPILOT_VS_SELECTED", 1_000.0),
        ("A32NX_FCU_AP_1_PUSH", 1.0),
        ("A32NX_FCU_ATHR_PUSH", 1.0),
        ("A32NX_THROTTLE_MAPPING_INPUT:1", 0.0),
        ("A32NX_THROTTLE_MAPPING_INPUT:2", 0.0),
    ];
    for (name, value) in state {
        host.set(name, value);
    }
    host
}
