use crate::config::FeatureGates;
use crate::models::records::{
    ApproachCapability, AutothrustInput, AutothrustOutput, ENGINE_COUNT, FlightControlLawInput,
    FlightControlLawOutput, GuidanceLawInput, GuidanceLawOutput, ModeLogicInput, ModeLogicOutput,
    ModelIo,
};
use crate::signal_conditioning::{DirectorCommand, ThrottleAxisState};
use serde::{Deserialize, Serialize};

/// Everything one tick consumed and produced, handed to the
/// [`DataRecorder`](super::DataRecorder) once per update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// One based tick number since connect, pause ticks included.
    pub tick: u64,
    pub host_time: f64,
    /// Seconds since the previous tick.
    pub sample_time: f64,
    pub pause_detected: bool,
    pub slew_active: bool,
    pub gates: FeatureGates,
    pub mode_logic: ModelIo<ModeLogicInput, ModeLogicOutput>,
    pub guidance_law: ModelIo<GuidanceLawInput, GuidanceLawOutput>,
    pub flight_control_law: ModelIo<FlightControlLawInput, FlightControlLawOutput>,
    pub autothrust_law: ModelIo<AutothrustInput, AutothrustOutput>,
    pub throttle: [ThrottleAxisState; ENGINE_COUNT],
    /// Flight director command as published, after smoothing.
    pub flight_director: DirectorCommand,
    pub approach_capability: ApproachCapability,
}
