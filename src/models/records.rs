//! Input and output records of the four control law models.
//!
//! Every record is a plain `Copy` value that the [`FlightComputer`](crate::flight_control::FlightComputer)
//! overwrites in place each tick. Mode codes are published to the host as numbers, see the
//! `code()` helpers.

use crate::signal_conditioning::DirectorCommand;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Number of engines wired to the host variable catalogue.
pub const ENGINE_COUNT: usize = 2;

/// Timing information handed to every model step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelTime {
    /// Host simulation time of this tick in seconds.
    pub simulation_time: f64,
    /// Seconds since the previous tick.
    pub dt: f64,
}

/// Sensed aircraft state as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensedState {
    pub pitch_deg: f64,
    pub bank_deg: f64,
    pub heading_deg: f64,
    pub track_deg: f64,
    pub pitch_rate_deg_s: f64,
    pub roll_rate_deg_s: f64,
    pub yaw_rate_deg_s: f64,
    pub load_factor_g: f64,
    pub v_ias_kn: f64,
    pub v_tas_kn: f64,
    pub v_gs_kn: f64,
    pub vertical_speed_fpm: f64,
    pub altitude_ft: f64,
    pub radio_altitude_ft: f64,
    pub on_ground: bool,
    pub side_stick_x: f64,
    pub side_stick_y: f64,
    pub engine_n1: [f64; ENGINE_COUNT],
}

/// FCU selections and push buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CockpitInputs {
    pub selected_heading_deg: f64,
    pub selected_vs_fpm: f64,
    pub selected_fpa_deg: f64,
    pub selected_altitude_ft: f64,
    pub selected_speed_kn: f64,
    pub trk_fpa_mode: bool,
    pub loc_pushed: bool,
    pub appr_pushed: bool,
    pub ap_1_pushed: bool,
    pub ap_2_pushed: bool,
    pub athr_pushed: bool,
}

/// Flight management data published by the FMGC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FmgcData {
    pub fwc_flight_phase: f64,
    pub flight_phase: f64,
    pub v2_kn: f64,
    pub v_app_kn: f64,
    pub v_ls_kn: f64,
    pub v_max_kn: f64,
    pub altitude_constraint_ft: f64,
    pub thrust_reduction_altitude_ft: f64,
    pub thrust_reduction_altitude_go_around_ft: f64,
    pub acceleration_altitude_ft: f64,
    pub acceleration_altitude_engine_out_ft: f64,
    pub acceleration_altitude_go_around_ft: f64,
    pub acceleration_altitude_go_around_engine_out_ft: f64,
    pub cruise_altitude_ft: f64,
    pub flex_temperature_deg_c: f64,
}

/// Lateral guidance computed outside the autopilot laws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomGuidance {
    pub available: bool,
    pub cross_track_error_nm: f64,
    pub track_angle_error_deg: f64,
    pub phi_command_deg: f64,
}

#[derive(Debug, Display, EnumIter, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum LateralMode {
    #[default]
    None,
    Hdg,
    Trk,
    Nav,
    Loc,
    Land,
}

impl LateralMode {
    pub fn code(self) -> f64 {
        match self {
            LateralMode::None => 0.0,
            LateralMode::Hdg => 10.0,
            LateralMode::Trk => 11.0,
            LateralMode::Nav => 20.0,
            LateralMode::Loc => 31.0,
            LateralMode::Land => 34.0,
        }
    }
}

#[derive(Debug, Display, EnumIter, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum VerticalMode {
    #[default]
    None,
    Alt,
    Vs,
    Fpa,
    Gs,
    Land,
}

impl VerticalMode {
    pub fn code(self) -> f64 {
        match self {
            VerticalMode::None => 0.0,
            VerticalMode::Alt => 10.0,
            VerticalMode::Vs => 14.0,
            VerticalMode::Fpa => 15.0,
            VerticalMode::Gs => 32.0,
            VerticalMode::Land => 34.0,
        }
    }
}

/// Landing capability shown on the FMA.
#[derive(Debug, Display, EnumIter, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ApproachCapability {
    #[default]
    None,
    Cat1,
    Cat2,
    Cat3Single,
    Cat3Dual,
}

impl ApproachCapability {
    pub fn code(self) -> f64 {
        match self {
            ApproachCapability::None => 0.0,
            ApproachCapability::Cat1 => 1.0,
            ApproachCapability::Cat2 => 2.0,
            ApproachCapability::Cat3Single => 3.0,
            ApproachCapability::Cat3Dual => 4.0,
        }
    }
}

#[derive(Debug, Display, EnumIter, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum AutothrustStatus {
    #[default]
    Disengaged,
    Armed,
    Active,
}

impl AutothrustStatus {
    pub fn code(self) -> f64 {
        match self {
            AutothrustStatus::Disengaged => 0.0,
            AutothrustStatus::Armed => 1.0,
            AutothrustStatus::Active => 2.0,
        }
    }
}

#[derive(Debug, Display, EnumIter, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ThrustLimitType {
    #[default]
    None,
    Climb,
    Mct,
    Flex,
    Toga,
    Reverse,
}

impl ThrustLimitType {
    pub fn code(self) -> f64 {
        match self {
            ThrustLimitType::None => 0.0,
            ThrustLimitType::Climb => 1.0,
            ThrustLimitType::Mct => 2.0,
            ThrustLimitType::Flex => 3.0,
            ThrustLimitType::Toga => 4.0,
            ThrustLimitType::Reverse => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeLogicInput {
    pub time: ModelTime,
    pub sensed: SensedState,
    pub cockpit: CockpitInputs,
    pub fmgc: FmgcData,
    /// Guidance law output of the previous tick.
    pub previous_guidance: GuidanceLawOutput,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeLogicOutput {
    pub lateral_mode: LateralMode,
    pub lateral_armed: u8,
    pub vertical_mode: VerticalMode,
    pub vertical_armed: u8,
    pub soft_alt_active: bool,
    pub ap_1_active: bool,
    pub ap_2_active: bool,
    pub fd_active: bool,
    pub athr_requested: bool,
    pub mode_reversion: bool,
    pub mode_reversion_trk_fpa: bool,
    pub heading_target_deg: f64,
    pub vs_target_fpm: f64,
    pub fpa_target_deg: f64,
    pub altitude_target_ft: f64,
    pub speed_target_kn: f64,
    /// Raw capability candidate, published through the debouncer.
    pub approach_capability: ApproachCapability,
}

impl ModeLogicOutput {
    pub fn any_ap_active(&self) -> bool { self.ap_1_active || self.ap_2_active }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceLawInput {
    pub time: ModelTime,
    pub sensed: SensedState,
    pub mode: ModeLogicOutput,
    pub custom: CustomGuidance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceLawOutput {
    /// Raw flight director command, before smoothing.
    pub flight_director: DirectorCommand,
    pub ap_pitch_command_deg: f64,
    pub ap_bank_command_deg: f64,
    pub ap_yaw_command: f64,
    pub ap_engaged: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightControlLawInput {
    pub time: ModelTime,
    pub sensed: SensedState,
    pub autopilot: GuidanceLawOutput,
    pub tailstrike_protection_enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightControlLawOutput {
    pub elevator_deg: f64,
    pub aileron_deg: f64,
    pub rudder_deg: f64,
    pub stabilizer_trim_deg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AutothrustInput {
    pub time: ModelTime,
    pub sensed: SensedState,
    pub tla_deg: [f64; ENGINE_COUNT],
    pub reverse: [bool; ENGINE_COUNT],
    pub mode: ModeLogicOutput,
    pub guidance: GuidanceLawOutput,
    pub fmgc: FmgcData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AutothrustOutput {
    pub n1_command: [f64; ENGINE_COUNT],
    pub n1_tla: [f64; ENGINE_COUNT],
    pub thrust_limit_type: ThrustLimitType,
    pub thrust_limit: f64,
    pub status: AutothrustStatus,
    pub mode: u8,
    pub mode_message: u8,
}

/// Last input and output record of one model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelIo<I, O> {
    pub input: I,
    pub output: O,
}
