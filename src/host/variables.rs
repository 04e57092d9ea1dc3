//! Catalogue of the host variables read and written by the tick pipeline.

use super::host_store::{HostError, HostVariableStore, VarHandle};
use crate::models::records::ENGINE_COUNT;

/// Declares a struct of handles together with the host variable name behind each field.
///
/// The generated `resolve` appends every handle it obtains to `resolved`, so a caller can
/// release a partially resolved catalogue.
macro_rules! host_variables {
    ($(#[$meta:meta])* $name:ident { $($field:ident => $var:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name {
            $(pub $field: VarHandle,)*
        }

        impl $name {
            /// Host variable names, in field order, before any index suffix.
            pub const NAMES: &'static [&'static str] = &[$($var,)*];

            /// Resolves every variable with `suffix` appended to its name.
            pub fn resolve(
                host: &mut dyn HostVariableStore,
                suffix: &str,
                resolved: &mut Vec<VarHandle>,
            ) -> Result<Self, HostError> {
                Ok(Self {
                    $($field: {
                        let handle = host.resolve(&format!("{}{}", $var, suffix))?;
                        resolved.push(handle);
                        handle
                    },)*
                })
            }
        }
    };
}

host_variables! {
    /// Simulation state and sensed aircraft state.
    SimInputs {
        paused => "A32NX_SIM_PAUSED",
        slew => "IS SLEW ACTIVE",
        pitch => "PLANE PITCH DEGREES",
        bank => "PLANE BANK DEGREES",
        heading => "PLANE HEADING DEGREES MAGNETIC",
        track => "GPS GROUND MAGNETIC TRACK",
        pitch_rate => "ROTATION VELOCITY BODY X",
        roll_rate => "ROTATION VELOCITY BODY Z",
        yaw_rate => "ROTATION VELOCITY BODY Y",
        load_factor => "G FORCE",
        v_ias => "AIRSPEED INDICATED",
        v_tas => "AIRSPEED TRUE",
        v_gs => "GPS GROUND SPEED",
        vertical_speed => "VERTICAL SPEED",
        altitude => "INDICATED ALTITUDE",
        radio_altitude => "RADIO HEIGHT",
        on_ground => "SIM ON GROUND",
        side_stick_x => "A32NX_SIDESTICK_POSITION_X",
        side_stick_y => "A32NX_SIDESTICK_POSITION_Y",
    }
}

host_variables! {
    /// FCU selections and push buttons.
    CockpitVariables {
        selected_heading => "A32NX_AUTOPILOT_HEADING_SELECTED",
        selected_vs => "A32NX_AUTOPILOT_VS_SELECTED",
        selected_fpa => "A32NX_AUTOPILOT_FPA_SELECTED",
        selected_altitude => "A32NX_AUTOPILOT_ALTITUDE_SELECTED",
        selected_speed => "A32NX_AUTOPILOT_SPEED_SELECTED",
        trk_fpa_mode => "A32NX_TRK_FPA_MODE_ACTIVE",
        loc_pushed => "A32NX_FCU_LOC_MODE_ACTIVE",
        appr_pushed => "A32NX_FCU_APPR_MODE_ACTIVE",
        ap_1_pushed => "A32NX_FCU_AP_1_PUSH",
        ap_2_pushed => "A32NX_FCU_AP_2_PUSH",
        athr_pushed => "A32NX_FCU_ATHR_PUSH",
    }
}

host_variables! {
    /// Flight management data.
    FmgcVariables {
        fwc_flight_phase => "A32NX_FWC_FLIGHT_PHASE",
        flight_phase => "A32NX_FMGC_FLIGHT_PHASE",
        v2 => "AIRLINER_V2_SPEED",
        v_app => "AIRLINER_VAPP_SPEED",
        v_ls => "AIRLINER_VLS_SPEED",
        v_max => "AIRLINER_VMAX_SPEED",
        altitude_constraint => "A32NX_AP_CSTN_ALT",
        thrust_reduction_altitude => "AIRLINER_THR_RED_ALT",
        thrust_reduction_altitude_go_around => "AIRLINER_THR_RED_ALT_GOAROUND",
        acceleration_altitude => "AIRLINER_ACC_ALT",
        acceleration_altitude_engine_out => "AIRLINER_ACC_ALT_ENGINEOUT",
        acceleration_altitude_go_around => "AIRLINER_ACC_ALT_GOAROUND",
        acceleration_altitude_go_around_engine_out => "AIRLINER_ACC_ALT_GOAROUND_ENGINEOUT",
        cruise_altitude => "AIRLINER_CRUISE_ALTITUDE",
        flex_temperature => "AIRLINER_TO_FLEX_TEMP",
    }
}

host_variables! {
    /// Externally computed lateral guidance.
    CustomGuidanceVariables {
        available => "A32NX_FG_AVAIL",
        cross_track_error => "A32NX_FG_CROSS_TRACK_ERROR",
        track_angle_error => "A32NX_FG_TRACK_ANGLE_ERROR",
        phi_command => "A32NX_FG_PHI_COMMAND",
    }
}

host_variables! {
    /// Annunciations and commands published by the pipeline.
    OutputVariables {
        fma_lateral_mode => "A32NX_FMA_LATERAL_MODE",
        fma_lateral_armed => "A32NX_FMA_LATERAL_ARMED",
        fma_vertical_mode => "A32NX_FMA_VERTICAL_MODE",
        fma_vertical_armed => "A32NX_FMA_VERTICAL_ARMED",
        fma_soft_alt_active => "A32NX_FMA_SOFT_ALT_MODE",
        fma_approach_capability => "A32NX_ApproachCapability",
        fd_bank => "A32NX_FLIGHT_DIRECTOR_BANK",
        fd_pitch => "A32NX_FLIGHT_DIRECTOR_PITCH",
        fd_yaw => "A32NX_FLIGHT_DIRECTOR_YAW",
        ap_active_any => "A32NX_AUTOPILOT_ACTIVE",
        ap_1_active => "A32NX_AUTOPILOT_1_ACTIVE",
        ap_2_active => "A32NX_AUTOPILOT_2_ACTIVE",
        ap_autothrust_mode => "A32NX_AUTOPILOT_AUTOTHRUST_MODE",
        fcu_mode_reversion => "A32NX_FCU_MODE_REVERSION_ACTIVE",
        fcu_mode_reversion_trk_fpa => "A32NX_FCU_MODE_REVERSION_TRK_FPA_ACTIVE",
        elevator => "A32NX_FBW_ELEVATOR_COMMAND",
        aileron => "A32NX_FBW_AILERON_COMMAND",
        rudder => "A32NX_FBW_RUDDER_COMMAND",
        stabilizer_trim => "A32NX_FBW_STAB_TRIM_COMMAND",
        athr_thrust_limit_type => "A32NX_AUTOTHRUST_THRUST_LIMIT_TYPE",
        athr_thrust_limit => "A32NX_AUTOTHRUST_THRUST_LIMIT",
        athr_status => "A32NX_AUTOTHRUST_STATUS",
        athr_mode => "A32NX_AUTOTHRUST_MODE",
        athr_mode_message => "A32NX_AUTOTHRUST_MODE_MESSAGE",
    }
}

host_variables! {
    /// Per engine inputs and outputs, resolved with a `:<engine number>` suffix.
    EngineVariables {
        raw_throttle => "A32NX_THROTTLE_MAPPING_INPUT",
        reverse_armed => "A32NX_REVERSER_ARMED",
        n1 => "TURB ENG N1",
        tla => "A32NX_AUTOTHRUST_TLA",
        n1_tla => "A32NX_AUTOTHRUST_TLA_N1",
        reverse => "A32NX_AUTOTHRUST_REVERSE",
        n1_command => "A32NX_AUTOTHRUST_N1_COMMANDED",
        lever_position_3d => "A32NX_3D_THROTTLE_LEVER_POSITION",
        detent_zone => "A32NX_THROTTLE_DETENT",
    }
}

/// Every handle the pipeline uses, resolved at connect time.
#[derive(Debug, Clone)]
pub struct HostVariables {
    pub sim: SimInputs,
    pub cockpit: CockpitVariables,
    pub fmgc: FmgcVariables,
    pub custom_guidance: CustomGuidanceVariables,
    pub outputs: OutputVariables,
    pub engines: [EngineVariables; ENGINE_COUNT],
    resolved: Vec<VarHandle>,
}

impl HostVariables {
    /// Resolves the whole catalogue. On failure every handle obtained so far is released
    /// before the error is returned.
    ///
    /// # Errors
    /// The first [`HostError`] reported by the host.
    pub fn resolve(host: &mut dyn HostVariableStore) -> Result<Self, HostError> {
        let mut resolved = Vec::new();
        match Self::resolve_into(host, &mut resolved) {
            Ok(vars) => Ok(vars),
            Err(e) => {
                for handle in resolved {
                    host.release(handle);
                }
                Err(e)
            }
        }
    }

    fn resolve_into(
        host: &mut dyn HostVariableStore,
        resolved: &mut Vec<VarHandle>,
    ) -> Result<Self, HostError> {
        let sim = SimInputs::resolve(host, "", resolved)?;
        let cockpit = CockpitVariables::resolve(host, "", resolved)?;
        let fmgc = FmgcVariables::resolve(host, "", resolved)?;
        let custom_guidance = CustomGuidanceVariables::resolve(host, "", resolved)?;
        let outputs = OutputVariables::resolve(host, "", resolved)?;
        let engine_1 = EngineVariables::resolve(host, ":1", resolved)?;
        let engine_2 = EngineVariables::resolve(host, ":2", resolved)?;
        Ok(Self {
            sim,
            cockpit,
            fmgc,
            custom_guidance,
            outputs,
            engines: [engine_1, engine_2],
            resolved: resolved.clone(),
        })
    }

    /// All resolved handles, for release at disconnect.
    pub fn handles(&self) -> &[VarHandle] { &self.resolved }

    /// Releases every handle of the catalogue.
    pub fn release(self, host: &mut dyn HostVariableStore) {
        for handle in self.resolved {
            host.release(handle);
        }
    }
}
