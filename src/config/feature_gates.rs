use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Subsystems that can be switched on or off.
#[derive(Debug, Display, EnumIter, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    ModeLogic,
    GuidanceLaw,
    FlightControlLaw,
    Autothrust,
    CustomGuidance,
    DirectorSmoothing,
    TailstrikeProtection,
}

impl Subsystem {
    /// Key of the gate in the `[model]` configuration section.
    pub fn config_key(self) -> &'static str {
        match self {
            Subsystem::ModeLogic => "autopilot_state_machine_enabled",
            Subsystem::GuidanceLaw => "autopilot_laws_enabled",
            Subsystem::FlightControlLaw => "fly_by_wire_enabled",
            Subsystem::Autothrust => "autothrust_enabled",
            Subsystem::CustomGuidance => "custom_flight_guidance_enabled",
            Subsystem::DirectorSmoothing => "flight_director_smoothing_enabled",
            Subsystem::TailstrikeProtection => "tailstrike_protection_enabled",
        }
    }
}

/// One on/off flag per [`Subsystem`].
///
/// A disabled control law is bypassed: its output record keeps the last value it had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGates {
    pub mode_logic: bool,
    pub guidance_law: bool,
    pub flight_control_law: bool,
    pub autothrust: bool,
    pub custom_guidance: bool,
    pub director_smoothing: bool,
    pub tailstrike_protection: bool,
}

impl Default for FeatureGates {
    fn default() -> Self {
        Self {
            mode_logic: true,
            guidance_law: true,
            flight_control_law: true,
            autothrust: true,
            custom_guidance: false,
            director_smoothing: false,
            tailstrike_protection: true,
        }
    }
}

impl FeatureGates {
    fn flag_mut(&mut self, subsystem: Subsystem) -> &mut bool {
        match subsystem {
            Subsystem::ModeLogic => &mut self.mode_logic,
            Subsystem::GuidanceLaw => &mut self.guidance_law,
            Subsystem::FlightControlLaw => &mut self.flight_control_law,
            Subsystem::Autothrust => &mut self.autothrust,
            Subsystem::CustomGuidance => &mut self.custom_guidance,
            Subsystem::DirectorSmoothing => &mut self.director_smoothing,
            Subsystem::TailstrikeProtection => &mut self.tailstrike_protection,
        }
    }

    pub fn is_enabled(&self, subsystem: Subsystem) -> bool {
        match subsystem {
            Subsystem::ModeLogic => self.mode_logic,
            Subsystem::GuidanceLaw => self.guidance_law,
            Subsystem::FlightControlLaw => self.flight_control_law,
            Subsystem::Autothrust => self.autothrust,
            Subsystem::CustomGuidance => self.custom_guidance,
            Subsystem::DirectorSmoothing => self.director_smoothing,
            Subsystem::TailstrikeProtection => self.tailstrike_protection,
        }
    }

    pub fn set(&mut self, subsystem: Subsystem, enabled: bool) { *self.flag_mut(subsystem) = enabled; }
}
