//! Minimal stand-in control laws for bench runs without the generated models.
//!
//! They close the loops with plain proportional/integral terms and make no claim on
//! handling qualities.

use super::discrete_time_model::DiscreteTimeModel;
use super::records::{
    ApproachCapability, AutothrustInput, AutothrustOutput, AutothrustStatus,
    FlightControlLawInput, FlightControlLawOutput, GuidanceLawInput, GuidanceLawOutput, LateralMode,
    ModeLogicInput, ModeLogicOutput, ThrustLimitType, VerticalMode,
};
use crate::fatal;
use crate::signal_conditioning::{
    DirectorCommand, LookupTable, TLA_CLIMB, TLA_FLEX_MCT, TLA_IDLE, TLA_REVERSE_FULL, TLA_TOGA,
};

const MAX_FD_BANK_DEG: f64 = 25.0;
const MAX_FD_PITCH_DEG: f64 = 15.0;
const TAILSTRIKE_PITCH_LIMIT_DEG: f64 = 11.5;
const TAILSTRIKE_RADIO_ALTITUDE_FT: f64 = 400.0;

/// Wraps a heading difference into `[-180, 180)`.
fn heading_error(target: f64, actual: f64) -> f64 { (target - actual + 540.0).rem_euclid(360.0) - 180.0 }

/// Push button latching and a capability estimate from the engaged automation.
#[derive(Debug, Default)]
pub struct ReferenceModeLogic {
    last_buttons: [bool; 3],
    latched: [bool; 3],
}

impl DiscreteTimeModel for ReferenceModeLogic {
    type Input = ModeLogicInput;
    type Output = ModeLogicOutput;

    fn reset(&mut self) { *self = Self::default(); }

    fn step(&mut self, input: &ModeLogicInput) -> ModeLogicOutput {
        let c = &input.cockpit;
        let buttons = [c.ap_1_pushed, c.ap_2_pushed, c.athr_pushed];
        for (i, pushed) in buttons.iter().enumerate() {
            if *pushed && !self.last_buttons[i] {
                self.latched[i] = !self.latched[i];
            }
        }
        self.last_buttons = buttons;
        let [ap_1_active, ap_2_active, athr_requested] = self.latched;

        let approach = c.appr_pushed || c.loc_pushed;
        let lateral_mode = match (approach, c.trk_fpa_mode) {
            (true, _) => LateralMode::Loc,
            (false, true) => LateralMode::Trk,
            (false, false) => LateralMode::Hdg,
        };
        let vertical_mode = match (c.appr_pushed, c.trk_fpa_mode) {
            (true, _) => VerticalMode::Gs,
            (false, true) => VerticalMode::Fpa,
            (false, false) => VerticalMode::Vs,
        };
        let approach_capability = if !c.appr_pushed {
            ApproachCapability::None
        } else {
            match (ap_1_active, ap_2_active, athr_requested) {
                (true, true, true) => ApproachCapability::Cat3Dual,
                (true, _, true) | (_, true, true) => ApproachCapability::Cat3Single,
                (true, _, false) | (_, true, false) => ApproachCapability::Cat2,
                (false, false, _) => ApproachCapability::Cat1,
            }
        };
        ModeLogicOutput {
            lateral_mode,
            vertical_mode,
            ap_1_active,
            ap_2_active,
            fd_active: true,
            athr_requested,
            heading_target_deg: c.selected_heading_deg,
            vs_target_fpm: c.selected_vs_fpm,
            fpa_target_deg: c.selected_fpa_deg,
            altitude_target_ft: c.selected_altitude_ft,
            speed_target_kn: c.selected_speed_kn,
            approach_capability,
            ..ModeLogicOutput::default()
        }
    }
}

/// Proportional director laws on heading/track and vertical speed/flight path angle.
#[derive(Debug, Default)]
pub struct ReferenceGuidanceLaw;

impl DiscreteTimeModel for ReferenceGuidanceLaw {
    type Input = GuidanceLawInput;
    type Output = GuidanceLawOutput;

    fn reset(&mut self) {}

    fn step(&mut self, input: &GuidanceLawInput) -> GuidanceLawOutput {
        let s = &input.sensed;
        let m = &input.mode;
        let raw_bank = if input.custom.available && m.lateral_mode == LateralMode::Nav {
            input.custom.phi_command_deg
        } else {
            let actual = if m.lateral_mode == LateralMode::Trk { s.track_deg } else { s.heading_deg };
            0.8 * heading_error(m.heading_target_deg, actual)
        };
        let raw_pitch = match m.vertical_mode {
            VerticalMode::Fpa => m.fpa_target_deg - s.pitch_deg * 0.1,
            _ => (m.vs_target_fpm - s.vertical_speed_fpm) / 500.0,
        };
        let bank = raw_bank.clamp(-MAX_FD_BANK_DEG, MAX_FD_BANK_DEG);
        let pitch = raw_pitch.clamp(-MAX_FD_PITCH_DEG, MAX_FD_PITCH_DEG);
        let flight_director = DirectorCommand { pitch, bank, yaw: 0.0 };
        GuidanceLawOutput {
            flight_director,
            ap_pitch_command_deg: s.pitch_deg + pitch,
            ap_bank_command_deg: bank,
            ap_yaw_command: 0.0,
            ap_engaged: m.any_ap_active(),
        }
    }
}

/// PI attitude hold under autopilot, direct side stick law otherwise.
#[derive(Debug, Default)]
pub struct ReferenceFlightControlLaw {
    pitch_integral: f64,
}

impl DiscreteTimeModel for ReferenceFlightControlLaw {
    type Input = FlightControlLawInput;
    type Output = FlightControlLawOutput;

    fn reset(&mut self) { self.pitch_integral = 0.0; }

    fn step(&mut self, input: &FlightControlLawInput) -> FlightControlLawOutput {
        let s = &input.sensed;
        if !input.autopilot.ap_engaged {
            self.pitch_integral = 0.0;
            return FlightControlLawOutput {
                elevator_deg: -30.0 * s.side_stick_y,
                aileron_deg: 25.0 * s.side_stick_x,
                ..FlightControlLawOutput::default()
            };
        }
        let mut pitch_cmd = input.autopilot.ap_pitch_command_deg;
        if input.tailstrike_protection_enabled && s.radio_altitude_ft < TAILSTRIKE_RADIO_ALTITUDE_FT {
            pitch_cmd = pitch_cmd.min(TAILSTRIKE_PITCH_LIMIT_DEG);
        }
        let pitch_err = pitch_cmd - s.pitch_deg;
        self.pitch_integral = (self.pitch_integral + pitch_err * input.time.dt).clamp(-10.0, 10.0);
        let bank_err = input.autopilot.ap_bank_command_deg - s.bank_deg;
        FlightControlLawOutput {
            elevator_deg: (-2.0 * pitch_err - 0.5 * self.pitch_integral).clamp(-30.0, 30.0),
            aileron_deg: (1.5 * bank_err - 0.3 * s.roll_rate_deg_s).clamp(-25.0, 25.0),
            rudder_deg: (0.5 * input.autopilot.ap_yaw_command).clamp(-25.0, 25.0),
            stabilizer_trim_deg: self.pitch_integral * 0.2,
        }
    }
}

/// Speed mode on an N1 integrator, bounded by the lever angle.
#[derive(Debug)]
pub struct ReferenceAutothrustLaw {
    n1_from_tla: LookupTable,
    n1_integral: f64,
}

impl Default for ReferenceAutothrustLaw {
    fn default() -> Self {
        // the table is static and strictly increasing
        let n1_from_tla = LookupTable::new(&[
            (TLA_REVERSE_FULL, 70.0),
            (TLA_IDLE, 20.0),
            (TLA_CLIMB, 85.0),
            (TLA_FLEX_MCT, 90.0),
            (TLA_TOGA, 95.0),
        ])
        .unwrap_or_else(|e| fatal!("Invalid N1 table: {e}"));
        Self { n1_from_tla, n1_integral: 0.0 }
    }
}

impl DiscreteTimeModel for ReferenceAutothrustLaw {
    type Input = AutothrustInput;
    type Output = AutothrustOutput;

    fn reset(&mut self) { self.n1_integral = 0.0; }

    fn step(&mut self, input: &AutothrustInput) -> AutothrustOutput {
        let n1_tla = input.tla_deg.map(|tla| self.n1_from_tla.evaluate(tla));
        let max_tla = input.tla_deg.iter().copied().fold(f64::MIN, f64::max);
        let any_reverse = input.reverse.iter().any(|r| *r);
        let thrust_limit_type = if any_reverse {
            ThrustLimitType::Reverse
        } else if max_tla > TLA_FLEX_MCT {
            ThrustLimitType::Toga
        } else if max_tla > TLA_CLIMB {
            ThrustLimitType::Mct
        } else {
            ThrustLimitType::Climb
        };
        let status = match (input.mode.athr_requested, any_reverse, max_tla > TLA_IDLE) {
            (true, false, true) => AutothrustStatus::Active,
            (true, _, _) => AutothrustStatus::Armed,
            (false, _, _) => AutothrustStatus::Disengaged,
        };
        let mut n1_command = n1_tla;
        if status == AutothrustStatus::Active {
            let speed_err = input.mode.speed_target_kn - input.sensed.v_ias_kn;
            self.n1_integral = (self.n1_integral + 0.5 * speed_err * input.time.dt).clamp(-60.0, 60.0);
            let n1_idle = self.n1_from_tla.evaluate(TLA_IDLE);
            for (cmd, ceiling) in n1_command.iter_mut().zip(n1_tla) {
                *cmd = (n1_idle + 40.0 + self.n1_integral).clamp(n1_idle, ceiling.max(n1_idle));
            }
        } else {
            self.n1_integral = 0.0;
        }
        AutothrustOutput {
            n1_command,
            n1_tla,
            thrust_limit_type,
            thrust_limit: n1_tla.iter().copied().fold(f64::MIN, f64::max),
            status,
            mode: u8::from(status == AutothrustStatus::Active),
            mode_message: 0,
        }
    }
}
