use super::records::{
    ApproachCapability, AutothrustInput, FlightControlLawInput, ModeLogicInput, ThrustLimitType,
};
use super::{
    DiscreteTimeModel, ReferenceAutothrustLaw, ReferenceFlightControlLaw, ReferenceModeLogic,
};

#[test]
fn test_mode_logic_latches_on_rising_edge() {
    let mut model = ReferenceModeLogic::default();
    let mut input = ModeLogicInput::default();
    input.cockpit.ap_1_pushed = true;
    assert!(model.step(&input).ap_1_active);
    assert!(model.step(&input).ap_1_active);
    input.cockpit.ap_1_pushed = false;
    assert!(model.step(&input).ap_1_active);
    input.cockpit.ap_1_pushed = true;
    assert!(!model.step(&input).ap_1_active);

    model.reset();
    assert!(model.step(&input).ap_1_active);
}

#[test]
fn test_mode_logic_capability_needs_approach() {
    let mut model = ReferenceModeLogic::default();
    let mut input = ModeLogicInput::default();
    input.cockpit.ap_1_pushed = true;
    input.cockpit.ap_2_pushed = true;
    input.cockpit.athr_pushed = true;
    assert_eq!(model.step(&input).approach_capability, ApproachCapability::None);
    input.cockpit.appr_pushed = true;
    let out = model.step(&input);
    assert!(out.any_ap_active());
    assert_eq!(out.approach_capability, ApproachCapability::Cat3Dual);
}

#[test]
fn test_flight_control_law_limits_pitch_near_ground() {
    let mut input = FlightControlLawInput::default();
    input.autopilot.ap_engaged = true;
    input.autopilot.ap_pitch_command_deg = 20.0;
    input.sensed.pitch_deg = 10.0;
    input.sensed.radio_altitude_ft = 100.0;

    input.tailstrike_protection_enabled = true;
    let protected = ReferenceFlightControlLaw::default().step(&input);
    assert!((protected.elevator_deg + 3.0).abs() < 1e-12);

    input.tailstrike_protection_enabled = false;
    let unprotected = ReferenceFlightControlLaw::default().step(&input);
    assert!((unprotected.elevator_deg + 20.0).abs() < 1e-12);
}

#[test]
fn test_flight_control_law_direct_law_without_autopilot() {
    let mut input = FlightControlLawInput::default();
    input.sensed.side_stick_y = 0.5;
    input.sensed.side_stick_x = -1.0;
    let out = ReferenceFlightControlLaw::default().step(&input);
    assert!((out.elevator_deg + 15.0).abs() < 1e-12);
    assert!((out.aileron_deg + 25.0).abs() < 1e-12);
}

#[test]
fn test_autothrust_limit_follows_levers() {
    let mut model = ReferenceAutothrustLaw::default();
    let mut input = AutothrustInput { tla_deg: [45.0, 45.0], ..AutothrustInput::default() };
    let out = model.step(&input);
    assert_eq!(out.thrust_limit_type, ThrustLimitType::Toga);
    assert!((out.thrust_limit - 95.0).abs() < 1e-12);
    assert_eq!(out.n1_command, out.n1_tla);

    input.tla_deg = [-20.0, 0.0];
    input.reverse = [true, false];
    let out = model.step(&input);
    assert_eq!(out.thrust_limit_type, ThrustLimitType::Reverse);
    assert!((out.n1_tla[0] - 70.0).abs() < 1e-12);
}
