use super::{ConfigError, ConfigSource, FeatureGates, IniFileSource, ModelConfiguration, Subsystem};
use crate::signal_conditioning::{DetentRange, ThrottleDetents};
use strum::IntoEnumIterator;

const FULL_INI: &str = "
; comment line
# other comment
[Model]
autopilot_state_machine_enabled = true
autopilot_laws_enabled = yes
fly_by_wire_enabled = off
autothrust_enabled = 1
custom_flight_guidance_enabled = ON
flight_director_smoothing_enabled = true
tailstrike_protection_enabled = false
flight_director_smoothing_factor = 2.5
flight_director_smoothing_limit = 20
approach_capability_dwell_time = 0.8

[throttle]
toga_low = 0.9

[throttle.2]
climb_low = 0.0
climb_high = 0.1
";

#[test]
fn test_empty_text_gives_defaults() {
    let cfg = ModelConfiguration::from_ini_str("").unwrap();
    assert_eq!(cfg, ModelConfiguration::default());
    assert_eq!(cfg.gates, FeatureGates::default());
    assert!(!cfg.gates.director_smoothing);
    assert!(cfg.gates.tailstrike_protection);
}

#[test]
fn test_full_configuration() {
    let cfg = ModelConfiguration::from_ini_str(FULL_INI).unwrap();
    assert!(cfg.gates.mode_logic);
    assert!(cfg.gates.guidance_law);
    assert!(!cfg.gates.flight_control_law);
    assert!(cfg.gates.autothrust);
    assert!(cfg.gates.custom_guidance);
    assert!(cfg.gates.director_smoothing);
    assert!(!cfg.gates.tailstrike_protection);
    assert!((cfg.smoothing_factor - 2.5).abs() < f64::EPSILON);
    assert!((cfg.smoothing_limit - 20.0).abs() < f64::EPSILON);
    assert!((cfg.approach_capability_dwell_time - 0.8).abs() < f64::EPSILON);

    let defaults = ThrottleDetents::default();
    assert_eq!(cfg.throttle[0].toga, DetentRange::new(0.9, 1.0));
    assert_eq!(cfg.throttle[0].climb, defaults.climb);
    assert_eq!(cfg.throttle[1].toga, DetentRange::new(0.9, 1.0));
    assert_eq!(cfg.throttle[1].climb, DetentRange::new(0.0, 0.1));
}

#[test]
fn test_gate_keys_round_trip_through_ini() {
    for subsystem in Subsystem::iter() {
        let default = FeatureGates::default().is_enabled(subsystem);
        let text = format!("[model]\n{} = {}\n", subsystem.config_key(), !default);
        let cfg = ModelConfiguration::from_ini_str(&text).unwrap();
        assert_eq!(cfg.gates.is_enabled(subsystem), !default, "{subsystem}");
        for other in Subsystem::iter().filter(|s| *s != subsystem) {
            assert_eq!(
                cfg.gates.is_enabled(other),
                FeatureGates::default().is_enabled(other)
            );
        }
    }
}

#[test]
fn test_invalid_values_are_rejected() {
    let bad_bool = ModelConfiguration::from_ini_str("[model]\nfly_by_wire_enabled = maybe\n");
    assert_eq!(
        bad_bool,
        Err(ConfigError::InvalidValue {
            key: "fly_by_wire_enabled".into(),
            value: "maybe".into()
        })
    );
    let negative_dwell =
        ModelConfiguration::from_ini_str("[model]\napproach_capability_dwell_time = -1\n");
    assert!(matches!(negative_dwell, Err(ConfigError::InvalidValue { .. })));
    let nan_factor =
        ModelConfiguration::from_ini_str("[model]\nflight_director_smoothing_factor = NaN\n");
    assert!(matches!(nan_factor, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_syntax_error_reports_line() {
    let res = ModelConfiguration::from_ini_str("[model]\n\nthis is not an entry\n");
    assert!(matches!(res, Err(ConfigError::Syntax { line }) if line >= 3), "{res:?}");
    let unclosed = ModelConfiguration::from_ini_str("[model\nautothrust_enabled = false\n");
    assert!(matches!(unclosed, Err(ConfigError::Syntax { .. })), "{unclosed:?}");
}

#[test]
fn test_keys_and_sections_ignore_case() {
    let cfg = ModelConfiguration::from_ini_str(
        "[MODEL]\nAutothrust_Enabled = False\n[Throttle.1]\nTOGA_LOW = 0.9\n",
    )
    .unwrap();
    assert!(!cfg.gates.autothrust);
    assert_eq!(cfg.throttle[0].toga, DetentRange::new(0.9, 1.0));
    assert_eq!(cfg.throttle[1].toga, ThrottleDetents::default().toga);
}

#[test]
fn test_overlapping_detents_are_rejected() {
    let res = ModelConfiguration::from_ini_str("[throttle.1]\nclimb_low = -0.45\n");
    assert!(matches!(res, Err(ConfigError::InvalidTable(_))));
    let inverted =
        ModelConfiguration::from_ini_str("[throttle]\ntoga_low = 1.0\ntoga_high = 0.95\n");
    assert!(matches!(inverted, Err(ConfigError::InvalidTable(_))));
}

#[test]
fn test_static_source_returns_itself() {
    let mut cfg = ModelConfiguration::default();
    cfg.gates.set(Subsystem::Autothrust, false);
    assert_eq!(cfg.load().unwrap(), cfg);
}

#[test]
fn test_missing_file_gives_defaults() {
    let path = std::env::temp_dir().join(format!("fbw-missing-{}.ini", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let source = IniFileSource::new(&path);
    assert_eq!(source.load().unwrap(), ModelConfiguration::default());
}

#[test]
fn test_file_source_reads_ini() {
    let path = std::env::temp_dir().join(format!("fbw-config-{}.ini", std::process::id()));
    std::fs::write(&path, FULL_INI).unwrap();
    let loaded = IniFileSource::new(&path).load();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.unwrap(), ModelConfiguration::from_ini_str(FULL_INI).unwrap());
}
