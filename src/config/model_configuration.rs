use super::feature_gates::{FeatureGates, Subsystem};
use crate::models::records::ENGINE_COUNT;
use crate::signal_conditioning::{DetentRange, TableError, ThrottleAxisMapper, ThrottleDetents};
use ini::Ini;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::Display;

const MODEL_SECTION: &str = "model";
const THROTTLE_SECTION: &str = "throttle";
const DETENT_NAMES: [&str; 6] = ["reverse", "reverse_idle", "idle", "climb", "flex_mct", "toga"];

/// Failures while loading the model configuration.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    Io(String),
    /// The INI text is malformed at `line`.
    Syntax { line: usize },
    /// A value could not be parsed for its key.
    InvalidValue { key: String, value: String },
    /// The throttle detent ranges do not form a valid lever table.
    InvalidTable(TableError),
}

impl std::error::Error for ConfigError {}

impl From<ini::ParseError> for ConfigError {
    fn from(e: ini::ParseError) -> Self { Self::Syntax { line: e.line } }
}

impl From<ini::Error> for ConfigError {
    fn from(e: ini::Error) -> Self {
        match e {
            ini::Error::Io(io) => Self::Io(io.to_string()),
            ini::Error::Parse(parse) => parse.into(),
        }
    }
}

/// Everything the pipeline reads from the configuration at connect time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfiguration {
    pub gates: FeatureGates,
    /// Exponential smoothing factor of the flight director, per second.
    pub smoothing_factor: f64,
    /// Maximum flight director needle rate, in degrees per second.
    pub smoothing_limit: f64,
    /// Seconds a new approach capability must persist before it is published.
    pub approach_capability_dwell_time: f64,
    pub throttle: [ThrottleDetents; ENGINE_COUNT],
}

impl Default for ModelConfiguration {
    fn default() -> Self {
        Self {
            gates: FeatureGates::default(),
            smoothing_factor: 0.0,
            smoothing_limit: 0.0,
            approach_capability_dwell_time: 0.0,
            throttle: [ThrottleDetents::default(); ENGINE_COUNT],
        }
    }
}

type Sections = HashMap<String, HashMap<String, String>>;

/// Lowercases section and key names of a parsed INI document.
/// Entries before the first section header land in the unnamed section `""`.
fn normalize_sections(ini: &Ini) -> Sections {
    let mut sections: Sections = HashMap::new();
    for (name, props) in ini.iter() {
        let section = sections.entry(name.unwrap_or_default().to_lowercase()).or_default();
        for (key, value) in props.iter() {
            section.insert(key.to_lowercase(), value.trim().to_string());
        }
    }
    sections
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| invalid(key, value))
}

fn parse_non_negative(key: &str, value: &str) -> Result<f64, ConfigError> {
    let v = parse_f64(key, value)?;
    if v < 0.0 { Err(invalid(key, value)) } else { Ok(v) }
}

fn detent_mut<'a>(detents: &'a mut ThrottleDetents, name: &str) -> Option<&'a mut DetentRange> {
    match name {
        "reverse" => Some(&mut detents.reverse_full),
        "reverse_idle" => Some(&mut detents.reverse_idle),
        "idle" => Some(&mut detents.idle),
        "climb" => Some(&mut detents.climb),
        "flex_mct" => Some(&mut detents.flex_mct),
        "toga" => Some(&mut detents.toga),
        _ => None,
    }
}

fn apply_detents(
    detents: &mut ThrottleDetents,
    section: &HashMap<String, String>,
) -> Result<(), ConfigError> {
    for name in DETENT_NAMES {
        for (suffix, is_low) in [("low", true), ("high", false)] {
            let key = format!("{name}_{suffix}");
            let Some(value) = section.get(&key) else { continue };
            let parsed = parse_f64(&key, value)?;
            if let Some(range) = detent_mut(detents, name) {
                if is_low { range.low = parsed } else { range.high = parsed }
            }
        }
    }
    Ok(())
}

impl ModelConfiguration {
    /// Parses the INI representation.
    ///
    /// # Errors
    /// - [`ConfigError::Syntax`] for malformed text.
    /// - Everything [`ModelConfiguration::from_ini`] rejects.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_ini(&Ini::load_from_str(text)?)
    }

    /// Overlays a parsed INI document on the defaults. Section and key names are
    /// case-insensitive, missing keys keep their defaults and unknown keys are ignored.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidValue`] for values that do not parse for their key.
    /// - [`ConfigError::InvalidTable`] if the throttle detents overlap or are unordered.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let sections = normalize_sections(ini);
        let mut cfg = Self::default();

        if let Some(model) = sections.get(MODEL_SECTION) {
            for subsystem in Subsystem::iter() {
                let key = subsystem.config_key();
                if let Some(value) = model.get(key) {
                    cfg.gates.set(subsystem, parse_bool(key, value)?);
                }
            }
            let tuning: [(&str, &mut f64); 3] = [
                ("flight_director_smoothing_factor", &mut cfg.smoothing_factor),
                ("flight_director_smoothing_limit", &mut cfg.smoothing_limit),
                ("approach_capability_dwell_time", &mut cfg.approach_capability_dwell_time),
            ];
            for (key, target) in tuning {
                if let Some(value) = model.get(key) {
                    *target = parse_non_negative(key, value)?;
                }
            }
        }

        let mut base = ThrottleDetents::default();
        if let Some(throttle) = sections.get(THROTTLE_SECTION) {
            apply_detents(&mut base, throttle)?;
        }
        for (engine, detents) in cfg.throttle.iter_mut().enumerate() {
            *detents = base;
            if let Some(section) = sections.get(&format!("{THROTTLE_SECTION}.{}", engine + 1)) {
                apply_detents(detents, section)?;
            }
        }
        ThrottleAxisMapper::new(&cfg.throttle).map_err(ConfigError::InvalidTable)?;
        Ok(cfg)
    }
}
