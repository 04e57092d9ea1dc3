use super::model_configuration::{ConfigError, ModelConfiguration};
use crate::warn;
use ini::Ini;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable holding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "FBW_CONFIG_PATH";
/// Configuration file used when `FBW_CONFIG_PATH` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "./ModelConfiguration.ini";

/// Provides the [`ModelConfiguration`] read once per connect.
pub trait ConfigSource {
    /// # Errors
    /// A [`ConfigError`] if the configuration exists but is unusable.
    fn load(&self) -> Result<ModelConfiguration, ConfigError>;

    /// Human readable origin, for logging.
    fn describe(&self) -> String;
}

impl ConfigSource for ModelConfiguration {
    fn load(&self) -> Result<ModelConfiguration, ConfigError> { Ok(self.clone()) }

    fn describe(&self) -> String { String::from("static configuration") }
}

/// Configuration stored in an INI file. A missing file yields the defaults.
#[derive(Debug, Clone)]
pub struct IniFileSource {
    path: PathBuf,
}

impl IniFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    /// Uses `FBW_CONFIG_PATH`, falling back to [`DEFAULT_CONFIG_PATH`].
    pub fn from_env() -> Self {
        let path_var = std::env::var(CONFIG_PATH_ENV);
        Self::new(path_var.as_ref().map_or(DEFAULT_CONFIG_PATH, String::as_str))
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl ConfigSource for IniFileSource {
    fn load(&self) -> Result<ModelConfiguration, ConfigError> {
        match Ini::load_from_file(&self.path) {
            Ok(ini) => ModelConfiguration::from_ini(&ini),
            Err(ini::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                warn!("No configuration at {}, using defaults!", self.path.display());
                Ok(ModelConfiguration::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String { format!("{}", self.path.display()) }
}
