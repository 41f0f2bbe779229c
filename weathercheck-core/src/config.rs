//! Configuration
//!
//! Defaults, overlaid by an optional TOML file, overlaid by command-line
//! overrides. Example file:
//!
//! ```toml
//! locate = "fixed"
//! latitude = 51.5
//! longitude = -0.12
//! timeout_secs = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODE_URL};
use crate::error::ConfigError;
use crate::locate::{FixedLocator, IpLocator, Locator, NoLocator, DEFAULT_IP_LOOKUP_URL};
use crate::state::Coordinates;

const CONFIG_DIR_NAME: &str = "weathercheck";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "weathercheck.log";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the position comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocateMode {
    /// Look up the public IP address
    #[default]
    Ip,
    /// Use `latitude`/`longitude` from the config
    Fixed,
    /// Geolocation disabled
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub weather_url: String,
    pub geocode_url: String,
    pub ip_lookup_url: String,
    pub locate: LocateMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Per-request timeout for every provider
    pub timeout_secs: u64,
    /// Log destination; stdout belongs to the terminal UI
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_url: DEFAULT_FORECAST_URL.to_owned(),
            geocode_url: DEFAULT_GEOCODE_URL.to_owned(),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_owned(),
            locate: LocateMode::default(),
            latitude: None,
            longitude: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

/// Values given on the command line; `None` keeps the file/default value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub weather_url: Option<String>,
    pub geocode_url: Option<String>,
    pub ip_lookup_url: Option<String>,
    pub locate: Option<LocateMode>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Platform config file location, e.g. `~/.config/weathercheck/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from an explicit path (must exist) or from the default location
    /// (missing file means defaults).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Overlay command-line values.
    ///
    /// Giving both coordinates without an explicit mode switches to `fixed`.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.weather_url {
            self.weather_url = url;
        }
        if let Some(url) = overrides.geocode_url {
            self.geocode_url = url;
        }
        if let Some(url) = overrides.ip_lookup_url {
            self.ip_lookup_url = url;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(path) = overrides.log_file {
            self.log_file = Some(path);
        }

        let has_position = overrides.latitude.is_some() && overrides.longitude.is_some();
        if overrides.latitude.is_some() {
            self.latitude = overrides.latitude;
        }
        if overrides.longitude.is_some() {
            self.longitude = overrides.longitude;
        }

        match overrides.locate {
            Some(mode) => self.locate = mode,
            None if has_position => self.locate = LocateMode::Fixed,
            None => {}
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        if self.locate == LocateMode::Fixed {
            let position = self.fixed_position().ok_or_else(|| {
                ConfigError::Invalid("locate = \"fixed\" needs latitude and longitude".into())
            })?;
            if !(-90.0..=90.0).contains(&position.latitude)
                || !(-180.0..=180.0).contains(&position.longitude)
            {
                return Err(ConfigError::Invalid(format!(
                    "coordinates out of range: {}, {}",
                    position.latitude, position.longitude
                )));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Log file: configured path, or `weathercheck.log` in the platform cache dir
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(LOG_FILE_NAME)))
    }

    fn fixed_position(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }

    /// Build the locator for the configured mode
    pub fn locator(&self) -> Result<Arc<dyn Locator>, ConfigError> {
        let locator: Arc<dyn Locator> = match self.locate {
            LocateMode::Ip => Arc::new(
                IpLocator::new(self.ip_lookup_url.clone(), self.timeout())
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            ),
            LocateMode::Fixed => {
                let position = self.fixed_position().ok_or_else(|| {
                    ConfigError::Invalid("fixed locate mode without coordinates".into())
                })?;
                Arc::new(FixedLocator(position))
            }
            LocateMode::None => Arc::new(NoLocator),
        };
        Ok(locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.locate, LocateMode::Ip);
        assert_eq!(cfg.weather_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "locate = \"fixed\"\nlatitude = 51.5\nlongitude = -0.12").expect("write");

        let cfg = Config::load(Some(file.path())).expect("load");

        assert_eq!(cfg.locate, LocateMode::Fixed);
        assert_eq!(cfg.latitude, Some(51.5));
        assert_eq!(cfg.geocode_url, DEFAULT_GEOCODE_URL);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "locate = \"satellite\"").expect("write");

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_coordinates_override_switches_to_fixed() {
        let mut cfg = Config::default();
        cfg.apply(ConfigOverrides {
            latitude: Some(35.68),
            longitude: Some(139.69),
            ..Default::default()
        });
        assert_eq!(cfg.locate, LocateMode::Fixed);

        let mut cfg = Config::default();
        cfg.apply(ConfigOverrides {
            latitude: Some(35.68),
            longitude: Some(139.69),
            locate: Some(LocateMode::Ip),
            ..Default::default()
        });
        assert_eq!(cfg.locate, LocateMode::Ip);
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut cfg = Config {
            timeout_secs: 30,
            weather_url: "http://file".into(),
            ..Default::default()
        };
        cfg.apply(ConfigOverrides {
            timeout_secs: Some(3),
            ..Default::default()
        });
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.weather_url, "http://file");
    }

    #[test]
    fn test_validate_rejects_bad_fixed_config() {
        let cfg = Config {
            locate: LocateMode::Fixed,
            latitude: Some(10.0),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = Config {
            locate: LocateMode::Fixed,
            latitude: Some(100.0),
            longitude: Some(0.0),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = Config {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
