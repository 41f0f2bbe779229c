use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use weathercheck_core::{ConfigOverrides, LocateMode};

/// WeatherCheck - today's hourly forecast for where you are
#[derive(Parser, Debug)]
#[command(name = "weathercheck", version)]
#[command(about = "Terminal client showing today's hourly forecast for your location")]
pub struct Args {
    /// Config file (default: platform config dir, e.g. ~/.config/weathercheck/config.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Where the position comes from
    #[arg(long, value_enum)]
    pub locate: Option<LocateArg>,

    /// Fixed latitude; with --lon implies --locate fixed
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Fixed longitude; with --lat implies --locate fixed
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Forecast endpoint
    #[arg(long)]
    pub weather_url: Option<String>,

    /// Reverse geocoding endpoint
    #[arg(long)]
    pub geocode_url: Option<String>,

    /// IP geolocation endpoint
    #[arg(long)]
    pub ip_lookup_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log file (default: platform cache dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Start locating right away instead of waiting for `l`
    #[arg(long, short = 'a')]
    pub auto_locate: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocateArg {
    Ip,
    Fixed,
    None,
}

impl From<LocateArg> for LocateMode {
    fn from(arg: LocateArg) -> Self {
        match arg {
            LocateArg::Ip => LocateMode::Ip,
            LocateArg::Fixed => LocateMode::Fixed,
            LocateArg::None => LocateMode::None,
        }
    }
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            weather_url: self.weather_url.clone(),
            geocode_url: self.geocode_url.clone(),
            ip_lookup_url: self.ip_lookup_url.clone(),
            locate: self.locate.map(LocateMode::from),
            latitude: self.lat,
            longitude: self.lon,
            timeout_secs: self.timeout,
            log_file: self.log_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_negative_coordinates() {
        let args = Args::parse_from(["weathercheck", "--lat", "-33.87", "--lon", "-151.2"]);
        let overrides = args.overrides();
        assert_eq!(overrides.latitude, Some(-33.87));
        assert_eq!(overrides.longitude, Some(-151.2));
        assert_eq!(overrides.locate, None);
    }

    #[test]
    fn test_locate_mode_and_flags() {
        let args = Args::parse_from(["weathercheck", "--locate", "none", "-a", "--timeout", "3"]);
        assert!(args.auto_locate);
        let overrides = args.overrides();
        assert_eq!(overrides.locate, Some(LocateMode::None));
        assert_eq!(overrides.timeout_secs, Some(3));

        assert!(Args::try_parse_from(["weathercheck", "--locate", "gps"]).is_err());
    }
}
