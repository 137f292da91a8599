use crate::config::toml_config::TomlConfig;
use crate::config::RunSettings;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command line flags. Unset flags fall back to `--config`, then to the built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "customer-entertainer")]
#[command(about = "Select customers within travel distance of a destination")]
pub struct CliConfig {
    /// Full path to the customer data file (one JSON object per line)
    #[arg(long)]
    pub customer_data_file: Option<PathBuf>,

    /// Latitude of the destination in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub destination_latitude: Option<f64>,

    /// Longitude of the destination in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub destination_longitude: Option<f64>,

    /// Maximum travel distance in kilometers
    #[arg(long)]
    pub max_travel_distance: Option<f64>,

    /// Full path to the output file for selected customers
    #[arg(long)]
    pub customer_output_file: Option<PathBuf>,

    /// Earth radius used for distance calculation, in kilometers
    #[arg(long)]
    pub earth_radius_km: Option<f64>,

    /// Path to a TOML run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn resolve_settings(&self) -> Result<RunSettings> {
        let mut settings = match &self.config {
            Some(path) => RunSettings::from_toml(&TomlConfig::from_file(path)?),
            None => RunSettings::default(),
        };

        if let Some(path) = &self.customer_data_file {
            settings.customer_data_file = path.clone();
        }
        if let Some(latitude) = self.destination_latitude {
            settings.destination.latitude = latitude;
        }
        if let Some(longitude) = self.destination_longitude {
            settings.destination.longitude = longitude;
        }
        if let Some(distance) = self.max_travel_distance {
            settings.max_travel_distance = distance;
        }
        if let Some(path) = &self.customer_output_file {
            settings.customer_output_file = path.clone();
        }
        if let Some(radius) = self.earth_radius_km {
            settings.earth_radius_km = radius;
        }
        settings.monitor |= self.monitor;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Coordinate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_flags() {
        let cli = CliConfig::try_parse_from(["customer-entertainer"]).unwrap();
        assert_eq!(cli.resolve_settings().unwrap(), RunSettings::default());
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let cli = CliConfig::try_parse_from([
            "customer-entertainer",
            "--destination-latitude",
            "-33.8688",
            "--destination-longitude",
            "-70.6693",
            "--max-travel-distance",
            "250",
        ])
        .unwrap();

        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.destination, Coordinate::new(-33.8688, -70.6693));
        assert_eq!(settings.max_travel_distance, 250.0);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[filter]\nmax_travel_distance = 10.0\n[input]\ncustomer_data_file = \"from_toml.txt\"\n")
            .unwrap();

        let cli = CliConfig::try_parse_from([
            "customer-entertainer",
            "--config",
            file.path().to_str().unwrap(),
            "--max-travel-distance",
            "42.5",
        ])
        .unwrap();

        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.max_travel_distance, 42.5);
        assert_eq!(settings.customer_data_file, PathBuf::from("from_toml.txt"));
    }
}
