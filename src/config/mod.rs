#[cfg(feature = "cli")]
pub mod cli;
pub mod paths;
pub mod storage;
pub mod toml_config;

use crate::core::geo::DEFAULT_EARTH_RADIUS_KM;
use crate::domain::model::Coordinate;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use self::toml_config::TomlConfig;

pub const DEFAULT_CUSTOMER_DATA_FILE: &str = "customers.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";
pub const DEFAULT_DESTINATION_LATITUDE: f64 = 53.339428;
pub const DEFAULT_DESTINATION_LONGITUDE: f64 = -6.257664;
pub const DEFAULT_MAX_TRAVEL_DISTANCE: f64 = 100.0;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub customer_data_file: PathBuf,
    pub customer_output_file: PathBuf,
    pub fallback_output_file: PathBuf,
    pub destination: Coordinate,
    pub max_travel_distance: f64,
    pub earth_radius_km: f64,
    pub monitor: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            customer_data_file: PathBuf::from(DEFAULT_CUSTOMER_DATA_FILE),
            customer_output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            fallback_output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            destination: Coordinate::new(DEFAULT_DESTINATION_LATITUDE, DEFAULT_DESTINATION_LONGITUDE),
            max_travel_distance: DEFAULT_MAX_TRAVEL_DISTANCE,
            earth_radius_km: DEFAULT_EARTH_RADIUS_KM,
            monitor: false,
        }
    }
}

impl RunSettings {
    pub fn new(customer_data_file: impl Into<PathBuf>, destination: Coordinate) -> Self {
        Self {
            customer_data_file: customer_data_file.into(),
            destination,
            ..Self::default()
        }
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.customer_output_file = path.into();
        self
    }

    pub fn with_fallback_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_output_file = path.into();
        self
    }

    pub fn with_max_travel_distance(mut self, km: f64) -> Self {
        self.max_travel_distance = km;
        self
    }

    pub fn with_earth_radius_km(mut self, km: f64) -> Self {
        self.earth_radius_km = km;
        self
    }

    /// Layers the values present in a TOML file over the defaults.
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self::default();

        if let Some(destination) = &config.destination {
            if let Some(latitude) = destination.latitude {
                settings.destination.latitude = latitude;
            }
            if let Some(longitude) = destination.longitude {
                settings.destination.longitude = longitude;
            }
        }
        if let Some(distance) = config.filter.as_ref().and_then(|f| f.max_travel_distance) {
            settings.max_travel_distance = distance;
        }
        if let Some(path) = config.input.as_ref().and_then(|i| i.customer_data_file.clone()) {
            settings.customer_data_file = path;
        }
        if let Some(output) = &config.output {
            if let Some(path) = &output.customer_output_file {
                settings.customer_output_file = path.clone();
            }
            if let Some(path) = &output.fallback_output_file {
                settings.fallback_output_file = path.clone();
            }
        }
        if let Some(radius) = config.geo.as_ref().and_then(|g| g.earth_radius_km) {
            settings.earth_radius_km = radius;
        }
        settings.monitor = config.monitoring_enabled();

        settings
    }
}

impl ConfigProvider for RunSettings {
    fn customer_data_file(&self) -> &Path {
        &self.customer_data_file
    }

    fn customer_output_file(&self) -> &Path {
        &self.customer_output_file
    }

    fn fallback_output_file(&self) -> &Path {
        &self.fallback_output_file
    }

    fn destination(&self) -> Coordinate {
        self.destination
    }

    fn max_travel_distance(&self) -> f64 {
        self.max_travel_distance
    }

    fn earth_radius_km(&self) -> f64 {
        self.earth_radius_km
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("customer_data_file", &self.customer_data_file)?;
        validation::validate_path("customer_output_file", &self.customer_output_file)?;
        validation::validate_path("fallback_output_file", &self.fallback_output_file)?;
        validation::validate_range("destination.latitude", self.destination.latitude, -90.0, 90.0)?;
        validation::validate_range(
            "destination.longitude",
            self.destination.longitude,
            -180.0,
            180.0,
        )?;
        validation::validate_non_negative("max_travel_distance", self.max_travel_distance)?;
        validation::validate_positive("earth_radius_km", self.earth_radius_km)?;
        Ok(())
    }
}
