pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{storage::LocalStorage, RunSettings};
pub use crate::core::{decider::EntertainmentDecider, etl::EtlEngine, geo::GeoDistance};
pub use crate::domain::model::{Coordinate, CustomerRecord, Diagnostic, OutputRecord, RunReport};
pub use crate::utils::diagnostics::{MemoryDiagnostics, TracingDiagnostics};
pub use crate::utils::error::{EntertainerError, Result};
