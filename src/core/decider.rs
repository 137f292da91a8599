use crate::core::etl::EtlEngine;
use crate::core::geo::GeoDistance;
use crate::core::sink::{ReportHeader, ResultSink};
use crate::core::source::RecordSource;
use crate::core::validator::RecordValidator;
use crate::config::paths::resolve_output_path;
use crate::domain::model::{Coordinate, RunReport, TransformResult};
use crate::domain::ports::{ConfigProvider, DiagnosticSink, Pipeline, Storage};
use crate::utils::error::{EntertainerError, Result};
use async_trait::async_trait;
use std::io::{Stdout, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Selects the customers living within `max_travel_distance` of the destination.
///
/// Construction opens the customer data file, so a missing file fails before
/// any output is produced. The record source can be read once; `decide`
/// consumes the decider.
pub struct EntertainmentDecider<S: Storage, W: Write + Send = Stdout> {
    destination: Coordinate,
    max_travel_distance: f64,
    geo: GeoDistance,
    validator: RecordValidator,
    source: Mutex<Option<RecordSource>>,
    sink: ResultSink<S, W>,
}

impl<S: Storage> EntertainmentDecider<S, Stdout> {
    pub fn new<C: ConfigProvider>(
        config: &C,
        storage: S,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        Self::with_console(config, storage, diagnostics, std::io::stdout())
    }
}

impl<S: Storage, W: Write + Send> EntertainmentDecider<S, W> {
    pub fn with_console<C: ConfigProvider>(
        config: &C,
        storage: S,
        diagnostics: Arc<dyn DiagnosticSink>,
        console: W,
    ) -> Result<Self> {
        let source = RecordSource::open(config.customer_data_file(), diagnostics.clone())?;
        let output_path = resolve_output_path(
            config.customer_output_file(),
            config.fallback_output_file(),
            diagnostics.as_ref(),
        );

        let header = ReportHeader {
            destination: config.destination(),
            max_travel_distance: config.max_travel_distance(),
        };

        Ok(Self {
            destination: config.destination(),
            max_travel_distance: config.max_travel_distance(),
            geo: GeoDistance::new(config.earth_radius_km()),
            validator: RecordValidator::new(diagnostics),
            source: Mutex::new(Some(source)),
            sink: ResultSink::with_console(storage, output_path, header, console),
        })
    }

    pub fn output_path(&self) -> &Path {
        self.sink.output_path()
    }

    /// Runs extract, transform and load once.
    pub async fn decide(self) -> Result<RunReport> {
        EtlEngine::new(self).run().await
    }

    /// Validates, filters by distance (inclusive) and sorts by `user_id`.
    pub fn select(&self, source: RecordSource) -> Result<TransformResult> {
        let mut result = TransformResult::default();

        for line in source {
            let line = line?;
            result.records_read += 1;

            let Some(customer) = self.validator.accept(&line.record, Some(line.line_number)) else {
                result.rejected += 1;
                continue;
            };

            let distance = self.geo.distance(customer.coordinate, self.destination);
            if distance <= self.max_travel_distance {
                tracing::debug!(
                    "Customer {} is {:.2}km away, selected",
                    customer.user_id,
                    distance
                );
                result.selected.push(customer.into_output());
            } else {
                tracing::debug!(
                    "Customer {} is {:.2}km away, beyond {}km",
                    customer.user_id,
                    distance,
                    self.max_travel_distance
                );
                result.out_of_range += 1;
            }
        }

        // stable: equal ids keep input order
        result.selected.sort_by_key(|record| record.user_id);
        Ok(result)
    }
}

#[async_trait]
impl<S: Storage, W: Write + Send> Pipeline for EntertainmentDecider<S, W> {
    async fn extract(&self) -> Result<RecordSource> {
        let mut slot = self
            .source
            .lock()
            .map_err(|_| EntertainerError::ProcessingError {
                message: "record source lock poisoned".to_string(),
            })?;

        slot.take().ok_or_else(|| EntertainerError::ProcessingError {
            message: "customer records were already read".to_string(),
        })
    }

    async fn transform(&self, source: RecordSource) -> Result<TransformResult> {
        self.select(source)
    }

    async fn load(&self, result: &TransformResult) -> Result<String> {
        self.sink.emit(&result.selected).await
    }
}
