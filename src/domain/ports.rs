use crate::core::source::RecordSource;
use crate::domain::model::{Coordinate, Diagnostic, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path`, truncating any previous content.
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn customer_data_file(&self) -> &Path;
    fn customer_output_file(&self) -> &Path;
    fn fallback_output_file(&self) -> &Path;
    fn destination(&self) -> Coordinate;
    fn max_travel_distance(&self) -> f64;
    fn earth_radius_km(&self) -> f64;
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RecordSource>;
    async fn transform(&self, source: RecordSource) -> Result<TransformResult>;
    async fn load(&self, result: &TransformResult) -> Result<String>;
}
