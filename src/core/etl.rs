use crate::domain::model::RunReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting customer selection");

        // Extract
        let source = self.pipeline.extract().await?;
        tracing::info!("📥 Reading customer records from {}", source.path().display());
        self.monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(source).await?;
        tracing::info!(
            "🔎 Selected {} of {} records ({} rejected, {} out of range)",
            result.selected.len(),
            result.records_read,
            result.rejected,
            result.out_of_range
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunReport {
            output_path,
            result,
        })
    }
}
