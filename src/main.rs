use clap::Parser;
use customer_entertainer::utils::error::ErrorSeverity;
use customer_entertainer::utils::{logger, validation::Validate};
use customer_entertainer::{
    CliConfig, EntertainerError, EntertainmentDecider, EtlEngine, LocalStorage, TracingDiagnostics,
};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting customer-entertainer");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.resolve_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Run settings: {:?}", settings);

    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let decider = match EntertainmentDecider::new(
        &settings,
        LocalStorage::new(),
        Arc::new(TracingDiagnostics),
    ) {
        Ok(decider) => decider,
        Err(e) => exit_with(e),
    };

    let engine = EtlEngine::new_with_monitoring(decider, settings.monitor);
    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Selected {} customers, output saved to: {}",
                report.result.selected.len(),
                report.output_path
            );
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: EntertainerError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
