use clap::Parser;
use gdp_etl::utils::{logger, validation::Validate};
use gdp_etl::{CliConfig, EtlEngine, GdpPipeline, LocalStorage, ProgressLog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting gdp-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let progress = ProgressLog::new(config.log_path.clone());
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = GdpPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline, progress);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ ETL process completed successfully!");
            tracing::info!(
                "📁 {} records saved to {} and table {}",
                summary.records_loaded,
                summary.csv_path,
                engine.pipeline().config().table_name
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
