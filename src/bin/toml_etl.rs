use anyhow::Context;
use clap::Parser;
use gdp_etl::core::Pipeline;
use gdp_etl::domain::ports::ConfigProvider;
use gdp_etl::utils::{logger, validation::Validate};
use gdp_etl::{EtlEngine, GdpPipeline, LocalStorage, ProgressLog, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "GDP ETL driven by a TOML pipeline file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "gdp-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the query threshold (USD billions) from config
    #[arg(long)]
    min_gdp: Option<f64>,

    /// Fetch, extract and transform, then print the records as JSON without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based GDP ETL");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(min_gdp) = args.min_gdp {
        config.query.min_gdp_billions = min_gdp;
        tracing::info!("🔧 Query threshold overridden to: {}", min_gdp);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let progress = ProgressLog::new(config.progress_log_path());
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = GdpPipeline::new(storage, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let raw = pipeline.extract().await.context("dry run extraction failed")?;
        let records = pipeline
            .transform(raw)
            .await
            .context("dry run transform failed")?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let engine = EtlEngine::new(pipeline, progress);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ ETL process completed successfully!");
            tracing::info!(
                "📁 {} records saved to: {}",
                summary.records_loaded,
                summary.csv_path
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name,
        config.pipeline.version.as_deref().unwrap_or("0")
    );
    println!("  Source: {}", config.source_url());
    println!("  Table: {}", config.table_locator());
    println!(
        "  CSV: {}/{}",
        config.output_path(),
        config.csv_filename()
    );
    println!(
        "  Database: {} (table {})",
        config.database_path(),
        config.table_name()
    );
    println!("  Query threshold: {} USD billions", config.min_gdp_billions());
    println!("  Progress log: {}", config.progress_log_path());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
