pub mod cli;
pub mod toml_config;

use crate::domain::model::TableLocator;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_URL: &str = "https://web.archive.org/web/20230902185326/https://en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29";
pub const DEFAULT_TABLE_INDEX: usize = 2;
pub const DEFAULT_CSV_FILENAME: &str = "Countries_by_GDP.csv";
pub const DEFAULT_DATABASE_PATH: &str = "World_Economies.db";
pub const DEFAULT_TABLE_NAME: &str = "Countries_by_GDP";
pub const DEFAULT_PROGRESS_LOG: &str = "logs/etl_project_log.txt";
pub const DEFAULT_MIN_GDP_BILLIONS: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "gdp-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Scrape countries by nominal GDP into CSV and SQLite")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_SOURCE_URL))]
    pub source_url: String,

    /// Zero-based index of the GDP table among the page's table bodies
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_TABLE_INDEX))]
    pub table_index: usize,

    /// CSS selector for the GDP table; overrides --table-index
    #[cfg_attr(feature = "cli", arg(long))]
    pub table_selector: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "."))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_CSV_FILENAME))]
    pub csv_filename: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_DATABASE_PATH))]
    pub database_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_TABLE_NAME))]
    pub table_name: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_PROGRESS_LOG))]
    pub log_path: String,

    /// Rows at or above this GDP (USD billions) are printed after loading
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MIN_GDP_BILLIONS))]
    pub min_gdp_billions: f64,

    #[cfg_attr(feature = "cli", arg(long))]
    pub timeout_seconds: Option<u64>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            table_index: DEFAULT_TABLE_INDEX,
            table_selector: None,
            output_path: ".".to_string(),
            csv_filename: DEFAULT_CSV_FILENAME.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_path: DEFAULT_PROGRESS_LOG.to_string(),
            min_gdp_billions: DEFAULT_MIN_GDP_BILLIONS,
            timeout_seconds: None,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn source_url(&self) -> &str {
        &self.source_url
    }

    fn table_locator(&self) -> TableLocator {
        match &self.table_selector {
            Some(selector) => TableLocator::Selector(selector.clone()),
            None => TableLocator::Position(self.table_index),
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn csv_filename(&self) -> &str {
        &self.csv_filename
    }

    fn database_path(&self) -> &str {
        &self.database_path
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn progress_log_path(&self) -> &str {
        &self.log_path
    }

    fn min_gdp_billions(&self) -> f64 {
        self.min_gdp_billions
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub(crate) fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_url("source_url", config.source_url())?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_path("csv_filename", config.csv_filename())?;
    validation::validate_path("database_path", config.database_path())?;
    validation::validate_path("log_path", config.progress_log_path())?;
    validation::validate_sql_identifier("table_name", config.table_name())?;
    validation::validate_non_negative("min_gdp_billions", config.min_gdp_billions())?;

    if let TableLocator::Selector(selector) = config.table_locator() {
        validation::validate_non_empty_string("table_selector", &selector)?;
    }
    if let Some(timeout) = config.timeout_seconds() {
        validation::validate_positive_number("timeout_seconds", timeout, 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.table_locator(), TableLocator::Position(2));
    }

    #[test]
    fn test_selector_overrides_index() {
        let config = CliConfig {
            table_selector: Some("table.wikitable > tbody".to_string()),
            ..CliConfig::default()
        };
        assert_eq!(
            config.table_locator(),
            TableLocator::Selector("table.wikitable > tbody".to_string())
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_url = CliConfig {
            source_url: "not a url".to_string(),
            ..CliConfig::default()
        };
        assert!(bad_url.validate().is_err());

        let bad_table = CliConfig {
            table_name: "Countries by GDP".to_string(),
            ..CliConfig::default()
        };
        assert!(bad_table.validate().is_err());

        let bad_threshold = CliConfig {
            min_gdp_billions: -1.0,
            ..CliConfig::default()
        };
        assert!(bad_threshold.validate().is_err());

        let blank_selector = CliConfig {
            table_selector: Some("  ".to_string()),
            ..CliConfig::default()
        };
        assert!(blank_selector.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_parsing() {
        use clap::Parser;

        let config = CliConfig::parse_from([
            "gdp-etl",
            "--output-path",
            "/tmp/out",
            "--min-gdp-billions",
            "500",
            "--verbose",
        ]);

        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.output_path, "/tmp/out");
        assert_eq!(config.min_gdp_billions, 500.0);
        assert_eq!(config.table_index, 2);
        assert!(config.verbose);
    }
}
