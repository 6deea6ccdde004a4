use crate::config::{
    validate_provider, DEFAULT_CSV_FILENAME, DEFAULT_DATABASE_PATH, DEFAULT_MIN_GDP_BILLIONS,
    DEFAULT_PROGRESS_LOG, DEFAULT_TABLE_INDEX, DEFAULT_TABLE_NAME,
};
use crate::domain::model::TableLocator;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    pub load: LoadConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub table_index: Option<usize>,
    pub table_selector: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_csv_filename")]
    pub csv_filename: String,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub min_gdp_billions: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            min_gdp_billions: DEFAULT_MIN_GDP_BILLIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_progress_log")]
    pub progress_log: String,
    /// `"compact"` or `"json"`.
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            progress_log: default_progress_log(),
            format: None,
        }
    }
}

fn default_csv_filename() -> String {
    DEFAULT_CSV_FILENAME.to_string()
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_progress_log() -> String {
    DEFAULT_PROGRESS_LOG.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GDP_SOURCE_URL})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let valid_formats = ["compact", "json"];
        if let Some(format) = &self.logging.format {
            if !valid_formats.contains(&format.as_str()) {
                return Err(EtlError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        validate_provider(self)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.format.as_deref() == Some("json")
    }
}

impl ConfigProvider for TomlConfig {
    fn source_url(&self) -> &str {
        &self.source.endpoint
    }

    fn table_locator(&self) -> TableLocator {
        match &self.extract.table_selector {
            Some(selector) => TableLocator::Selector(selector.clone()),
            None => TableLocator::Position(self.extract.table_index.unwrap_or(DEFAULT_TABLE_INDEX)),
        }
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn csv_filename(&self) -> &str {
        &self.load.csv_filename
    }

    fn database_path(&self) -> &str {
        &self.load.database_path
    }

    fn table_name(&self) -> &str {
        &self.load.table_name
    }

    fn progress_log_path(&self) -> &str {
        &self.logging.progress_log
    }

    fn min_gdp_billions(&self) -> f64 {
        self.query.min_gdp_billions
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[pipeline]
name = "gdp"

[source]
endpoint = "https://example.com/gdp"

[load]
output_path = "./output"
"#;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.pipeline.name, "gdp");
        assert_eq!(config.source_url(), "https://example.com/gdp");
        assert_eq!(config.table_locator(), TableLocator::Position(2));
        assert_eq!(config.csv_filename(), "Countries_by_GDP.csv");
        assert_eq!(config.database_path(), "World_Economies.db");
        assert_eq!(config.table_name(), "Countries_by_GDP");
        assert_eq!(config.progress_log_path(), "logs/etl_project_log.txt");
        assert_eq!(config.min_gdp_billions(), 100.0);
        assert!(!config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[pipeline]
name = "gdp-full"
description = "Countries by nominal GDP"
version = "1.0.0"

[source]
endpoint = "https://example.com/gdp"
timeout_seconds = 30

[extract]
table_selector = "table.wikitable > tbody"

[load]
output_path = "./out"
csv_filename = "gdp.csv"
database_path = "./out/gdp.db"
table_name = "gdp"

[query]
min_gdp_billions = 1000.0

[logging]
progress_log = "./out/progress.txt"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.table_locator(),
            TableLocator::Selector("table.wikitable > tbody".to_string())
        );
        assert_eq!(config.timeout_seconds(), Some(30));
        assert_eq!(config.table_name(), "gdp");
        assert_eq!(config.min_gdp_billions(), 1000.0);
        assert!(config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GDP_ETL_TEST_ENDPOINT", "https://test.example.com/gdp");

        let toml_content = r#"
[pipeline]
name = "test"

[source]
endpoint = "${GDP_ETL_TEST_ENDPOINT}"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.endpoint, "https://test.example.com/gdp");

        std::env::remove_var("GDP_ETL_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[pipeline]
name = "test"

[source]
endpoint = "invalid-url"

[load]
output_path = "./output"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let bad_format = MINIMAL.to_string() + "\n[logging]\nformat = \"xml\"\n";
        let config = TomlConfig::from_toml_str(&bad_format).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_required_section_fails() {
        let toml_content = r#"
[pipeline]
name = "test"
"#;
        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "gdp");
    }
}
