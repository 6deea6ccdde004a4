use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Table not found: {locator} (page has {found} table bodies)")]
    TableNotFound { locator: String, found: usize },

    #[error("Malformed table row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Cannot parse GDP value '{value}': {source}")]
    ParseGdpError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("GDP value '{value}' must be a finite, non-negative number")]
    InvalidGdpError { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run; never zero.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::TableNotFound { .. } | EtlError::MalformedRow { .. } => {
                ErrorCategory::Parsing
            }
            EtlError::ParseGdpError { .. } | EtlError::InvalidGdpError { .. } => {
                ErrorCategory::Data
            }
            EtlError::CsvError(_) | EtlError::IoError(_) | EtlError::DatabaseError(_) => {
                ErrorCategory::Storage
            }
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parsing | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check network connectivity and that the source URL is reachable",
            EtlError::HttpStatusError { .. } => {
                "Verify the source URL; the archived page may have moved"
            }
            EtlError::TableNotFound { .. } => {
                "The page layout changed; adjust the table index or provide a table selector"
            }
            EtlError::MalformedRow { .. } => {
                "The table no longer has the expected columns; inspect the page markup"
            }
            EtlError::ParseGdpError { .. } | EtlError::InvalidGdpError { .. } => {
                "The GDP column contains unexpected text; inspect the page markup"
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check that the output and log directories are writable"
            }
            EtlError::DatabaseError(_) => {
                "Check the database path and that no other process holds a lock on it"
            }
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download the GDP page: {}", self),
            ErrorCategory::Parsing => format!("Could not read the GDP table: {}", self),
            ErrorCategory::Data => format!("Could not convert GDP figures: {}", self),
            ErrorCategory::Storage => format!("Could not save results: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
