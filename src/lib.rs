pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::database::GdpDatabase;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{etl::EtlEngine, pipeline::GdpPipeline};
pub use domain::model::{CountryGdpRecord, QueryResult, RawGdpRecord, RunSummary, TableLocator};
pub use utils::error::{EtlError, Result};
pub use utils::logger::ProgressLog;
