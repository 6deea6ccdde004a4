use crate::domain::model::{CountryGdpRecord, QueryResult, RawGdpRecord, TableLocator};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn table_locator(&self) -> TableLocator;
    fn output_path(&self) -> &str;
    fn csv_filename(&self) -> &str;
    fn database_path(&self) -> &str;
    fn table_name(&self) -> &str;
    fn progress_log_path(&self) -> &str;
    fn min_gdp_billions(&self) -> f64;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// Relational sink holding the transformed records.
pub trait RecordTable {
    /// Drops and recreates the table, then inserts `records`. Returns rows written.
    fn replace_all(&mut self, records: &[CountryGdpRecord]) -> Result<usize>;
    fn query_min_gdp(&self, min_gdp_billions: f64) -> Result<QueryResult>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Table: RecordTable;

    async fn extract(&self) -> Result<Vec<RawGdpRecord>>;
    async fn transform(&self, data: Vec<RawGdpRecord>) -> Result<Vec<CountryGdpRecord>>;
    async fn load_csv(&self, records: &[CountryGdpRecord]) -> Result<String>;
    fn open_table(&self) -> Result<Self::Table>;
    fn min_gdp_billions(&self) -> f64;
}
