use crate::adapters::{csv_file, database::GdpDatabase};
use crate::core::extract::extract_gdp_table;
use crate::core::transform::transform_records;
use crate::core::{ConfigProvider, CountryGdpRecord, Pipeline, RawGdpRecord, Storage};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

pub struct GdpPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> GdpPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// GETs the configured page and returns its body. Any non-2xx status is an error.
    pub async fn fetch_markup(&self) -> Result<String> {
        let url = self.config.source_url();
        tracing::debug!("Making HTTP request to: {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = self.config.timeout_seconds() {
            request = request.timeout(Duration::from_secs(timeout));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("HTTP response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let markup = response.text().await?;
        tracing::debug!("Downloaded {} bytes of markup", markup.len());
        Ok(markup)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GdpPipeline<S, C> {
    type Table = GdpDatabase;

    async fn extract(&self) -> Result<Vec<RawGdpRecord>> {
        tracing::info!("🚀 Extracting GDP table from: {}", self.config.source_url());

        let markup = self.fetch_markup().await?;
        let records = extract_gdp_table(&markup, &self.config.table_locator())?;

        tracing::info!("📊 Extracted {} records", records.len());
        Ok(records)
    }

    async fn transform(&self, data: Vec<RawGdpRecord>) -> Result<Vec<CountryGdpRecord>> {
        tracing::info!("🔧 Converting {} GDP figures to USD billions", data.len());
        let records = transform_records(data)?;
        tracing::info!("✅ Transform complete: {} records", records.len());
        Ok(records)
    }

    async fn load_csv(&self, records: &[CountryGdpRecord]) -> Result<String> {
        let data = csv_file::encode_records(records)?;
        tracing::debug!("Writing CSV ({} bytes) to storage", data.len());

        self.storage
            .write_file(self.config.csv_filename(), &data)
            .await?;

        let output_path = Path::new(self.config.output_path())
            .join(self.config.csv_filename())
            .display()
            .to_string();
        tracing::info!("📁 CSV saved: {}", output_path);
        Ok(output_path)
    }

    fn open_table(&self) -> Result<GdpDatabase> {
        GdpDatabase::open(self.config.database_path(), self.config.table_name())
    }

    fn min_gdp_billions(&self) -> f64 {
        self.config.min_gdp_billions()
    }
}
