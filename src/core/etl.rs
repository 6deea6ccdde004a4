use crate::core::{Pipeline, RecordTable, RunSummary};
use crate::utils::error::Result;
use crate::utils::logger::ProgressLog;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    progress: ProgressLog,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P, progress: ProgressLog) -> Self {
        Self { pipeline, progress }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform, CSV load, table load and the verification query.
    ///
    /// The first error aborts the run; "Process completed." is only logged
    /// when every stage succeeded.
    pub async fn run(&self) -> Result<RunSummary> {
        self.progress
            .record("Preliminaries completed. Starting ETL process.")?;

        // Extract
        let raw_data = self.pipeline.extract().await?;
        self.progress
            .record("Data extraction completed. Starting transformation.")?;

        // Transform
        let records = self.pipeline.transform(raw_data).await?;
        self.progress
            .record("Data transformation completed. Starting load process.")?;

        // Load
        let csv_path = self.pipeline.load_csv(&records).await?;
        self.progress.record("Data saved to CSV file.")?;

        let mut table = self.pipeline.open_table()?;
        self.progress.record("SQL connection initiated.")?;

        let records_loaded = table.replace_all(&records)?;
        self.progress
            .record("Data loaded into database table. Running query.")?;

        // Query
        let query = table.query_min_gdp(self.pipeline.min_gdp_billions())?;
        println!("{}", query);

        self.progress.record("Process completed.")?;

        Ok(RunSummary {
            csv_path,
            records_loaded,
            query,
        })
    }
}
