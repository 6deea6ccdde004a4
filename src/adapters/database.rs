use crate::domain::model::{CountryGdpRecord, QueryResult};
use crate::domain::ports::RecordTable;
use crate::utils::error::Result;
use crate::utils::validation::validate_sql_identifier;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite table of `(Country TEXT, GDP_USD_billions REAL)` rows.
pub struct GdpDatabase {
    conn: Connection,
    table_name: String,
}

impl GdpDatabase {
    pub fn open<P: AsRef<Path>>(path: P, table_name: &str) -> Result<Self> {
        validate_sql_identifier("table_name", table_name)?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!("Opening SQLite database at {}", path.display());
        Ok(Self {
            conn: Connection::open(path)?,
            table_name: table_name.to_string(),
        })
    }

    pub fn open_in_memory(table_name: &str) -> Result<Self> {
        validate_sql_identifier("table_name", table_name)?;
        Ok(Self {
            conn: Connection::open_in_memory()?,
            table_name: table_name.to_string(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn read_all(&self) -> Result<Vec<CountryGdpRecord>> {
        self.select(&format!("SELECT * FROM {}", self.table_name))
    }

    fn select(&self, statement: &str) -> Result<Vec<CountryGdpRecord>> {
        let mut stmt = self.conn.prepare(statement)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CountryGdpRecord {
                    country: row.get(0)?,
                    gdp_usd_billions: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl RecordTable for GdpDatabase {
    fn replace_all(&mut self, records: &[CountryGdpRecord]) -> Result<usize> {
        let table = &self.table_name;
        let tx = self.conn.transaction()?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (Country TEXT, GDP_USD_billions REAL);"
        ))?;

        {
            let mut insert = tx.prepare(&format!(
                "INSERT INTO {table} (Country, GDP_USD_billions) VALUES (?1, ?2)"
            ))?;
            for record in records {
                insert.execute(params![record.country, record.gdp_usd_billions])?;
            }
        }

        tx.commit()?;
        tracing::debug!("Replaced {} with {} rows", table, records.len());
        Ok(records.len())
    }

    fn query_min_gdp(&self, min_gdp_billions: f64) -> Result<QueryResult> {
        let statement = format!(
            "SELECT * FROM {} WHERE GDP_USD_billions >= {}",
            self.table_name, min_gdp_billions
        );
        let rows = self.select(&statement)?;
        Ok(QueryResult { statement, rows })
    }
}
