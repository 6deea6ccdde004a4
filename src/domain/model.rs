use serde::{Deserialize, Serialize};
use std::fmt;

/// One qualifying table row as it appears on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGdpRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "GDP_USD_millions")]
    pub gdp_usd_millions: String,
}

/// A country with its nominal GDP in billions of US dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryGdpRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "GDP_USD_billions")]
    pub gdp_usd_billions: f64,
}

impl CountryGdpRecord {
    pub fn new(country: impl Into<String>, gdp_usd_billions: f64) -> Self {
        Self {
            country: country.into(),
            gdp_usd_billions,
        }
    }
}

/// How the extractor finds the GDP table on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableLocator {
    /// Zero-based index among all `<tbody>` elements in document order.
    /// Breaks silently if the page gains or loses a table.
    Position(usize),
    /// CSS selector naming the table (or its body) directly.
    Selector(String),
}

impl Default for TableLocator {
    fn default() -> Self {
        TableLocator::Position(2)
    }
}

impl fmt::Display for TableLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableLocator::Position(index) => write!(f, "tbody #{}", index + 1),
            TableLocator::Selector(selector) => write!(f, "selector '{}'", selector),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub statement: String,
    pub rows: Vec<CountryGdpRecord>,
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.statement)?;
        let width = self
            .rows
            .iter()
            .map(|row| row.country.chars().count())
            .chain(std::iter::once("Country".len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{:<width$}  GDP_USD_billions", "Country", width = width)?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<width$}  {:>16.2}",
                row.country,
                row.gdp_usd_billions,
                width = width
            )?;
        }
        write!(f, "({} rows)", self.rows.len())
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub csv_path: String,
    pub records_loaded: usize,
    pub query: QueryResult,
}
