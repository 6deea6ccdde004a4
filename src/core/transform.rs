use crate::domain::model::{CountryGdpRecord, RawGdpRecord};
use crate::utils::error::{EtlError, Result};

const THOUSANDS_SEPARATOR: char = ',';
const MILLIONS_PER_BILLION: f64 = 1000.0;

/// Parses page text such as `"26,854,599"` into millions of US dollars.
pub fn parse_gdp_millions(text: &str) -> Result<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR && !c.is_whitespace())
        .collect();

    let value = cleaned
        .parse::<f64>()
        .map_err(|source| EtlError::ParseGdpError {
            value: text.to_string(),
            source,
        })?;

    if !value.is_finite() || value < 0.0 {
        return Err(EtlError::InvalidGdpError {
            value: text.to_string(),
        });
    }
    Ok(value)
}

/// Millions to billions, rounded to two decimal places with ties to even.
pub fn millions_to_billions(millions: f64) -> f64 {
    (millions / MILLIONS_PER_BILLION * 100.0).round_ties_even() / 100.0
}

pub fn transform_record(raw: RawGdpRecord) -> Result<CountryGdpRecord> {
    let millions = parse_gdp_millions(&raw.gdp_usd_millions)?;
    Ok(CountryGdpRecord {
        country: raw.country,
        gdp_usd_billions: millions_to_billions(millions),
    })
}

pub fn transform_records(raw: Vec<RawGdpRecord>) -> Result<Vec<CountryGdpRecord>> {
    raw.into_iter().map(transform_record).collect()
}
