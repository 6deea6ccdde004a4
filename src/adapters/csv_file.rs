use crate::domain::model::CountryGdpRecord;
use crate::utils::error::{EtlError, Result};

pub const CSV_HEADER: [&str; 2] = ["Country", "GDP_USD_billions"];

/// Serializes records as CSV with a `Country,GDP_USD_billions` header.
pub fn encode_records(records: &[CountryGdpRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    // An empty batch still gets its header row.
    if records.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

pub fn decode_records(data: &[u8]) -> Result<Vec<CountryGdpRecord>> {
    let mut reader = csv::Reader::from_reader(data);

    let headers = reader.headers()?;
    if headers.iter().ne(CSV_HEADER) {
        return Err(EtlError::ConfigValidationError {
            field: "csv_header".to_string(),
            message: format!(
                "expected '{}', found '{}'",
                CSV_HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<CountryGdpRecord>, _>>()?;
    Ok(records)
}
