//! HTML table extraction.
//!
//! The GDP page carries several tables; by default the third `<tbody>` in
//! document order is taken as the GDP table. That position is a fixed
//! assumption about the page, so a layout change surfaces as
//! [`EtlError::TableNotFound`], a [`EtlError::MalformedRow`], or an empty
//! result. When the page offers a stable hook, [`TableLocator::Selector`]
//! names the table directly instead.

use crate::domain::model::{RawGdpRecord, TableLocator};
use crate::utils::error::{EtlError, Result};
use scraper::{ElementRef, Html, Selector};

/// Text the page uses in place of a missing GDP estimate (U+2014 EM DASH).
pub const MISSING_VALUE_MARKER: &str = "\u{2014}";

const GDP_CELL_INDEX: usize = 2;

struct TableSelectors {
    table_body: Selector,
    row: Selector,
    link: Selector,
}

impl TableSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            table_body: parse_selector("tbody")?,
            row: parse_selector("tr")?,
            link: parse_selector("a")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::InvalidConfigValueError {
        field: "table_selector".to_string(),
        value: css.to_string(),
        reason: e.to_string(),
    })
}

/// Parses `markup` and returns one record per qualifying row of the located table.
///
/// A row qualifies when its first cell holds a link with text and its third
/// cell does not contain [`MISSING_VALUE_MARKER`]. Rows without `<td>` cells
/// (headers) are skipped.
pub fn extract_gdp_table(markup: &str, locator: &TableLocator) -> Result<Vec<RawGdpRecord>> {
    let selectors = TableSelectors::new()?;
    let document = Html::parse_document(markup);
    let table = locate_table(&document, locator, &selectors)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (index, row) in table.select(&selectors.row).enumerate() {
        match extract_row(index + 1, row, &selectors)? {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    tracing::debug!(
        "Extracted {} rows from {} ({} skipped)",
        records.len(),
        locator,
        skipped
    );
    Ok(records)
}

fn locate_table<'a>(
    document: &'a Html,
    locator: &TableLocator,
    selectors: &TableSelectors,
) -> Result<ElementRef<'a>> {
    let not_found = || EtlError::TableNotFound {
        locator: locator.to_string(),
        found: document.select(&selectors.table_body).count(),
    };

    match locator {
        TableLocator::Position(index) => document
            .select(&selectors.table_body)
            .nth(*index)
            .ok_or_else(not_found),
        TableLocator::Selector(css) => {
            let selector = parse_selector(css)?;
            document.select(&selector).next().ok_or_else(not_found)
        }
    }
}

fn extract_row(
    row_number: usize,
    row: ElementRef<'_>,
    selectors: &TableSelectors,
) -> Result<Option<RawGdpRecord>> {
    let cells: Vec<ElementRef<'_>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .collect();

    let Some(first_cell) = cells.first() else {
        return Ok(None);
    };

    let Some(country) = link_text(*first_cell, selectors) else {
        return Ok(None);
    };

    let gdp_cell = cells.get(GDP_CELL_INDEX).ok_or_else(|| EtlError::MalformedRow {
        row: row_number,
        reason: format!(
            "row for '{}' has {} cells, expected at least {}",
            country,
            cells.len(),
            GDP_CELL_INDEX + 1
        ),
    })?;

    if gdp_cell.text().any(|text| text.contains(MISSING_VALUE_MARKER)) {
        tracing::debug!("Skipping '{}': no GDP estimate", country);
        return Ok(None);
    }

    // Footnote markers follow the figure, so the first text node is the number.
    let gdp = gdp_cell
        .text()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .ok_or_else(|| EtlError::MalformedRow {
            row: row_number,
            reason: format!("GDP cell for '{}' is empty", country),
        })?;

    Ok(Some(RawGdpRecord {
        country,
        gdp_usd_millions: gdp.to_string(),
    }))
}

/// Text of the first link in `cell` that has any; icon-only links don't count.
fn link_text(cell: ElementRef<'_>, selectors: &TableSelectors) -> Option<String> {
    cell.select(&selectors.link).find_map(|link| {
        let text = link.text().collect::<String>();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(gdp_rows: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html><body>
<table class="infobox"><tbody><tr><td><a href="/a">Nav</a></td><td>x</td><td>1</td></tr></tbody></table>
<table class="note"><tbody><tr><td>Largest economies by nominal GDP</td></tr></tbody></table>
<table class="wikitable" id="gdp-table"><tbody>
<tr><th>Country/Territory</th><th>UN region</th><th>IMF estimate</th></tr>
{}
</tbody></table>
</body></html>"#,
            gdp_rows
        )
    }

    #[test]
    fn test_extracts_qualifying_rows_in_order() {
        let markup = page(
            r#"<tr><td><span class="flagicon"><img src="us.png"></span>&nbsp;<a href="/wiki/United_States">United States</a></td><td>Americas</td><td>26,854,599</td></tr>
<tr><td><a href="/wiki/Testland">Testland</a></td><td>Europe</td><td>56,000</td></tr>"#,
        );

        let records = extract_gdp_table(&markup, &TableLocator::default()).unwrap();

        assert_eq!(
            records,
            vec![
                RawGdpRecord {
                    country: "United States".to_string(),
                    gdp_usd_millions: "26,854,599".to_string(),
                },
                RawGdpRecord {
                    country: "Testland".to_string(),
                    gdp_usd_millions: "56,000".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_skips_missing_value_rows() {
        let markup = page(
            r#"<tr><td><a href="/wiki/Russia">Russia</a></td><td>Europe</td><td>—</td></tr>
<tr><td>No link here</td><td>Asia</td><td>—</td></tr>
<tr><td><a href="/wiki/Testland">Testland</a></td><td>Europe</td><td>56,000</td></tr>"#,
        );

        let records = extract_gdp_table(&markup, &TableLocator::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "Testland");
    }

    #[test]
    fn test_skips_rows_without_link_in_first_cell() {
        let markup = page(
            r#"<tr><td>World</td><td>—</td><td>105,568,776</td></tr>
<tr><td><a href="/wiki/Flag"><img src="flag.png"></a></td><td>Asia</td><td>1,000</td></tr>
<tr><td><a href="/wiki/Testland">Testland</a></td><td>Europe</td><td>56,000</td></tr>"#,
        );

        let records = extract_gdp_table(&markup, &TableLocator::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "Testland");
    }

    #[test]
    fn test_ignores_footnote_after_figure() {
        let markup = page(
            r#"<tr><td><a href="/wiki/Testland">Testland</a></td><td>Europe</td><td>56,000<sup class="reference">[n 1]</sup></td></tr>"#,
        );

        let records = extract_gdp_table(&markup, &TableLocator::default()).unwrap();

        assert_eq!(records[0].gdp_usd_millions, "56,000");
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let markup = "<html><body><table><tbody><tr><td>only one</td></tr></tbody></table></body></html>";

        let err = extract_gdp_table(markup, &TableLocator::default()).unwrap_err();

        match err {
            EtlError::TableNotFound { found, .. } => assert_eq!(found, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_row_with_link_is_an_error() {
        let markup = page(r#"<tr><td><a href="/wiki/Testland">Testland</a></td><td>Europe</td></tr>"#);

        let err = extract_gdp_table(&markup, &TableLocator::default()).unwrap_err();

        assert!(matches!(err, EtlError::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn test_selector_locator_finds_named_table() {
        let markup = page(
            r#"<tr><td><a href="/wiki/Testland">Testland</a></td><td>Europe</td><td>56,000</td></tr>"#,
        );

        let locator = TableLocator::Selector("table#gdp-table > tbody".to_string());
        let records = extract_gdp_table(&markup, &locator).unwrap();
        assert_eq!(records.len(), 1);

        let missing = TableLocator::Selector("table#absent".to_string());
        assert!(matches!(
            extract_gdp_table(&markup, &missing),
            Err(EtlError::TableNotFound { found: 3, .. })
        ));
    }

    #[test]
    fn test_invalid_selector_is_a_config_error() {
        let locator = TableLocator::Selector("table[".to_string());
        let err = extract_gdp_table(&page(""), &locator).unwrap_err();
        assert!(matches!(err, EtlError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_header_only_table_yields_no_records() {
        let records = extract_gdp_table(&page(""), &TableLocator::default()).unwrap();
        assert!(records.is_empty());
    }
}
