#![allow(dead_code)]

/// A trimmed-down copy of the archived GDP page: two unrelated tables
/// precede the GDP table, which is the third `<tbody>`.
pub fn gdp_page(rows: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><title>List of countries by GDP (nominal)</title></head>
<body>
<table class="infobox"><tbody>
<tr><td><a href="/wiki/Gross_domestic_product">GDP</a></td><td>nominal</td><td>2023</td></tr>
</tbody></table>
<table class="wikitable sortable" id="legend"><tbody>
<tr><th>Largest economies by nominal GDP</th></tr>
<tr><td>&gt; $20 trillion</td></tr>
</tbody></table>
<table class="wikitable sortable static-row-numbers" id="gdp"><tbody>
<tr class="static-row-header"><th rowspan="2">Country/Territory</th><th rowspan="2">UN region</th><th colspan="2">IMF</th></tr>
<tr class="static-row-header"><th>Estimate</th><th>Year</th></tr>
{}
</tbody></table>
</body>
</html>"#,
        rows
    )
}

pub fn sample_rows() -> &'static str {
    r#"<tr><td>World</td><td>—</td><td>105,568,776</td><td>2023</td></tr>
<tr><td><span class="flagicon"><img src="us.png"></span>&nbsp;<a href="/wiki/United_States">United States</a></td><td><a href="/wiki/Americas">Americas</a></td><td>26,854,599</td><td>2023</td></tr>
<tr><td><span class="flagicon"><img src="cn.png"></span>&nbsp;<a href="/wiki/China">China</a></td><td><a href="/wiki/Asia">Asia</a></td><td>19,373,586<sup class="reference">[n 1]</sup></td><td>2023</td></tr>
<tr><td><span class="flagicon"><img src="ru.png"></span>&nbsp;<a href="/wiki/Russia">Russia</a></td><td><a href="/wiki/Europe">Europe</a></td><td>—</td><td>—</td></tr>
<tr><td><a href="/wiki/Testland">Testland</a></td><td>region</td><td>56,000</td><td>2023</td></tr>"#
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| line.to_string())
        .collect()
}
