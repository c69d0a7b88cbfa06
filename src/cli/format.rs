use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Format an amount in rupiah display style: "." groups thousands and ","
/// separates the decimals, e.g. `1234567.89` → `"Rp1.234.567,89"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let grouped: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if val < Decimal::ZERO {
        format!("-Rp{grouped},{dec_part}")
    } else {
        format!("Rp{grouped},{dec_part}")
    }
}

/// "2024-03-01" → "01 Mar 2024". Anything unparseable is shown as-is.
pub(crate) fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%d %b %Y").to_string(),
        Err(_) => date.to_string(),
    }
}
