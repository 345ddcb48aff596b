//! CSV loader for the KRA CRSP reference-price table
//!
//! Real CRSP exports vary: quoted headers, stray whitespace, thousands
//! separators, and non-UTF-8 encodings all occur. The loader normalizes
//! headers and tolerates missing optional columns; only MAKE and MODEL are
//! required.

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::types::CrspRecord;

/// Column indices resolved from the normalized header row
struct ColumnMap {
    make: usize,
    model: usize,
    model_number: Option<usize>,
    crsp_value: Option<usize>,
    engine_cc: Option<usize>,
}

/// Load CRSP records from a CSV file.
///
/// Decodes UTF-8 with a windows-1252 fallback. Rows without both a make and
/// a model are skipped; unparseable optional values become `None`.
pub fn load_crsp_file<P: AsRef<Path>>(path: P) -> Result<Vec<CrspRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    let content = decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let make = record.get(columns.make).unwrap_or("").trim();
        let model = record.get(columns.model).unwrap_or("").trim();
        if make.is_empty() || model.is_empty() {
            continue;
        }

        records.push(CrspRecord {
            make: make.to_string(),
            model: model.to_string(),
            model_number: columns
                .model_number
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            crsp_value_kes: columns
                .crsp_value
                .and_then(|i| record.get(i))
                .and_then(parse_amount),
            engine_cc: columns
                .engine_cc
                .and_then(|i| record.get(i))
                .and_then(parse_cc),
        });
    }

    Ok(records)
}

fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Strip quotes, collapse whitespace runs, uppercase
fn normalize_header(header: &str) -> String {
    let stripped: String = header.chars().filter(|c| *c != '"').collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn resolve_columns(headers: &[String]) -> Result<ColumnMap> {
    let find_exact = |name: &str| headers.iter().position(|h| h == name);
    let find_containing =
        |needle: &str| headers.iter().position(|h| h.contains(needle));

    let make = find_exact("MAKE")
        .or_else(|| find_containing("MAKE"))
        .ok_or_else(|| missing_column_error("MAKE", headers))?;
    let model = headers
        .iter()
        .position(|h| h.contains("MODEL") && !h.contains("NUMBER"))
        .ok_or_else(|| missing_column_error("MODEL", headers))?;

    let model_number = headers
        .iter()
        .position(|h| h.contains("MODEL") && h.contains("NUMBER"));
    let crsp_value = find_containing("CRSP")
        .or_else(|| find_containing("PRICE"))
        .or_else(|| find_containing("VALUE"));
    let engine_cc = find_containing("ENGINE")
        .or_else(|| find_exact("CC"))
        .or_else(|| find_containing("CAPACITY"));

    Ok(ColumnMap {
        make,
        model,
        model_number,
        crsp_value,
        engine_cc,
    })
}

fn missing_column_error(name: &str, headers: &[String]) -> Error {
    Error::CrspFormat(format!(
        "required column '{}' not found; file has: {}",
        name,
        headers.join(", ")
    ))
}

/// Parse a monetary amount, tolerating thousands separators and a currency tag
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("KES")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse an engine capacity in cc, tolerating "1,500" and "1500cc"
fn parse_cc(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
