//! In-memory CRSP reference-price table

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::infrastructure::load_crsp_file;
use crate::types::CrspRecord;

/// Loaded CRSP table with make/model search
pub struct CrspStore {
    records: Vec<CrspRecord>,
}

impl CrspStore {
    /// Load a store from a CRSP CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            records: load_crsp_file(path)?,
        })
    }

    pub fn from_records(records: Vec<CrspRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive substring search on make and model.
    ///
    /// An empty query string matches every record, mirroring how a blank
    /// search field behaves in the upstream tooling.
    pub fn search(&self, make: &str, model: &str) -> Vec<&CrspRecord> {
        let make = make.trim().to_uppercase();
        let model = model.trim().to_uppercase();

        self.records
            .iter()
            .filter(|r| {
                r.make.to_uppercase().contains(&make)
                    && r.model.to_uppercase().contains(&model)
            })
            .collect()
    }

    /// First matching record that carries a CRSP valuation
    pub fn best_match(&self, make: &str, model: &str) -> Option<&CrspRecord> {
        self.search(make, model)
            .into_iter()
            .find(|r| r.crsp_value_kes.is_some())
    }
}

static ENGINE_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(cc|l\b|tfsi|tsi)?").unwrap());

/// Clamp a raw figure to a plausible displacement in liters.
///
/// Figures outside 0.5-10L / 500-10000cc are rejected so chassis codes like
/// "ZSU60" don't read as displacements.
fn plausible_liters(value: Decimal) -> Option<Decimal> {
    if value >= Decimal::from(500) && value <= Decimal::from(10_000) {
        Some(value / Decimal::from(1_000))
    } else if value >= Decimal::new(5, 1) && value <= Decimal::from(10) {
        Some(value)
    } else {
        None
    }
}

/// Extract an engine displacement in liters from a model string.
///
/// Handles both liter figures ("2.0", "3.0TFSI") and cc figures ("1500cc",
/// "1,500"). A figure qualified by a unit suffix or a decimal point wins
/// over a bare integer, so "A4 3.0TFSI" reads as 3.0 rather than 4.
pub fn extract_engine_size(model_str: &str) -> Option<Decimal> {
    let cleaned = model_str.replace(',', "");
    let mut bare_candidate = None;

    for captures in ENGINE_SIZE_RE.captures_iter(&cleaned) {
        let Some(number) = captures.get(1) else { continue };
        let Ok(value) = number.as_str().parse::<Decimal>() else {
            continue;
        };
        let qualified = captures.get(2).is_some() || number.as_str().contains('.');

        match plausible_liters(value) {
            Some(liters) if qualified => return Some(liters),
            Some(liters) => bare_candidate = bare_candidate.or(Some(liters)),
            None => {}
        }
    }

    bare_candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CrspStore {
        CrspStore::from_records(vec![
            CrspRecord {
                make: "TOYOTA".to_string(),
                model: "HARRIER".to_string(),
                model_number: Some("ZSU60".to_string()),
                crsp_value_kes: Some(Decimal::from(4_500_000)),
                engine_cc: Some(1_986),
            },
            CrspRecord {
                make: "TOYOTA".to_string(),
                model: "HARRIER HYBRID".to_string(),
                model_number: None,
                crsp_value_kes: None,
                engine_cc: Some(2_487),
            },
            CrspRecord {
                make: "NISSAN".to_string(),
                model: "X-TRAIL".to_string(),
                model_number: None,
                crsp_value_kes: Some(Decimal::from(3_800_000)),
                engine_cc: None,
            },
        ])
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let s = store();
        assert_eq!(s.search("toyota", "harrier").len(), 2);
        assert_eq!(s.search("TOYOTA", "hybrid").len(), 1);
        assert_eq!(s.search("nissan", "x-trail").len(), 1);
        assert!(s.search("subaru", "").is_empty());
    }

    #[test]
    fn empty_query_matches_all() {
        assert_eq!(store().search("", "").len(), 3);
    }

    #[test]
    fn best_match_requires_a_valuation() {
        let s = store();
        let m = s.best_match("toyota", "harrier").unwrap();
        assert_eq!(m.crsp_value_kes, Some(Decimal::from(4_500_000)));
        // Hybrid row has no valuation, so no best match for it
        assert!(s.best_match("toyota", "hybrid").is_none());
    }

    #[test]
    fn engine_size_from_liters() {
        assert_eq!(extract_engine_size("HARRIER 2.0"), Some(Decimal::new(20, 1)));
        assert_eq!(
            extract_engine_size("A4 3.0TFSI"),
            Some(Decimal::new(30, 1))
        );
    }

    #[test]
    fn engine_size_from_cc() {
        assert_eq!(extract_engine_size("VITZ 1500cc"), Some(Decimal::new(15, 1)));
        assert_eq!(
            extract_engine_size("CROWN 2,500"),
            Some(Decimal::new(25, 1))
        );
    }

    #[test]
    fn engine_size_absent() {
        assert_eq!(extract_engine_size("PROBOX"), None);
    }

    #[test]
    fn chassis_codes_are_not_displacements() {
        assert_eq!(extract_engine_size("ZSU60"), None);
        assert_eq!(extract_engine_size("NT32"), None);
    }
}
