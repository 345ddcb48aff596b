//! Baseline FOB values by make, used for rough value estimation

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::LazyLock;

/// New-vehicle baseline FOB values in USD, keyed by uppercase make
static BASE_VALUES: LazyLock<HashMap<&'static str, i64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("TOYOTA", 25_000);
    m.insert("NISSAN", 20_000);
    m.insert("HONDA", 22_000);
    m.insert("MAZDA", 18_000);
    m.insert("SUBARU", 23_000);
    m.insert("AUDI", 35_000);
    m.insert("BMW", 40_000);
    m.insert("MERCEDES", 45_000);
    m.insert("VOLKSWAGEN", 28_000);
    m
});

/// Fallback baseline for makes not in the table, USD
const DEFAULT_BASE_VALUE: i64 = 20_000;

/// Baseline FOB value for a make (case-insensitive)
pub fn base_fob_value(make: &str) -> Decimal {
    let base = BASE_VALUES
        .get(make.trim().to_uppercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_BASE_VALUE);
    Decimal::from(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_make() {
        assert_eq!(base_fob_value("Toyota"), Decimal::from(25_000));
        assert_eq!(base_fob_value("BMW"), Decimal::from(40_000));
    }

    #[test]
    fn unknown_make_uses_default() {
        assert_eq!(base_fob_value("Lada"), Decimal::from(20_000));
    }

    #[test]
    fn make_is_case_insensitive() {
        assert_eq!(base_fob_value(" toyota "), base_fob_value("TOYOTA"));
    }
}
