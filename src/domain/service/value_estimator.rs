//! Rough FOB value estimation from make and age
//!
//! Straight-line geometric depreciation from a per-make baseline. Only a
//! fallback for when the buyer has no quoted price yet.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::base_fob_value;

/// Annual depreciation retained: 85% of the prior year's value
const RETENTION_NUM: i64 = 85;
/// Estimates never drop below this floor, USD
const MIN_VALUE_USD: i64 = 5_000;

/// Estimate the FOB value in USD for a make and year of manufacture
pub fn estimate_fob_value(make: &str, year: i32, current_year: i32) -> Decimal {
    let age = (current_year - year).max(0);
    let retention = Decimal::new(RETENTION_NUM, 2);

    let mut value = base_fob_value(make);
    for _ in 0..age {
        value *= retention;
    }
    let value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    value.max(Decimal::from(MIN_VALUE_USD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn new_vehicle_keeps_base_value() {
        assert_eq!(estimate_fob_value("Toyota", 2026, 2026), Decimal::from(25_000));
    }

    #[test]
    fn depreciates_fifteen_percent_per_year() {
        // 25000 * 0.85 = 21250
        assert_eq!(estimate_fob_value("Toyota", 2025, 2026), Decimal::from(21_250));
        // 25000 * 0.85^2 = 18062.50
        assert_eq!(
            estimate_fob_value("Toyota", 2024, 2026),
            Decimal::from_str("18062.50").unwrap()
        );
    }

    #[test]
    fn floors_at_minimum() {
        // 18000 * 0.85^8 = 4904.83 -> floor
        assert_eq!(estimate_fob_value("Mazda", 2018, 2026), Decimal::from(5_000));
    }

    #[test]
    fn future_year_treated_as_new() {
        assert_eq!(estimate_fob_value("Toyota", 2027, 2026), Decimal::from(25_000));
    }
}
