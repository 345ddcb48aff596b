//! Landed-cost computation
//!
//! Pure function over a vehicle input and the rate table. Each USD line item
//! is rounded to 2 decimal places and KES amounts to whole shillings before
//! summation, so the displayed rows always sum exactly to the totals.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::RateTable;
use crate::error::Result;
use crate::types::{CostBreakdown, VehicleInput};

/// Round a USD amount to cents
fn round_usd(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a KES amount to whole shillings
fn round_kes(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the full cost breakdown for one vehicle.
///
/// Statutory taxes cascade: import duty on CIF, excise on CIF by engine
/// bracket, VAT on (CIF + duty + excise), IDF on (CIF + duty), railway levy
/// on CIF. Service fees are fixed KES line items added after conversion.
///
/// Fails with `Error::Validation` when the input violates the year window,
/// engine size, or non-negative money invariants; cannot fail afterwards.
pub fn compute_breakdown(
    input: &VehicleInput,
    rates: &RateTable,
    current_year: i32,
) -> Result<CostBreakdown> {
    input.validate(current_year)?;

    let cif = round_usd(input.fob_value_usd + input.freight_usd + input.insurance_usd);

    let import_duty = round_usd(cif * rates.duty_rate);

    let excise_rate = rates.excise_rate(input.excise_bracket());
    let excise_duty = round_usd(cif * excise_rate);

    let vat = round_usd((cif + import_duty + excise_duty) * rates.vat_rate);
    let idf = round_usd((cif + import_duty) * rates.idf_rate);
    let railway_levy = round_usd(cif * rates.railway_levy_rate);

    let service_fees_kes = round_kes(rates.service_fees.total());

    let total_usd = cif + import_duty + excise_duty + vat + idf + railway_levy;
    let total_kes = round_kes(total_usd * rates.exchange_rate_kes) + service_fees_kes;

    Ok(CostBreakdown {
        cif,
        import_duty,
        excise_duty,
        excise_rate,
        vat,
        idf,
        railway_levy,
        service_fees_kes,
        total_usd,
        total_kes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RATES;
    use crate::error::Error;
    use std::str::FromStr;

    const YEAR: i32 = 2026;

    fn harrier() -> VehicleInput {
        VehicleInput {
            make: "Toyota".to_string(),
            model: "Harrier".to_string(),
            year: 2022,
            engine_size_liters: Decimal::new(20, 1),
            fob_value_usd: Decimal::from(15_000),
            freight_usd: Decimal::from(1_200),
            insurance_usd: Decimal::from(300),
        }
    }

    #[test]
    fn documented_scenario() {
        // fob=15000, freight=1200, insurance=300, engine=2.0L
        let b = compute_breakdown(&harrier(), &RATES, YEAR).unwrap();

        assert_eq!(b.cif, Decimal::from(16_500));
        assert_eq!(b.import_duty, Decimal::from(4_125));
        // 2.0L sits at the inclusive top of the 1501-2000cc bracket
        assert_eq!(b.excise_rate, Decimal::new(25, 2));
        assert_eq!(b.excise_duty, Decimal::from(4_125));
        assert_eq!(b.vat, Decimal::from(3_960));
        assert_eq!(b.idf, Decimal::from_str("464.06").unwrap());
        assert_eq!(b.railway_levy, Decimal::from(330));
        assert_eq!(b.total_usd, Decimal::from_str("29504.06").unwrap());
        // 29504.06 * 129 = 3,806,023.74 -> 3,806,024, plus 61,000 fees
        assert_eq!(b.total_kes, Decimal::from(3_867_024));
    }

    #[test]
    fn line_items_sum_to_total() {
        let b = compute_breakdown(&harrier(), &RATES, YEAR).unwrap();
        assert_eq!(b.cif + b.total_taxes_usd(), b.total_usd);
    }

    #[test]
    fn is_deterministic() {
        let a = compute_breakdown(&harrier(), &RATES, YEAR).unwrap();
        let b = compute_breakdown(&harrier(), &RATES, YEAR).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn monotone_in_fob_value() {
        let lo = compute_breakdown(&harrier(), &RATES, YEAR).unwrap();
        let mut dearer = harrier();
        dearer.fob_value_usd += Decimal::from(100);
        let hi = compute_breakdown(&dearer, &RATES, YEAR).unwrap();
        assert!(hi.total_usd > lo.total_usd);
        assert!(hi.total_kes > lo.total_kes);
    }

    #[test]
    fn excise_bracket_drives_rate() {
        let mut small = harrier();
        small.engine_size_liters = Decimal::new(15, 1);
        let b = compute_breakdown(&small, &RATES, YEAR).unwrap();
        assert_eq!(b.excise_rate, Decimal::new(20, 2));

        let mut large = harrier();
        large.engine_size_liters = Decimal::new(30, 1);
        let b = compute_breakdown(&large, &RATES, YEAR).unwrap();
        assert_eq!(b.excise_rate, Decimal::new(35, 2));
        // 16500 * 0.35 = 5775
        assert_eq!(b.excise_duty, Decimal::from(5_775));
    }

    #[test]
    fn rejects_nine_year_old_vehicle() {
        let mut old = harrier();
        old.year = YEAR - 9;
        assert!(matches!(
            compute_breakdown(&old, &RATES, YEAR),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn rejects_zero_engine() {
        let mut v = harrier();
        v.engine_size_liters = Decimal::ZERO;
        assert!(matches!(
            compute_breakdown(&v, &RATES, YEAR),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn zero_cost_input_yields_service_fees_only() {
        let mut v = harrier();
        v.fob_value_usd = Decimal::ZERO;
        v.freight_usd = Decimal::ZERO;
        v.insurance_usd = Decimal::ZERO;
        let b = compute_breakdown(&v, &RATES, YEAR).unwrap();
        assert_eq!(b.total_usd, Decimal::ZERO);
        assert_eq!(b.total_kes, Decimal::from(61_000));
    }

    #[test]
    fn fractional_cents_round_before_summation() {
        let mut v = harrier();
        v.fob_value_usd = Decimal::from_str("10000.33").unwrap();
        v.freight_usd = Decimal::from_str("1000.33").unwrap();
        v.insurance_usd = Decimal::from_str("100.33").unwrap();
        let b = compute_breakdown(&v, &RATES, YEAR).unwrap();
        // Every line item carries at most 2 decimal places
        for item in [
            b.cif,
            b.import_duty,
            b.excise_duty,
            b.vat,
            b.idf,
            b.railway_levy,
            b.total_usd,
        ] {
            assert_eq!(item, round_usd(item));
        }
        assert_eq!(b.total_kes, round_kes(b.total_kes));
        assert_eq!(b.cif + b.total_taxes_usd(), b.total_usd);
    }
}
