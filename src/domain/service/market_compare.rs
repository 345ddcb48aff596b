//! Import-vs-local-market comparison

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::RateTable;
use crate::types::{CostBreakdown, LocalMarketComparison, Recommendation};

/// Compare the import grand total against the local market price.
///
/// The local price is the matched CRSP valuation when one is known,
/// otherwise the import total marked up by the configured yard margin.
/// Equal cost recommends BuyLocal: no savings, no shipping wait.
pub fn compare_with_local_market(
    breakdown: &CostBreakdown,
    crsp_value_kes: Option<Decimal>,
    rates: &RateTable,
) -> LocalMarketComparison {
    let import_total_kes = breakdown.total_kes;

    let estimated_local_price_kes = match crsp_value_kes {
        Some(v) => v,
        None => (import_total_kes * rates.local_markup)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
    };

    let savings_kes = estimated_local_price_kes - import_total_kes;
    let recommendation = if import_total_kes < estimated_local_price_kes {
        Recommendation::Import
    } else {
        Recommendation::BuyLocal
    };

    LocalMarketComparison {
        estimated_local_price_kes,
        import_total_kes,
        savings_kes,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RATES;

    fn breakdown_with_total(total_kes: i64) -> CostBreakdown {
        CostBreakdown {
            cif: Decimal::ZERO,
            import_duty: Decimal::ZERO,
            excise_duty: Decimal::ZERO,
            excise_rate: Decimal::new(25, 2),
            vat: Decimal::ZERO,
            idf: Decimal::ZERO,
            railway_levy: Decimal::ZERO,
            service_fees_kes: Decimal::ZERO,
            total_usd: Decimal::ZERO,
            total_kes: Decimal::from(total_kes),
        }
    }

    #[test]
    fn markup_heuristic_recommends_import() {
        let b = breakdown_with_total(3_000_000);
        let c = compare_with_local_market(&b, None, &RATES);
        assert_eq!(c.estimated_local_price_kes, Decimal::from(3_900_000));
        assert_eq!(c.savings_kes, Decimal::from(900_000));
        assert_eq!(c.recommendation, Recommendation::Import);
    }

    #[test]
    fn crsp_value_overrides_heuristic() {
        let b = breakdown_with_total(3_000_000);
        let c = compare_with_local_market(&b, Some(Decimal::from(2_500_000)), &RATES);
        assert_eq!(c.estimated_local_price_kes, Decimal::from(2_500_000));
        assert_eq!(c.savings_kes, Decimal::from(-500_000));
        assert_eq!(c.recommendation, Recommendation::BuyLocal);
    }

    #[test]
    fn tie_recommends_buy_local() {
        let b = breakdown_with_total(3_000_000);
        let c = compare_with_local_market(&b, Some(Decimal::from(3_000_000)), &RATES);
        assert_eq!(c.savings_kes, Decimal::ZERO);
        assert_eq!(c.recommendation, Recommendation::BuyLocal);
    }
}
