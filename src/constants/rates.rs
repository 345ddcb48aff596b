//! KRA duty and tax rates for vehicle imports
//!
//! Loaded once at startup, read-only thereafter. Rates follow the published
//! schedule: 25% import duty, engine-bracketed excise, 16% VAT, 2.25% IDF,
//! 2% railway development levy. The exchange rate is an approximate constant.

use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::types::ExciseBracket;

/// Fixed clearing and registration fees, quoted in KES
#[derive(Debug, Clone)]
pub struct ServiceFees {
    /// Clearing agent fee
    pub clearing_agent: Decimal,
    /// Truck transport Mombasa to Nairobi
    pub transport_to_nairobi: Decimal,
    /// Port storage and handling
    pub port_charges: Decimal,
    /// KEBS/PVOC inspection
    pub inspection: Decimal,
    /// Number plates and KRA registration
    pub number_plates: Decimal,
}

impl ServiceFees {
    pub fn total(&self) -> Decimal {
        self.clearing_agent
            + self.transport_to_nairobi
            + self.port_charges
            + self.inspection
            + self.number_plates
    }

    /// Line items as (label, amount) pairs for display and export
    pub fn line_items(&self) -> [(&'static str, Decimal); 5] {
        [
            ("Clearing agent", self.clearing_agent),
            ("Transport to Nairobi", self.transport_to_nairobi),
            ("Port charges", self.port_charges),
            ("Inspection (KEBS/PVOC)", self.inspection),
            ("Number plates & registration", self.number_plates),
        ]
    }
}

/// Process-wide rate configuration
#[derive(Debug, Clone)]
pub struct RateTable {
    /// Import duty rate on CIF
    pub duty_rate: Decimal,
    /// Excise rate: up to 1500cc
    pub excise_up_to_1500: Decimal,
    /// Excise rate: 1501-2000cc
    pub excise_up_to_2000: Decimal,
    /// Excise rate: 2001-2500cc
    pub excise_up_to_2500: Decimal,
    /// Excise rate: above 2500cc
    pub excise_above_2500: Decimal,
    /// VAT rate on (CIF + duty + excise)
    pub vat_rate: Decimal,
    /// Import Declaration Fee rate on (CIF + duty)
    pub idf_rate: Decimal,
    /// Railway Development Levy rate on CIF
    pub railway_levy_rate: Decimal,
    /// Approximate USD to KES exchange rate
    pub exchange_rate_kes: Decimal,
    pub service_fees: ServiceFees,
    /// Local yard markup over import cost, used when no CRSP value is known
    pub local_markup: Decimal,
}

impl RateTable {
    /// Excise rate for a bracket
    pub fn excise_rate(&self, bracket: ExciseBracket) -> Decimal {
        match bracket {
            ExciseBracket::UpTo1500 => self.excise_up_to_1500,
            ExciseBracket::UpTo2000 => self.excise_up_to_2000,
            ExciseBracket::UpTo2500 => self.excise_up_to_2500,
            ExciseBracket::Above2500 => self.excise_above_2500,
        }
    }
}

/// Standard rate table
pub static RATES: LazyLock<RateTable> = LazyLock::new(|| RateTable {
    duty_rate: Decimal::new(25, 2),
    excise_up_to_1500: Decimal::new(20, 2),
    excise_up_to_2000: Decimal::new(25, 2),
    excise_up_to_2500: Decimal::new(30, 2),
    excise_above_2500: Decimal::new(35, 2),
    vat_rate: Decimal::new(16, 2),
    idf_rate: Decimal::new(225, 4),
    railway_levy_rate: Decimal::new(2, 2),
    exchange_rate_kes: Decimal::from(129),
    service_fees: ServiceFees {
        clearing_agent: Decimal::from(25_000),
        transport_to_nairobi: Decimal::from(15_000),
        port_charges: Decimal::from(10_000),
        inspection: Decimal::from(8_000),
        number_plates: Decimal::from(3_000),
    },
    local_markup: Decimal::new(130, 2),
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_fees_sum() {
        assert_eq!(RATES.service_fees.total(), Decimal::from(61_000));
    }

    #[test]
    fn excise_rates_by_bracket() {
        assert_eq!(
            RATES.excise_rate(ExciseBracket::UpTo1500),
            Decimal::new(20, 2)
        );
        assert_eq!(
            RATES.excise_rate(ExciseBracket::Above2500),
            Decimal::new(35, 2)
        );
    }

    #[test]
    fn idf_rate_is_two_and_quarter_percent() {
        assert_eq!(RATES.idf_rate, "0.0225".parse().unwrap());
    }
}
