//! Core types for import cost estimation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Excise duty bracket based on engine displacement.
///
/// Upper bounds are inclusive: a 1.5L engine falls in the lowest bracket,
/// a 2.0L engine in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExciseBracket {
    /// Up to 1500cc
    UpTo1500,
    /// 1501cc to 2000cc
    UpTo2000,
    /// 2001cc to 2500cc
    UpTo2500,
    /// Above 2500cc
    Above2500,
}

impl ExciseBracket {
    /// Determine the bracket from engine size in liters
    pub fn from_engine_size(liters: Decimal) -> Self {
        if liters <= Decimal::new(15, 1) {
            ExciseBracket::UpTo1500
        } else if liters <= Decimal::new(20, 1) {
            ExciseBracket::UpTo2000
        } else if liters <= Decimal::new(25, 1) {
            ExciseBracket::UpTo2500
        } else {
            ExciseBracket::Above2500
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ExciseBracket::UpTo1500 => "up to 1500cc",
            ExciseBracket::UpTo2000 => "1501-2000cc",
            ExciseBracket::UpTo2500 => "2001-2500cc",
            ExciseBracket::Above2500 => "above 2500cc",
        }
    }
}

/// Vehicle and cost inputs for a single calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInput {
    /// Manufacturer (e.g., "Toyota")
    pub make: String,
    /// Model name (e.g., "Harrier")
    pub model: String,
    /// Year of manufacture
    pub year: i32,
    /// Engine displacement in liters
    pub engine_size_liters: Decimal,
    /// Price at port of origin, USD
    pub fob_value_usd: Decimal,
    /// Shipping cost, USD
    pub freight_usd: Decimal,
    /// Marine insurance, USD
    pub insurance_usd: Decimal,
}

impl VehicleInput {
    /// Vehicle age in years relative to `current_year`
    pub fn age(&self, current_year: i32) -> i32 {
        current_year - self.year
    }

    /// Excise bracket for this vehicle's engine
    pub fn excise_bracket(&self) -> ExciseBracket {
        ExciseBracket::from_engine_size(self.engine_size_liters)
    }

    /// Check the input invariants.
    ///
    /// Kenya only allows importing vehicles up to 8 years old, engine size
    /// must be positive, and monetary inputs cannot be negative.
    pub fn validate(&self, current_year: i32) -> Result<()> {
        if self.year > current_year {
            return Err(Error::Validation(format!(
                "year {} is in the future",
                self.year
            )));
        }
        if self.year < current_year - 8 {
            return Err(Error::Validation(format!(
                "vehicles over 8 years old cannot be imported (year {}, current {})",
                self.year, current_year
            )));
        }
        if self.engine_size_liters <= Decimal::ZERO {
            return Err(Error::Validation(format!(
                "engine size must be positive, got {}L",
                self.engine_size_liters
            )));
        }
        for (name, value) in [
            ("FOB value", self.fob_value_usd),
            ("freight", self.freight_usd),
            ("insurance", self.insurance_usd),
        ] {
            if value < Decimal::ZERO {
                return Err(Error::Validation(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Complete cost breakdown for one import.
///
/// All USD line items are rounded to 2 decimal places and KES amounts to
/// whole shillings before summation, so the rows sum exactly to the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Cost, Insurance, Freight: FOB + freight + insurance, USD
    pub cif: Decimal,
    /// Import duty (25% of CIF), USD
    pub import_duty: Decimal,
    /// Excise duty (bracket rate x CIF), USD
    pub excise_duty: Decimal,
    /// Excise rate applied, echoed for display (e.g., 0.25)
    pub excise_rate: Decimal,
    /// VAT (16% of CIF + import duty + excise duty), USD
    pub vat: Decimal,
    /// Import Declaration Fee (2.25% of CIF + import duty), USD
    pub idf: Decimal,
    /// Railway Development Levy (2% of CIF), USD
    pub railway_levy: Decimal,
    /// Fixed clearing and registration fees, KES
    pub service_fees_kes: Decimal,
    /// CIF plus all statutory taxes, USD
    pub total_usd: Decimal,
    /// Grand total landed cost including service fees, KES
    pub total_kes: Decimal,
}

impl CostBreakdown {
    /// Sum of the statutory tax line items, USD
    pub fn total_taxes_usd(&self) -> Decimal {
        self.import_duty + self.excise_duty + self.vat + self.idf + self.railway_levy
    }
}

/// Import-vs-local recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Importing is cheaper
    Import,
    /// Buy from a local yard (equal cost recommends local: no savings,
    /// no shipping wait)
    BuyLocal,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Import => "IMPORT",
            Recommendation::BuyLocal => "BUY LOCAL",
        }
    }
}

/// Comparison of the import total against the local market price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalMarketComparison {
    /// Estimated local car yard price, KES
    pub estimated_local_price_kes: Decimal,
    /// Import grand total, KES
    pub import_total_kes: Decimal,
    /// Local price minus import total (negative when importing costs more), KES
    pub savings_kes: Decimal,
    pub recommendation: Recommendation,
}

/// One reference-price row from the KRA CRSP table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrspRecord {
    pub make: String,
    pub model: String,
    /// Chassis/model code (e.g., "ZSU60")
    #[serde(default)]
    pub model_number: Option<String>,
    /// CRSP valuation in KES
    #[serde(default)]
    pub crsp_value_kes: Option<Decimal>,
    /// Engine capacity in cc
    #[serde(default)]
    pub engine_cc: Option<u32>,
}

/// Partial vehicle attributes extracted from a listing page.
///
/// Every field is best-effort; an all-None record is a valid scrape result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedListing {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub engine_size_liters: Option<Decimal>,
    #[serde(default)]
    pub fob_value_usd: Option<Decimal>,
}

impl ScrapedListing {
    /// True when nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.engine_size_liters.is_none()
            && self.fob_value_usd.is_none()
    }
}

/// One computed session, as persisted to history and batch results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Unique identifier
    pub id: String,
    /// When computed
    pub computed_at: chrono::DateTime<chrono::Utc>,
    pub input: VehicleInput,
    pub breakdown: CostBreakdown,
    pub comparison: LocalMarketComparison,
}

impl CalculationRecord {
    pub fn new(
        input: VehicleInput,
        breakdown: CostBreakdown,
        comparison: LocalMarketComparison,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            computed_at: chrono::Utc::now(),
            input,
            breakdown,
            comparison,
        }
    }
}

/// Batch calculation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    pub records: Vec<CalculationRecord>,
    /// Total input rows processed
    pub total_processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}
