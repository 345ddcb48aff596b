//! Downloadable CSV summary of computed sessions
//!
//! One row per session, fixed column order. The file is a faithful
//! serialization: re-parsing it reconstructs the exact inputs and breakdown
//! that produced it.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{CostBreakdown, VehicleInput};

/// Flat CSV row. Field order defines the header order.
#[derive(Debug, Serialize, Deserialize)]
struct SummaryRow {
    make: String,
    model: String,
    year: i32,
    engine_size_liters: Decimal,
    fob_value_usd: Decimal,
    freight_usd: Decimal,
    insurance_usd: Decimal,
    cif: Decimal,
    import_duty: Decimal,
    excise_duty: Decimal,
    excise_rate: Decimal,
    vat: Decimal,
    idf: Decimal,
    railway_levy: Decimal,
    service_fees_kes: Decimal,
    total_usd: Decimal,
    total_kes: Decimal,
}

impl SummaryRow {
    fn from_session(input: &VehicleInput, breakdown: &CostBreakdown) -> Self {
        Self {
            make: input.make.clone(),
            model: input.model.clone(),
            year: input.year,
            engine_size_liters: input.engine_size_liters,
            fob_value_usd: input.fob_value_usd,
            freight_usd: input.freight_usd,
            insurance_usd: input.insurance_usd,
            cif: breakdown.cif,
            import_duty: breakdown.import_duty,
            excise_duty: breakdown.excise_duty,
            excise_rate: breakdown.excise_rate,
            vat: breakdown.vat,
            idf: breakdown.idf,
            railway_levy: breakdown.railway_levy,
            service_fees_kes: breakdown.service_fees_kes,
            total_usd: breakdown.total_usd,
            total_kes: breakdown.total_kes,
        }
    }

    fn into_session(self) -> (VehicleInput, CostBreakdown) {
        (
            VehicleInput {
                make: self.make,
                model: self.model,
                year: self.year,
                engine_size_liters: self.engine_size_liters,
                fob_value_usd: self.fob_value_usd,
                freight_usd: self.freight_usd,
                insurance_usd: self.insurance_usd,
            },
            CostBreakdown {
                cif: self.cif,
                import_duty: self.import_duty,
                excise_duty: self.excise_duty,
                excise_rate: self.excise_rate,
                vat: self.vat,
                idf: self.idf,
                railway_levy: self.railway_levy,
                service_fees_kes: self.service_fees_kes,
                total_usd: self.total_usd,
                total_kes: self.total_kes,
            },
        )
    }
}

/// Write sessions to a CSV summary file
pub fn write_summary<P: AsRef<Path>>(
    path: P,
    sessions: &[(VehicleInput, CostBreakdown)],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (input, breakdown) in sessions {
        writer.serialize(SummaryRow::from_session(input, breakdown))?;
    }
    writer.flush()?;
    Ok(())
}

/// Re-parse a CSV summary back into sessions
pub fn read_summary<P: AsRef<Path>>(path: P) -> Result<Vec<(VehicleInput, CostBreakdown)>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut sessions = Vec::new();
    for result in reader.deserialize() {
        let row: SummaryRow = result?;
        sessions.push(row.into_session());
    }
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RATES;
    use crate::domain::service::compute_breakdown;
    use tempfile::tempdir;

    fn session(engine_tenths: i64) -> (VehicleInput, CostBreakdown) {
        let input = VehicleInput {
            make: "Toyota".to_string(),
            model: "Harrier".to_string(),
            year: 2022,
            engine_size_liters: Decimal::new(engine_tenths, 1),
            fob_value_usd: Decimal::from(15_000),
            freight_usd: Decimal::from(1_200),
            insurance_usd: Decimal::from(300),
        };
        let breakdown = compute_breakdown(&input, &RATES, 2026).unwrap();
        (input, breakdown)
    }

    #[test]
    fn round_trips_exactly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let sessions = vec![session(20), session(33)];
        write_summary(&path, &sessions).unwrap();

        let reloaded = read_summary(&path).unwrap();
        assert_eq!(reloaded, sessions);
    }

    #[test]
    fn header_order_is_fixed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary(&path, &[session(20)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "make,model,year,engine_size_liters,fob_value_usd,freight_usd,\
             insurance_usd,cif,import_duty,excise_duty,excise_rate,vat,idf,\
             railway_levy,service_fees_kes,total_usd,total_kes"
        );
    }
}
