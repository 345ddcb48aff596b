//! Excel export of calculation results

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::constants::RATES;
use crate::error::{Error, Result};
use crate::types::CalculationRecord;

/// Export calculation records to an Excel workbook with a summary sheet
/// and a per-line-item breakdown sheet.
pub fn export_to_excel(records: &[CalculationRecord], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, records)?;

    let breakdown_sheet = workbook.add_worksheet();
    write_breakdown_sheet(breakdown_sheet, records)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn vehicle_label(record: &CalculationRecord) -> String {
    format!(
        "{} {} ({})",
        record.input.make, record.input.model, record.input.year
    )
}

fn write_summary_sheet(sheet: &mut Worksheet, records: &[CalculationRecord]) -> Result<()> {
    sheet
        .set_name("Summary")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    let headers = [
        "Vehicle",
        "Engine (L)",
        "CIF (USD)",
        "Taxes (USD)",
        "Total (USD)",
        "Total (KES)",
        "Local Est. (KES)",
        "Savings (KES)",
        "Recommendation",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let b = &record.breakdown;
        let c = &record.comparison;
        let label = vehicle_label(record);

        sheet
            .write_string(row, 0, &label)
            .map_err(|e| Error::Excel(e.to_string()))?;
        let numbers = [
            as_f64(record.input.engine_size_liters),
            as_f64(b.cif),
            as_f64(b.total_taxes_usd()),
            as_f64(b.total_usd),
            as_f64(b.total_kes),
            as_f64(c.estimated_local_price_kes),
            as_f64(c.savings_kes),
        ];
        for (offset, value) in numbers.iter().enumerate() {
            sheet
                .write_number(row, (offset + 1) as u16, *value)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
        sheet
            .write_string(row, 8, c.recommendation.label())
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .set_column_width(0, 30)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_breakdown_sheet(sheet: &mut Worksheet, records: &[CalculationRecord]) -> Result<()> {
    sheet
        .set_name("Breakdown")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    let headers = ["Vehicle", "Item", "Amount (USD)", "Amount (KES)", "Basis"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    let mut row: u32 = 1;
    for record in records {
        let b = &record.breakdown;
        let label = vehicle_label(record);
        let rate_pct = b.excise_rate * Decimal::from(100);

        let excise_basis = format!("{}% of CIF (by engine size)", rate_pct.normalize());
        let lines: [(&str, Decimal, &str); 6] = [
            ("CIF", b.cif, "FOB + freight + insurance"),
            ("Import duty", b.import_duty, "25% of CIF"),
            ("Excise duty", b.excise_duty, excise_basis.as_str()),
            ("VAT", b.vat, "16% of (CIF + duty + excise)"),
            ("IDF", b.idf, "2.25% of (CIF + duty)"),
            ("Railway levy", b.railway_levy, "2% of CIF"),
        ];

        for (item, amount_usd, basis) in lines {
            sheet
                .write_string(row, 0, &label)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_string(row, 1, item)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number(row, 2, as_f64(amount_usd))
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number(row, 3, as_f64(amount_usd * RATES.exchange_rate_kes))
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_string(row, 4, basis)
                .map_err(|e| Error::Excel(e.to_string()))?;
            row += 1;
        }

        sheet
            .write_string(row, 0, &label)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, "Service fees")
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 3, as_f64(b.service_fees_kes))
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 4, "Fixed clearing/registration fees")
            .map_err(|e| Error::Excel(e.to_string()))?;
        row += 1;
    }

    sheet
        .set_column_width(0, 30)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(4, 35)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}
