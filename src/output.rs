//! Output formatting module

use rust_decimal::Decimal;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::types::{CalculationRecord, CrspRecord, Recommendation, ScrapedListing};

/// Render a computed session to stdout
pub fn output_record(output_format: OutputFormat, record: &CalculationRecord) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(record)?;
        println!("{}", content);
        return Ok(());
    }

    let input = &record.input;
    let b = &record.breakdown;
    let c = &record.comparison;

    println!("\nImport Cost Breakdown");
    println!("=====================");
    println!(
        "Vehicle:         {} {} ({})",
        input.make, input.model, input.year
    );
    println!(
        "Engine:          {}L ({})",
        input.engine_size_liters,
        input.excise_bracket().label()
    );

    println!("\n--- Purchase & Shipping (USD) ---");
    println!("FOB value:       {:>14}", money(input.fob_value_usd));
    println!("Freight:         {:>14}", money(input.freight_usd));
    println!("Insurance:       {:>14}", money(input.insurance_usd));
    println!("CIF:             {:>14}", money(b.cif));

    println!("\n--- Statutory Taxes (USD) ---");
    println!("Import duty:     {:>14}  (25% of CIF)", money(b.import_duty));
    println!(
        "Excise duty:     {:>14}  ({}% of CIF)",
        money(b.excise_duty),
        (b.excise_rate * Decimal::from(100)).normalize()
    );
    println!("VAT:             {:>14}  (16% of CIF + duties)", money(b.vat));
    println!("IDF:             {:>14}  (2.25% of CIF + duty)", money(b.idf));
    println!("Railway levy:    {:>14}  (2% of CIF)", money(b.railway_levy));
    println!("Total taxes:     {:>14}", money(b.total_taxes_usd()));

    println!("\n--- Totals ---");
    println!("Total (USD):     {:>14}", money(b.total_usd));
    println!("Service fees:    {:>14} KES", money(b.service_fees_kes));
    println!("GRAND TOTAL:     {:>14} KES", money(b.total_kes));

    println!("\n--- Local Market Comparison ---");
    println!(
        "Local estimate:  {:>14} KES",
        money(c.estimated_local_price_kes)
    );
    match c.recommendation {
        Recommendation::Import => {
            println!("Savings:         {:>14} KES", money(c.savings_kes));
            println!("Recommendation:  IMPORT");
        }
        Recommendation::BuyLocal => {
            println!("Recommendation:  BUY LOCAL (no savings from importing)");
        }
    }

    Ok(())
}

/// Render CRSP search results
pub fn output_crsp_matches(output_format: OutputFormat, matches: &[&CrspRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&matches)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nFound {} matching vehicle(s)", matches.len());
    println!(
        "{:<16} {:<24} {:<12} {:>14} {:>8}",
        "Make", "Model", "Model No.", "CRSP (KES)", "CC"
    );
    println!("{}", "-".repeat(78));
    for record in matches {
        println!(
            "{:<16} {:<24} {:<12} {:>14} {:>8}",
            record.make,
            record.model,
            record.model_number.as_deref().unwrap_or("-"),
            record
                .crsp_value_kes
                .map(money)
                .unwrap_or_else(|| "-".to_string()),
            record
                .engine_cc
                .map(|cc| cc.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    Ok(())
}

/// Render a scraped listing
pub fn output_listing(output_format: OutputFormat, listing: &ScrapedListing) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(listing)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nExtracted Listing Details");
    println!("=========================");
    println!("Year:            {}", opt(listing.year));
    println!(
        "Engine size:     {}",
        listing
            .engine_size_liters
            .map(|l| format!("{}L", l))
            .unwrap_or_else(|| "not found".to_string())
    );
    println!(
        "FOB value:       {}",
        listing
            .fob_value_usd
            .map(|v| format!("${}", money(v)))
            .unwrap_or_else(|| "not found".to_string())
    );
    if listing.is_empty() {
        println!("\nNothing could be extracted; enter details manually.");
    }

    Ok(())
}

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "not found".to_string())
}

/// Format a decimal with thousands separators
fn money(value: Decimal) -> String {
    let raw = value.to_string();
    let (sign, digits) = raw.strip_prefix('-').map_or(("", raw.as_str()), |d| ("-", d));
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::new();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_grouping() {
        assert_eq!(money(Decimal::from(3_867_024)), "3,867,024");
        assert_eq!(money("4125.06".parse().unwrap()), "4,125.06");
        assert_eq!(money(Decimal::from(330)), "330");
        assert_eq!(money("-500000".parse().unwrap()), "-500,000");
    }
}
