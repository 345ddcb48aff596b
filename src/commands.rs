//! Command handlers

use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::constants::RATES;
use crate::domain::service::{compare_with_local_market, compute_breakdown, estimate_fob_value};
use crate::error::{Error, Result};
use crate::export::{export_to_excel, write_summary};
use crate::output::{output_crsp_matches, output_listing, output_record};
use crate::scraper::scrape_listing;
use crate::store::{CrspStore, HistoryStore};
use crate::types::{
    BatchResults, CalculationRecord, CrspRecord, ScrapedListing, VehicleInput,
};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Calculate {
            make,
            model,
            year,
            engine_size,
            fob,
            freight,
            insurance,
            url,
            crsp,
            save,
            output,
        } => cmd_calculate(CalculateArgs {
            verbose: cli.verbose,
            output_format,
            config: &config,
            make: make.clone(),
            model: model.clone(),
            year: *year,
            engine_size: *engine_size,
            fob: *fob,
            freight: *freight,
            insurance: *insurance,
            url: url.clone(),
            crsp: crsp.clone(),
            save: *save,
            output: output.clone(),
        }),

        Commands::Lookup {
            make,
            model,
            crsp,
            limit,
        } => cmd_lookup(
            cli.verbose,
            output_format,
            &config,
            make,
            model,
            crsp.as_deref(),
            *limit,
        ),

        Commands::Scrape { url } => cmd_scrape(cli.verbose, output_format, url),

        Commands::Estimate { make, year } => cmd_estimate(output_format, make, *year),

        Commands::Batch { input, output } => {
            cmd_batch(cli.verbose, input.clone(), output.clone())
        }

        Commands::Export { results, output } => cmd_export(results.clone(), output.clone()),

        Commands::History { limit } => cmd_history(output_format, *limit),

        Commands::Config {
            show,
            set_output,
            set_crsp,
            reset,
        } => cmd_config(config, *show, *set_output, set_crsp.clone(), *reset),
    }
}

struct CalculateArgs<'a> {
    verbose: bool,
    output_format: OutputFormat,
    config: &'a Config,
    make: String,
    model: String,
    year: Option<i32>,
    engine_size: Option<Decimal>,
    fob: Option<Decimal>,
    freight: Decimal,
    insurance: Decimal,
    url: Option<String>,
    crsp: Option<PathBuf>,
    save: bool,
    output: Option<PathBuf>,
}

fn cmd_calculate(args: CalculateArgs) -> Result<()> {
    let current_year = Utc::now().year();

    // Best-effort prefill from a listing page; a failed scrape degrades to
    // manual input rather than aborting the calculation.
    let listing = match &args.url {
        Some(url) => {
            if args.verbose {
                eprintln!("Fetching listing: {}", url);
            }
            match scrape_listing(url) {
                Ok(listing) => listing,
                Err(e) => {
                    eprintln!("Warning: could not extract listing details ({})", e);
                    ScrapedListing::default()
                }
            }
        }
        None => ScrapedListing::default(),
    };

    let crsp_match = load_crsp_match(
        args.verbose,
        args.crsp.as_deref(),
        args.config,
        &args.make,
        &args.model,
    )?;

    let year = args.year.or(listing.year).ok_or_else(|| {
        Error::Validation("year required: pass --year or a --url that includes it".to_string())
    })?;

    let engine_size = args
        .engine_size
        .or(listing.engine_size_liters)
        .or_else(|| {
            crsp_match
                .as_ref()
                .and_then(|m| m.engine_cc)
                .map(|cc| Decimal::from(cc) / Decimal::from(1_000))
        })
        .ok_or_else(|| {
            Error::Validation(
                "engine size required: pass --engine-size or match a CRSP record".to_string(),
            )
        })?;

    let fob = match args.fob.or(listing.fob_value_usd) {
        Some(fob) => fob,
        None => {
            let estimated = estimate_fob_value(&args.make, year, current_year);
            eprintln!(
                "No FOB quote given; using estimate ${} for {} ({})",
                estimated, args.make, year
            );
            estimated
        }
    };

    let input = VehicleInput {
        make: args.make,
        model: args.model,
        year,
        engine_size_liters: engine_size,
        fob_value_usd: fob,
        freight_usd: args.freight,
        insurance_usd: args.insurance,
    };

    let breakdown = compute_breakdown(&input, &RATES, current_year)?;
    let comparison = compare_with_local_market(
        &breakdown,
        crsp_match.as_ref().and_then(|m| m.crsp_value_kes),
        &RATES,
    );
    let record = CalculationRecord::new(input, breakdown, comparison);

    if args.save {
        let mut history = HistoryStore::open(Config::data_dir()?)?;
        let id = history.add(record.clone())?;
        if args.verbose {
            eprintln!("Saved to history as {}", id);
        }
    }

    if let Some(ref path) = args.output {
        export_record(&record, path)?;
        eprintln!("Wrote {}", path.display());
    }

    output_record(args.output_format, &record)
}

/// Load the CRSP table (explicit path or configured default) and find the
/// best match. Missing table or no match both degrade to `None`.
fn load_crsp_match(
    verbose: bool,
    crsp: Option<&Path>,
    config: &Config,
    make: &str,
    model: &str,
) -> Result<Option<CrspRecord>> {
    let path = match crsp.or(config.crsp_path.as_deref()) {
        Some(path) => path,
        None => return Ok(None),
    };

    let store = CrspStore::load(path)?;
    if verbose {
        eprintln!("Loaded {} CRSP records from {}", store.len(), path.display());
    }

    let matched = store.best_match(make, model).cloned();
    if matched.is_none() {
        eprintln!(
            "Note: no CRSP match for {} {}; comparison uses the markup heuristic",
            make, model
        );
    }
    Ok(matched)
}

fn export_record(record: &CalculationRecord, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("xlsx") => export_to_excel(std::slice::from_ref(record), path),
        Some("csv") => write_summary(
            path,
            &[(record.input.clone(), record.breakdown.clone())],
        ),
        _ => Err(Error::Validation(format!(
            "unsupported export format for {} (use .csv or .xlsx)",
            path.display()
        ))),
    }
}

fn cmd_lookup(
    verbose: bool,
    output_format: OutputFormat,
    config: &Config,
    make: &str,
    model: &str,
    crsp: Option<&Path>,
    limit: usize,
) -> Result<()> {
    let path = crsp
        .or(config.crsp_path.as_deref())
        .ok_or_else(|| {
            Error::Config("no CRSP file configured; pass --crsp or set one with config".to_string())
        })?;

    let store = CrspStore::load(path)?;
    if verbose {
        eprintln!("Loaded {} CRSP records from {}", store.len(), path.display());
    }

    let mut matches = store.search(make, model);
    if matches.is_empty() {
        return Err(Error::LookupNotFound(format!(
            "{} {} in {}",
            make,
            model,
            path.display()
        )));
    }
    matches.truncate(limit);

    output_crsp_matches(output_format, &matches)
}

fn cmd_scrape(verbose: bool, output_format: OutputFormat, url: &str) -> Result<()> {
    if verbose {
        eprintln!("Fetching listing: {}", url);
    }
    let listing = scrape_listing(url)?;
    output_listing(output_format, &listing)
}

#[derive(Debug, Serialize)]
struct FobEstimate<'a> {
    make: &'a str,
    year: i32,
    estimated_fob_usd: Decimal,
}

fn cmd_estimate(output_format: OutputFormat, make: &str, year: i32) -> Result<()> {
    let current_year = Utc::now().year();
    let estimate = FobEstimate {
        make,
        year,
        estimated_fob_usd: estimate_fob_value(make, year, current_year),
    };

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!(
            "Estimated FOB value for {} ({}): ${}",
            estimate.make, estimate.year, estimate.estimated_fob_usd
        );
        println!("Based on make baseline with 15%/year depreciation; verify against real quotes.");
    }
    Ok(())
}

fn cmd_batch(verbose: bool, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    if !input.exists() {
        return Err(Error::FileNotFound(input.display().to_string()));
    }

    let current_year = Utc::now().year();
    let started_at = Utc::now();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&input)?;
    let rows: Vec<std::result::Result<VehicleInput, csv::Error>> =
        reader.deserialize().collect();

    if rows.is_empty() {
        return Err(Error::Validation(format!(
            "no vehicle rows in {}",
            input.display()
        )));
    }

    let progress = ProgressBar::new(rows.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let total_processed = rows.len();
    let mut records = Vec::new();
    let mut failed = 0usize;

    for (row_idx, row) in rows.into_iter().enumerate() {
        let row_num = row_idx + 2; // header is row 1
        match row {
            Ok(vehicle) => match compute_breakdown(&vehicle, &RATES, current_year) {
                Ok(breakdown) => {
                    let comparison = compare_with_local_market(&breakdown, None, &RATES);
                    records.push(CalculationRecord::new(vehicle, breakdown, comparison));
                }
                Err(e) => {
                    failed += 1;
                    if verbose {
                        eprintln!("Row {}: {}", row_num, e);
                    }
                }
            },
            Err(e) => {
                failed += 1;
                if verbose {
                    eprintln!("Row {}: {}", row_num, e);
                }
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let results = BatchResults {
        succeeded: records.len(),
        records,
        total_processed,
        failed,
        started_at,
        completed_at: Utc::now(),
    };

    let output_path = output.unwrap_or_else(|| PathBuf::from("gharama-results.json"));
    std::fs::write(&output_path, serde_json::to_string_pretty(&results)?)?;

    println!(
        "Processed {} vehicles: {} succeeded, {} failed",
        results.total_processed, results.succeeded, results.failed
    );
    println!("Results written to {}", output_path.display());

    Ok(())
}

fn cmd_export(results_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    if !results_path.exists() {
        return Err(Error::FileNotFound(results_path.display().to_string()));
    }

    let content = std::fs::read_to_string(&results_path)?;
    let records = parse_records(&content)?;
    if records.is_empty() {
        return Err(Error::Validation(format!(
            "no records in {}",
            results_path.display()
        )));
    }

    let output_path = output.unwrap_or_else(|| results_path.with_extension("xlsx"));
    match output_path.extension().and_then(|e| e.to_str()) {
        Some("xlsx") => export_to_excel(&records, &output_path)?,
        Some("csv") => {
            let sessions: Vec<_> = records
                .iter()
                .map(|r| (r.input.clone(), r.breakdown.clone()))
                .collect();
            write_summary(&output_path, &sessions)?;
        }
        _ => {
            return Err(Error::Validation(format!(
                "unsupported export format for {} (use .csv or .xlsx)",
                output_path.display()
            )))
        }
    }

    println!("Exported {} record(s) to {}", records.len(), output_path.display());
    Ok(())
}

/// Accept batch results, a record list, or a single record
fn parse_records(content: &str) -> Result<Vec<CalculationRecord>> {
    if let Ok(results) = serde_json::from_str::<BatchResults>(content) {
        return Ok(results.records);
    }
    if let Ok(records) = serde_json::from_str::<Vec<CalculationRecord>>(content) {
        return Ok(records);
    }
    let record: CalculationRecord = serde_json::from_str(content)?;
    Ok(vec![record])
}

fn cmd_history(output_format: OutputFormat, limit: usize) -> Result<()> {
    let history = HistoryStore::open(Config::data_dir()?)?;
    let recent = history.recent(limit);

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&recent)?);
        return Ok(());
    }

    if recent.is_empty() {
        println!("No saved calculations. Use calculate --save to record one.");
        return Ok(());
    }

    println!("\n{} of {} saved calculation(s)", recent.len(), history.count());
    println!(
        "{:<20} {:<28} {:>16} {:>10}",
        "Date", "Vehicle", "Total (KES)", "Advice"
    );
    println!("{}", "-".repeat(78));
    for record in recent {
        println!(
            "{:<20} {:<28} {:>16} {:>10}",
            record.computed_at.format("%Y-%m-%d %H:%M"),
            format!(
                "{} {} ({})",
                record.input.make, record.input.model, record.input.year
            ),
            record.breakdown.total_kes,
            record.comparison.recommendation.label(),
        );
    }

    Ok(())
}

fn cmd_config(
    mut config: Config,
    show: bool,
    set_output: Option<OutputFormat>,
    set_crsp: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut changed = false;
    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }
    if let Some(path) = set_crsp {
        config.crsp_path = Some(path);
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !changed {
        println!("{}", config);
    }

    Ok(())
}
