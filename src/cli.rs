//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "gharama-checker")]
#[command(version)]
#[command(about = "Kenya vehicle import landed-cost calculator")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate the full landed cost for one vehicle
    Calculate {
        /// Manufacturer (e.g., Toyota)
        #[arg(long)]
        make: String,

        /// Model name (e.g., Harrier)
        #[arg(long)]
        model: String,

        /// Year of manufacture
        #[arg(long)]
        year: Option<i32>,

        /// Engine size in liters (e.g., 2.0)
        #[arg(long, short = 'e')]
        engine_size: Option<Decimal>,

        /// FOB value in USD. Estimated from make and year when omitted.
        #[arg(long)]
        fob: Option<Decimal>,

        /// Freight cost in USD
        #[arg(long, default_value = "1200")]
        freight: Decimal,

        /// Insurance cost in USD
        #[arg(long, default_value = "300")]
        insurance: Decimal,

        /// Listing URL to pre-fill year, engine size, and FOB value
        #[arg(long)]
        url: Option<String>,

        /// CRSP reference file for the local-market comparison
        #[arg(long)]
        crsp: Option<PathBuf>,

        /// Save the result to calculation history
        #[arg(long)]
        save: bool,

        /// Write a summary file (.csv) or workbook (.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Search the CRSP reference-price table
    Lookup {
        /// Make to search for
        make: String,

        /// Model to search for (optional, matches all when omitted)
        #[arg(default_value = "")]
        model: String,

        /// CRSP reference file. Uses config value if not specified.
        #[arg(long)]
        crsp: Option<PathBuf>,

        /// Limit number of matches shown
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Extract vehicle details from a listing URL
    Scrape {
        /// Listing page URL (e.g., from Be Forward or SBT Japan)
        url: String,
    },

    /// Estimate a FOB value from make and year
    Estimate {
        /// Manufacturer
        make: String,

        /// Year of manufacture
        year: i32,
    },

    /// Calculate breakdowns for a CSV of vehicles
    Batch {
        /// Input CSV with columns: make, model, year, engine_size_liters,
        /// fob_value_usd, freight_usd, insurance_usd
        input: PathBuf,

        /// Output file for results (JSON)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Export saved results to Excel or CSV
    Export {
        /// Path to JSON results file (from batch or --save)
        results: PathBuf,

        /// Output file path (.xlsx or .csv)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show calculation history
    History {
        /// Limit number of entries shown
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default CRSP reference file
        #[arg(long)]
        set_crsp: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
