//! Gharama Checker - Kenya vehicle import landed-cost calculator
//!
//! A CLI tool that computes the full cost of importing a vehicle: purchase,
//! shipping, duties and taxes, service fees, and import-vs-local advice.

use clap::Parser;
use gharama_checker::cli::Cli;
use gharama_checker::commands;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
