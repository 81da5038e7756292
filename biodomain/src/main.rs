//! Assigns Biodomain categories to significant pathways
//!
//! This tool reads a reference table of known pathway -> Biodomain
//! pairs, builds a few-shot context block from it, and asks a hosted
//! chat-completion model to label each significant pathway from an
//! upstream mixed-model run (BH-corrected p_FXS < 0.05). Answers and
//! per-pathway failures are collected into two CSV reports: the raw
//! assignments and the filtered target table with the new column
//! merged in.

use clap::Parser;
use config::ArgCheck;
use log::{error, info, Level};
use simple_logger::init_with_level;

use biodomain::cli::Args;
use biodomain::core::assign_biodomains;

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap();

    let args: Args = Args::parse();

    args.check().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    assign_biodomains(args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
