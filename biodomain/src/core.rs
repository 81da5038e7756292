//! Core module for the Biodomain assignment pipeline
//!
//! This module wires the three stages of the run: cleaning the
//! reference table into a few-shot context block, selecting the
//! significant target pathways after FDR correction, and looping
//! over them against the chat-completion client. The stages are
//! strictly sequential; the fixed inter-call delay in the loop is
//! the only throttling mechanism.

pub mod classify;
pub mod reference;
pub mod stats;
pub mod targets;

use anyhow::Result;
use log::info;
use std::time::Duration;

use crate::cli::Args;
use crate::llm::OpenAiClient;
use crate::utils::{write_merged, write_results};

pub fn assign_biodomains(args: Args) -> Result<()> {
    let reference = reference::load_reference(&args.reference)?;
    let context = reference::build_context(&reference);

    info!(
        "Reference context built from {} cleaned pathways",
        reference.len()
    );

    let (pathways, table) = targets::select_targets(&args.target, args.padj, args.limit)?;

    info!(
        "{} significant rows, {} pathways queued for classification",
        table.rows.len(),
        pathways.len()
    );

    let client = OpenAiClient::new(args.api_key_file.as_deref(), args.model)?;
    let results = classify::run_loop(
        &client,
        &context,
        &pathways,
        Duration::from_secs(args.delay),
    );

    write_results(&args.outdir.join(config::BIODOMAIN_RESULTS), &results)?;
    write_merged(
        &args.outdir.join(config::TARGET_WITH_BIODOMAIN),
        &table,
        &results,
    )?;

    Ok(())
}
