//! Reference table loading and cleaning
//!
//! The reference CSV maps already-curated pathways to their Biodomain.
//! Rows with missing fields, a "none" Biodomain, or an ambiguous
//! pathway (one that maps to more than one Biodomain) are useless as
//! few-shot examples and are dropped before the context block is built.

use anyhow::{Context, Result};
use hashbrown::HashMap;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

// gene-ontology biological-process prefix, e.g. GOBP_ or GO_BP_
static ONTOLOGY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^GO_?BP_?").expect("no regex error"));

#[derive(Debug, Deserialize)]
struct RawReferenceRow {
    pathway: Option<String>,
    #[serde(rename = "Biodomain")]
    biodomain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRow {
    pub pathway: String,
    pub biodomain: String,
}

/// normalize a pathway name: strip the ontology-source prefix,
/// underscores to spaces, lowercase, trim. Idempotent, since the
/// prefix pattern is uppercase and the output never is.
pub fn normalize_pathway(pathway: &str) -> String {
    let stripped = ONTOLOGY_PREFIX.replace(pathway, "");

    stripped.replace('_', " ").to_lowercase().trim().to_string()
}

pub fn load_reference(path: &Path) -> Result<Vec<ReferenceRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("could not open reference table {:?}", path))?;

    let headers = reader.headers()?.clone();
    for column in [config::PATHWAY_COLUMN, config::BIODOMAIN_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            anyhow::bail!("reference table {:?} is missing column '{}'", path, column);
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<RawReferenceRow>() {
        let record = record.with_context(|| format!("malformed record in {:?}", path))?;

        let (pathway, biodomain) = match (record.pathway, record.biodomain) {
            (Some(p), Some(b)) if !p.is_empty() && !b.is_empty() => (p, b),
            _ => continue,
        };

        rows.push(ReferenceRow { pathway, biodomain });
    }

    Ok(clean(rows))
}

/// drop "none" Biodomains, normalize pathway names and discard every
/// occurrence of a pathway that appears more than once. Idempotent.
pub fn clean(rows: Vec<ReferenceRow>) -> Vec<ReferenceRow> {
    let survivors = rows
        .into_iter()
        .filter(|row| row.biodomain.to_lowercase() != "none")
        .map(|row| ReferenceRow {
            pathway: normalize_pathway(&row.pathway),
            biodomain: row.biodomain,
        })
        .collect::<Vec<_>>();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in survivors.iter() {
        *counts.entry(row.pathway.clone()).or_insert(0) += 1;
    }

    let ambiguous = survivors
        .iter()
        .filter(|row| counts[row.pathway.as_str()] > 1)
        .count();

    if ambiguous > 0 {
        warn!(
            "Excluding {} reference rows with ambiguous pathway names",
            ambiguous
        );
    }

    survivors
        .into_iter()
        .filter(|row| counts[row.pathway.as_str()] == 1)
        .collect()
}

/// serialize the cleaned table into the few-shot context block
pub fn build_context(rows: &[ReferenceRow]) -> String {
    rows.iter()
        .map(|row| format!("{} -> {}", row.pathway, row.biodomain))
        .collect::<Vec<_>>()
        .join("\n")
}
