//! Sequential classification loop
//!
//! One completion call per target pathway, temperature 0 for
//! reproducibility. A failed call is terminal for that pathway only:
//! its message is recorded behind an "ERROR: " marker and the loop
//! moves on. The fixed post-call pause is unconditional and is the
//! only concession to the provider's rate limits.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use config::get_progress_bar;

use crate::core::reference::normalize_pathway;
use crate::llm::Completion;

pub const SYSTEM_PROMPT: &str =
    "You are a biomedical ontology expert. Infer only the most appropriate Biodomain or 'unknown'.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub pathway: String,
    #[serde(rename = "Biodomain")]
    pub biodomain: String,
}

pub fn run_loop<C: Completion>(
    client: &C,
    context: &str,
    pathways: &[String],
    delay: Duration,
) -> Vec<ClassificationResult> {
    let pb = get_progress_bar(pathways.len() as u64, "Assigning Biodomains...");

    let mut results = Vec::with_capacity(pathways.len());
    for pathway in pathways {
        let prompt = build_prompt(context, pathway);

        let biodomain = match client.complete(SYSTEM_PROMPT, &prompt) {
            Ok(answer) => clean_answer(&answer),
            Err(e) => format!("ERROR: {}", e),
        };

        results.push(ClassificationResult {
            pathway: pathway.clone(),
            biodomain,
        });

        std::thread::sleep(delay);
        pb.inc(1);
    }

    pb.finish_and_clear();

    results
}

/// embed the few-shot context and the normalized query into the prompt
pub fn build_prompt(context: &str, pathway: &str) -> String {
    format!(
        "You are a biomedical ontology expert. Below are known pathway -> Biodomain mappings:\n\
         \n\
         {}\n\
         \n\
         Based on these examples, assign the most appropriate Biodomain to the following pathway:\n\
         Pathway: {}\n\
         \n\
         Please output **only** the most appropriate Biodomain or 'unknown'.",
        context,
        normalize_pathway(pathway)
    )
}

/// trim the answer and drop a literal "Biodomain:" label if the model
/// echoed one
pub fn clean_answer(answer: &str) -> String {
    let trimmed = answer.trim();

    trimmed
        .strip_prefix("Biodomain:")
        .map(str::trim)
        .unwrap_or(trimmed)
        .to_string()
}
