use anyhow::Result;

pub mod cli;
pub mod core;
pub mod llm;
pub mod utils;

pub fn lib_biodomain(args: Vec<String>) -> Result<()> {
    let args = cli::Args::from(args);
    let assignments = core::assign_biodomains(args);

    return assignments;
}
