//! CSV report writers
//!
//! Two terminal artifacts: the raw pathway -> Biodomain assignments and
//! the filtered target table with `padj_FXS` and `Biodomain` merged in.
//! Both are plain overwrites; these are reports, not systems of record.

use anyhow::{Context, Result};
use hashbrown::HashMap;
use std::path::Path;

use crate::core::classify::ClassificationResult;
use crate::core::targets::TargetTable;

pub fn write_results(path: &Path, results: &[ClassificationResult]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("could not create {:?}", path))?;

    for result in results {
        writer.serialize(result)?;
    }

    writer.flush()?;
    log::info!("Wrote {} assignments to {:?}", results.len(), path);

    Ok(())
}

pub fn read_results(path: &Path) -> Result<Vec<ClassificationResult>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("could not open {:?}", path))?;

    let mut results = Vec::new();
    for record in reader.deserialize::<ClassificationResult>() {
        results.push(record.with_context(|| format!("malformed record in {:?}", path))?);
    }

    Ok(results)
}

/// left-join the assignments onto the filtered target table by the
/// original pathway string and write the merged report
pub fn write_merged(
    path: &Path,
    table: &TargetTable,
    results: &[ClassificationResult],
) -> Result<()> {
    let assignments: HashMap<&str, &str> = results
        .iter()
        .map(|r| (r.pathway.as_str(), r.biodomain.as_str()))
        .collect();

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("could not create {:?}", path))?;

    let mut headers = table.headers.clone();
    headers.push_field(config::PADJ_COLUMN);
    headers.push_field(config::BIODOMAIN_COLUMN);
    writer.write_record(&headers)?;

    for (row, padj) in table.rows.iter().zip(table.padj.iter()) {
        let pathway = row.get(table.pathway_idx).unwrap_or_default();
        let biodomain = assignments.get(pathway).copied().unwrap_or_default();

        let mut record = row.clone();
        record.push_field(&padj.map(|q| q.to_string()).unwrap_or_default());
        record.push_field(biodomain);
        writer.write_record(&record)?;
    }

    writer.flush()?;
    log::info!("Wrote merged table to {:?}", path);

    Ok(())
}
