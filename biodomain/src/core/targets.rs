//! Target selection from upstream mixed-model results
//!
//! The target CSV carries arbitrary passthrough columns next to the
//! required `pathway` and `p_FXS` fields. The full p-value column is
//! BH-adjusted before any filtering, then the significant rows are
//! kept and their pathway names deduplicated and capped.

use anyhow::{Context, Result};
use csv::StringRecord;
use hashbrown::HashSet;
use std::path::Path;

use crate::core::stats::benjamini_hochberg;

/// the significant slice of the target table, passthrough columns intact
#[derive(Debug)]
pub struct TargetTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
    pub padj: Vec<Option<f64>>,
    pub pathway_idx: usize,
}

pub fn select_targets(
    path: &Path,
    threshold: f64,
    limit: usize,
) -> Result<(Vec<String>, TargetTable)> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("could not open target table {:?}", path))?;

    let headers = reader.headers()?.clone();
    let pathway_idx = column_index(&headers, config::PATHWAY_COLUMN, path)?;
    let pvalue_idx = column_index(&headers, config::PVALUE_COLUMN, path)?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("malformed record in {:?}", path))?;
        records.push(record);
    }

    // adjust over the whole column before filtering, order matters
    let pvalues = records
        .iter()
        .map(|record| record.get(pvalue_idx).and_then(|p| p.parse::<f64>().ok()))
        .collect::<Vec<_>>();
    let adjusted = benjamini_hochberg(&pvalues);

    let mut rows = Vec::new();
    let mut padj = Vec::new();
    for (record, q) in records.into_iter().zip(adjusted.into_iter()) {
        match q {
            Some(q) if q < threshold => {
                rows.push(record);
                padj.push(Some(q));
            }
            _ => (),
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut pathways = Vec::new();
    for row in rows.iter() {
        let pathway = row.get(pathway_idx).unwrap_or_default().to_string();
        if seen.insert(pathway.clone()) {
            pathways.push(pathway);
        }
    }
    pathways.truncate(limit);

    Ok((
        pathways,
        TargetTable {
            headers,
            rows,
            padj,
            pathway_idx,
        },
    ))
}

fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .with_context(|| format!("target table {:?} is missing column '{}'", path, column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile;

    fn write_table(rows: &[(&str, &str)]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "pathway,estimate,p_FXS").unwrap();
        for (pathway, p) in rows {
            write!(file, "\n{},0.5,{}", pathway, p).unwrap();
        }
        file
    }

    #[test]
    fn test_selects_exactly_the_significant_pathways() {
        let mut rows = vec![("pw_a", "0.001"), ("pw_b", "0.002"), ("pw_c", "0.003")];
        for _ in 0..9 {
            rows.push(("noise", "0.5"));
        }
        let file = write_table(&rows);

        let (pathways, table) = select_targets(file.path(), 0.05, 10).unwrap();

        assert_eq!(pathways, vec!["pw_a", "pw_b", "pw_c"]);
        assert_eq!(table.rows.len(), 3);
        assert!(table.padj.iter().all(|q| q.unwrap() < 0.05));
    }

    #[test]
    fn test_deduplicates_and_caps_pathways() {
        let file = write_table(&[
            ("pw_a", "0.0001"),
            ("pw_a", "0.0002"),
            ("pw_b", "0.0003"),
            ("pw_c", "0.0004"),
        ]);

        let (pathways, table) = select_targets(file.path(), 0.05, 2).unwrap();

        // duplicates collapse to the first occurrence, then the cap applies
        assert_eq!(pathways, vec!["pw_a", "pw_b"]);
        // the filtered table keeps every significant row for the merge
        assert_eq!(table.rows.len(), 4);
    }

    #[test]
    fn test_null_pvalues_are_never_significant() {
        let file = write_table(&[("pw_a", "0.001"), ("pw_b", ""), ("pw_c", "NA")]);

        let (pathways, _) = select_targets(file.path(), 0.05, 10).unwrap();

        assert_eq!(pathways, vec!["pw_a"]);
    }

    #[test]
    fn test_missing_pvalue_column_is_fatal() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "pathway,estimate\npw_a,0.5").unwrap();

        assert!(select_targets(file.path(), 0.05, 10).is_err());
    }
}
