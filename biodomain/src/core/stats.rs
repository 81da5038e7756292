//! Multiple-testing correction
//!
//! Benjamini-Hochberg adjustment over a nullable p-value column.
//! Missing or non-finite entries stay null, are excluded from the
//! hypothesis count and can never reach significance downstream.

/// BH-adjust a column of p-values, preserving input order.
///
/// adjusted[i] = min over ranks j >= rank(i) of p_(j) * m / j,
/// clamped to 1.0, with m the number of non-null entries.
pub fn benjamini_hochberg(pvalues: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut order = pvalues
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| match p {
            Some(p) if p.is_finite() => Some((idx, *p)),
            _ => None,
        })
        .collect::<Vec<_>>();

    let m = order.len();
    let mut adjusted = vec![None; pvalues.len()];

    if m == 0 {
        return adjusted;
    }

    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    // walk ranks from largest to smallest, carrying the running minimum
    let mut running = 1.0_f64;
    for (rank, (idx, p)) in order.iter().enumerate().rev() {
        let scaled = p * m as f64 / (rank + 1) as f64;
        running = running.min(scaled);
        adjusted[*idx] = Some(running.min(1.0));
    }

    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bh_known_values() {
        let pvalues = vec![Some(0.005), Some(0.01), Some(0.05), Some(0.1)];
        let adjusted = benjamini_hochberg(&pvalues);

        let expected = [0.02, 0.02, 0.05 * 4.0 / 3.0, 0.1];
        for (got, want) in adjusted.iter().zip(expected.iter()) {
            assert!((got.unwrap() - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bh_handles_all_null() {
        let pvalues = vec![None, None, None];
        let adjusted = benjamini_hochberg(&pvalues);

        assert_eq!(adjusted, vec![None, None, None]);
    }

    #[test]
    fn test_bh_handles_single_value() {
        let adjusted = benjamini_hochberg(&[Some(0.03)]);

        assert_eq!(adjusted, vec![Some(0.03)]);
    }

    #[test]
    fn test_bh_skips_nulls_in_hypothesis_count() {
        let pvalues = vec![Some(0.01), None, Some(0.02)];
        let adjusted = benjamini_hochberg(&pvalues);

        // m = 2: both scale to 0.02
        assert!((adjusted[0].unwrap() - 0.02).abs() < 1e-12);
        assert_eq!(adjusted[1], None);
        assert!((adjusted[2].unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_bh_is_monotone_and_bounded() {
        let pvalues = vec![
            Some(0.9),
            Some(0.001),
            Some(0.04),
            Some(0.2),
            Some(0.011),
            Some(0.7),
        ];
        let adjusted = benjamini_hochberg(&pvalues);

        let mut pairs = pvalues
            .iter()
            .zip(adjusted.iter())
            .map(|(p, q)| (p.unwrap(), q.unwrap()))
            .collect::<Vec<_>>();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        for window in pairs.windows(2) {
            assert!(window[0].1 <= window[1].1);
        }

        for (_, q) in pairs {
            assert!((0.0..=1.0).contains(&q));
        }
    }
}
