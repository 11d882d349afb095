// ============================================================
// Layer 4 — Feature Normalizer
// ============================================================
// Row-wise L2 normalization: every feature vector is scaled to
// unit Euclidean length. Session features mix counts, durations
// and prices on wildly different scales; without normalization
// the largest-magnitude column dominates the first linear layer.
//
// Row-wise (as opposed to the more common column-wise z-score)
// matches how the experiment was designed: each session becomes
// a direction, and the model separates directions.
//
// All-zero rows pass through unchanged — there is no direction
// to normalize and dividing by zero would poison the tensor
// with NaNs.
//
// Reference: Rust Book §13 (Iterators)

/// Scale each row of `rows` to unit L2 norm, in place.
/// Rows with zero norm are left untouched.
pub fn l2_normalize_rows(rows: &mut [Vec<f32>]) {
    for row in rows.iter_mut() {
        let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in row.iter_mut() {
                *v /= norm;
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn norm(row: &[f32]) -> f32 {
        row.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    #[test]
    fn test_rows_have_unit_norm() {
        let mut rows = vec![
            vec![3.0, 4.0],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![-2.0, 0.0, 5.0],
        ];
        l2_normalize_rows(&mut rows);
        for row in &rows {
            assert!((norm(row) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_known_values() {
        let mut rows = vec![vec![3.0, 4.0]];
        l2_normalize_rows(&mut rows);
        assert!((rows[0][0] - 0.6).abs() < 1e-6);
        assert!((rows[0][1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_zero_row_passes_through() {
        let mut rows = vec![vec![0.0, 0.0, 0.0]];
        l2_normalize_rows(&mut rows);
        assert_eq!(rows[0], vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_direction_preserved() {
        let mut rows = vec![vec![10.0, -10.0]];
        l2_normalize_rows(&mut rows);
        assert!(rows[0][0] > 0.0);
        assert!(rows[0][1] < 0.0);
        assert!((rows[0][0] + rows[0][1]).abs() < 1e-6);
    }
}
