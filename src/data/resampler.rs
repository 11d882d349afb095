// ============================================================
// Layer 4 — Imbalance Resampler
// ============================================================
// The core of the experiment. Purchase sessions are rare:
// for every `order == 1` row there are many `order == 0` rows.
// Training directly on that mix teaches the model to always
// predict "no purchase".
//
// Instead of discarding majority rows (plain undersampling) or
// duplicating minority rows (oversampling), we partition the
// majority class into `ratio` disjoint chunks, each roughly the
// size of the minority class, and pair EVERY chunk with the
// full minority class. That yields `ratio` balanced training
// folds which together use every majority row exactly once.
//
// Invariants:
//   - exactly `ratio` chunks are yielded
//   - chunks are pairwise disjoint and their union is the input
//   - minority rows appear unmodified in every fold
//   - majority rows appear in exactly one fold each
//
// Folds are produced lazily through Iterator — consumption is
// strictly sequential and single-pass in the training loop.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{bail, Result};

use crate::domain::frame::Frame;
use crate::domain::schema::SchemaConfig;

// ─── AbundantChunks ───────────────────────────────────────────────────────────
/// Lazily yields exactly `ratio` disjoint row chunks of `frame`,
/// each of size ceil(n / ratio) except the last, which holds the
/// remainder (and may be smaller, or empty when the division is
/// very uneven).
pub struct AbundantChunks {
    frame:      Frame,
    chunk_size: usize,
    ratio:      usize,
    next:       usize,
}

/// Split `frame` into `ratio` disjoint chunks covering all rows.
/// `ratio` must be at least 1.
pub fn split_abundant(frame: Frame, ratio: usize) -> Result<AbundantChunks> {
    if ratio == 0 {
        bail!("chunk ratio must be at least 1");
    }
    // Ceiling division so ratio chunks always cover every row
    let chunk_size = frame.row_count().div_ceil(ratio).max(1);
    Ok(AbundantChunks { frame, chunk_size, ratio, next: 0 })
}

impl Iterator for AbundantChunks {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.next >= self.ratio {
            return None;
        }
        let total = self.frame.row_count();
        let start = (self.next * self.chunk_size).min(total);
        let end   = ((self.next + 1) * self.chunk_size).min(total);
        self.next += 1;
        Some(self.frame.slice_rows(start..end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ratio - self.next;
        (remaining, Some(remaining))
    }
}

// ─── BalancedFolds ────────────────────────────────────────────────────────────
/// Lazily yields one balanced training fold per majority chunk:
/// all minority rows followed by one disjoint chunk of majority rows.
pub struct BalancedFolds {
    minority: Frame,
    chunks:   AbundantChunks,
}

impl BalancedFolds {
    /// Number of folds this iterator will yield in total.
    pub fn fold_count(&self) -> usize {
        self.chunks.ratio
    }
}

/// Build the balanced-fold iterator over a training split.
///
/// The chunk count is the rounded majority/minority size ratio,
/// clamped to at least 1. An empty minority class is an error:
/// there is nothing to balance against, and training on folds
/// without a single positive example is meaningless.
pub fn balanced_folds(train: &Frame, schema: &SchemaConfig) -> Result<BalancedFolds> {
    let (minority, majority) = train.partition_by_label(&schema.label_column)?;

    if minority.is_empty() {
        bail!(
            "training split has no rows with {} == 1; cannot build balanced folds",
            schema.label_column
        );
    }

    let ratio = (majority.row_count() as f64 / minority.row_count() as f64)
        .round()
        .max(1.0) as usize;

    tracing::info!(
        "Resampling: {} minority rows, {} majority rows → {} balanced folds",
        minority.row_count(),
        majority.row_count(),
        ratio
    );

    let chunks = split_abundant(majority, ratio)?;
    Ok(BalancedFolds { minority, chunks })
}

impl Iterator for BalancedFolds {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let chunk = self.chunks.next()?;
        let mut rows = self.minority.rows().to_vec();
        rows.extend(chunk.into_rows());
        Some(Frame::from_parts(self.minority.columns().to_vec(), rows))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn majority_frame(n: usize) -> Frame {
        let rows = (0..n).map(|i| vec![i as f32, 0.0]).collect();
        Frame::new(vec!["id".to_string(), "order".to_string()], rows).unwrap()
    }

    fn mixed_frame(minority: usize, majority: usize) -> Frame {
        let mut rows: Vec<Vec<f32>> = Vec::new();
        for i in 0..majority {
            rows.push(vec![i as f32, 0.0]);
        }
        for i in 0..minority {
            rows.push(vec![(majority + i) as f32, 1.0]);
        }
        Frame::new(vec!["id".to_string(), "order".to_string()], rows).unwrap()
    }

    #[test]
    fn test_ten_rows_three_chunks() {
        // 10 rows, ratio 3 → sizes 4, 4, 2
        let sizes: Vec<usize> = split_abundant(majority_frame(10), 3)
            .unwrap()
            .map(|c| c.row_count())
            .collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn test_ratio_one_yields_whole_input() {
        let frame  = majority_frame(5);
        let chunks: Vec<Frame> = split_abundant(frame.clone(), 1).unwrap().collect();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], frame);
    }

    #[test]
    fn test_chunks_partition_input() {
        // Union recovers the input exactly; chunks are pairwise disjoint
        let chunks: Vec<Frame> = split_abundant(majority_frame(23), 4).unwrap().collect();
        assert_eq!(chunks.len(), 4);

        let mut ids: Vec<i64> = chunks
            .iter()
            .flat_map(|c| c.rows().iter().map(|r| r[0] as i64))
            .collect();
        assert_eq!(ids.len(), 23); // no duplicates across chunks
        ids.sort_unstable();
        assert_eq!(ids, (0..23).collect::<Vec<i64>>());
    }

    #[test]
    fn test_zero_ratio_rejected() {
        assert!(split_abundant(majority_frame(5), 0).is_err());
    }

    #[test]
    fn test_balanced_fold_count_and_sizes() {
        // 4 minority, 12 majority → ratio 3, folds of 4 + 4 rows
        let schema = SchemaConfig::default();
        let folds: Vec<Frame> = balanced_folds(&mixed_frame(4, 12), &schema)
            .unwrap()
            .collect();
        assert_eq!(folds.len(), 3);
        for fold in &folds {
            assert_eq!(fold.row_count(), 8);
        }
    }

    #[test]
    fn test_minority_rows_in_every_fold() {
        let schema = SchemaConfig::default();
        let frame  = mixed_frame(3, 9);
        for fold in balanced_folds(&frame, &schema).unwrap() {
            let positives = fold.rows().iter().filter(|r| r[1] == 1.0).count();
            assert_eq!(positives, 3);
        }
    }

    #[test]
    fn test_majority_rows_used_exactly_once() {
        let schema = SchemaConfig::default();
        let folds: Vec<Frame> = balanced_folds(&mixed_frame(3, 10), &schema)
            .unwrap()
            .collect();

        let mut majority_ids: Vec<i64> = folds
            .iter()
            .flat_map(|f| f.rows().iter())
            .filter(|r| r[1] == 0.0)
            .map(|r| r[0] as i64)
            .collect();
        assert_eq!(majority_ids.len(), 10);
        majority_ids.sort_unstable();
        assert_eq!(majority_ids, (0..10).collect::<Vec<i64>>());
    }

    #[test]
    fn test_empty_minority_is_an_error() {
        let schema = SchemaConfig::default();
        assert!(balanced_folds(&majority_frame(10), &schema).is_err());
    }

    #[test]
    fn test_more_minority_than_majority_clamps_ratio() {
        // 8 minority vs 2 majority rounds to ratio 0 — clamped to one fold
        let schema = SchemaConfig::default();
        let folds: Vec<Frame> = balanced_folds(&mixed_frame(8, 2), &schema)
            .unwrap()
            .collect();
        assert_eq!(folds.len(), 1);
        assert_eq!(folds[0].row_count(), 10);
    }
}
