// ============================================================
// Layer 3 — Frame Domain Type
// ============================================================
// An in-memory tabular dataset: named columns over row-major
// f32 data. This is the one structure every pipeline stage
// speaks — the loader produces it, the splitter and resampler
// partition it, and take_target() turns it into (features,
// labels) for the model.
//
// Row-major storage is chosen because every consumer here
// iterates whole records (normalization, batching), never
// single columns across all rows.
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §8 (Collections)

use anyhow::{bail, Result};

/// A tabular dataset: column names plus row-major numeric data.
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows:    Vec<Vec<f32>>,
}

impl Frame {
    /// Create a Frame, checking that every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f32>>) -> Result<Self> {
        let width = columns.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                bail!(
                    "row {} has {} cells but the header names {} columns",
                    i, row.len(), width
                );
            }
        }
        Ok(Self { columns, rows })
    }

    /// Infallible constructor for callers that already guarantee every
    /// row matches the header width (e.g. rows taken from an existing
    /// Frame). Not for externally sourced data — use `new` there.
    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Vec<f32>>) -> Self {
        Self { columns, rows }
    }

    /// An empty Frame sharing this Frame's columns.
    pub fn empty_like(&self) -> Self {
        Self { columns: self.columns.clone(), rows: Vec::new() }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f32>> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a named column, or None if absent.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Return a copy of this Frame without the named columns.
    /// Names that don't exist are ignored with a warning — the
    /// drop list is configuration, not ground truth about the file.
    pub fn drop_columns(&self, names: &[String]) -> Self {
        let mut keep: Vec<usize> = Vec::new();
        for (i, col) in self.columns.iter().enumerate() {
            if !names.contains(col) {
                keep.push(i);
            }
        }
        for name in names {
            if self.column_index(name).is_none() {
                tracing::warn!("Drop column '{}' not present in dataset — ignoring", name);
            }
        }

        let columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self.rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i]).collect())
            .collect();
        Self { columns, rows }
    }

    /// Split this Frame into (features, labels): the Frame minus the
    /// label column, and the label column as a vector.
    ///
    /// Pure — `self` is untouched. The returned vector has the same
    /// row count as the input and equals the label column element-wise.
    pub fn take_target(&self, label: &str) -> Result<(Frame, Vec<f32>)> {
        let Some(idx) = self.column_index(label) else {
            bail!("label column '{}' not found in dataset", label);
        };

        let columns: Vec<String> = self.columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c.clone())
            .collect();

        let mut target = Vec::with_capacity(self.rows.len());
        let rows: Vec<Vec<f32>> = self.rows
            .iter()
            .map(|row| {
                target.push(row[idx]);
                row.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, &v)| v)
                    .collect()
            })
            .collect();

        Ok((Frame { columns, rows }, target))
    }

    /// Partition rows by the binary label column:
    /// (rows where label == 1, rows where label == 0).
    /// Any non-zero label value counts as the positive class.
    pub fn partition_by_label(&self, label: &str) -> Result<(Frame, Frame)> {
        let Some(idx) = self.column_index(label) else {
            bail!("label column '{}' not found in dataset", label);
        };

        let mut ones  = self.empty_like();
        let mut zeros = self.empty_like();
        for row in &self.rows {
            if row[idx] != 0.0 {
                ones.rows.push(row.clone());
            } else {
                zeros.rows.push(row.clone());
            }
        }
        Ok((ones, zeros))
    }

    /// Append all rows of `other` to this Frame.
    /// Both Frames must share the same columns.
    pub fn concat(&self, other: &Frame) -> Result<Frame> {
        if self.columns != other.columns {
            bail!("cannot concat Frames with different columns");
        }
        let mut rows = self.rows.clone();
        rows.extend(other.rows.iter().cloned());
        Ok(Frame { columns: self.columns.clone(), rows })
    }

    /// A new Frame holding the rows in `range` (used by the resampler).
    pub fn slice_rows(&self, range: std::ops::Range<usize>) -> Frame {
        Frame {
            columns: self.columns.clone(),
            rows:    self.rows[range].to_vec(),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample_frame() -> Frame {
        Frame::new(
            cols(&["a", "b", "order"]),
            vec![
                vec![1.0, 2.0, 0.0],
                vec![3.0, 4.0, 1.0],
                vec![5.0, 6.0, 0.0],
            ],
        ).unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = Frame::new(cols(&["a", "b"]), vec![vec![1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_drop_columns() {
        let frame   = sample_frame();
        let dropped = frame.drop_columns(&cols(&["b"]));
        assert_eq!(dropped.columns(), &cols(&["a", "order"]));
        assert_eq!(dropped.rows()[1], vec![3.0, 1.0]);
        // Original is untouched
        assert_eq!(frame.column_count(), 3);
    }

    #[test]
    fn test_drop_missing_column_is_ignored() {
        let frame   = sample_frame();
        let dropped = frame.drop_columns(&cols(&["revenue"]));
        assert_eq!(dropped.column_count(), 3);
    }

    #[test]
    fn test_take_target() {
        let frame = sample_frame();
        let (features, target) = frame.take_target("order").unwrap();

        // Label column removed, all other columns kept
        assert_eq!(features.columns(), &cols(&["a", "b"]));
        // Same row count, element-wise equal to the label column
        assert_eq!(features.row_count(), frame.row_count());
        assert_eq!(target, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_take_target_missing_label() {
        let frame = sample_frame();
        assert!(frame.take_target("purchase").is_err());
    }

    #[test]
    fn test_partition_by_label() {
        let frame = sample_frame();
        let (ones, zeros) = frame.partition_by_label("order").unwrap();
        assert_eq!(ones.row_count(),  1);
        assert_eq!(zeros.row_count(), 2);
        assert_eq!(ones.rows()[0], vec![3.0, 4.0, 1.0]);
    }

    #[test]
    fn test_concat_preserves_order() {
        let frame = sample_frame();
        let (ones, zeros) = frame.partition_by_label("order").unwrap();
        let joined = ones.concat(&zeros).unwrap();
        assert_eq!(joined.row_count(), 3);
        // Minority rows first, then majority rows
        assert_eq!(joined.rows()[0], vec![3.0, 4.0, 1.0]);
    }

    #[test]
    fn test_concat_rejects_mismatched_columns() {
        let frame = sample_frame();
        let other = Frame::new(cols(&["x"]), vec![vec![1.0]]).unwrap();
        assert!(frame.concat(&other).is_err());
    }

    #[test]
    fn test_slice_rows() {
        let frame = sample_frame();
        let slice = frame.slice_rows(1..3);
        assert_eq!(slice.row_count(), 2);
        assert_eq!(slice.rows()[0], vec![3.0, 4.0, 1.0]);
    }
}
