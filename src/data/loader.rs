// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Loads the session dataset from a CSV file using the csv crate.
//
// The file layout is a header row of column names followed by
// one numeric record per session. The loader does not know
// which column is the label or which columns get dropped —
// that is SchemaConfig's job, applied later by the use case.
// Here every cell is simply parsed as f32.
//
// Cells that fail to parse are a hard error (with row/column
// context), not a silent zero: a malformed dataset should stop
// the experiment, not skew it.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{fs::File, path::Path};

use crate::domain::frame::Frame;
use crate::domain::traits::RecordSource;

/// Loads a whole CSV file into a Frame.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    /// Path to the CSV file
    path: String,
}

impl CsvLoader {
    /// Create a new CsvLoader pointed at a file
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Implement the RecordSource trait so the application layer
/// can call load() without knowing about CSV internals
impl RecordSource for CsvLoader {
    fn load(&self) -> Result<Frame> {
        let path = Path::new(&self.path);
        if !path.exists() {
            bail!("dataset file '{}' does not exist", self.path);
        }

        let file = File::open(path)
            .with_context(|| format!("cannot open '{}'", self.path))?;
        let mut reader = csv::Reader::from_reader(file);

        // The header row gives us the column names
        let columns: Vec<String> = reader
            .headers()
            .with_context(|| format!("cannot read header of '{}'", self.path))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows: Vec<Vec<f32>> = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("malformed record at line {} of '{}'", line + 2, self.path))?;

            if record.len() != columns.len() {
                bail!(
                    "line {} of '{}' has {} cells, expected {}",
                    line + 2, self.path, record.len(), columns.len()
                );
            }

            let mut row = Vec::with_capacity(columns.len());
            for (col, cell) in record.iter().enumerate() {
                let value: f32 = cell.trim().parse().with_context(|| {
                    format!(
                        "non-numeric cell '{}' in column '{}' at line {} of '{}'",
                        cell, columns[col], line + 2, self.path
                    )
                })?;
                row.push(value);
            }
            rows.push(row);
        }

        tracing::info!(
            "Loaded {} records with {} columns from '{}'",
            rows.len(),
            columns.len(),
            self.path
        );
        Frame::new(columns, rows)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_simple_csv() {
        let path = write_temp_csv(
            "order_predictor_loader_ok.csv",
            "a,b,order\n1.0,2.0,0\n3.5,4.5,1\n",
        );
        let frame = CsvLoader::new(path.to_str().unwrap()).load().unwrap();
        assert_eq!(frame.columns(), &["a".to_string(), "b".to_string(), "order".to_string()]);
        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.rows()[1], vec![3.5, 4.5, 1.0]);
    }

    #[test]
    fn test_load_rejects_non_numeric_cell() {
        let path = write_temp_csv(
            "order_predictor_loader_bad.csv",
            "a,b\n1.0,oops\n",
        );
        let result = CsvLoader::new(path.to_str().unwrap()).load();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = CsvLoader::new("no/such/file.csv").load();
        assert!(result.is_err());
    }
}
