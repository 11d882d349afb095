// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records evaluation metrics to a CSV file, one row per
// trained-and-evaluated model, and snapshots the effective
// experiment config as JSON next to it.
//
// Why log metrics to CSV?
//   - Easy to open in a spreadsheet and compare folds
//   - Provides a permanent record of each experiment run
//   - The stdout reports are human-readable but ephemeral
//
// Columns recorded per evaluation:
//   - phase:     resampled | full | weighted
//   - fold:      fold number within the phase (0 outside phase 1)
//   - precision: positive-class precision
//   - recall:    positive-class recall
//   - f1:        positive-class F1
//   - auc:       area under the ROC curve (empty when undefined)
//
// Output files: {output_dir}/metrics.csv
//               {output_dir}/experiment_config.json
//
// Example CSV output:
//   phase,fold,precision,recall,f1,auc
//   resampled,1,0.412000,0.550000,0.471000,0.612000
//   resampled,2,0.398000,0.541000,0.459000,0.604000
//   full,0,0.625000,0.180000,0.279000,0.588000
//   weighted,0,0.512000,0.390000,0.443000,0.597000
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::application::experiment::ExperimentConfig;
use crate::ml::evaluator::EvaluationReport;

/// One row of metrics data for a single evaluated model
#[derive(Debug, Clone)]
pub struct EvalRecord {
    /// Which training phase produced the model
    pub phase: String,

    /// Fold number within the resampled phase; 0 for the
    /// full-imbalance and class-weighted phases
    pub fold: usize,

    /// Positive-class precision
    pub precision: f64,

    /// Positive-class recall
    pub recall: f64,

    /// Positive-class F1
    pub f1: f64,

    /// AUC, when the validation labels carry both classes
    pub auc: Option<f64>,
}

impl EvalRecord {
    /// Build a record from an evaluation report.
    pub fn from_report(phase: impl Into<String>, fold: usize, report: &EvaluationReport) -> Self {
        Self {
            phase:     phase.into(),
            fold,
            precision: report.positive.precision,
            recall:    report.positive.recall,
            f1:        report.positive.f1,
            auc:       report.auc,
        }
    }
}

/// Logs evaluation records to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,

    /// Directory holding all experiment output
    dir: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());

        // Create directory if it doesn't exist
        fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create output directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");

        // Write CSV header only if file is new
        // This allows appending to an existing log across runs
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "phase,fold,precision,recall,f1,auc")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path, dir })
    }

    /// Append one evaluation's metrics as a new row in the CSV.
    pub fn log(&self, r: &EvalRecord) -> Result<()> {
        // Open in append mode — adds to end of file
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        let auc = r.auc.map(|a| format!("{a:.6}")).unwrap_or_default();
        writeln!(
            f,
            "{},{},{:.6},{:.6},{:.6},{}",
            r.phase, r.fold, r.precision, r.recall, r.f1, auc,
        )?;

        tracing::debug!(
            "Logged {} fold {}: precision={:.4}, recall={:.4}",
            r.phase, r.fold, r.precision, r.recall,
        );

        Ok(())
    }

    /// Snapshot the effective experiment config as JSON so a run
    /// can always be traced back to its exact parameters.
    pub fn save_config(&self, cfg: &ExperimentConfig) -> Result<()> {
        let path = self.dir.join("experiment_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_written_once_and_rows_append() {
        let dir = std::env::temp_dir().join("order_predictor_metrics_test");
        let _ = fs::remove_dir_all(&dir);

        let logger = MetricsLogger::new(dir.to_str().unwrap().to_string()).unwrap();
        let record = EvalRecord {
            phase:     "resampled".to_string(),
            fold:      1,
            precision: 0.5,
            recall:    0.25,
            f1:        1.0 / 3.0,
            auc:       Some(0.75),
        };
        logger.log(&record).unwrap();

        // Re-opening must not duplicate the header
        let logger = MetricsLogger::new(dir.to_str().unwrap().to_string()).unwrap();
        logger.log(&record).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "phase,fold,precision,recall,f1,auc");
        assert!(lines[1].starts_with("resampled,1,0.500000,0.250000"));
    }

    #[test]
    fn test_missing_auc_leaves_field_empty() {
        let dir = std::env::temp_dir().join("order_predictor_metrics_noauc_test");
        let _ = fs::remove_dir_all(&dir);

        let logger = MetricsLogger::new(dir.to_str().unwrap().to_string()).unwrap();
        let record = EvalRecord {
            phase:     "full".to_string(),
            fold:      0,
            precision: 0.0,
            recall:    0.0,
            f1:        0.0,
            auc:       None,
        };
        logger.log(&record).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        assert!(contents.lines().nth(1).unwrap().ends_with(','));
    }
}
