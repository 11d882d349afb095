// ============================================================
// Layer 2 — ExperimentUseCase
// ============================================================
// Orchestrates the full imbalance experiment in order:
//
//   Step 1: Load the CSV dataset        (Layer 4 - data)
//   Step 2: Drop schema columns         (Layer 3 - domain)
//   Step 3: Split train/val/test        (Layer 4 - data)
//   Step 4: Normalize held-out sets     (Layer 4 - data)
//   Step 5: Snapshot config             (Layer 6 - infra)
//   Step 6: Resampled-fold phase        (Layers 4+5)
//   Step 7: Full-imbalance phase        (Layer 5 - ml)
//   Step 8: Class-weighted phase        (Layer 5 - ml)
//
// The three training phases run unconditionally in sequence —
// no branching on intermediate results, no retry. Every phase
// trains a fresh model; nothing carries over.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::SessionDataset,
    loader::CsvLoader,
    normalizer::l2_normalize_rows,
    resampler::balanced_folds,
    splitter::split_train_val_test,
};
use crate::domain::{frame::Frame, schema::SchemaConfig, traits::RecordSource};
use crate::infra::metrics::{EvalRecord, MetricsLogger};
use crate::ml::{evaluator, trainer};

// ─── Experiment Configuration ────────────────────────────────────────────────
// All parameters for one experiment run.
// Serialisable so the infra layer can snapshot it to disk and a
// result can always be traced back to its exact parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub data_path:       String,
    pub output_dir:      String,
    pub schema:          SchemaConfig,
    pub seed:            u64,
    pub train_fraction:  f64,
    pub val_fraction:    f64,
    pub epochs:          usize,
    pub batch_size:      usize,
    pub lr:              f64,
    pub minority_weight: f32,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            data_path:       "data/sessions.csv".to_string(),
            output_dir:      "output".to_string(),
            schema:          SchemaConfig::default(),
            seed:            7,
            train_fraction:  0.6,
            val_fraction:    0.2,
            epochs:          1,
            batch_size:      128,
            lr:              1e-3,
            minority_weight: 2.2,
        }
    }
}

// ─── ExperimentUseCase ───────────────────────────────────────────────────────
// Owns the config and runs the full experiment pipeline.
pub struct ExperimentUseCase {
    config: ExperimentConfig,
}

/// A held-out set with pre-normalized features, evaluated
/// repeatedly against each trained model.
struct HeldOut {
    rows:   Vec<Vec<f32>>,
    labels: Vec<u8>,
}

impl ExperimentUseCase {
    /// Create a new ExperimentUseCase with the given configuration
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    /// Execute the full experiment end to end
    pub fn execute(&self) -> Result<()> {
        let cfg    = &self.config;
        let schema = &cfg.schema;

        // ── Step 1: Load the dataset ─────────────────────────────────────────
        tracing::info!("Loading session records from '{}'", cfg.data_path);
        let loader = CsvLoader::new(&cfg.data_path);
        let frame  = loader.load()?;

        // ── Step 2: Drop leaking / irrelevant columns ────────────────────────
        let frame = frame.drop_columns(&schema.drop_columns);
        if frame.column_index(&schema.label_column).is_none() {
            bail!(
                "label column '{}' not found in '{}'",
                schema.label_column, cfg.data_path
            );
        }
        if frame.is_empty() {
            bail!("dataset '{}' has no records", cfg.data_path);
        }

        // ── Step 3: Train / validation / test split ──────────────────────────
        // Seeded shuffle; the partitions are fixed from here on.
        let (train, val, test) =
            split_train_val_test(frame, cfg.train_fraction, cfg.val_fraction, cfg.seed)?;
        tracing::info!(
            "Split: {} train, {} validation, {} test (held out)",
            train.row_count(),
            val.row_count(),
            test.row_count()
        );
        if train.is_empty() || val.is_empty() {
            bail!("train or validation split is empty — dataset too small for the configured fractions");
        }

        // ── Step 4: Normalize the held-out sets once, globally ───────────────
        // Folds are normalized per-fold later; validation and test are
        // normalized a single time and reused against every model.
        let val_set = held_out(&val, schema)?;
        let _test   = held_out(&test, schema)?; // held out, never consumed

        // ── Step 5: Snapshot the config ──────────────────────────────────────
        let logger = MetricsLogger::new(cfg.output_dir.clone())?;
        logger.save_config(cfg)?;

        // ── Step 6: Resampled-fold phase ─────────────────────────────────────
        // One balanced fold per disjoint majority chunk; each fold
        // trains an independent model evaluated on the validation set.
        let folds      = balanced_folds(&train, schema)?;
        let fold_count = folds.fold_count();
        for (i, fold) in folds.enumerate() {
            let fold_no = i + 1;
            println!("\n=== Resampled fold {fold_no}/{fold_count} ===");

            let dataset = fold_dataset(&fold, schema)?;
            tracing::info!(
                "Fold {}: {} samples ({} positive)",
                fold_no,
                dataset.sample_count(),
                dataset.positive_count()
            );

            let model  = trainer::fit(cfg, dataset, feature_count(&val_set), None)?;
            let report = self.describe(&model, &val_set);
            logger.log(&EvalRecord::from_report("resampled", fold_no, &report))?;
        }

        // ── Step 7: Full-imbalance phase ─────────────────────────────────────
        // One model on the whole training split, no correction at all.
        println!("\n=== Full imbalanced training set ===");
        let dataset = fold_dataset(&train, schema)?;
        let model   = trainer::fit(cfg, dataset, feature_count(&val_set), None)?;
        let report  = self.describe(&model, &val_set);
        logger.log(&EvalRecord::from_report("full", 0, &report))?;

        // ── Step 8: Class-weighted phase ─────────────────────────────────────
        // Same training split, but the loss weighs minority samples up
        // instead of discarding majority data.
        println!("\n=== Class-weighted training set (1 : {}) ===", cfg.minority_weight);
        let dataset = fold_dataset(&train, schema)?;
        let weights = [1.0, cfg.minority_weight];
        let model   = trainer::fit(cfg, dataset, feature_count(&val_set), Some(weights))?;
        let report  = self.describe(&model, &val_set);
        logger.log(&EvalRecord::from_report("weighted", 0, &report))?;

        tracing::info!("Metrics written to '{}'", logger.csv_path().display());
        Ok(())
    }

    /// Predict on the validation set, print the report, return it.
    fn describe(
        &self,
        model:   &trainer::FittedModel,
        held:    &HeldOut,
    ) -> evaluator::EvaluationReport {
        let probs  = trainer::predict_probs(model, &held.rows);
        let report = evaluator::evaluate(&held.labels, &probs);
        println!("\ntarget preds");
        println!("{report}");
        report
    }
}

/// Split off the label column and L2-normalize the features of a
/// held-out split.
fn held_out(split: &Frame, schema: &SchemaConfig) -> Result<HeldOut> {
    let (features, target) = split.take_target(&schema.label_column)?;
    let mut rows = features.into_rows();
    l2_normalize_rows(&mut rows);
    let labels = target.iter().map(|&t| (t != 0.0) as u8).collect();
    Ok(HeldOut { rows, labels })
}

/// Turn one training Frame (a balanced fold or the full training
/// split) into a normalized Burn dataset.
fn fold_dataset(frame: &Frame, schema: &SchemaConfig) -> Result<SessionDataset> {
    let (features, target) = frame.take_target(&schema.label_column)?;
    let mut rows = features.into_rows();
    l2_normalize_rows(&mut rows);
    SessionDataset::from_rows(rows, &target)
}

fn feature_count(held: &HeldOut) -> usize {
    held.rows.first().map(|r| r.len()).unwrap_or(0)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_frame() -> Frame {
        Frame::new(
            vec!["a".to_string(), "b".to_string(), "order".to_string()],
            vec![
                vec![3.0, 4.0, 1.0],
                vec![6.0, 8.0, 0.0],
            ],
        ).unwrap()
    }

    #[test]
    fn test_held_out_normalizes_and_labels() {
        let schema = SchemaConfig::default();
        let held   = held_out(&tiny_frame(), &schema).unwrap();

        assert_eq!(held.labels, vec![1, 0]);
        // Both rows are multiples of (3, 4) → identical unit vectors
        assert!((held.rows[0][0] - 0.6).abs() < 1e-6);
        assert!((held.rows[1][0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_fold_dataset_sample_counts() {
        let schema  = SchemaConfig::default();
        let dataset = fold_dataset(&tiny_frame(), &schema).unwrap();
        assert_eq!(dataset.sample_count(), 2);
        assert_eq!(dataset.positive_count(), 1);
    }

    #[test]
    fn test_default_config_matches_reference_protocol() {
        let cfg = ExperimentConfig::default();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.epochs, 1);
        assert_eq!(cfg.batch_size, 128);
        assert_eq!(cfg.schema.label_column, "order");
        assert!((cfg.minority_weight - 2.2).abs() < 1e-6);
    }
}
