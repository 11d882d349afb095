// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `run` subcommand and all its configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::experiment::ExperimentConfig;
use crate::domain::schema::SchemaConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full class-imbalance experiment
    Run(RunArgs),
}

/// All arguments for the `run` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the CSV dataset of session records
    #[arg(long, default_value = "data/sessions.csv")]
    pub data_path: String,

    /// Directory for the metrics log and config snapshot
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    /// Name of the binary label column (0 = no purchase, 1 = purchase)
    #[arg(long, default_value = "order")]
    pub label_column: String,

    /// Columns dropped before training — they leak the label or
    /// carry no predictive signal
    #[arg(long, value_delimiter = ',', default_value = "count,click,basket,revenue")]
    pub drop_columns: Vec<String>,

    /// Seed for the splitter shuffle, backend RNG, and dataloader shuffle
    #[arg(long, default_value_t = 7)]
    pub seed: u64,

    /// Fraction of rows assigned to the training split
    #[arg(long, default_value_t = 0.6)]
    pub train_fraction: f64,

    /// Fraction of rows assigned to the validation split
    /// (the remainder after train + val becomes the test split)
    #[arg(long, default_value_t = 0.2)]
    pub val_fraction: f64,

    /// Number of full passes through each training fold
    #[arg(long, default_value_t = 1)]
    pub epochs: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    /// RMSProp learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Loss weight applied to the minority (purchase) class in the
    /// class-weighted phase; the majority class is weighted 1.0
    #[arg(long, default_value_t = 2.2)]
    pub minority_weight: f32,
}

/// Convert CLI RunArgs into the application-layer ExperimentConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<RunArgs> for ExperimentConfig {
    fn from(a: RunArgs) -> Self {
        ExperimentConfig {
            data_path:       a.data_path,
            output_dir:      a.output_dir,
            schema: SchemaConfig {
                label_column: a.label_column,
                drop_columns: a.drop_columns,
            },
            seed:            a.seed,
            train_fraction:  a.train_fraction,
            val_fraction:    a.val_fraction,
            epochs:          a.epochs,
            batch_size:      a.batch_size,
            lr:              a.lr,
            minority_weight: a.minority_weight,
        }
    }
}
