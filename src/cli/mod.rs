// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// One command is supported:
//   1. `run` — runs the full imbalance experiment: resampled
//      folds, full-imbalance baseline, class-weighted baseline
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, RunArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "order-predictor",
    version = "0.1.0",
    about = "Train a purchase classifier on session data with imbalance-corrected folds."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args) => Self::run_experiment(args),
        }
    }

    /// Handles the `run` subcommand.
    /// Converts CLI args into an ExperimentConfig and hands off to Layer 2.
    fn run_experiment(args: RunArgs) -> Result<()> {
        use crate::application::experiment::ExperimentUseCase;

        tracing::info!("Starting experiment on dataset: {}", args.data_path);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = ExperimentUseCase::new(args.into());
        use_case.execute()?;

        println!("\nExperiment complete.");
        Ok(())
    }
}
