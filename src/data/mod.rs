// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw CSV file
// all the way to backend-ready tensor batches.
//
// The pipeline flows in this order:
//
//   sessions.csv
//       │
//       ▼
//   CsvLoader         → reads the file, parses cells to f32
//       │
//       ▼
//   Splitter          → seeded shuffle, train/val/test split
//       │
//       ▼
//   Resampler         → balanced folds from disjoint majority chunks
//       │
//       ▼
//   Normalizer        → row-wise L2 feature scaling
//       │
//       ▼
//   SessionDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   SessionBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Loads the CSV dataset using the csv crate
pub mod loader;

/// Seeded shuffle and three-way train/val/test split
pub mod splitter;

/// Balanced folds over disjoint majority-class chunks
pub mod resampler;

/// Row-wise L2 normalization of feature vectors
pub mod normalizer;

/// Implements Burn's Dataset trait for session samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
