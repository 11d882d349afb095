// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - CsvLoader implements RecordSource
//   - A future ParquetLoader could also implement RecordSource
//   - The application layer only sees RecordSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use crate::domain::frame::Frame;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load a tabular dataset of session records.
///
/// Implementations:
///   - CsvLoader → loads from a CSV file on disk
///   - (future) ParquetLoader → loads from Parquet files
pub trait RecordSource {
    /// Load the full dataset into memory.
    /// Returns a Frame or an error.
    fn load(&self) -> Result<Frame>;
}
