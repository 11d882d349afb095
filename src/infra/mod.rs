// ============================================================
// Layer 6 — Infrastructure
// ============================================================
// Cross-cutting output concerns: the metrics CSV log and the
// experiment config snapshot. Nothing in here touches model
// math or data transforms — it only records what the other
// layers produced.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

/// Appends one CSV row per evaluated model; snapshots the config
pub mod metrics;
