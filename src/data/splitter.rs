// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// Shuffles the dataset with a seeded RNG and splits it into
// three disjoint, exhaustive partitions:
//   - Training set:   used to fit model weights
//   - Validation set: used to measure performance on unseen data
//   - Test set:       held out entirely
//
// Why shuffle before splitting?
//   Session logs are usually ordered in time. Without shuffling,
//   the validation set would only contain the most recent
//   sessions and the class balance per split would drift.
//   Shuffling gives every split a representative mix.
//
// Why a seeded RNG instead of thread_rng?
//   The experiment must be reproducible run-to-run. The seed is
//   an explicit config parameter threaded in from the use case,
//   not ambient global state.
//
// Split boundaries are fixed by fraction at split time; the
// partitions are never re-split afterward.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom
// which is the standard unbiased shuffle algorithm.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::frame::Frame;

/// Shuffle `frame` with the given seed and split into
/// (train, validation, test) by fraction.
///
/// # Arguments
/// * `frame`          - The full dataset (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.6
/// * `val_fraction`   - Proportion for validation, e.g. 0.2
///                      (the remainder becomes the test set)
/// * `seed`           - RNG seed for the shuffle
///
/// # Returns
/// A tuple (train, validation, test) of disjoint Frames whose
/// rows together are exactly the input rows.
pub fn split_train_val_test(
    frame:          Frame,
    train_fraction: f64,
    val_fraction:   f64,
    seed:           u64,
) -> Result<(Frame, Frame, Frame)> {
    if train_fraction < 0.0 || val_fraction < 0.0 || train_fraction + val_fraction > 1.0 {
        bail!(
            "invalid split fractions: train={} val={} (must be non-negative and sum to at most 1)",
            train_fraction, val_fraction
        );
    }

    let columns: Vec<String> = frame.columns().to_vec();
    let mut rows = frame.into_rows();

    // Fisher-Yates shuffle — every permutation is equally likely.
    // StdRng::seed_from_u64 makes the permutation reproducible.
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let total     = rows.len();
    let train_end = ((total as f64) * train_fraction).round() as usize;
    let val_end   = ((total as f64) * (train_fraction + val_fraction)).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let train_end = train_end.min(total);
    let val_end   = val_end.clamp(train_end, total);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let mut val  = rows.split_off(train_end);
    let test     = val.split_off(val_end - train_end);
    let train    = rows;

    tracing::debug!(
        "Dataset split: {} train, {} validation, {} test",
        train.len(),
        val.len(),
        test.len(),
    );

    Ok((
        Frame::new(columns.clone(), train)?,
        Frame::new(columns.clone(), val)?,
        Frame::new(columns, test)?,
    ))
}
