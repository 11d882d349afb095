// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// and the data layer's Dataset/Batcher glue.
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - Other layers are testable without a backend
//   - The model architecture is clearly separated from
//     data loading and application logic
//
// What's in this layer:
//
//   model.rs     — The feed-forward classifier
//                  Linear 256 → 128 → 32 → 1 with ReLU between
//                  layers and a sigmoid at prediction time.
//                  Loss: binary cross-entropy on logits with
//                  optional per-class weights.
//
//   trainer.rs   — The training loop
//                  RMSProp over mini-batches; returns the
//                  fitted model for evaluation. One fresh model
//                  per call — no state carries between folds.
//
//   evaluator.rs — Classification metrics
//                  Per-class precision/recall/F1, accuracy,
//                  and AUC from a trapezoid over the ROC curve.
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Feed-forward purchase classifier architecture
pub mod model;

/// Mini-batch training loop with optional class weights
pub mod trainer;

/// Precision, recall, classification report, and AUC
pub mod evaluator;
