// ============================================================
// Layer 4 — Session Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<SessionSample>
// into backend-ready tensors.
//
// What is a Batcher?
//   A Batcher takes a list of individual samples and stacks
//   them into a single batch tensor. The model's forward pass
//   then processes all samples in the batch at once.
//
// How batching works here:
//   Input:  Vec of N SessionSamples, each with F features
//   Output: SessionBatch with a feature tensor of shape [N, F]
//           and a label tensor of shape [N]
//
//   We flatten all features into one long Vec, then reshape:
//   [s1_f1, ..., s1_fF, s2_f1, ..., sN_fF] → [N, F]
//
// Why is this easy here?
//   Because every sample has the same feature count — the rows
//   all come from one Frame. If they didn't, Frame::new would
//   already have rejected the data.
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::SessionSample;

// ─── SessionBatch ─────────────────────────────────────────────────────────────
/// A batch of sessions ready for the model forward pass.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct SessionBatch<B: Backend> {
    /// Normalized features — shape: [batch_size, feature_count]
    pub features: Tensor<B, 2>,

    /// Ground truth labels — shape: [batch_size]
    /// 0 = no purchase, 1 = purchase
    pub targets: Tensor<B, 1, Int>,
}

// ─── SessionBatcher ───────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created in the right place.
#[derive(Clone, Debug)]
pub struct SessionBatcher<B: Backend> {
    /// The device to create tensors on
    pub device: B::Device,
}

impl<B: Backend> SessionBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// This is what makes SessionBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch of samples.
impl<B: Backend> Batcher<SessionSample, SessionBatch<B>> for SessionBatcher<B> {
    /// Convert a Vec of SessionSamples into a single SessionBatch.
    ///
    /// Steps:
    ///   1. Flatten all features into one Vec<f32>
    ///   2. Create a 1D tensor from the flat Vec
    ///   3. Reshape to [batch_size, feature_count]
    ///   4. Create a 1D Int tensor for the labels
    fn batch(&self, items: Vec<SessionSample>) -> SessionBatch<B> {
        let batch_size    = items.len();
        // All rows come from one Frame, so every sample has the same width
        let feature_count = items[0].features.len();

        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let labels: Vec<i32> = items
            .iter()
            .map(|s| s.label as i32)
            .collect();

        let features = Tensor::<B, 1>::from_floats(
            features_flat.as_slice(), &self.device
        ).reshape([batch_size, feature_count]);

        let targets = Tensor::<B, 1, Int>::from_ints(
            labels.as_slice(), &self.device
        );

        SessionBatch { features, targets }
    }
}
