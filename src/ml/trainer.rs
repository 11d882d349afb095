// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch training using Burn's DataLoader and RMSProp.
//
// Key backend insight:
//   - Training uses MyBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on MyInnerBackend (NdArray)
//   - Evaluation runs on the inner backend — no autodiff overhead
//
// Every call to fit() builds a fresh model from random
// initialization: the resampled folds must train independent
// models, so nothing is shared or reused between calls.
//
// Reference: Burn Book §5
//            Tieleman & Hinton (2012) RMSProp

use anyhow::{bail, Result};
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{GradientsParams, Optimizer, RmsPropConfig},
    prelude::*,
};

use crate::application::experiment::ExperimentConfig;
use crate::data::{batcher::SessionBatcher, dataset::SessionDataset};
use crate::ml::model::{OrderNet, OrderNetConfig};

type MyBackend      = burn::backend::Autodiff<burn::backend::NdArray>;
type MyInnerBackend = burn::backend::NdArray;

pub type FittedModel = OrderNet<MyInnerBackend>;

fn default_device() -> <MyInnerBackend as Backend>::Device {
    burn::backend::ndarray::NdArrayDevice::default()
}

/// Train a fresh model on `dataset` and return it on the inner
/// backend, ready for evaluation.
///
/// `class_weights` is [weight_for_0, weight_for_1] for the
/// class-weighted phase; None trains with uniform sample weight.
pub fn fit(
    cfg:           &ExperimentConfig,
    dataset:       SessionDataset,
    feature_count: usize,
    class_weights: Option<[f32; 2]>,
) -> Result<FittedModel> {
    if dataset.sample_count() == 0 {
        bail!("cannot train on an empty dataset");
    }

    let device = default_device();

    // Explicit seed for reproducible weight initialization —
    // threaded in from the config, never ambient global state.
    MyBackend::seed(cfg.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = OrderNetConfig::new(feature_count);
    let mut model: OrderNet<MyBackend> = model_cfg.init(&device);

    // ── RMSProp optimiser ─────────────────────────────────────────────────────
    // v = α*v + (1-α)*g²        (moving average of squared gradients)
    // θ = θ - lr * g / (√v + ε) (per-parameter adaptive update)
    let optim_cfg = RmsPropConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader ──────────────────────────────────────────────────
    let batcher = SessionBatcher::<MyBackend>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let loss = model.forward_loss(batch.features, batch.targets, class_weights);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_val;
            batches  += 1;

            // Backward pass + RMSProp update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_loss = if batches > 0 {
            loss_sum / batches as f64
        } else { f64::NAN };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4}",
            epoch, cfg.epochs, avg_loss,
        );
    }

    // model.valid() → OrderNet<MyInnerBackend>, gradients stripped
    Ok(model.valid())
}

/// Predict purchase probabilities for pre-normalized feature rows.
pub fn predict_probs(model: &FittedModel, rows: &[Vec<f32>]) -> Vec<f32> {
    if rows.is_empty() {
        return Vec::new();
    }
    let device        = default_device();
    let batch_size    = rows.len();
    let feature_count = rows[0].len();

    let flat: Vec<f32> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    let features = Tensor::<MyInnerBackend, 1>::from_floats(flat.as_slice(), &device)
        .reshape([batch_size, feature_count]);

    model
        .predict_probs(features)
        .into_data()
        .convert::<f32>()
        .value
}
