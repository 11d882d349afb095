use burn::{
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::{activation, backend::AutodiffBackend},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct OrderNetConfig {
    pub feature_count: usize,
    #[config(default = 256)]
    pub hidden1: usize,
    #[config(default = 128)]
    pub hidden2: usize,
    #[config(default = 32)]
    pub hidden3: usize,
}

impl OrderNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> OrderNet<B> {
        OrderNet {
            fc1: LinearConfig::new(self.feature_count, self.hidden1).init(device),
            fc2: LinearConfig::new(self.hidden1, self.hidden2).init(device),
            fc3: LinearConfig::new(self.hidden2, self.hidden3).init(device),
            out: LinearConfig::new(self.hidden3, 1).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct OrderNet<B: Backend> {
    pub fc1: Linear<B>,
    pub fc2: Linear<B>,
    pub fc3: Linear<B>,
    pub out: Linear<B>,
}

impl<B: Backend> OrderNet<B> {
    /// features: [batch, feature_count] → logits: [batch]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 1> {
        let x = activation::relu(self.fc1.forward(features));
        let x = activation::relu(self.fc2.forward(x));
        let x = activation::relu(self.fc3.forward(x));
        // [batch, 1] → [batch]
        self.out.forward(x).flatten::<1>(0, 1)
    }

    /// Purchase probabilities in [0, 1] — sigmoid over the logits.
    pub fn predict_probs(&self, features: Tensor<B, 2>) -> Tensor<B, 1> {
        activation::sigmoid(self.forward(features))
    }

    /// Weighted binary cross-entropy on logits.
    /// `class_weights` is [weight_for_0, weight_for_1]; None means
    /// every sample counts equally.
    pub fn forward_loss(
        &self,
        features:      Tensor<B, 2>,
        targets:       Tensor<B, 1, Int>,
        class_weights: Option<[f32; 2]>,
    ) -> Tensor<B, 1>
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(features);
        let bce = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .with_weights(class_weights.map(|w| w.to_vec()))
            .init(&logits.device());
        bce.forward(logits, targets)
    }
}
