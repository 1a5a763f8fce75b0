//! CNN architecture
//!
//! 1D convolutional classifier over a transaction's scaled feature vector,
//! treated as a length-28 single-channel signal.

use super::config::CnnConfig;
use burn::{
    module::Module,
    nn::{
        conv::{Conv1d, Conv1dConfig},
        pool::{MaxPool1d, MaxPool1dConfig},
        Linear, LinearConfig, PaddingConfig1d, Relu,
    },
    tensor::{activation::sigmoid, backend::Backend, Tensor},
};

/// 1D CNN mapping a feature vector to a fraud probability
#[derive(Module, Debug)]
pub struct FraudCnn<B: Backend> {
    /// First convolution: 1 -> 16 channels
    conv1: Conv1d<B>,
    /// Second convolution: 16 -> 32 channels
    conv2: Conv1d<B>,
    /// First max-pool
    pool1: MaxPool1d,
    /// Second max-pool
    pool2: MaxPool1d,
    /// Hidden fully-connected layer
    fc1: Linear<B>,
    /// Output layer
    fc2: Linear<B>,
    /// Shared activation
    activation: Relu,
}

impl<B: Backend> FraudCnn<B> {
    /// Initialize the model on a device
    pub fn new(device: &B::Device, config: &CnnConfig) -> Self {
        let conv1 = Conv1dConfig::new(config.in_channels, config.conv1_filters, config.kernel_size)
            .with_padding(PaddingConfig1d::Valid)
            .init(device);

        let conv2 = Conv1dConfig::new(
            config.conv1_filters,
            config.conv2_filters,
            config.kernel_size,
        )
        .with_padding(PaddingConfig1d::Valid)
        .init(device);

        let pool1 = MaxPool1dConfig::new(config.pool_size)
            .with_stride(config.pool_size)
            .init();
        let pool2 = MaxPool1dConfig::new(config.pool_size)
            .with_stride(config.pool_size)
            .init();

        let fc1 = LinearConfig::new(config.flatten_size(), config.fc_size).init(device);
        let fc2 = LinearConfig::new(config.fc_size, config.output_size).init(device);

        Self {
            conv1,
            conv2,
            pool1,
            pool2,
            fc1,
            fc2,
            activation: Relu::new(),
        }
    }

    /// Forward pass
    ///
    /// Input: [batch_size, 1, input_size]. Output: [batch_size, 1] fraud
    /// probabilities in [0, 1].
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let x = self.conv1.forward(x);
        let x = self.activation.forward(x);
        let x = self.pool1.forward(x);

        let x = self.conv2.forward(x);
        let x = self.activation.forward(x);
        let x = self.pool2.forward(x);

        let x: Tensor<B, 2> = x.flatten(1, 2);

        let x = self.fc1.forward(x);
        let x = self.activation.forward(x);
        let x = self.fc2.forward(x);

        sigmoid(x)
    }

    /// Fraud probabilities for a batch
    pub fn predict_proba(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        self.forward(x)
    }

    /// Hard labels for a batch: probability strictly above 0.5 is fraud
    pub fn predict(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        self.forward(x).greater_elem(0.5).float()
    }
}
