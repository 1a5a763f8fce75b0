//! # CNN Fraud Detection Library
//!
//! Training pipeline for classifying credit-card transactions as fraudulent
//! or legitimate with a 1D convolutional neural network (Burn framework).
//!
//! ## Modules
//!
//! - `data` - CSV ingestion, train/test split, scaling, batch iteration
//! - `model` - CNN architecture and the training/validation loop
//! - `metrics` - Classification metrics (precision, recall, F1, ROC, PR)
//! - `report` - Console tables and in-memory text figures

pub mod data;
pub mod error;
pub mod metrics;
pub mod model;
pub mod report;

// Re-export commonly used types
pub use data::{Dataset, StandardScaler, TransactionRecord};
pub use error::PipelineError;
pub use metrics::FinalEvaluation;
pub use model::{CnnConfig, FraudCnn, TrainingConfig, TrainingSession};

/// Fixed configuration for a single experiment run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Global random seed (weight init, shuffling, split)
    pub seed: u64,
    /// Mini-batch size for training and validation
    pub batch_size: usize,
    /// Adam learning rate
    pub learning_rate: f64,
    /// Number of training epochs
    pub epochs: usize,
    /// Fraction of records held out for the test split
    pub test_ratio: f64,
    /// Number of scaled feature columns per transaction
    pub input_features: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            batch_size: 128,
            learning_rate: 1e-4,
            epochs: 50,
            test_ratio: 0.2,
            input_features: 28,
        }
    }
}

impl RunConfig {
    /// Model topology derived from this run's input width
    pub fn cnn_config(&self) -> CnnConfig {
        CnnConfig {
            input_size: self.input_features,
            ..CnnConfig::default()
        }
    }

    /// Training loop parameters derived from this run
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            epochs: self.epochs,
            batch_size: self.batch_size,
            learning_rate: self.learning_rate,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_config() {
        let config = RunConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.batch_size, 128);
        assert_eq!(config.epochs, 50);
        assert_eq!(config.input_features, 28);
        assert!((config.test_ratio - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_derived_configs() {
        let config = RunConfig::default();
        assert_eq!(config.cnn_config().input_size, 28);
        assert_eq!(config.training_config().batch_size, 128);
        assert!((config.training_config().learning_rate - 1e-4).abs() < 1e-12);
    }
}
