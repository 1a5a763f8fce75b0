//! Model and training configuration

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// CNN topology constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CnnConfig {
    /// Input channels (tabular features form a single channel)
    pub in_channels: usize,
    /// Feature vector length treated as the 1D signal length
    pub input_size: usize,
    /// Filters in the first convolution
    pub conv1_filters: usize,
    /// Filters in the second convolution
    pub conv2_filters: usize,
    /// Convolution kernel width (no padding)
    pub kernel_size: usize,
    /// Max-pool window and stride
    pub pool_size: usize,
    /// Hidden fully-connected width
    pub fc_size: usize,
    /// Output width (1 for binary fraud probability)
    pub output_size: usize,
}

impl Default for CnnConfig {
    fn default() -> Self {
        Self {
            in_channels: 1,
            input_size: 28,
            conv1_filters: 16,
            conv2_filters: 32,
            kernel_size: 3,
            pool_size: 2,
            fc_size: 128,
            output_size: 1,
        }
    }
}

impl CnnConfig {
    /// Flattened width after both conv/pool stages
    ///
    /// 28 -> conv(k=3) 26 -> pool(2) 13 -> conv(k=3) 11 -> pool(2) 5,
    /// times 32 filters = 160 for the default topology.
    pub fn flatten_size(&self) -> usize {
        let mut size = self.input_size;

        // Two conv (valid padding) + pool stages
        for _ in 0..2 {
            if size < self.kernel_size {
                return 0;
            }
            size = (size - self.kernel_size + 1) / self.pool_size;
        }

        size * self.conv2_filters
    }

    /// Reject topologies the forward pass cannot support
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.in_channels == 0 {
            return Err(PipelineError::Config("in_channels must be > 0".into()));
        }
        if self.kernel_size < 2 {
            return Err(PipelineError::Config("kernel_size must be >= 2".into()));
        }
        if self.pool_size < 2 {
            return Err(PipelineError::Config("pool_size must be >= 2".into()));
        }
        if self.output_size == 0 {
            return Err(PipelineError::Config("output_size must be > 0".into()));
        }
        if self.flatten_size() == 0 {
            return Err(PipelineError::Config(format!(
                "input_size {} too small for two conv/pool stages",
                self.input_size
            )));
        }
        Ok(())
    }
}

/// Training loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of epochs
    pub epochs: usize,
    /// Mini-batch size
    pub batch_size: usize,
    /// Adam learning rate
    pub learning_rate: f64,
    /// Random seed for weight init and shuffling
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 50,
            batch_size: 128,
            learning_rate: 1e-4,
            seed: 42,
        }
    }
}

impl TrainingConfig {
    /// Short run for tests and smoke checks
    pub fn quick() -> Self {
        Self {
            epochs: 2,
            batch_size: 16,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CnnConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flatten_size_matches_topology() {
        let config = CnnConfig::default();
        assert_eq!(config.flatten_size(), 160);
    }

    #[test]
    fn test_too_small_input_rejected() {
        let config = CnnConfig {
            input_size: 6,
            ..CnnConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_training_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.epochs, 50);
        assert_eq!(config.batch_size, 128);
        assert!((config.learning_rate - 1e-4).abs() < 1e-12);
        assert_eq!(config.seed, 42);
    }
}
