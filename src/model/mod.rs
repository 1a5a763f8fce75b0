//! # CNN fraud classifier
//!
//! 1D convolutional model on the Burn framework plus the
//! training/validation loop that drives it.

mod cnn;
mod config;
mod training;

pub use cnn::FraudCnn;
pub use config::{CnnConfig, TrainingConfig};
pub use training::{TrainingReport, TrainingSession, TrialRecord};
