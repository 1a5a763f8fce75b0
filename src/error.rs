//! Error taxonomy for the fraud detection pipeline

use thiserror::Error;

/// Errors raised while loading, preparing, or training on transaction data
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O failure while reading the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input data does not match the expected schema
    #[error("schema error: {0}")]
    Schema(String),

    /// Arrays with incompatible dimensions were combined
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// A transform was applied before fitting
    #[error("scaler used before fit")]
    NotFitted,

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Training was started with no training samples
    #[error("training set is empty")]
    EmptyTrainingSet,
}
