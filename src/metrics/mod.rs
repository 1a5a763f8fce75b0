//! # Classification metrics
//!
//! Pure read-only computations over true labels, predicted labels and
//! predicted probabilities; nothing here feeds back into training.

mod classification;

pub use classification::{
    average_precision, precision_recall_curve, roc_auc, roc_curve, threshold_label,
    ConfusionMatrix, FinalEvaluation,
};
