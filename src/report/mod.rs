//! # Reporting
//!
//! Console tables and in-memory text figures built from split statistics,
//! the trial log and the final evaluation. Everything renders to a
//! `String`; nothing is persisted and nothing feeds back into training.

mod plots;
mod tables;

pub use plots::{confusion_heatmap, f1_curve, loss_curves, pr_curve_figure, roc_curve_figure};
pub use tables::{dataset_stats_table, results_table};
