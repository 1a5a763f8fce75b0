//! # Data preparation module
//!
//! CSV ingestion, train/test splitting, feature standardization and
//! mini-batch iteration for the CNN.

mod dataset;
mod record;
mod scaler;
mod split;

pub use dataset::{Batch, Dataset};
pub use record::{load_csv, records_to_matrix, TransactionRecord, LABEL_COLUMN};
pub use scaler::StandardScaler;
pub use split::{train_test_split, SplitStats};
