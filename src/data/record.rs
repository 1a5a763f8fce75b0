//! Transaction records and CSV ingestion
//!
//! Feature engineering happens upstream; this module consumes a headered
//! CSV whose columns are already numeric, with a binary `is_fraud` label.

use crate::error::PipelineError;
use ndarray::Array2;
use std::path::Path;
use tracing::{info, warn};

/// Name of the label column in the input CSV
pub const LABEL_COLUMN: &str = "is_fraud";

/// A single transaction: engineered numeric features plus a binary label
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Feature vector, in CSV column order
    pub features: Vec<f64>,
    /// 1 for fraudulent, 0 for legitimate
    pub is_fraud: u8,
}

impl TransactionRecord {
    /// Create a new record
    pub fn new(features: Vec<f64>, is_fraud: u8) -> Self {
        Self { features, is_fraud }
    }

    /// Number of feature columns
    pub fn num_features(&self) -> usize {
        self.features.len()
    }
}

/// Read transaction records from a headered CSV file
///
/// The `is_fraud` column becomes the label; every other column must parse
/// as a float and becomes a feature. Any malformed row is a fatal error.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<TransactionRecord>, PipelineError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let label_idx = headers
        .iter()
        .position(|h| h == LABEL_COLUMN)
        .ok_or_else(|| {
            PipelineError::Schema(format!("missing `{LABEL_COLUMN}` column in {}", path.display()))
        })?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let raw = result?;

        let mut features = Vec::with_capacity(headers.len() - 1);
        let mut is_fraud = 0u8;

        for (col, field) in raw.iter().enumerate() {
            if col == label_idx {
                is_fraud = parse_label(field, row)?;
            } else {
                let value: f64 = field.trim().parse().map_err(|_| {
                    PipelineError::Schema(format!(
                        "row {}: column `{}` is not numeric: `{}`",
                        row + 1,
                        headers.get(col).unwrap_or(""),
                        field
                    ))
                })?;
                features.push(value);
            }
        }

        records.push(TransactionRecord::new(features, is_fraud));
    }

    if records.is_empty() {
        warn!("No data rows found in {}", path.display());
    } else {
        info!(
            "Loaded {} transactions with {} feature columns from {}",
            records.len(),
            records[0].num_features(),
            path.display()
        );
    }

    Ok(records)
}

fn parse_label(field: &str, row: usize) -> Result<u8, PipelineError> {
    match field.trim() {
        "0" => Ok(0),
        "1" => Ok(1),
        other => Err(PipelineError::Schema(format!(
            "row {}: `{LABEL_COLUMN}` must be 0 or 1, got `{}`",
            row + 1,
            other
        ))),
    }
}

/// Convert records into a feature matrix and a label vector
///
/// All records must share the same feature arity.
pub fn records_to_matrix(
    records: &[TransactionRecord],
) -> Result<(Array2<f64>, Vec<u8>), PipelineError> {
    if records.is_empty() {
        return Ok((Array2::zeros((0, 0)), Vec::new()));
    }

    let num_features = records[0].num_features();
    let mut matrix = Array2::zeros((records.len(), num_features));
    let mut labels = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        if record.num_features() != num_features {
            return Err(PipelineError::Shape(format!(
                "record {} has {} features, expected {}",
                i,
                record.num_features(),
                num_features
            )));
        }
        for (j, &value) in record.features.iter().enumerate() {
            matrix[[i, j]] = value;
        }
        labels.push(record.is_fraud);
    }

    Ok((matrix, labels))
}
