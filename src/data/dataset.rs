//! Mini-batch iteration over feature/label arrays
//!
//! Training batches are reshuffled on every `reset` with a seeded RNG;
//! validation and inference batches always come in array order.

use crate::error::PipelineError;
use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Batched view over a feature matrix, optionally with labels
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f32>,
    labels: Option<Vec<u8>>,
    batch_size: usize,
    shuffle: bool,
    rng: StdRng,
    current_index: usize,
    indices: Vec<usize>,
}

/// One mini-batch of transactions
#[derive(Debug, Clone)]
pub struct Batch {
    /// Input tensor data, shape [batch_size, 1, num_features]
    pub features: Array3<f32>,
    /// Float labels (0.0 / 1.0); empty for inference batches
    pub targets: Vec<f32>,
}

impl Dataset {
    /// Training dataset: shuffled each epoch with a seeded RNG
    pub fn train(
        features: Array2<f32>,
        labels: Vec<u8>,
        batch_size: usize,
        seed: u64,
    ) -> Result<Self, PipelineError> {
        Self::build(features, Some(labels), batch_size, true, seed)
    }

    /// Validation dataset: sequential order, never shuffled
    pub fn validation(
        features: Array2<f32>,
        labels: Vec<u8>,
        batch_size: usize,
    ) -> Result<Self, PipelineError> {
        Self::build(features, Some(labels), batch_size, false, 0)
    }

    /// Inference dataset: sequential order, no labels
    pub fn inference(features: Array2<f32>, batch_size: usize) -> Result<Self, PipelineError> {
        Self::build(features, None, batch_size, false, 0)
    }

    fn build(
        features: Array2<f32>,
        labels: Option<Vec<u8>>,
        batch_size: usize,
        shuffle: bool,
        seed: u64,
    ) -> Result<Self, PipelineError> {
        if batch_size == 0 {
            return Err(PipelineError::Config("batch_size must be > 0".into()));
        }
        if let Some(ref labels) = labels {
            if labels.len() != features.nrows() {
                return Err(PipelineError::Shape(format!(
                    "{} feature rows but {} labels",
                    features.nrows(),
                    labels.len()
                )));
            }
        }

        let indices: Vec<usize> = (0..features.nrows()).collect();
        Ok(Self {
            features,
            labels,
            batch_size,
            shuffle,
            rng: StdRng::seed_from_u64(seed),
            current_index: 0,
            indices,
        })
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    /// True when the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.features.nrows() == 0
    }

    /// Number of feature columns per record
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Number of batches per epoch (last batch may be short)
    pub fn num_batches(&self) -> usize {
        (self.len() + self.batch_size - 1) / self.batch_size
    }

    /// Rewind the iterator; training datasets also reshuffle
    pub fn reset(&mut self) {
        self.current_index = 0;
        if self.shuffle {
            self.indices.shuffle(&mut self.rng);
        }
    }

    /// Produce the next batch, or `None` at the end of the epoch
    pub fn next_batch(&mut self) -> Option<Batch> {
        if self.current_index >= self.len() {
            return None;
        }

        let end_idx = (self.current_index + self.batch_size).min(self.len());
        let batch_indices = &self.indices[self.current_index..end_idx];
        let actual_batch_size = batch_indices.len();
        let num_features = self.num_features();

        let mut features = Array3::zeros((actual_batch_size, 1, num_features));
        for (batch_idx, &row_idx) in batch_indices.iter().enumerate() {
            for (col, &value) in self.features.row(row_idx).iter().enumerate() {
                features[[batch_idx, 0, col]] = value;
            }
        }

        let targets = match &self.labels {
            Some(labels) => batch_indices.iter().map(|&i| f32::from(labels[i])).collect(),
            None => Vec::new(),
        };

        self.current_index = end_idx;

        Some(Batch { features, targets })
    }

    /// Labels in array order, if this dataset carries any
    pub fn labels(&self) -> Option<&[u8]> {
        self.labels.as_deref()
    }
}

impl Iterator for Dataset {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn features(n: usize, d: usize) -> Array2<f32> {
        Array2::from_shape_fn((n, d), |(i, j)| (i * d + j) as f32)
    }

    #[test]
    fn test_iteration_covers_all_records() {
        let mut dataset = Dataset::train(features(100, 4), vec![0; 100], 32, 42).unwrap();
        dataset.reset();

        let mut total = 0;
        while let Some(batch) = dataset.next_batch() {
            total += batch.targets.len();
        }
        assert_eq!(total, 100);
    }

    #[test]
    fn test_num_batches_counts_short_tail() {
        let dataset = Dataset::validation(features(5, 2), vec![0; 5], 2).unwrap();
        assert_eq!(dataset.num_batches(), 3);
    }

    #[test]
    fn test_batch_shape() {
        let mut dataset = Dataset::validation(features(10, 28), vec![1; 10], 4).unwrap();
        let batch = dataset.next_batch().unwrap();

        assert_eq!(batch.features.shape(), &[4, 1, 28]);
        assert_eq!(batch.targets, vec![1.0; 4]);
    }

    #[test]
    fn test_validation_order_is_sequential() {
        let mut dataset = Dataset::validation(features(6, 1), vec![0, 1, 0, 1, 0, 1], 4).unwrap();
        dataset.reset();

        let first = dataset.next_batch().unwrap();
        assert_eq!(first.features[[0, 0, 0]], 0.0);
        assert_eq!(first.features[[3, 0, 0]], 3.0);
        assert_eq!(first.targets, vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_train_shuffle_is_seed_deterministic() {
        let collect_order = |seed: u64| -> Vec<f32> {
            let mut ds = Dataset::train(features(32, 1), vec![0; 32], 8, seed).unwrap();
            ds.reset();
            let mut order = Vec::new();
            while let Some(batch) = ds.next_batch() {
                order.extend(batch.features.iter().copied());
            }
            order
        };

        assert_eq!(collect_order(42), collect_order(42));
        assert_ne!(collect_order(42), collect_order(7));
    }

    #[test]
    fn test_train_reshuffles_between_epochs() {
        let mut ds = Dataset::train(features(64, 1), vec![0; 64], 64, 42).unwrap();

        ds.reset();
        let epoch1: Vec<f32> = ds.next_batch().unwrap().features.iter().copied().collect();
        ds.reset();
        let epoch2: Vec<f32> = ds.next_batch().unwrap().features.iter().copied().collect();

        assert_ne!(epoch1, epoch2);
    }

    #[test]
    fn test_inference_batches_have_no_targets() {
        let mut dataset = Dataset::inference(features(3, 2), 2).unwrap();
        let batch = dataset.next_batch().unwrap();
        assert!(batch.targets.is_empty());
    }

    #[test]
    fn test_label_length_mismatch() {
        let err = Dataset::validation(features(3, 2), vec![0; 2], 2).unwrap_err();
        assert!(matches!(err, PipelineError::Shape(_)));
    }

    #[test]
    fn test_empty_dataset_yields_no_batches() {
        let mut dataset = Dataset::validation(Array2::zeros((0, 4)), vec![], 8).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.next_batch().is_none());
    }
}
