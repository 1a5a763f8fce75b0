//! Train/test partitioning and per-split label statistics

use super::record::TransactionRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

/// Split records into disjoint train and test partitions
///
/// Records are shuffled with a seeded RNG before partitioning, so the same
/// seed always yields the same split. The test partition holds
/// `round(n * test_ratio)` records; the rest go to train.
pub fn train_test_split(
    mut records: Vec<TransactionRecord>,
    test_ratio: f64,
    seed: u64,
) -> (Vec<TransactionRecord>, Vec<TransactionRecord>) {
    let mut rng = StdRng::seed_from_u64(seed);
    records.shuffle(&mut rng);

    let test_len = (records.len() as f64 * test_ratio).round() as usize;
    let train_len = records.len() - test_len;
    let test = records.split_off(train_len);

    info!(
        "Split {} records into {} train / {} test (test ratio {:.2})",
        train_len + test_len,
        train_len,
        test.len(),
        test_ratio
    );

    (records, test)
}

/// Row/column counts and label distribution for one partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitStats {
    /// Number of records
    pub rows: usize,
    /// Number of CSV columns (features plus the label)
    pub columns: usize,
    /// Records labeled fraudulent
    pub frauds: usize,
    /// Records labeled legitimate
    pub non_frauds: usize,
}

impl SplitStats {
    /// Compute statistics over a slice of records
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let frauds = records.iter().filter(|r| r.is_fraud == 1).count();
        Self {
            rows: records.len(),
            columns: records.first().map(|r| r.num_features() + 1).unwrap_or(0),
            frauds,
            non_frauds: records.len() - frauds,
        }
    }

    /// Fraction of fraudulent records, as a percentage
    pub fn fraud_pct(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.frauds as f64 / self.rows as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_records(n: usize, fraud_every: usize) -> Vec<TransactionRecord> {
        (0..n)
            .map(|i| {
                let label = u8::from(i % fraud_every == 0);
                TransactionRecord::new(vec![i as f64, (i * 2) as f64], label)
            })
            .collect()
    }

    #[test]
    fn test_split_sizes() {
        // 1000 records at a 5% positive rate, 80/20 split
        let records = synthetic_records(1000, 20);
        let (train, test) = train_test_split(records, 0.2, 42);

        assert_eq!(train.len(), 800);
        assert_eq!(test.len(), 200);
    }

    #[test]
    fn test_split_preserves_label_distribution() {
        let records = synthetic_records(1000, 20);
        let (train, test) = train_test_split(records, 0.2, 42);

        let train_stats = SplitStats::from_records(&train);
        let test_stats = SplitStats::from_records(&test);

        // 5% base rate, allow sampling noise
        assert!((train_stats.fraud_pct() - 5.0).abs() < 2.5);
        assert!((test_stats.fraud_pct() - 5.0).abs() < 2.5);
        assert_eq!(train_stats.frauds + test_stats.frauds, 50);
    }

    #[test]
    fn test_split_partitions_are_disjoint() {
        let records = synthetic_records(100, 10);
        let (train, test) = train_test_split(records, 0.2, 7);

        // Feature vectors are unique per record, so membership is checkable
        for record in &test {
            assert!(!train.contains(record));
        }
        assert_eq!(train.len() + test.len(), 100);
    }

    #[test]
    fn test_split_is_deterministic_for_a_seed() {
        let (train_a, test_a) = train_test_split(synthetic_records(100, 10), 0.2, 42);
        let (train_b, test_b) = train_test_split(synthetic_records(100, 10), 0.2, 42);

        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
    }

    #[test]
    fn test_stats_counts_sum_to_rows() {
        let records = synthetic_records(97, 13);
        let stats = SplitStats::from_records(&records);

        assert_eq!(stats.frauds + stats.non_frauds, stats.rows);
        assert_eq!(stats.rows, 97);
        assert_eq!(stats.columns, 3);
    }

    #[test]
    fn test_empty_stats() {
        let stats = SplitStats::from_records(&[]);
        assert_eq!(stats.rows, 0);
        assert_eq!(stats.fraud_pct(), 0.0);
    }
}
