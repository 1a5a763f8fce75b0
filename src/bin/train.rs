//! Train the fraud-detection CNN on a transaction CSV
//!
//! Usage:
//! ```bash
//! cargo run --release --bin train -- data/transactions.csv
//! ```

use anyhow::Result;
use burn::tensor::backend::Backend as _;
use burn_autodiff::Autodiff;
use burn_ndarray::{NdArray, NdArrayDevice};
use cnn_fraud_detection::data::{
    load_csv, records_to_matrix, train_test_split, Dataset, SplitStats, StandardScaler,
};
use cnn_fraud_detection::metrics::{precision_recall_curve, roc_curve};
use cnn_fraud_detection::model::{FraudCnn, TrainingSession};
use cnn_fraud_detection::report::{
    confusion_heatmap, dataset_stats_table, f1_curve, loss_curves, pr_curve_figure,
    results_table, roc_curve_figure,
};
use cnn_fraud_detection::RunConfig;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

type Backend = Autodiff<NdArray<f32>>;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/transactions.csv".to_string());

    let config = RunConfig::default();
    info!("Run configuration: {:?}", config);

    // Seed everything up front: weight init, shuffling, and the split
    Backend::seed(config.seed);

    // Load and split
    let records = load_csv(&path)?;
    let complete_stats = SplitStats::from_records(&records);

    let (train_records, test_records) =
        train_test_split(records, config.test_ratio, config.seed);
    let train_stats = SplitStats::from_records(&train_records);
    let test_stats = SplitStats::from_records(&test_records);

    println!(
        "{}",
        dataset_stats_table(&complete_stats, &train_stats, &test_stats)
    );

    // Standardize features on the train statistics only
    let (train_features, train_labels) = records_to_matrix(&train_records)?;
    let (test_features, test_labels) = records_to_matrix(&test_records)?;

    let mut scaler = StandardScaler::new();
    let train_features = scaler.fit_transform(&train_features)?;
    let test_features = scaler.transform(&test_features)?;

    // Batch iterators
    let mut train_data = Dataset::train(
        train_features.mapv(|v| v as f32),
        train_labels,
        config.batch_size,
        config.seed,
    )?;
    let mut val_data = Dataset::validation(
        test_features.mapv(|v| v as f32),
        test_labels,
        config.batch_size,
    )?;

    // Model and training session
    let cnn_config = config.cnn_config();
    cnn_config.validate()?;

    let device = NdArrayDevice::default();
    let model: FraudCnn<Backend> = FraudCnn::new(&device, &cnn_config);
    let session = TrainingSession::new(model, config.training_config());

    let (_model, report) = session.run(&mut train_data, &mut val_data, &device)?;

    // Final report
    let evaluation = &report.evaluation;
    println!("{}", results_table(evaluation));

    println!("{}", loss_curves(&report.trial_log));
    println!("{}", f1_curve(&report.trial_log));
    println!("{}", confusion_heatmap(&evaluation.confusion));

    let (fprs, tprs, _) = roc_curve(&evaluation.y_true, &evaluation.y_proba);
    println!("{}", roc_curve_figure(&fprs, &tprs, evaluation.roc_auc));

    let (precisions, recalls, _) =
        precision_recall_curve(&evaluation.y_true, &evaluation.y_proba);
    println!(
        "{}",
        pr_curve_figure(&recalls, &precisions, evaluation.average_precision)
    );

    info!(
        "Done: best F1 {:.4} at epoch {}",
        report.best_f1, report.best_epoch
    );

    Ok(())
}
