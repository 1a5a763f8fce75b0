//! Training and validation loop
//!
//! A `TrainingSession` owns the model, the best-snapshot state and the
//! trial log; everything the loop consumes arrives as an explicit argument.
//! Model selection keeps the parameters of the epoch with the highest
//! validation F1 and restores them once training finishes.

use super::config::TrainingConfig;
use super::FraudCnn;
use crate::data::{Batch, Dataset};
use crate::error::PipelineError;
use crate::metrics::{threshold_label, ConfusionMatrix, FinalEvaluation};
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion, Tensor, TensorData,
    },
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One row of the trial log, appended after every epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// 1-based epoch index
    pub epoch: usize,
    /// Mean training loss (accumulated loss / batch count)
    pub train_loss: f32,
    /// Mean validation loss
    pub val_loss: f32,
    /// Validation precision at the 0.5 threshold
    pub precision: f64,
    /// Validation recall
    pub recall: f64,
    /// Validation F1, the model-selection criterion
    pub f1: f64,
}

/// Everything a run produces besides the trained model
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Per-epoch records, append-only
    pub trial_log: Vec<TrialRecord>,
    /// 1-based epoch whose snapshot was kept (0 when nothing improved)
    pub best_epoch: usize,
    /// Best validation F1 observed
    pub best_f1: f64,
    /// Final evaluation of the restored model on the validation set
    pub evaluation: FinalEvaluation,
}

/// Best-F1 model selection state
///
/// The stored module is a full snapshot; later optimizer steps replace
/// parameters rather than mutating them, so the copy stays intact.
struct BestSnapshot<B: AutodiffBackend> {
    f1: f64,
    epoch: usize,
    model: Option<FraudCnn<B>>,
}

impl<B: AutodiffBackend> BestSnapshot<B> {
    fn new() -> Self {
        Self {
            f1: 0.0,
            epoch: 0,
            model: None,
        }
    }

    /// Replace the snapshot when this epoch's F1 is strictly better
    fn update(&mut self, epoch: usize, f1: f64, model: &FraudCnn<B>) -> bool {
        if f1 > self.f1 {
            self.f1 = f1;
            self.epoch = epoch;
            self.model = Some(model.clone());
            true
        } else {
            false
        }
    }
}

/// Owns the model and all mutable training state for one run
pub struct TrainingSession<B: AutodiffBackend> {
    model: FraudCnn<B>,
    config: TrainingConfig,
    best: BestSnapshot<B>,
    trial_log: Vec<TrialRecord>,
}

impl<B: AutodiffBackend> TrainingSession<B> {
    /// Create a session around a freshly initialized model
    pub fn new(model: FraudCnn<B>, config: TrainingConfig) -> Self {
        Self {
            model,
            config,
            best: BestSnapshot::new(),
            trial_log: Vec::new(),
        }
    }

    /// Run the full train/validate loop and the final evaluation
    ///
    /// Returns the model with the best-F1 parameters restored, plus the
    /// training report. An empty training set is a fatal configuration
    /// error, caught before the first epoch.
    pub fn run(
        mut self,
        train_data: &mut Dataset,
        val_data: &mut Dataset,
        device: &B::Device,
    ) -> Result<(FraudCnn<B>, TrainingReport), PipelineError> {
        if train_data.is_empty() {
            return Err(PipelineError::EmptyTrainingSet);
        }

        info!(
            "Training for {} epochs ({} train / {} validation samples)",
            self.config.epochs,
            train_data.len(),
            val_data.len()
        );

        // Optimizer lives for exactly one run; nothing is created at
        // module scope.
        let mut optimizer = AdamConfig::new().init();
        let mut model = self.model;

        for epoch in 1..=self.config.epochs {
            // Training phase
            train_data.reset();
            let mut loss_sum = 0.0f32;
            let mut batch_count = 0usize;

            while let Some(batch) = train_data.next_batch() {
                let features = batch_to_tensor::<B>(&batch, device);
                let targets = targets_to_tensor::<B>(&batch.targets, device);

                let probs = model.forward(features);
                let loss = binary_cross_entropy(probs, targets);

                let grads = loss.backward();
                let grads = GradientsParams::from_grads(grads, &model);
                model = optimizer.step(self.config.learning_rate, model, grads);

                loss_sum += loss.into_scalar().elem::<f32>();
                batch_count += 1;
            }

            let train_loss = loss_sum / batch_count as f32;

            // Validation phase on the frozen inner model
            let pass = run_validation(&model.valid(), val_data, device);
            let y_pred: Vec<f64> = pass.y_proba.iter().map(|&p| threshold_label(p)).collect();
            let cm = ConfusionMatrix::from_labels(&pass.y_true, &y_pred);

            let record = TrialRecord {
                epoch,
                train_loss,
                val_loss: pass.loss,
                precision: cm.precision(),
                recall: cm.recall(),
                f1: cm.f1(),
            };

            info!(
                "Epoch {}/{}: train_loss={:.4}, val_loss={:.4}, precision={:.4}, recall={:.4}, f1={:.4}",
                epoch,
                self.config.epochs,
                record.train_loss,
                record.val_loss,
                record.precision,
                record.recall,
                record.f1
            );

            if self.best.update(epoch, record.f1, &model) {
                info!("Model improved: best F1 now {:.4}", self.best.f1);
            }

            self.trial_log.push(record);
        }

        // Restore the best snapshot; the final epoch's parameters are
        // discarded unless they were the best.
        let model = match self.best.model.take() {
            Some(best) => {
                debug!("Restoring snapshot from epoch {}", self.best.epoch);
                best
            }
            None => model,
        };

        // Final evaluation of the restored model
        let pass = run_validation(&model.valid(), val_data, device);
        let evaluation = FinalEvaluation::from_scores(pass.y_true, pass.y_proba);

        info!(
            "Training completed: best F1 {:.4} at epoch {}",
            self.best.f1, self.best.epoch
        );

        let report = TrainingReport {
            trial_log: self.trial_log,
            best_epoch: self.best.epoch,
            best_f1: self.best.f1,
            evaluation,
        };

        Ok((model, report))
    }
}

/// Loss and raw prediction arrays from one pass over a labeled dataset
pub(crate) struct ValidationPass {
    pub loss: f32,
    pub y_true: Vec<f64>,
    pub y_proba: Vec<f64>,
}

/// One sequential pass with no gradient tracking
pub(crate) fn run_validation<B: Backend>(
    model: &FraudCnn<B>,
    data: &mut Dataset,
    device: &B::Device,
) -> ValidationPass {
    data.reset();

    let mut loss_sum = 0.0f32;
    let mut batch_count = 0usize;
    let mut y_true = Vec::with_capacity(data.len());
    let mut y_proba = Vec::with_capacity(data.len());

    while let Some(batch) = data.next_batch() {
        let features = batch_to_tensor::<B>(&batch, device);
        let targets = targets_to_tensor::<B>(&batch.targets, device);

        let probs = model.forward(features);
        let loss = binary_cross_entropy(probs.clone(), targets);

        loss_sum += loss.into_scalar().elem::<f32>();
        batch_count += 1;

        let probs: Vec<f32> = probs.into_data().convert::<f32>().to_vec().unwrap();
        y_true.extend(batch.targets.iter().map(|&t| f64::from(t)));
        y_proba.extend(probs.iter().map(|&p| f64::from(p)));
    }

    let loss = if batch_count > 0 {
        loss_sum / batch_count as f32
    } else {
        0.0
    };

    ValidationPass {
        loss,
        y_true,
        y_proba,
    }
}

/// Batch features -> [batch, 1, features] tensor
fn batch_to_tensor<B: Backend>(batch: &Batch, device: &B::Device) -> Tensor<B, 3> {
    let shape = batch.features.shape();
    let data: Vec<f32> = batch.features.iter().copied().collect();
    Tensor::from_data(TensorData::new(data, [shape[0], shape[1], shape[2]]), device)
}

/// Float labels -> [batch, 1] tensor
fn targets_to_tensor<B: Backend>(targets: &[f32], device: &B::Device) -> Tensor<B, 2> {
    Tensor::from_data(TensorData::new(targets.to_vec(), [targets.len(), 1]), device)
}

/// Binary cross-entropy over probabilities, mean-reduced
fn binary_cross_entropy<B: Backend>(probs: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
    // Clamp keeps log() finite for saturated sigmoid outputs
    let probs = probs.clamp(1e-7, 1.0 - 1e-7);

    let positive = targets.clone().mul(probs.clone().log());
    let negative = targets
        .neg()
        .add_scalar(1.0)
        .mul(probs.neg().add_scalar(1.0).log());

    positive.add(negative).mean().neg()
}
