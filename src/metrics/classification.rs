//! Binary classification metrics for fraud scoring
//!
//! Labels are 0.0/1.0 floats, probabilities are in [0, 1]. The decision
//! rule is strict: a probability above 0.5 is fraud, exactly 0.5 is not.

/// Map a fraud probability to a hard label
pub fn threshold_label(probability: f64) -> f64 {
    if probability > 0.5 {
        1.0
    } else {
        0.0
    }
}

/// Confusion matrix for binary classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// True positives
    pub tp: usize,
    /// True negatives
    pub tn: usize,
    /// False positives
    pub fp: usize,
    /// False negatives
    pub fn_: usize,
}

impl ConfusionMatrix {
    /// Build from already-binarized label vectors
    pub fn from_labels(y_true: &[f64], y_pred: &[f64]) -> Self {
        let mut tp = 0;
        let mut tn = 0;
        let mut fp = 0;
        let mut fn_ = 0;

        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            match (t >= 0.5, p >= 0.5) {
                (true, true) => tp += 1,
                (false, false) => tn += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
            }
        }

        Self { tp, tn, fp, fn_ }
    }

    /// Total samples
    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// Accuracy: (TP + TN) / total
    pub fn accuracy(&self) -> f64 {
        let total = self.total() as f64;
        if total < 1.0 {
            return 0.0;
        }
        (self.tp + self.tn) as f64 / total
    }

    /// Precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        let denom = (self.tp + self.fp) as f64;
        if denom < 1.0 {
            return 0.0;
        }
        self.tp as f64 / denom
    }

    /// Recall: TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        let denom = (self.tp + self.fn_) as f64;
        if denom < 1.0 {
            return 0.0;
        }
        self.tp as f64 / denom
    }

    /// F1: harmonic mean of precision and recall
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        let denom = precision + recall;
        if denom < 1e-10 {
            return 0.0;
        }
        2.0 * precision * recall / denom
    }

    /// Specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        let denom = (self.tn + self.fp) as f64;
        if denom < 1.0 {
            return 0.0;
        }
        self.tn as f64 / denom
    }
}

/// ROC curve points: (false positive rates, true positive rates, thresholds)
pub fn roc_curve(y_true: &[f64], y_proba: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut pairs: Vec<(f64, bool)> = y_proba
        .iter()
        .zip(y_true.iter())
        .map(|(&p, &t)| (p, t >= 0.5))
        .collect();
    pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let n_pos = pairs.iter().filter(|(_, t)| *t).count().max(1) as f64;
    let n_neg = pairs.iter().filter(|(_, t)| !*t).count().max(1) as f64;

    let mut fprs = vec![0.0];
    let mut tprs = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];

    let mut tp = 0.0;
    let mut fp = 0.0;
    for (prob, is_pos) in pairs {
        if is_pos {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        fprs.push(fp / n_neg);
        tprs.push(tp / n_pos);
        thresholds.push(prob);
    }

    (fprs, tprs, thresholds)
}

/// Area under the ROC curve, with tie-aware trapezoid integration
///
/// Returns 0.5 when only one class is present.
pub fn roc_auc(y_true: &[f64], y_proba: &[f64]) -> f64 {
    let n = y_true.len();
    let mut pairs: Vec<(f64, bool)> = y_proba
        .iter()
        .zip(y_true.iter())
        .map(|(&p, &t)| (p, t >= 0.5))
        .collect();
    pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let n_pos = pairs.iter().filter(|(_, t)| *t).count() as f64;
    let n_neg = pairs.iter().filter(|(_, t)| !*t).count() as f64;
    if n_pos < 1.0 || n_neg < 1.0 {
        return 0.5;
    }

    let mut auc = 0.0;
    let mut tpr_prev = 0.0;
    let mut fpr_prev = 0.0;
    let mut tp = 0.0;
    let mut fp = 0.0;

    let mut i = 0;
    while i < n {
        // Consume all samples sharing this score as one curve step
        let score = pairs[i].0;
        let mut j = i;
        while j < n && (pairs[j].0 - score).abs() < 1e-10 {
            if pairs[j].1 {
                tp += 1.0;
            } else {
                fp += 1.0;
            }
            j += 1;
        }

        let tpr = tp / n_pos;
        let fpr = fp / n_neg;
        auc += (fpr - fpr_prev) * (tpr + tpr_prev) / 2.0;

        tpr_prev = tpr;
        fpr_prev = fpr;
        i = j;
    }

    auc
}

/// Precision-recall curve points: (precisions, recalls, thresholds)
pub fn precision_recall_curve(y_true: &[f64], y_proba: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut pairs: Vec<(f64, bool)> = y_proba
        .iter()
        .zip(y_true.iter())
        .map(|(&p, &t)| (p, t >= 0.5))
        .collect();
    pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let n_pos = pairs.iter().filter(|(_, t)| *t).count().max(1) as f64;

    let mut precisions = Vec::new();
    let mut recalls = Vec::new();
    let mut thresholds = Vec::new();

    let mut tp = 0.0;
    let mut fp = 0.0;
    for (prob, is_pos) in pairs {
        if is_pos {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        precisions.push(tp / (tp + fp));
        recalls.push(tp / n_pos);
        thresholds.push(prob);
    }

    (precisions, recalls, thresholds)
}

/// Average precision (AUCPR): step-wise sum over the PR curve
///
/// Returns 0.0 when no positive samples exist.
pub fn average_precision(y_true: &[f64], y_proba: &[f64]) -> f64 {
    if !y_true.iter().any(|&t| t >= 0.5) {
        return 0.0;
    }

    let (precisions, recalls, _) = precision_recall_curve(y_true, y_proba);

    let mut ap = 0.0;
    let mut recall_prev = 0.0;
    for (precision, recall) in precisions.iter().zip(recalls.iter()) {
        ap += (recall - recall_prev) * precision;
        recall_prev = *recall;
    }
    ap
}

/// Final evaluation of the restored best model on the test split
///
/// Carries the raw prediction arrays alongside the summary numbers so that
/// reporting never has to reach back into training state.
#[derive(Debug, Clone)]
pub struct FinalEvaluation {
    /// True labels (0.0 / 1.0)
    pub y_true: Vec<f64>,
    /// Predicted fraud probabilities
    pub y_proba: Vec<f64>,
    /// Thresholded predicted labels
    pub y_pred: Vec<f64>,
    /// Confusion matrix of the thresholded predictions
    pub confusion: ConfusionMatrix,
    /// Accuracy
    pub accuracy: f64,
    /// Precision
    pub precision: f64,
    /// Recall
    pub recall: f64,
    /// F1 score
    pub f1: f64,
    /// Area under the ROC curve (from probabilities)
    pub roc_auc: f64,
    /// Average precision / AUCPR (from probabilities)
    pub average_precision: f64,
}

impl FinalEvaluation {
    /// Threshold probabilities and compute the full metric set
    pub fn from_scores(y_true: Vec<f64>, y_proba: Vec<f64>) -> Self {
        let y_pred: Vec<f64> = y_proba.iter().map(|&p| threshold_label(p)).collect();
        let confusion = ConfusionMatrix::from_labels(&y_true, &y_pred);

        Self {
            accuracy: confusion.accuracy(),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1: confusion.f1(),
            roc_auc: roc_auc(&y_true, &y_proba),
            average_precision: average_precision(&y_true, &y_proba),
            confusion,
            y_true,
            y_proba,
            y_pred,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict_at_half() {
        assert_eq!(threshold_label(0.51), 1.0);
        assert_eq!(threshold_label(0.5), 0.0);
        assert_eq!(threshold_label(0.49), 0.0);
    }

    #[test]
    fn test_confusion_matrix_counts() {
        let y_true = [1.0, 1.0, 0.0, 0.0, 1.0];
        let y_pred = [1.0, 0.0, 0.0, 1.0, 1.0];
        let cm = ConfusionMatrix::from_labels(&y_true, &y_pred);

        assert_eq!(cm.tp, 2);
        assert_eq!(cm.tn, 1);
        assert_eq!(cm.fp, 1);
        assert_eq!(cm.fn_, 1);
        assert_eq!(cm.total(), 5);
    }

    #[test]
    fn test_all_correct_all_positive_batch() {
        // Validation batch whose labels are all 1 and predictions all correct
        let y_true = vec![1.0; 8];
        let y_proba = vec![0.9; 8];
        let eval = FinalEvaluation::from_scores(y_true, y_proba);

        assert_eq!(eval.precision, 1.0);
        assert_eq!(eval.recall, 1.0);
        assert_eq!(eval.f1, 1.0);
        assert_eq!(eval.accuracy, 1.0);
    }

    #[test]
    fn test_degenerate_denominators_give_zero() {
        // No predicted positives, no actual positives
        let cm = ConfusionMatrix::from_labels(&[0.0, 0.0], &[0.0, 0.0]);
        assert_eq!(cm.precision(), 0.0);
        assert_eq!(cm.recall(), 0.0);
        assert_eq!(cm.f1(), 0.0);
        assert_eq!(cm.accuracy(), 1.0);
    }

    #[test]
    fn test_auc_perfect_ranking() {
        let y_true = [1.0, 1.0, 0.0, 0.0];
        let y_proba = [0.9, 0.8, 0.2, 0.1];
        assert!((roc_auc(&y_true, &y_proba) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_auc_reversed_ranking() {
        let y_true = [0.0, 0.0, 1.0, 1.0];
        let y_proba = [0.9, 0.8, 0.2, 0.1];
        assert!(roc_auc(&y_true, &y_proba).abs() < 1e-10);
    }

    #[test]
    fn test_auc_single_class_is_half() {
        let y_true = [1.0, 1.0];
        let y_proba = [0.9, 0.1];
        assert_eq!(roc_auc(&y_true, &y_proba), 0.5);
    }

    #[test]
    fn test_average_precision_perfect_ranking() {
        let y_true = [1.0, 1.0, 0.0, 0.0];
        let y_proba = [0.9, 0.8, 0.2, 0.1];
        assert!((average_precision(&y_true, &y_proba) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_average_precision_no_positives() {
        assert_eq!(average_precision(&[0.0, 0.0], &[0.4, 0.6]), 0.0);
    }

    #[test]
    fn test_roc_curve_starts_at_origin() {
        let y_true = [1.0, 0.0];
        let y_proba = [0.9, 0.1];
        let (fprs, tprs, thresholds) = roc_curve(&y_true, &y_proba);

        assert_eq!(fprs[0], 0.0);
        assert_eq!(tprs[0], 0.0);
        assert_eq!(thresholds[0], f64::INFINITY);
        assert_eq!(*fprs.last().unwrap(), 1.0);
        assert_eq!(*tprs.last().unwrap(), 1.0);
    }

    #[test]
    fn test_final_evaluation_threads_arrays_through() {
        let eval = FinalEvaluation::from_scores(vec![1.0, 0.0], vec![0.8, 0.3]);

        assert_eq!(eval.y_pred, vec![1.0, 0.0]);
        assert_eq!(eval.y_true.len(), eval.y_proba.len());
        assert_eq!(eval.confusion.tp, 1);
        assert_eq!(eval.confusion.tn, 1);
    }
}
