//! Text figures rendered to in-memory strings
//!
//! Console-friendly stand-ins for the usual training plots: loss and F1
//! curves by epoch, a confusion-matrix heatmap, and ROC / precision-recall
//! curves.

use crate::metrics::ConfusionMatrix;
use crate::model::TrialRecord;

const PLOT_WIDTH: usize = 60;
const PLOT_HEIGHT: usize = 16;

/// Character grid used as a drawing surface
struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; width]; height],
        }
    }

    /// Place a glyph; (0, 0) is bottom-left, out-of-range points are dropped
    fn set(&mut self, x: usize, y: usize, glyph: char) {
        if x < self.width && y < self.height {
            let row = self.height - 1 - y;
            self.cells[row][x] = glyph;
        }
    }

    /// Plot a series scaled into the canvas, returning nothing for empties
    fn plot_series(&mut self, xs: &[f64], ys: &[f64], bounds: (f64, f64, f64, f64), glyph: char) {
        let (x_min, x_max, y_min, y_max) = bounds;
        let x_span = (x_max - x_min).max(1e-12);
        let y_span = (y_max - y_min).max(1e-12);

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let col = ((x - x_min) / x_span * (self.width - 1) as f64).round() as usize;
            let row = ((y - y_min) / y_span * (self.height - 1) as f64).round() as usize;
            self.set(col, row, glyph);
        }
    }

    /// Render with a framed y-axis and top/bottom bound labels
    fn render(&self, y_max_label: &str, y_min_label: &str) -> String {
        let mut out = String::new();
        for (i, row) in self.cells.iter().enumerate() {
            let label = if i == 0 {
                y_max_label
            } else if i == self.height - 1 {
                y_min_label
            } else {
                ""
            };
            out.push_str(&format!("{:>8} |", label));
            out.extend(row.iter());
            out.push('\n');
        }
        out.push_str(&format!("{:>8} +{}\n", "", "-".repeat(self.width)));
        out
    }
}

fn series_bounds(series: &[&[f64]]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for values in series {
        for &v in *values {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if (max - min).abs() < 1e-12 {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

/// Training vs. validation loss by epoch (`T` = train, `V` = validation)
pub fn loss_curves(trial_log: &[TrialRecord]) -> String {
    let epochs: Vec<f64> = trial_log.iter().map(|r| r.epoch as f64).collect();
    let train: Vec<f64> = trial_log.iter().map(|r| f64::from(r.train_loss)).collect();
    let val: Vec<f64> = trial_log.iter().map(|r| f64::from(r.val_loss)).collect();

    let (y_min, y_max) = series_bounds(&[&train, &val]);
    let x_max = epochs.last().copied().unwrap_or(1.0);

    let mut canvas = Canvas::new(PLOT_WIDTH, PLOT_HEIGHT);
    canvas.plot_series(&epochs, &train, (1.0, x_max, y_min, y_max), 'T');
    canvas.plot_series(&epochs, &val, (1.0, x_max, y_min, y_max), 'V');

    let mut out = String::from("Training & Validation Loss\n");
    out.push_str(&canvas.render(&format!("{:.3}", y_max), &format!("{:.3}", y_min)));
    out.push_str(&format!(
        "{:>10}Epoch 1..{}   T = training loss, V = validation loss\n",
        "",
        trial_log.len().max(1)
    ));
    out
}

/// Validation F1 by epoch
pub fn f1_curve(trial_log: &[TrialRecord]) -> String {
    let epochs: Vec<f64> = trial_log.iter().map(|r| r.epoch as f64).collect();
    let f1s: Vec<f64> = trial_log.iter().map(|r| r.f1).collect();

    let x_max = epochs.last().copied().unwrap_or(1.0);

    let mut canvas = Canvas::new(PLOT_WIDTH, PLOT_HEIGHT);
    canvas.plot_series(&epochs, &f1s, (1.0, x_max, 0.0, 1.0), '*');

    let mut out = String::from("F1 Score over Epochs\n");
    out.push_str(&canvas.render("1.000", "0.000"));
    out.push_str(&format!("{:>10}Epoch 1..{}\n", "", trial_log.len().max(1)));
    out
}

/// Confusion-matrix heatmap with counts and relative shading
pub fn confusion_heatmap(cm: &ConfusionMatrix) -> String {
    let max_count = cm.tp.max(cm.tn).max(cm.fp).max(cm.fn_).max(1);
    let shade = |count: usize| -> char {
        let shades = [' ', '.', ':', '+', '#', '@'];
        let idx = (count * (shades.len() - 1) + max_count / 2) / max_count;
        shades[idx.min(shades.len() - 1)]
    };

    let cell = |count: usize| format!("{:>8} {}", count, shade(count));

    let mut out = String::from("Confusion Matrix\n");
    out.push_str("                Predicted 0   Predicted 1\n");
    out.push_str(&format!(
        "    True 0     {}    {}\n",
        cell(cm.tn),
        cell(cm.fp)
    ));
    out.push_str(&format!(
        "    True 1     {}    {}\n",
        cell(cm.fn_),
        cell(cm.tp)
    ));
    out
}

/// ROC curve with the chance diagonal
pub fn roc_curve_figure(fprs: &[f64], tprs: &[f64], roc_auc: f64) -> String {
    let mut canvas = Canvas::new(PLOT_WIDTH, PLOT_HEIGHT);

    // Chance diagonal
    for i in 0..PLOT_WIDTH {
        let frac = i as f64 / (PLOT_WIDTH - 1) as f64;
        let row = (frac * (PLOT_HEIGHT - 1) as f64).round() as usize;
        canvas.set(i, row, '.');
    }

    canvas.plot_series(fprs, tprs, (0.0, 1.0, 0.0, 1.0), '*');

    let mut out = format!("ROC Curve (area = {:.2})\n", roc_auc);
    out.push_str(&canvas.render("1.0", "0.0"));
    out.push_str(&format!(
        "{:>10}False Positive Rate 0..1   (y: True Positive Rate)\n",
        ""
    ));
    out
}

/// Precision-recall curve
pub fn pr_curve_figure(recalls: &[f64], precisions: &[f64], average_precision: f64) -> String {
    let mut canvas = Canvas::new(PLOT_WIDTH, PLOT_HEIGHT);
    canvas.plot_series(recalls, precisions, (0.0, 1.0, 0.0, 1.0), '*');

    let mut out = format!("Precision-Recall Curve (area = {:.2})\n", average_precision);
    out.push_str(&canvas.render("1.0", "0.0"));
    out.push_str(&format!("{:>10}Recall 0..1   (y: Precision)\n", ""));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial_log() -> Vec<TrialRecord> {
        (1..=5)
            .map(|epoch| TrialRecord {
                epoch,
                train_loss: 1.0 / epoch as f32,
                val_loss: 1.2 / epoch as f32,
                precision: 0.5 + 0.05 * epoch as f64,
                recall: 0.4 + 0.05 * epoch as f64,
                f1: 0.45 + 0.05 * epoch as f64,
            })
            .collect()
    }

    #[test]
    fn test_loss_curves_render() {
        let figure = loss_curves(&trial_log());
        assert!(figure.contains("Training & Validation Loss"));
        assert!(figure.contains('T'));
        assert!(figure.contains('V'));
    }

    #[test]
    fn test_f1_curve_renders() {
        let figure = f1_curve(&trial_log());
        assert!(figure.contains("F1 Score over Epochs"));
        assert!(figure.contains('*'));
    }

    #[test]
    fn test_empty_log_does_not_panic() {
        assert!(loss_curves(&[]).contains("Loss"));
        assert!(f1_curve(&[]).contains("F1"));
    }

    #[test]
    fn test_confusion_heatmap_shows_counts() {
        let cm = ConfusionMatrix {
            tp: 40,
            tn: 900,
            fp: 10,
            fn_: 50,
        };
        let figure = confusion_heatmap(&cm);
        assert!(figure.contains("900"));
        assert!(figure.contains("40"));
        assert!(figure.contains("Predicted 0"));
    }

    #[test]
    fn test_roc_figure_renders() {
        let figure = roc_curve_figure(&[0.0, 0.5, 1.0], &[0.0, 0.9, 1.0], 0.92);
        assert!(figure.contains("ROC Curve (area = 0.92)"));
        assert!(figure.contains('*'));
    }

    #[test]
    fn test_pr_figure_renders() {
        let figure = pr_curve_figure(&[0.0, 0.5, 1.0], &[1.0, 0.8, 0.6], 0.75);
        assert!(figure.contains("Precision-Recall Curve (area = 0.75)"));
    }
}
