//! Feature standardization
//!
//! Per-column z-score scaling fitted on the training matrix only; the test
//! matrix is transformed with the training statistics.

use crate::error::PipelineError;
use ndarray::{Array1, Array2, Axis};

/// Standardizes features to zero mean and unit variance
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    std: Option<Array1<f64>>,
}

impl StandardScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit column means and standard deviations to training data
    pub fn fit(&mut self, data: &Array2<f64>) {
        let mean = data
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(data.ncols()));
        let std = data.std_axis(Axis(0), 0.0);

        // Constant columns scale by 1 instead of dividing by zero
        let std = std.mapv(|v| if v.abs() < 1e-10 { 1.0 } else { v });

        self.mean = Some(mean);
        self.std = Some(std);
    }

    /// Transform data using the fitted statistics
    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, PipelineError> {
        let mean = self.mean.as_ref().ok_or(PipelineError::NotFitted)?;
        let std = self.std.as_ref().ok_or(PipelineError::NotFitted)?;

        if data.ncols() != mean.len() {
            return Err(PipelineError::Shape(format!(
                "scaler fitted on {} columns, got {}",
                mean.len(),
                data.ncols()
            )));
        }

        let mut result = Array2::zeros(data.dim());
        for (i, row) in data.rows().into_iter().enumerate() {
            let scaled = (&row - mean) / std;
            result.row_mut(i).assign(&scaled);
        }
        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, data: &Array2<f64>) -> Result<Array2<f64>, PipelineError> {
        self.fit(data);
        self.transform(data)
    }
}
