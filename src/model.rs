//! The pre-trained usage model: linear inference over aligned features.
//!
//! `UsageModel` is the inference half of a multiple linear regression fitted
//! elsewhere: coefficients, intercept, and the evaluation metrics recorded
//! when the model was validated. Prediction is `x · w + b`; the only runtime
//! failure is a feature-width disagreement, which signals an alignment bug
//! upstream and is never absorbed.

use crate::error::{ConsumoError, Result};
use crate::primitives::{Matrix, Vector};
use crate::schema::FeatureSchema;
use crate::serialization::{self, UserMetadata};
use std::collections::BTreeMap;
use std::path::Path;

/// Precomputed evaluation metrics carried with the model artifact.
///
/// These are display values from the training-time evaluation, never
/// recomputed from live input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalMetrics {
    /// Coefficient of determination on the evaluation split.
    pub r_squared: f32,
    /// R² adjusted for the number of predictors.
    pub adjusted_r_squared: f32,
}

/// A fitted linear regression, loaded from artifacts.
///
/// # Examples
///
/// ```
/// use consumo::model::UsageModel;
/// use consumo::primitives::Vector;
///
/// let model = UsageModel::from_params(Vector::from_slice(&[2.0, -1.0]), 0.5).unwrap();
/// let x = Vector::from_slice(&[3.0, 1.0]);
/// assert_eq!(model.predict_one(&x).unwrap(), 5.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UsageModel {
    coefficients: Vector,
    intercept: f32,
    metrics: Option<EvalMetrics>,
}

impl UsageModel {
    /// Creates a model from fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the coefficient vector is empty.
    pub fn from_params(coefficients: Vector, intercept: f32) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(ConsumoError::empty_input("model coefficients"));
        }
        Ok(Self {
            coefficients,
            intercept,
            metrics: None,
        })
    }

    /// Attaches evaluation metrics (builder style).
    #[must_use]
    pub fn with_metrics(mut self, metrics: EvalMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Number of input features the model expects.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// The fitted coefficients, in feature order.
    #[must_use]
    pub fn coefficients(&self) -> &Vector {
        &self.coefficients
    }

    /// The fitted intercept.
    #[must_use]
    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Evaluation metrics recorded with the artifact, if any.
    #[must_use]
    pub fn metrics(&self) -> Option<EvalMetrics> {
        self.metrics
    }

    /// Predicts one value per row of `x`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` has a different column count than
    /// the model has coefficients.
    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let (_, n_features) = x.shape();
        if n_features != self.coefficients.len() {
            return Err(ConsumoError::dimension_mismatch(
                "model features",
                self.coefficients.len(),
                n_features,
            ));
        }

        let y = x
            .matvec(&self.coefficients)
            .map_err(ConsumoError::from)?
            .add_scalar(self.intercept);
        Ok(y)
    }

    /// Predicts a single scalar from one aligned feature vector.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the vector width disagrees with the
    /// coefficient count.
    pub fn predict_one(&self, x: &Vector) -> Result<f32> {
        if x.len() != self.coefficients.len() {
            return Err(ConsumoError::dimension_mismatch(
                "model features",
                self.coefficients.len(),
                x.len(),
            ));
        }
        Ok(x.dot(&self.coefficients) + self.intercept)
    }

    /// Pairs each schema column with its coefficient, sorted by absolute
    /// value descending, ready for display.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the schema length disagrees with the
    /// coefficient count.
    pub fn ranked_coefficients(&self, schema: &FeatureSchema) -> Result<Vec<(String, f32)>> {
        if schema.len() != self.coefficients.len() {
            return Err(ConsumoError::dimension_mismatch(
                "model features",
                self.coefficients.len(),
                schema.len(),
            ));
        }

        let mut table: Vec<(String, f32)> = schema
            .iter()
            .zip(self.coefficients.iter())
            .map(|(name, &coef)| (name.clone(), coef))
            .collect();
        table.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(table)
    }

    /// Saves the model to `SafeTensors` format.
    ///
    /// Layout: `coefficients` as a `[p]` tensor, `intercept` as a `[1]`
    /// tensor; evaluation metrics travel in the `__metadata__` section.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn save_safetensors<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut tensors = BTreeMap::new();

        let coef_data: Vec<f32> = self.coefficients.as_slice().to_vec();
        let coef_shape = vec![self.coefficients.len()];
        tensors.insert("coefficients".to_string(), (coef_data, coef_shape));

        tensors.insert("intercept".to_string(), (vec![self.intercept], vec![1]));

        let mut user_metadata = UserMetadata::new();
        user_metadata.insert("model".to_string(), "linear_regression".to_string());
        user_metadata.insert("target".to_string(), "monthly_data_usage_gb".to_string());
        if let Some(metrics) = self.metrics {
            user_metadata.insert("r_squared".to_string(), format!("{:.2}", metrics.r_squared));
            user_metadata.insert(
                "adjusted_r_squared".to_string(),
                format!("{:.2}", metrics.adjusted_r_squared),
            );
        }

        serialization::save_safetensors_with_metadata(path, &tensors, &user_metadata)
    }

    /// Loads a model from `SafeTensors` format.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, a tensor is missing, or the
    /// intercept is not a single-element tensor.
    pub fn load_safetensors<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (metadata, user_metadata, raw_data) = serialization::load_safetensors(path)?;

        let coefficients = serialization::extract_tensor(&metadata, &raw_data, "coefficients")?;
        let intercept_data = serialization::extract_tensor(&metadata, &raw_data, "intercept")?;
        if intercept_data.len() != 1 {
            return Err(ConsumoError::format_error(
                "intercept must be a single-element tensor",
            ));
        }

        let mut model = Self::from_params(Vector::from_vec(coefficients), intercept_data[0])?;
        if let Some(metrics) = parse_metrics(&user_metadata) {
            model = model.with_metrics(metrics);
        }
        Ok(model)
    }
}

fn parse_metrics(user_metadata: &UserMetadata) -> Option<EvalMetrics> {
    let r_squared = user_metadata.get("r_squared")?.parse().ok()?;
    let adjusted_r_squared = user_metadata.get("adjusted_r_squared")?.parse().ok()?;
    Some(EvalMetrics {
        r_squared,
        adjusted_r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn model() -> UsageModel {
        UsageModel::from_params(Vector::from_slice(&[2.0, -1.0, 0.5]), 1.0).unwrap()
    }

    #[test]
    fn test_predict_one() {
        let m = model();
        let x = Vector::from_slice(&[1.0, 2.0, 4.0]);
        // 2*1 - 1*2 + 0.5*4 + 1 = 3
        assert_eq!(m.predict_one(&x).unwrap(), 3.0);
    }

    #[test]
    fn test_predict_matrix() {
        let m = model();
        let x = Matrix::from_vec(2, 3, vec![1.0, 2.0, 4.0, 0.0, 0.0, 0.0]).unwrap();
        let y = m.predict(&x).unwrap();
        assert_eq!(y.as_slice(), &[3.0, 1.0]);
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let m = model();
        let x = Vector::from_slice(&[1.0, 2.0]);
        let err = m.predict_one(&x).unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));

        let wide = Matrix::zeros(1, 4);
        assert!(m.predict(&wide).is_err());
    }

    #[test]
    fn test_rejects_empty_coefficients() {
        assert!(UsageModel::from_params(Vector::from_vec(vec![]), 0.0).is_err());
    }

    #[test]
    fn test_ranked_coefficients_sorted_by_magnitude() {
        let m = model();
        let schema = FeatureSchema::from_columns(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ])
        .unwrap();

        let table = m.ranked_coefficients(&schema).unwrap();
        assert_eq!(table[0], ("a".to_string(), 2.0));
        assert_eq!(table[1], ("b".to_string(), -1.0));
        assert_eq!(table[2], ("c".to_string(), 0.5));
    }

    #[test]
    fn test_ranked_coefficients_schema_mismatch() {
        let m = model();
        let schema = FeatureSchema::from_columns(vec!["a".to_string()]).unwrap();
        assert!(m.ranked_coefficients(&schema).is_err());
    }

    #[test]
    fn test_safetensors_roundtrip_with_metrics() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage_model.safetensors");

        let m = model().with_metrics(EvalMetrics {
            r_squared: 0.61,
            adjusted_r_squared: 0.58,
        });
        m.save_safetensors(&path).unwrap();

        let loaded = UsageModel::load_safetensors(&path).unwrap();
        assert_eq!(loaded.coefficients(), m.coefficients());
        assert_eq!(loaded.intercept(), 1.0);
        let metrics = loaded.metrics().unwrap();
        assert!((metrics.r_squared - 0.61).abs() < 1e-6);
        assert!((metrics.adjusted_r_squared - 0.58).abs() < 1e-6);
    }

    #[test]
    fn test_safetensors_roundtrip_without_metrics() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage_model.safetensors");

        model().save_safetensors(&path).unwrap();
        let loaded = UsageModel::load_safetensors(&path).unwrap();
        assert!(loaded.metrics().is_none());
    }
}
