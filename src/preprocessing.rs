//! Feature standardization matching the training-time distribution.
//!
//! The scaler here is inference-side only: it is constructed from already
//! fitted parameters (or loaded from a `scaler.safetensors` artifact) and
//! applied to aligned rows. Fitting happens wherever the model was trained.

use crate::error::{ConsumoError, Result};
use crate::primitives::Matrix;
use crate::serialization;
use std::collections::BTreeMap;
use std::path::Path;

/// Standardizes features using per-column mean and standard deviation
/// fitted at training time: `z = (x - mean) / std`.
///
/// # Examples
///
/// ```
/// use consumo::preprocessing::StandardScaler;
/// use consumo::primitives::Matrix;
///
/// let scaler = StandardScaler::from_params(vec![10.0, 0.5], vec![2.0, 0.5]).unwrap();
/// let x = Matrix::from_vec(1, 2, vec![12.0, 1.0]).unwrap();
/// let scaled = scaler.transform(&x).unwrap();
/// assert_eq!(scaled.as_slice(), &[1.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f32>,
    std: Vec<f32>,
    with_mean: bool,
    with_std: bool,
}

impl StandardScaler {
    /// Creates a scaler from fitted parameters, centering and scaling enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter vectors are empty or differ in length.
    pub fn from_params(mean: Vec<f32>, std: Vec<f32>) -> Result<Self> {
        Self::with_flags(mean, std, true, true)
    }

    /// Creates a scaler from fitted parameters and explicit switches.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter vectors are empty or differ in length.
    pub fn with_flags(mean: Vec<f32>, std: Vec<f32>, with_mean: bool, with_std: bool) -> Result<Self> {
        if mean.is_empty() {
            return Err(ConsumoError::empty_input("scaler mean"));
        }
        if mean.len() != std.len() {
            return Err(ConsumoError::dimension_mismatch(
                "scaler mean length",
                mean.len(),
                std.len(),
            ));
        }
        Ok(Self {
            mean,
            std,
            with_mean,
            with_std,
        })
    }

    /// Number of features this scaler was fitted on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Fitted per-column means.
    #[must_use]
    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    /// Fitted per-column standard deviations.
    #[must_use]
    pub fn std(&self) -> &[f32] {
        &self.std
    }

    /// Standardizes each column of `x` with the fitted parameters.
    ///
    /// Near-zero standard deviations leave the column uncentered-but-unscaled
    /// rather than dividing by zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has a different feature count than the scaler.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let (n_samples, n_features) = x.shape();
        if n_features != self.mean.len() {
            return Err(ConsumoError::dimension_mismatch(
                "scaler features",
                self.mean.len(),
                n_features,
            ));
        }

        let mut result = vec![0.0; n_samples * n_features];

        for i in 0..n_samples {
            for j in 0..n_features {
                let mut val = x.get(i, j);

                if self.with_mean {
                    val -= self.mean[j];
                }

                if self.with_std && self.std[j] > 1e-10 {
                    val /= self.std[j];
                }

                result[i * n_features + j] = val;
            }
        }

        Matrix::from_vec(n_samples, n_features, result).map_err(Into::into)
    }

    /// Saves the scaler to `SafeTensors` format.
    ///
    /// Layout: `mean` and `std` as `[n]` tensors, `with_mean`/`with_std` as
    /// 1.0/0.0 scalars in `[1]` tensors.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn save_safetensors<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut tensors = BTreeMap::new();

        tensors.insert(
            "mean".to_string(),
            (self.mean.clone(), vec![self.mean.len()]),
        );
        tensors.insert("std".to_string(), (self.std.clone(), vec![self.std.len()]));

        let with_mean_val = if self.with_mean { 1.0 } else { 0.0 };
        tensors.insert("with_mean".to_string(), (vec![with_mean_val], vec![1]));

        let with_std_val = if self.with_std { 1.0 } else { 0.0 };
        tensors.insert("with_std".to_string(), (vec![with_std_val], vec![1]));

        serialization::save_safetensors(path, &tensors)
    }

    /// Loads a scaler from `SafeTensors` format.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, a tensor is missing, or the
    /// parameter vectors disagree in length.
    pub fn load_safetensors<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (metadata, _, raw_data) = serialization::load_safetensors(path)?;

        let mean = serialization::extract_tensor(&metadata, &raw_data, "mean")?;
        let std = serialization::extract_tensor(&metadata, &raw_data, "std")?;

        let with_mean_data = serialization::extract_tensor(&metadata, &raw_data, "with_mean")?;
        let with_std_data = serialization::extract_tensor(&metadata, &raw_data, "with_std")?;
        if with_mean_data.len() != 1 || with_std_data.len() != 1 {
            return Err(ConsumoError::format_error(
                "scaler flags must be single-element tensors",
            ));
        }
        let with_mean = with_mean_data[0] > 0.5;
        let with_std = with_std_data[0] > 0.5;

        Self::with_flags(mean, std, with_mean, with_std)
    }
}
