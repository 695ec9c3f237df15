//! Loading the trained artifact bundle.
//!
//! A bundle directory holds three files produced by the training pipeline:
//! the regression model, the fitted scaler, and the ordered feature column
//! list. All three load once at startup; any missing or inconsistent
//! artifact is a fatal error, never a partial fallback.

use crate::align::FeatureAligner;
use crate::error::{ConsumoError, Result};
use crate::model::{EvalMetrics, UsageModel};
use crate::preprocessing::StandardScaler;
use crate::record::CustomerRecord;
use crate::schema::FeatureSchema;
use std::path::{Path, PathBuf};

/// Model artifact filename.
pub const MODEL_FILE: &str = "usage_model.safetensors";
/// Scaler artifact filename.
pub const SCALER_FILE: &str = "scaler.safetensors";
/// Feature column list filename.
pub const COLUMNS_FILE: &str = "columns.json";

/// The three artifact paths under one bundle directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Regression model weights and metadata.
    pub model: PathBuf,
    /// Fitted standardization parameters.
    pub scaler: PathBuf,
    /// Ordered feature column names.
    pub columns: PathBuf,
}

impl ArtifactPaths {
    /// Resolves the three artifact paths under `dir`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            scaler: dir.join(SCALER_FILE),
            columns: dir.join(COLUMNS_FILE),
        }
    }

    /// Verifies all three files exist.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactMissing` naming the first absent file.
    pub fn ensure_exist(&self) -> Result<()> {
        for path in [&self.columns, &self.scaler, &self.model] {
            if !path.is_file() {
                return Err(ConsumoError::ArtifactMissing { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// A fully loaded, mutually consistent model artifact set.
///
/// # Examples
///
/// ```no_run
/// use consumo::bundle::ModelBundle;
/// use consumo::record::CustomerRecord;
///
/// let bundle = ModelBundle::load("artifacts")?;
/// let gb = bundle.predict(&CustomerRecord::default())?;
/// println!("predicted usage: {gb:.2} GB");
/// # Ok::<(), consumo::error::ConsumoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ModelBundle {
    model: UsageModel,
    scaler: StandardScaler,
    schema: FeatureSchema,
}

impl ModelBundle {
    /// Loads and cross-validates the three artifacts under `dir`.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactMissing` for an absent file, a format error for a
    /// corrupt one, and `DimensionMismatch` when the model, scaler, and
    /// column list disagree on feature count.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let paths = ArtifactPaths::new(dir);
        paths.ensure_exist()?;

        let schema = FeatureSchema::load_json(&paths.columns)?;
        let scaler = StandardScaler::load_safetensors(&paths.scaler)?;
        let model = UsageModel::load_safetensors(&paths.model)?;

        if model.n_features() != schema.len() {
            return Err(ConsumoError::dimension_mismatch(
                "model coefficients",
                schema.len(),
                model.n_features(),
            ));
        }
        if scaler.n_features() != schema.len() {
            return Err(ConsumoError::dimension_mismatch(
                "scaler features",
                schema.len(),
                scaler.n_features(),
            ));
        }

        Ok(Self {
            model,
            scaler,
            schema,
        })
    }

    /// The loaded regression model.
    #[must_use]
    pub fn model(&self) -> &UsageModel {
        &self.model
    }

    /// The loaded scaler.
    #[must_use]
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// The loaded feature schema.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Feature count shared by all three artifacts.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.schema.len()
    }

    /// Evaluation metrics carried in the model artifact, if any.
    #[must_use]
    pub fn metrics(&self) -> Option<EvalMetrics> {
        self.model.metrics()
    }

    /// An aligner over this bundle's schema and scaler.
    ///
    /// # Errors
    ///
    /// Cannot fail for a bundle built by `load`, which already verified the
    /// widths agree.
    pub fn aligner(&self) -> Result<FeatureAligner<'_>> {
        FeatureAligner::new(&self.schema, &self.scaler)
    }

    /// Aligns one record and runs the model on it.
    ///
    /// # Errors
    ///
    /// Propagates alignment and inference failures.
    pub fn predict(&self, record: &CustomerRecord) -> Result<f32> {
        let aligned = self.aligner()?.align(record)?;
        self.model.predict_one(&aligned)
    }

    /// Coefficients named per schema column, sorted by descending magnitude.
    ///
    /// # Errors
    ///
    /// Cannot fail for a bundle built by `load`.
    pub fn ranked_coefficients(&self) -> Result<Vec<(String, f32)>> {
        self.model.ranked_coefficients(&self.schema)
    }
}
