//! Built-in demonstration artifacts.
//!
//! Writes a complete, mutually consistent bundle with illustrative weights
//! so the dashboard runs without access to the real training pipeline. Two
//! variants exist because deployed bundles differ: the core variant models
//! twelve form fields, the payment variant adds the payment method as a
//! thirteenth. Consumers must take the column list from the bundle, never
//! assume one variant.

use crate::bundle::ArtifactPaths;
use crate::error::Result;
use crate::model::{EvalMetrics, UsageModel};
use crate::preprocessing::StandardScaler;
use crate::primitives::Vector;
use crate::schema::FeatureSchema;
use std::fs;
use std::path::Path;

/// Which demonstration bundle to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoVariant {
    /// Twelve form fields, 20 feature columns.
    Core,
    /// Core plus payment method, 24 feature columns.
    Payment,
}

/// Per-column (name, coefficient, mean, std) for the core variant, in
/// training column order: numerics first, then each categorical's
/// indicators in value-sorted order.
const CORE_FEATURES: [(&str, f32, f32, f32); 20] = [
    ("customer_age", -0.35, 38.0, 14.0),
    ("monthly_recharge", 2.10, 1200.0, 850.0),
    ("call_minutes", 0.45, 600.0, 450.0),
    ("sms_count", -0.12, 120.0, 160.0),
    ("support_calls", -0.25, 2.5, 2.2),
    ("internet_speed_mbps", 1.60, 74.0, 66.0),
    ("roaming_usage_gb", 0.85, 2.4, 4.8),
    ("tenure_months", 0.30, 36.0, 30.0),
    ("device_type_Android", 0.40, 0.62, 0.485),
    ("device_type_Other", -0.55, 0.08, 0.271),
    ("device_type_iOS", 0.65, 0.30, 0.458),
    ("plan_type_Postpaid", 0.75, 0.45, 0.497),
    ("plan_type_Prepaid", -0.20, 0.55, 0.497),
    ("network_type_3G", -0.90, 0.18, 0.384),
    ("network_type_4G", 0.25, 0.55, 0.497),
    ("network_type_5G", 1.20, 0.27, 0.444),
    ("region_East", -0.15, 0.24, 0.427),
    ("region_North", 0.10, 0.28, 0.449),
    ("region_South", 0.20, 0.26, 0.439),
    ("region_West", -0.05, 0.22, 0.414),
];

/// Columns the payment variant appends after the core set.
const PAYMENT_FEATURES: [(&str, f32, f32, f32); 4] = [
    ("payment_method_Card", 0.18, 0.30, 0.458),
    ("payment_method_Cash", -0.30, 0.15, 0.357),
    ("payment_method_UPI", 0.22, 0.40, 0.490),
    ("payment_method_Wallet", 0.05, 0.15, 0.357),
];

const INTERCEPT_GB: f32 = 18.2;
const R_SQUARED: f32 = 0.61;
const ADJUSTED_R_SQUARED: f32 = 0.58;

impl DemoVariant {
    /// Feature rows for this variant, in schema order.
    fn features(self) -> Vec<(&'static str, f32, f32, f32)> {
        let mut rows: Vec<_> = CORE_FEATURES.to_vec();
        if self == DemoVariant::Payment {
            rows.extend_from_slice(&PAYMENT_FEATURES);
        }
        rows
    }

    /// Column names for this variant, in schema order.
    #[must_use]
    pub fn columns(self) -> Vec<String> {
        self.features()
            .into_iter()
            .map(|(name, _, _, _)| name.to_string())
            .collect()
    }

    /// Feature count of this variant.
    #[must_use]
    pub fn n_features(self) -> usize {
        match self {
            DemoVariant::Core => CORE_FEATURES.len(),
            DemoVariant::Payment => CORE_FEATURES.len() + PAYMENT_FEATURES.len(),
        }
    }
}

/// Writes a full demonstration bundle under `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any artifact
/// cannot be written.
///
/// # Examples
///
/// ```
/// use consumo::bundle::ModelBundle;
/// use consumo::demo::{write_demo_bundle, DemoVariant};
///
/// let dir = tempfile::tempdir()?;
/// write_demo_bundle(dir.path(), DemoVariant::Core)?;
/// let bundle = ModelBundle::load(dir.path())?;
/// assert_eq!(bundle.n_features(), 20);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_demo_bundle<P: AsRef<Path>>(dir: P, variant: DemoVariant) -> Result<ArtifactPaths> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let paths = ArtifactPaths::new(dir);

    let rows = variant.features();
    let columns: Vec<String> = rows.iter().map(|(name, _, _, _)| (*name).to_string()).collect();
    let coefficients: Vec<f32> = rows.iter().map(|(_, coef, _, _)| *coef).collect();
    let mean: Vec<f32> = rows.iter().map(|(_, _, mean, _)| *mean).collect();
    let std: Vec<f32> = rows.iter().map(|(_, _, _, std)| *std).collect();

    FeatureSchema::from_columns(columns)?.save_json(&paths.columns)?;
    StandardScaler::from_params(mean, std)?.save_safetensors(&paths.scaler)?;
    UsageModel::from_params(Vector::from_vec(coefficients), INTERCEPT_GB)?
        .with_metrics(EvalMetrics {
            r_squared: R_SQUARED,
            adjusted_r_squared: ADJUSTED_R_SQUARED,
        })
        .save_safetensors(&paths.model)?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::ModelBundle;
    use crate::record::{CustomerRecord, NetworkType, PaymentMethod};
    use tempfile::TempDir;

    fn canonical_record() -> CustomerRecord {
        let mut record = CustomerRecord::default();
        record.internet_speed_mbps = 100.0;
        record.network_type = NetworkType::FourG;
        record
    }

    #[test]
    fn test_variant_widths() {
        assert_eq!(DemoVariant::Core.n_features(), 20);
        assert_eq!(DemoVariant::Payment.n_features(), 24);
    }

    #[test]
    fn test_core_columns_have_no_payment() {
        let columns = DemoVariant::Core.columns();
        assert_eq!(columns[0], "customer_age");
        assert!(!columns.iter().any(|c| c.starts_with("payment_method_")));
    }

    #[test]
    fn test_payment_columns_extend_core() {
        let core = DemoVariant::Core.columns();
        let payment = DemoVariant::Payment.columns();
        assert_eq!(&payment[..core.len()], &core[..]);
        assert_eq!(payment[20], "payment_method_Card");
        assert_eq!(payment[23], "payment_method_Wallet");
    }

    #[test]
    fn test_written_bundle_loads() {
        let dir = TempDir::new().unwrap();
        write_demo_bundle(dir.path(), DemoVariant::Core).unwrap();

        let bundle = ModelBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.n_features(), 20);
        assert!(!bundle.schema().has_field("payment_method"));
    }

    #[test]
    fn test_written_bundle_carries_metrics() {
        let dir = TempDir::new().unwrap();
        write_demo_bundle(dir.path(), DemoVariant::Core).unwrap();

        let metrics = ModelBundle::load(dir.path()).unwrap().metrics().unwrap();
        assert!((metrics.r_squared - 0.61).abs() < 1e-6);
        assert!((metrics.adjusted_r_squared - 0.58).abs() < 1e-6);
    }

    #[test]
    fn test_canonical_record_prediction() {
        let dir = TempDir::new().unwrap();
        write_demo_bundle(dir.path(), DemoVariant::Core).unwrap();

        let bundle = ModelBundle::load(dir.path()).unwrap();
        let prediction = bundle.predict(&canonical_record()).unwrap();
        assert!(prediction >= 0.0);
        assert!((prediction - 16.0).abs() < 0.2);
    }

    #[test]
    fn test_payment_variant_uses_payment_field() {
        let dir = TempDir::new().unwrap();
        write_demo_bundle(dir.path(), DemoVariant::Payment).unwrap();
        let bundle = ModelBundle::load(dir.path()).unwrap();
        assert!(bundle.schema().has_field("payment_method"));

        let mut card = canonical_record();
        card.payment_method = PaymentMethod::Card;
        let mut cash = card.clone();
        cash.payment_method = PaymentMethod::Cash;

        let by_card = bundle.predict(&card).unwrap();
        let by_cash = bundle.predict(&cash).unwrap();
        assert!((by_card - by_cash).abs() > 1e-3);
    }

    #[test]
    fn test_core_variant_ignores_payment_field() {
        let dir = TempDir::new().unwrap();
        write_demo_bundle(dir.path(), DemoVariant::Core).unwrap();
        let bundle = ModelBundle::load(dir.path()).unwrap();

        let mut card = canonical_record();
        card.payment_method = PaymentMethod::Card;
        let mut cash = card.clone();
        cash.payment_method = PaymentMethod::Cash;

        assert_eq!(
            bundle.predict(&card).unwrap(),
            bundle.predict(&cash).unwrap()
        );
    }

    #[test]
    fn test_recharge_raises_prediction() {
        let dir = TempDir::new().unwrap();
        write_demo_bundle(dir.path(), DemoVariant::Core).unwrap();
        let bundle = ModelBundle::load(dir.path()).unwrap();

        let mut low = canonical_record();
        low.monthly_recharge = 100.0;
        let mut high = canonical_record();
        high.monthly_recharge = 5000.0;

        let at_low = bundle.predict(&low).unwrap();
        let at_high = bundle.predict(&high).unwrap();
        assert!(at_high > at_low);
        assert!(at_low >= 0.0);
        assert!(at_high >= 0.0);
    }
}
