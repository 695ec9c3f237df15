//! Feature alignment: from a customer record to the model's input vector.
//!
//! The contract mirrors the training pipeline exactly: one-hot expand the
//! categorical fields (`<field>_<value>` naming), merge the numerics, reindex
//! against the schema (zero-fill what the record lacks, drop what the schema
//! lacks), then standardize with the fitted scaler. Column order is the
//! schema's, always.
//!
//! A categorical value the schema never saw produces no matching indicator
//! column, so every indicator of that field stays zero after reindexing.
//! That silent fallback is part of the model's semantics and is preserved
//! here deliberately; changing it would change predictions.

use crate::error::{ConsumoError, Result};
use crate::preprocessing::StandardScaler;
use crate::primitives::{Matrix, Vector};
use crate::record::CustomerRecord;
use crate::schema::FeatureSchema;
use std::collections::HashMap;

/// Expands a record into named columns: numerics under their field names,
/// the selected category of each categorical field as `<field>_<value>` = 1.
///
/// Only selected categories appear; absent indicators are implied zeros and
/// materialize during reindexing.
#[must_use]
pub fn expand_record(record: &CustomerRecord) -> Vec<(String, f32)> {
    let mut columns: Vec<(String, f32)> = record
        .numeric_fields()
        .iter()
        .map(|(name, value)| ((*name).to_string(), *value))
        .collect();

    for (field, value) in record.categorical_fields() {
        columns.push((format!("{field}_{value}"), 1.0));
    }

    columns
}

/// Aligns customer records to a model's feature schema.
///
/// Borrows the bundle's read-only parts; construction verifies the schema
/// and scaler agree on width so every later `align` can only fail on a
/// genuine artifact inconsistency.
///
/// # Examples
///
/// ```
/// use consumo::align::FeatureAligner;
/// use consumo::preprocessing::StandardScaler;
/// use consumo::record::CustomerRecord;
/// use consumo::schema::FeatureSchema;
///
/// let schema = FeatureSchema::from_columns(vec![
///     "customer_age".to_string(),
///     "plan_type_Prepaid".to_string(),
/// ])
/// .unwrap();
/// let scaler = StandardScaler::from_params(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
/// let aligner = FeatureAligner::new(&schema, &scaler).unwrap();
///
/// let aligned = aligner.align(&CustomerRecord::default()).unwrap();
/// assert_eq!(aligned.len(), schema.len());
/// ```
#[derive(Debug)]
pub struct FeatureAligner<'a> {
    schema: &'a FeatureSchema,
    scaler: &'a StandardScaler,
}

impl<'a> FeatureAligner<'a> {
    /// Creates an aligner over a schema and its matching scaler.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the scaler was fitted on a different
    /// column count than the schema describes.
    pub fn new(schema: &'a FeatureSchema, scaler: &'a StandardScaler) -> Result<Self> {
        if schema.len() != scaler.n_features() {
            return Err(ConsumoError::dimension_mismatch(
                "schema columns",
                schema.len(),
                scaler.n_features(),
            ));
        }
        Ok(Self { schema, scaler })
    }

    /// The schema this aligner targets.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        self.schema
    }

    /// Maps one record to the model's scaled input vector.
    ///
    /// The output has one entry per schema column, in schema order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the scaler rejects the reindexed row, which
    /// indicates inconsistent artifacts rather than bad input.
    pub fn align(&self, record: &CustomerRecord) -> Result<Vector> {
        let reindexed = self.reindex(record);
        let scaled = self.scaler.transform(&Matrix::from_row(&reindexed))?;
        Ok(scaled.row(0))
    }

    /// Expands and reindexes without scaling (the raw 0/1-and-numerics row).
    #[must_use]
    pub fn reindex(&self, record: &CustomerRecord) -> Vector {
        let expanded: HashMap<String, f32> = expand_record(record).into_iter().collect();

        let values: Vec<f32> = self
            .schema
            .iter()
            .map(|column| expanded.get(column).copied().unwrap_or(0.0))
            .collect();

        Vector::from_vec(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DeviceType, PaymentMethod, Region};

    fn schema(names: &[&str]) -> FeatureSchema {
        FeatureSchema::from_columns(names.iter().map(|s| (*s).to_string()).collect()).unwrap()
    }

    fn identity_scaler(n: usize) -> StandardScaler {
        StandardScaler::from_params(vec![0.0; n], vec![1.0; n]).unwrap()
    }

    fn small_schema() -> FeatureSchema {
        schema(&[
            "customer_age",
            "roaming_usage_gb",
            "device_type_Android",
            "device_type_iOS",
            "region_North",
            "region_South",
        ])
    }

    #[test]
    fn test_expand_contains_numerics_and_selected_indicators() {
        let record = CustomerRecord::default();
        let expanded = expand_record(&record);

        assert_eq!(expanded.len(), 13);
        assert!(expanded.contains(&("customer_age".to_string(), 30.0)));
        assert!(expanded.contains(&("device_type_Android".to_string(), 1.0)));
        assert!(expanded.contains(&("plan_type_Prepaid".to_string(), 1.0)));
        // Unselected categories are not present at all.
        assert!(!expanded.iter().any(|(n, _)| n == "plan_type_Postpaid"));
    }

    #[test]
    fn test_align_length_and_order() {
        let schema = small_schema();
        let scaler = identity_scaler(schema.len());
        let aligner = FeatureAligner::new(&schema, &scaler).unwrap();

        let mut record = CustomerRecord::default();
        record.customer_age = 42.0;
        record.roaming_usage_gb = 2.5;
        record.device_type = DeviceType::Ios;
        record.region = Region::North;

        let aligned = aligner.align(&record).unwrap();
        assert_eq!(aligned.len(), schema.len());
        assert_eq!(aligned.as_slice(), &[42.0, 2.5, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_align_zero_fills_missing_indicators() {
        let schema = small_schema();
        let scaler = identity_scaler(schema.len());
        let aligner = FeatureAligner::new(&schema, &scaler).unwrap();

        let mut record = CustomerRecord::default();
        record.region = Region::South;

        let aligned = aligner.align(&record).unwrap();
        assert_eq!(aligned[4], 0.0);
        assert_eq!(aligned[5], 1.0);
    }

    #[test]
    fn test_align_drops_columns_outside_schema() {
        // No payment_method columns in the schema: the record's payment
        // choice must not influence the output.
        let schema = small_schema();
        let scaler = identity_scaler(schema.len());
        let aligner = FeatureAligner::new(&schema, &scaler).unwrap();

        let mut with_card = CustomerRecord::default();
        with_card.payment_method = PaymentMethod::Card;
        let mut with_cash = with_card.clone();
        with_cash.payment_method = PaymentMethod::Cash;

        assert_eq!(
            aligner.align(&with_card).unwrap(),
            aligner.align(&with_cash).unwrap()
        );
    }

    #[test]
    fn test_unseen_category_yields_all_zero_indicators() {
        // The schema knows Android and iOS but not Other: selecting Other
        // must behave as "none of the known devices".
        let schema = small_schema();
        let scaler = identity_scaler(schema.len());
        let aligner = FeatureAligner::new(&schema, &scaler).unwrap();

        let mut record = CustomerRecord::default();
        record.device_type = DeviceType::Other;

        let aligned = aligner.align(&record).unwrap();
        assert_eq!(aligned[2], 0.0);
        assert_eq!(aligned[3], 0.0);
    }

    #[test]
    fn test_align_is_deterministic() {
        let schema = small_schema();
        let scaler = identity_scaler(schema.len());
        let aligner = FeatureAligner::new(&schema, &scaler).unwrap();

        let record = CustomerRecord::default();
        let first = aligner.align(&record).unwrap();
        let second = aligner.align(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_align_applies_scaler() {
        let schema = schema(&["customer_age", "device_type_Android"]);
        let scaler = StandardScaler::from_params(vec![30.0, 0.5], vec![10.0, 0.5]).unwrap();
        let aligner = FeatureAligner::new(&schema, &scaler).unwrap();

        let mut record = CustomerRecord::default();
        record.customer_age = 40.0;

        let aligned = aligner.align(&record).unwrap();
        assert_eq!(aligned.as_slice(), &[1.0, 1.0]);
    }

    #[test]
    fn test_new_rejects_width_disagreement() {
        let schema = small_schema();
        let scaler = identity_scaler(schema.len() + 1);
        assert!(FeatureAligner::new(&schema, &scaler).is_err());
    }
}
