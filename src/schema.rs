//! Feature schema: the ordered column list a trained model expects.
//!
//! The schema is external data loaded from `columns.json` (a bare JSON array
//! of column names). Alignment, prediction, and the dashboard all consult it;
//! nothing in this crate hardcodes a column list. Categorical fields appear
//! as indicator columns named `<field>_<value>` (e.g. `plan_type_Prepaid`).

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Ordered feature column names, read-only after construction.
///
/// # Examples
///
/// ```
/// use consumo::schema::FeatureSchema;
///
/// let schema = FeatureSchema::from_columns(vec![
///     "customer_age".to_string(),
///     "plan_type_Prepaid".to_string(),
/// ])
/// .expect("valid columns");
/// assert_eq!(schema.len(), 2);
/// assert!(schema.has_field("plan_type"));
/// assert!(!schema.has_field("payment_method"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Creates a schema from an ordered column list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, contains an empty name, or
    /// contains duplicates.
    pub fn from_columns(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err("Schema must have at least one column".into());
        }

        for name in &columns {
            if name.is_empty() {
                return Err("Column names cannot be empty".into());
            }
        }

        let mut names: Vec<&str> = columns.iter().map(String::as_str).collect();
        names.sort_unstable();
        for i in 1..names.len() {
            if names[i] == names[i - 1] {
                return Err("Duplicate column names not allowed".into());
            }
        }

        Ok(Self { columns })
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns (never true post-construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the ordered column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the position of a column, if present.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns true if any column belongs to `field`: either the numeric
    /// column itself or an indicator column `<field>_<value>`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        let prefix = format!("{field}_");
        self.columns
            .iter()
            .any(|c| c == field || c.starts_with(&prefix))
    }

    /// Iterates over the column names in schema order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.columns.iter()
    }

    /// Loads a schema from a JSON file holding a bare array of names.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, the JSON is not a string array,
    /// or the column list is invalid.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let columns: Vec<String> = serde_json::from_str(&contents)
            .map_err(|e| crate::error::ConsumoError::Serialization(format!(
                "column list parsing failed: {e}"
            )))?;
        Self::from_columns(columns)
    }

    /// Saves the schema as a JSON array of names.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.columns)
            .map_err(|e| crate::error::ConsumoError::Serialization(format!(
                "column list encoding failed: {e}"
            )))?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FeatureSchema {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
