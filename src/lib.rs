//! Consumo: monthly data usage prediction for telecom customers.
//!
//! Consumo loads a trained linear regression artifact bundle (model weights,
//! fitted scaler, ordered feature columns), aligns typed customer records to
//! the bundle's feature schema, and produces single-record predictions with
//! the evaluation metrics and coefficient rankings a dashboard presents.
//!
//! # Quick Start
//!
//! ```
//! use consumo::prelude::*;
//!
//! // Write the demonstration artifacts, then load them the way a real
//! // deployment loads its trained bundle.
//! let dir = tempfile::tempdir().unwrap();
//! write_demo_bundle(dir.path(), DemoVariant::Core).unwrap();
//! let bundle = ModelBundle::load(dir.path()).unwrap();
//!
//! // Predict monthly data usage for one customer.
//! let mut record = CustomerRecord::default();
//! record.monthly_recharge = 1500.0;
//! record.network_type = NetworkType::FourG;
//! let gb = bundle.predict(&record).unwrap();
//! assert!(gb >= 0.0);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`record`]: Typed customer records and form field bounds
//! - [`schema`]: Ordered feature column lists
//! - [`align`]: One-hot expansion and schema alignment
//! - [`preprocessing`]: Fitted standardization (StandardScaler)
//! - [`model`]: Linear regression inference and coefficient ranking
//! - [`bundle`]: Artifact bundle loading and cross-validation
//! - [`diagnostics`]: Synthetic residual series for dashboard charts
//! - [`demo`]: Built-in demonstration artifacts
//! - [`serialization`]: SafeTensors reading and writing

pub mod align;
pub mod bundle;
pub mod demo;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod record;
pub mod schema;
pub mod serialization;

pub use error::{ConsumoError, Result};
pub use primitives::{Matrix, Vector};
