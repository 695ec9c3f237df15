//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use consumo::prelude::*;
//! ```

pub use crate::align::FeatureAligner;
pub use crate::bundle::{ArtifactPaths, ModelBundle};
pub use crate::demo::{write_demo_bundle, DemoVariant};
pub use crate::diagnostics::DiagnosticSeries;
pub use crate::error::{ConsumoError, Result};
pub use crate::model::{EvalMetrics, UsageModel};
pub use crate::preprocessing::StandardScaler;
pub use crate::primitives::{Matrix, Vector};
pub use crate::record::{
    CustomerRecord, DeviceType, NetworkType, PaymentMethod, PlanType, Region,
};
pub use crate::schema::FeatureSchema;
