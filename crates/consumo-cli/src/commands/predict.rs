//! Predict command implementation
//!
//! One-shot prediction: build a customer record from flags, align it against
//! the loaded bundle, run the model, and report the result.

use crate::error::{CliError, Result};
use crate::output;
use clap::Args;
use consumo::bundle::ModelBundle;
use consumo::record::CustomerRecord;
use serde::Serialize;
use std::path::Path;

/// Customer attribute flags, defaulting to the dashboard form defaults.
/// Out-of-range numerics clamp to the field bounds; the speed snaps to the
/// nearest choice.
#[derive(Args, Debug)]
pub(crate) struct RecordArgs {
    /// Customer age (18-80)
    #[arg(long, default_value_t = 30.0)]
    age: f32,

    /// Tenure in months (1-120)
    #[arg(long, default_value_t = 12.0)]
    tenure: f32,

    /// Monthly recharge amount (100-5000)
    #[arg(long, default_value_t = 500.0)]
    recharge: f32,

    /// Call minutes per month (0-3000)
    #[arg(long, default_value_t = 300.0)]
    calls: f32,

    /// SMS count per month (0-1000)
    #[arg(long, default_value_t = 50.0)]
    sms: f32,

    /// Support calls per month (0-20)
    #[arg(long, default_value_t = 1.0)]
    support: f32,

    /// Internet speed in Mbps (10, 20, 40, 100, 200)
    #[arg(long, default_value_t = 10.0)]
    speed: f32,

    /// Roaming usage in GB (0-50)
    #[arg(long, default_value_t = 1.0)]
    roaming: f32,

    /// Device type: Android, iOS, Other
    #[arg(long, default_value = "Android")]
    device: String,

    /// Plan type: Prepaid, Postpaid
    #[arg(long, default_value = "Prepaid")]
    plan: String,

    /// Network type: 3G, 4G, 5G
    #[arg(long, default_value = "3G")]
    network: String,

    /// Region: North, South, East, West
    #[arg(long, default_value = "North")]
    region: String,

    /// Payment method: UPI, Card, Wallet, Cash
    #[arg(long, default_value = "UPI")]
    payment: String,
}

impl RecordArgs {
    /// Parse the categorical flags and assemble a clamped record.
    pub(crate) fn to_record(&self) -> Result<CustomerRecord> {
        let mut record = CustomerRecord {
            customer_age: self.age,
            tenure_months: self.tenure,
            monthly_recharge: self.recharge,
            call_minutes: self.calls,
            sms_count: self.sms,
            support_calls: self.support,
            internet_speed_mbps: self.speed,
            roaming_usage_gb: self.roaming,
            device_type: self.device.parse().map_err(CliError::InvalidInput)?,
            plan_type: self.plan.parse().map_err(CliError::InvalidInput)?,
            network_type: self.network.parse().map_err(CliError::InvalidInput)?,
            region: self.region.parse().map_err(CliError::InvalidInput)?,
            payment_method: self.payment.parse().map_err(CliError::InvalidInput)?,
        };
        record = record.clamped();
        Ok(record)
    }
}

/// Prediction report for JSON output
#[derive(Serialize)]
struct PredictReport {
    prediction_gb: f32,
    negative: bool,
    n_features: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    r_squared: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjusted_r_squared: Option<f32>,
}

/// Run the predict command
pub(crate) fn run(dir: &Path, args: &RecordArgs, json_output: bool) -> Result<()> {
    validate_dir(dir)?;
    let bundle = ModelBundle::load(dir)?;
    let record = args.to_record()?;
    let prediction = bundle.predict(&record)?;
    let metrics = bundle.metrics();

    if json_output {
        let report = PredictReport {
            prediction_gb: prediction,
            negative: prediction < 0.0,
            n_features: bundle.n_features(),
            r_squared: metrics.map(|m| m.r_squared),
            adjusted_r_squared: metrics.map(|m| m.adjusted_r_squared),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Consumo(format!("JSON serialization failed: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    output::section("Prediction");
    output::kv("Artifacts", dir.display());
    output::kv("Features", bundle.n_features());
    output::kv("Monthly data usage", output::format_gb(prediction));
    if prediction < 0.0 {
        output::warning("Predicted usage is below zero; the linear model is not constrained to non-negative values.");
    }

    output::section("Model Performance");
    match metrics {
        Some(m) => {
            output::kv("R²", format!("{:.2}", m.r_squared));
            output::kv("Adjusted R²", format!("{:.2}", m.adjusted_r_squared));
        }
        None => {
            output::kv("R²", "n/a");
            output::kv("Adjusted R²", "n/a");
        }
    }

    Ok(())
}

pub(crate) fn validate_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(CliError::DirNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(CliError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use consumo::record::{DeviceType, NetworkType};

    fn default_args() -> RecordArgs {
        RecordArgs {
            age: 30.0,
            tenure: 12.0,
            recharge: 500.0,
            calls: 300.0,
            sms: 50.0,
            support: 1.0,
            speed: 10.0,
            roaming: 1.0,
            device: "Android".to_string(),
            plan: "Prepaid".to_string(),
            network: "3G".to_string(),
            region: "North".to_string(),
            payment: "UPI".to_string(),
        }
    }

    #[test]
    fn test_default_args_match_record_defaults() {
        let record = default_args().to_record().unwrap();
        assert_eq!(record, CustomerRecord::default());
    }

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        let mut args = default_args();
        args.device = "ios".to_string();
        args.network = "4g".to_string();
        let record = args.to_record().unwrap();
        assert_eq!(record.device_type, DeviceType::Ios);
        assert_eq!(record.network_type, NetworkType::FourG);
    }

    #[test]
    fn test_unknown_category_is_input_error() {
        let mut args = default_args();
        args.region = "Central".to_string();
        let err = default_args_err(args);
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert!(err.to_string().contains("Central"));
    }

    fn default_args_err(args: RecordArgs) -> CliError {
        args.to_record().unwrap_err()
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let mut args = default_args();
        args.age = 200.0;
        args.recharge = 10.0;
        args.speed = 55.0;
        let record = args.to_record().unwrap();
        assert_eq!(record.customer_age, 80.0);
        assert_eq!(record.monthly_recharge, 100.0);
        assert_eq!(record.internet_speed_mbps, 40.0);
    }

    #[test]
    fn test_validate_dir_rejects_missing() {
        let err = validate_dir(Path::new("/no/such/dir")).unwrap_err();
        assert!(matches!(err, CliError::DirNotFound(_)));
    }

    #[test]
    fn test_run_against_demo_bundle() {
        let dir = tempfile::TempDir::new().unwrap();
        consumo::demo::write_demo_bundle(dir.path(), consumo::demo::DemoVariant::Core).unwrap();
        run(dir.path(), &default_args(), false).unwrap();
        run(dir.path(), &default_args(), true).unwrap();
    }
}
