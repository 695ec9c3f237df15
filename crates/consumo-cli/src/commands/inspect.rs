//! Inspect command implementation
//!
//! Summarize an artifact bundle: file sizes, schema, model shape, scaler
//! parameters, metrics, and the ranked coefficient table.

use crate::commands::predict::validate_dir;
use crate::error::{CliError, Result};
use crate::output;
use consumo::bundle::{ArtifactPaths, ModelBundle};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Bundle inspection result for JSON output
#[derive(Serialize)]
struct InspectReport {
    directory: String,
    n_features: usize,
    columns: Vec<String>,
    intercept: f32,
    models_payment_method: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    r_squared: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjusted_r_squared: Option<f32>,
    coefficients: Vec<CoefficientEntry>,
}

#[derive(Serialize)]
struct CoefficientEntry {
    column: String,
    coefficient: f32,
}

/// Run the inspect command
pub(crate) fn run(dir: &Path, json_output: bool) -> Result<()> {
    validate_dir(dir)?;
    let bundle = ModelBundle::load(dir)?;
    let ranked = bundle.ranked_coefficients()?;
    let metrics = bundle.metrics();

    if json_output {
        let report = InspectReport {
            directory: dir.display().to_string(),
            n_features: bundle.n_features(),
            columns: bundle.schema().columns().to_vec(),
            intercept: bundle.model().intercept(),
            models_payment_method: bundle.schema().has_field("payment_method"),
            r_squared: metrics.map(|m| m.r_squared),
            adjusted_r_squared: metrics.map(|m| m.adjusted_r_squared),
            coefficients: ranked
                .into_iter()
                .map(|(column, coefficient)| CoefficientEntry {
                    column,
                    coefficient,
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Consumo(format!("JSON serialization failed: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    output::section("Artifacts");
    let paths = ArtifactPaths::new(dir);
    for path in [&paths.columns, &paths.scaler, &paths.model] {
        let size = fs::metadata(path)?.len();
        output::kv(
            &path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            output::format_size(size),
        );
    }

    output::section("Schema");
    output::kv("Features", bundle.n_features());
    output::kv(
        "Payment method modeled",
        bundle.schema().has_field("payment_method"),
    );

    output::section("Model");
    output::kv("Coefficients", bundle.model().n_features());
    output::kv("Intercept", format!("{:.4}", bundle.model().intercept()));
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

    output::section("Coefficients (by |value|)");
    let width = ranked.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
    for (column, coefficient) in &ranked {
        println!("  {column:<width$}  {coefficient:>8.4}");
    }

    Ok(())
}
