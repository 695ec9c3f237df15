//! Init command implementation
//!
//! Writes the demonstration artifact bundle so the dashboard runs out of the
//! box. Refuses to clobber an existing bundle unless forced.

use crate::error::{CliError, Result};
use crate::output;
use consumo::bundle::ArtifactPaths;
use consumo::demo::{write_demo_bundle, DemoVariant};
use std::fs;
use std::path::Path;

/// Run the init command
pub(crate) fn run(dir: &Path, variant: &str, force: bool) -> Result<()> {
    let variant = parse_variant(variant)?;

    let paths = ArtifactPaths::new(dir);
    if !force {
        for path in [&paths.columns, &paths.scaler, &paths.model] {
            if path.exists() {
                return Err(CliError::AlreadyExists(path.clone()));
            }
        }
    }

    let paths = write_demo_bundle(dir, variant)?;

    output::section("Demo Bundle");
    output::kv("Directory", dir.display());
    output::kv("Variant", variant_name(variant));
    output::kv("Features", variant.n_features());
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
    output::success("Bundle written; run `consumo dashboard` to use it.");
    Ok(())
}

fn parse_variant(s: &str) -> Result<DemoVariant> {
    match s.to_ascii_lowercase().as_str() {
        "core" => Ok(DemoVariant::Core),
        "payment" => Ok(DemoVariant::Payment),
        other => Err(CliError::InvalidInput(format!(
            "Unknown variant: {other} (expected core or payment)"
        ))),
    }
}

fn variant_name(variant: DemoVariant) -> &'static str {
    match variant {
        DemoVariant::Core => "core",
        DemoVariant::Payment => "payment",
    }
}
