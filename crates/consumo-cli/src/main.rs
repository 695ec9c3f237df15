//! consumo - Data Usage Prediction CLI
//!
//! Predict monthly data usage for telecom customers from saved model
//! artifacts, on the command line or in an interactive dashboard.
//!
//! Usage:
//!   consumo init --artifacts ./artifacts           # Write a demo bundle
//!   consumo dashboard --artifacts ./artifacts      # Interactive dashboard
//!   consumo predict --artifacts ./artifacts        # Predict with form defaults
//!   consumo predict --recharge 1500 --network 5G   # Predict with overrides
//!   consumo inspect --artifacts ./artifacts        # Show bundle contents
//!   consumo inspect --json                         # Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod output;
mod tui;

use commands::{dashboard, init, inspect, predict};

/// consumo - Data Usage Prediction Tool
///
/// Load a trained usage model with its scaler and feature columns, and
/// predict monthly data usage for one customer at a time.
#[derive(Parser)]
#[command(name = "consumo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the model, scaler, and column artifacts
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    artifacts: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard (form, coefficients, diagnostics)
    Dashboard,

    /// Predict usage for one customer described by flags
    Predict {
        #[command(flatten)]
        record: predict::RecordArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show bundle schema, metrics, and ranked coefficients
    Inspect {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a synthetic demo bundle into the artifacts directory
    Init {
        /// Bundle variant: core, or payment (adds payment_method columns)
        #[arg(long, default_value = "core")]
        variant: String,

        /// Overwrite existing artifact files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dashboard => dashboard::run(&cli.artifacts),

        Commands::Predict { record, json } => {
            predict::run(&cli.artifacts, &record, json || cli.json)
        }

        Commands::Inspect { json } => inspect::run(&cli.artifacts, json || cli.json),

        Commands::Init { variant, force } => init::run(&cli.artifacts, &variant, force),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
