//! Readiness trainer
//!
//! Fits the scaler + logistic regression pipeline on the embedded
//! reference set and writes the model artifact the predictor loads.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use readiness_lib::{dataset, ArtifactStore, Trainer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

/// Fit the learner readiness model and save it
#[derive(Parser)]
#[command(name = "readiness-train")]
#[command(author, version, about = "Train the learner readiness model", long_about = None)]
struct Cli {
    /// Artifact output path (overrides READINESS_ARTIFACT_PATH)
    #[arg(long)]
    artifact: Option<PathBuf>,
}

fn main() -> Result<()> {
    // JSON logs on stderr keep stdout for the confirmation
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config::TrainerConfig::load()?;

    let store = ArtifactStore::new(cli.artifact.unwrap_or(config.artifact_path.clone()));
    info!(
        artifact = %store.path().display(),
        regularization = config.regularization,
        "Training readiness model"
    );

    let report = Trainer::new(config.training())
        .train_and_save(dataset::reference_examples(), &store)
        .with_context(|| format!("Failed to train model into {}", store.path().display()))?;

    println!(
        "{} Model trained and saved successfully.",
        "✓".green().bold()
    );
    println!(
        "  path: {}\n  training accuracy: {:.2}%",
        report.artifact_path.display(),
        report.training_accuracy * 100.0
    );

    Ok(())
}
