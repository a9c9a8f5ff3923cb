//! Learner readiness predictor
//!
//! Usage: `readiness-predict <averageScore> <difficultyLevel>`
//!
//! Writes exactly one `<label>,<confidence>` line to stdout and always exits
//! 0. Every failure, from a bad argument to a missing model, prints `0,0`.
//! Diagnostics go to stderr as JSON and are off unless `RUST_LOG` is set.

mod config;

use clap::Parser;
use readiness_lib::{ArtifactStore, PredictError, PredictionOutput, ReadinessLogger, ReadinessPredictor};
use std::io::Write;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Classify learner readiness from an average score and difficulty level
#[derive(Parser)]
#[command(name = "readiness-predict")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// averageScore (0-10) followed by difficultyLevel (1-3)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub inputs: Vec<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();

    // Panics are caught and reported as the failure token; keep the default
    // hook from writing to stderr.
    std::panic::set_hook(Box::new(|info| {
        error!(event = "panic", details = %info, "Panic during prediction");
    }));

    // clap swallows a leading `--`; the raw count is what must be exactly two
    let raw_count = std::env::args_os().skip(1).count();

    let output = match Cli::try_parse() {
        Ok(cli) if cli.inputs.len() != raw_count => {
            ReadinessLogger::new("predictor")
                .log_prediction_failed(&PredictError::ArgumentCount { actual: raw_count });
            PredictionOutput::Failure
        }
        Ok(cli) => {
            let config = config::PredictorConfig::load();
            ReadinessPredictor::new(ArtifactStore::new(config.artifact_path)).respond(cli.inputs.as_slice())
        }
        Err(e) => {
            // Only non UTF-8 arguments get here
            ReadinessLogger::new("predictor").log_prediction_failed(&PredictError::Parse {
                field: "arguments",
                raw: e.kind().to_string(),
            });
            PredictionOutput::Failure
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", output).and_then(|_| stdout.flush()) {
        error!(error = %e, "Failed to write prediction");
    }
}
