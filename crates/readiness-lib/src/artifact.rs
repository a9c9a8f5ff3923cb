//! Model artifact persistence
//!
//! The fitted pipeline is stored as a small versioned JSON record with a
//! SHA256 checksum over its parameters. Writes go to a temp file first and
//! are renamed into place, so readers see either the old or the new model.

use crate::error::ArtifactError;
use crate::models::FEATURE_NAMES;
use crate::pipeline::Pipeline;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current artifact schema version
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// File name used when no artifact path is configured
pub const DEFAULT_ARTIFACT_FILE: &str = "readiness-model.json";

/// Provenance recorded alongside the parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Unix timestamp of the training run
    pub trained_at: i64,
    pub examples: usize,
    pub training_accuracy: f64,
    pub feature_names: Vec<String>,
}

impl ArtifactMetadata {
    pub fn new(examples: usize, training_accuracy: f64) -> Self {
        Self {
            trained_at: chrono::Utc::now().timestamp(),
            examples,
            training_accuracy,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// On-disk form of a fitted pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub checksum: String,
    pub metadata: ArtifactMetadata,
    pub pipeline: Pipeline,
}

impl ModelArtifact {
    pub fn new(pipeline: Pipeline, metadata: ArtifactMetadata) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            checksum: compute_checksum(&pipeline),
            metadata,
            pipeline,
        }
    }

    /// Check version, checksum and parameter sanity
    pub fn verify(&self) -> Result<(), ArtifactError> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        let actual = compute_checksum(&self.pipeline);
        if actual != self.checksum {
            return Err(ArtifactError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        if self.metadata.feature_names != FEATURE_NAMES {
            return Err(ArtifactError::InvalidParameters(format!(
                "feature order {:?} does not match {:?}",
                self.metadata.feature_names, FEATURE_NAMES
            )));
        }

        self.pipeline.validate().map_err(ArtifactError::InvalidParameters)
    }
}

/// Handle to the artifact location shared by trainer and predictor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `readiness-model.json` next to the running executable, or in the
    /// working directory if the executable location is unknown
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_ARTIFACT_FILE)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, parse and verify the artifact
    pub fn load(&self) -> Result<ModelArtifact, ArtifactError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ArtifactError::Missing(self.path.clone()),
            _ => self.io_error(e),
        })?;

        let artifact: ModelArtifact = serde_json::from_slice(&bytes)?;
        artifact.verify()?;

        debug!(
            path = %self.path.display(),
            checksum = %artifact.checksum,
            trained_at = artifact.metadata.trained_at,
            "Loaded model artifact"
        );
        Ok(artifact)
    }

    /// Write the artifact, replacing any previous one
    pub fn save(&self, artifact: &ModelArtifact) -> Result<(), ArtifactError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_vec_pretty(artifact)?;

        // Write to temp file first
        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(&content).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;

        // Rename to final path
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), bytes = content.len(), "Wrote model artifact");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> ArtifactError {
        ArtifactError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// SHA256 over the little-endian bit patterns of the pipeline parameters
pub fn compute_checksum(pipeline: &Pipeline) -> String {
    let mut hasher = Sha256::new();
    for value in pipeline.parameters() {
        hasher.update(value.to_bits().to_le_bytes());
    }
    hex::encode(hasher.finalize())
}
