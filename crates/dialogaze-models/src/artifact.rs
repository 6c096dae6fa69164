// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Model artifact files.
//!
//! # Format
//! ```text
//! [Header]
//! - Magic: "DGAZE" (5 bytes)
//! - Version: u32 LE (4 bytes)
//! - Checksum: u64 LE (8 bytes, FNV-1a of payload)
//! [Payload]
//! - Bincode-serialized ModelArtifact
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    LinearClassifier, LinearMultiLabel, LinearRegressor, ModelLoadError, ModelSaveError, ShapeError,
};

/// Magic number for artifact files: "DGAZE"
pub const MAGIC: &[u8; 5] = b"DGAZE";

/// Current format version (increment when the payload layout changes)
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = 5 + 4 + 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Human-readable description
    pub description: String,

    /// Where the weights came from (e.g. "export: vfoa_duration_2024-03")
    pub source: String,

    /// Unix seconds when the artifact was written
    pub created_at: u64,
}

impl Default for ArtifactMetadata {
    fn default() -> Self {
        Self {
            description: String::new(),
            source: String::from("unknown"),
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelKind {
    Regressor(LinearRegressor),
    Classifier(LinearClassifier),
    MultiLabel(LinearMultiLabel),
}

impl ModelKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ModelKind::Regressor(_) => "regressor",
            ModelKind::Classifier(_) => "classifier",
            ModelKind::MultiLabel(_) => "multi-label",
        }
    }

    pub fn input_len(&self) -> usize {
        match self {
            ModelKind::Regressor(m) => m.layer().input_len(),
            ModelKind::Classifier(m) => m.layer().input_len(),
            ModelKind::MultiLabel(m) => m.layer().input_len(),
        }
    }

    pub fn output_len(&self) -> usize {
        match self {
            ModelKind::Regressor(m) => m.layer().output_len(),
            ModelKind::Classifier(m) => m.layer().output_len(),
            ModelKind::MultiLabel(m) => m.layer().output_len(),
        }
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            ModelKind::Regressor(m) => m.layer().validate(),
            ModelKind::Classifier(m) => m.validate(),
            ModelKind::MultiLabel(m) => m.validate(),
        }
    }
}

/// Everything stored in one artifact file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Format version (for backward compatibility)
    pub version: u32,
    pub metadata: ArtifactMetadata,
    pub model: ModelKind,
}

impl ModelArtifact {
    pub fn new(model: ModelKind, metadata: ArtifactMetadata) -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata,
            model,
        }
    }
}

/// Serializes an artifact, header included.
pub fn encode_artifact(artifact: &ModelArtifact) -> Result<Vec<u8>, ModelSaveError> {
    artifact.model.validate()?;
    let payload =
        bincode::serialize(artifact).map_err(|e| ModelSaveError::Serialization(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&calculate_checksum(&payload).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Parses and shape-checks an artifact from its file bytes.
pub fn decode_artifact(bytes: &[u8]) -> Result<ModelArtifact, ModelLoadError> {
    if bytes.len() < HEADER_LEN {
        return Err(ModelLoadError::Truncated(bytes.len()));
    }
    let (magic_bytes, rest) = bytes.split_at(5);
    let (version_bytes, rest) = rest.split_at(4);
    let (checksum_bytes, payload) = rest.split_at(8);

    let mut magic = [0u8; 5];
    magic.copy_from_slice(magic_bytes);
    if &magic != MAGIC {
        return Err(ModelLoadError::InvalidMagic(magic));
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(version_bytes);
    let version = u32::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(ModelLoadError::VersionMismatch {
            file_version: version,
            expected_version: FORMAT_VERSION,
        });
    }

    let mut checksum = [0u8; 8];
    checksum.copy_from_slice(checksum_bytes);
    if calculate_checksum(payload) != u64::from_le_bytes(checksum) {
        return Err(ModelLoadError::ChecksumMismatch);
    }

    let artifact: ModelArtifact = bincode::deserialize(payload)
        .map_err(|e| ModelLoadError::Deserialization(e.to_string()))?;
    artifact.model.validate()?;
    Ok(artifact)
}

/// Save an artifact to a file
pub fn save_model<P: AsRef<Path>>(artifact: &ModelArtifact, path: P) -> Result<(), ModelSaveError> {
    let bytes = encode_artifact(artifact)?;
    fs::write(path.as_ref(), &bytes)?;
    debug!(
        "[MODELS] wrote {} artifact ({} bytes) to {}",
        artifact.model.kind_name(),
        bytes.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Load an artifact from a file
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ModelArtifact, ModelLoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ModelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact = decode_artifact(&bytes)?;
    info!(
        "[MODELS] loaded {} ({} -> {}) from {}: {}",
        artifact.model.kind_name(),
        artifact.model.input_len(),
        artifact.model.output_len(),
        path.display(),
        artifact.metadata.description
    );
    Ok(artifact)
}

/// FNV-1a over the payload bytes
fn calculate_checksum(data: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 14695981039346656037;
    const FNV_PRIME: u64 = 1099511628211;

    let mut hash = FNV_OFFSET;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearLayer;
    use tempfile::NamedTempFile;

    fn regressor_artifact() -> ModelArtifact {
        let layer = LinearLayer::new(2, vec![vec![0.5, 0.5]], vec![1.0]).unwrap();
        ModelArtifact::new(
            ModelKind::Regressor(LinearRegressor::new(layer)),
            ArtifactMetadata {
                description: "turn count".into(),
                source: "unit-test".into(),
                created_at: 1_700_000_000,
            },
        )
    }

    #[test]
    fn test_save_load_roundtrip() {
        let artifact = regressor_artifact();
        let temp_file = NamedTempFile::new().unwrap();
        save_model(&artifact, temp_file.path()).unwrap();

        let loaded = load_model(temp_file.path()).unwrap();
        assert_eq!(loaded, artifact);
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = encode_artifact(&regressor_artifact()).unwrap();
        bytes[..5].copy_from_slice(b"GAZED");
        let result = decode_artifact(&bytes);
        assert!(matches!(result, Err(ModelLoadError::InvalidMagic(m)) if &m == b"GAZED"));
    }

    #[test]
    fn test_version_mismatch() {
        let mut bytes = encode_artifact(&regressor_artifact()).unwrap();
        bytes[5..9].copy_from_slice(&7u32.to_le_bytes());
        let result = decode_artifact(&bytes);
        assert!(matches!(
            result,
            Err(ModelLoadError::VersionMismatch {
                file_version: 7,
                expected_version: FORMAT_VERSION
            })
        ));
    }

    #[test]
    fn test_corrupted_payload_fails_checksum() {
        let mut bytes = encode_artifact(&regressor_artifact()).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        assert!(matches!(
            decode_artifact(&bytes),
            Err(ModelLoadError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            decode_artifact(b"DGAZE\x01"),
            Err(ModelLoadError::Truncated(6))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.dgz");
        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, ModelLoadError::Io { .. }));
        assert!(err.to_string().contains("absent.dgz"));
    }

    /// Frames a payload the way `encode_artifact` does, skipping its shape check.
    fn frame_unchecked(artifact: &ModelArtifact) -> Vec<u8> {
        let payload = bincode::serialize(artifact).unwrap();
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&calculate_checksum(&payload).to_le_bytes());
        bytes.extend_from_slice(&payload);
        bytes
    }

    #[test]
    fn test_zero_output_regressor_fails_vfoa_load() {
        // bincode lays a struct out as its fields in order
        let fields = bincode::serialize(&(32usize, Vec::<Vec<f64>>::new(), Vec::<f64>::new()))
            .unwrap();
        let layer: LinearLayer = bincode::deserialize(&fields).unwrap();
        assert_eq!(layer.output_len(), 0);
        let artifact = ModelArtifact::new(
            ModelKind::Regressor(LinearRegressor::new(layer)),
            ArtifactMetadata::default(),
        );

        let dir = tempfile::tempdir().unwrap();
        let turns = dir.path().join("turns.dgz");
        fs::write(&turns, frame_unchecked(&artifact)).unwrap();

        let result = crate::VfoaPredictor::load(&turns, &turns, &turns);
        assert!(matches!(
            result,
            Err(ModelLoadError::InvalidShape(ShapeError::Empty))
        ));
    }

    #[test]
    fn test_checksum() {
        assert_eq!(calculate_checksum(b"hello world"), calculate_checksum(b"hello world"));
        assert_ne!(calculate_checksum(b"hello world"), calculate_checksum(b"hello worlD"));
    }
}
