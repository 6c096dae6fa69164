// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use thiserror::Error;

/// Inconsistent dimensions inside a linear model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("model has no output rows")]
    Empty,

    #[error("model declares an input length of 0")]
    ZeroInput,

    #[error("weight row {row} has {actual} columns, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{what} has {actual} entries but the model has {expected} output rows")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("decision threshold {0} is not finite")]
    NonFiniteThreshold(f64),
}

/// Startup-time failure to obtain a usable model. Always fatal.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("I/O error reading model artifact '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact is truncated: {0} bytes is shorter than the header")]
    Truncated(usize),

    #[error("invalid magic number: expected DGAZE, got {0:?}")]
    InvalidMagic([u8; 5]),

    #[error("version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: u32,
        expected_version: u32,
    },

    #[error("checksum mismatch: artifact may be corrupted")]
    ChecksumMismatch,

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid model shape: {0}")]
    InvalidShape(#[from] ShapeError),

    /// The artifact is valid but cannot serve the role it was loaded for.
    #[error("model '{}' cannot be used as the {role}: {reason}", path.display())]
    Incompatible {
        path: PathBuf,
        role: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ModelSaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("refusing to save malformed model: {0}")]
    InvalidShape(#[from] ShapeError),
}

/// A failed model call for one message. Never fatal to the runtime loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("feature vector has {actual} values, model expects {expected}")]
    InputLength { expected: usize, actual: usize },

    #[error("{model} model returned {actual} outputs, expected {expected}")]
    OutputShape {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{model} model produced a non-finite score at output {index}")]
    NonFinite { model: &'static str, index: usize },
}
