// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use dialogaze_structures::StructureError;
use thiserror::Error;

use crate::PipelineKind;

/// Failures while turning a record into a feature vector.
///
/// An encode failure never yields a partially filled vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// A categorical field carried a label outside its vocabulary.
    #[error("unknown category for field '{field}': '{value}' (expected one of {expected:?})")]
    UnknownCategory {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    /// A sub-vector did not match the width reserved for it in the layout.
    #[error("sub-vector '{field}' has {actual} values but the layout reserves {expected}")]
    SubVectorLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A slot write fell outside the vector. Only reachable through a broken layout table.
    #[error("layout error: {0}")]
    Layout(StructureError),
}

impl EncodeError {
    /// Name of the record field that caused the failure, if there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            EncodeError::UnknownCategory { field, .. }
            | EncodeError::SubVectorLength { field, .. } => Some(*field),
            EncodeError::Layout(_) => None,
        }
    }
}

/// An inbound payload that is not a well-formed record for its pipeline.
#[derive(Debug, Error)]
#[error("malformed {pipeline} turn payload: {source}")]
pub struct DecodeError {
    pub pipeline: PipelineKind,
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    /// True when the payload parsed as JSON but lacked or mistyped a field.
    pub fn is_incomplete(&self) -> bool {
        matches!(self.source.classify(), serde_json::error::Category::Data)
    }
}
