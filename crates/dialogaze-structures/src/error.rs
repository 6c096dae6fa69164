// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors raised by the core data types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructureError {
    /// A label was looked up in a vocabulary that does not contain it.
    #[error("'{label}' is not a member of vocabulary '{vocabulary}' (expected one of {expected:?})")]
    UnknownLabel {
        vocabulary: &'static str,
        label: String,
        expected: &'static [&'static str],
    },

    /// A write touched slots past the end of a feature vector.
    #[error("slot range {offset}..{end} is out of bounds for a feature vector of length {len}")]
    OutOfBounds { offset: usize, end: usize, len: usize },

    /// A target index outside `0..GAZE_TARGET_COUNT`.
    #[error("gaze target index {0} is out of range")]
    InvalidTargetIndex(usize),

    /// A target label that does not name one of the six gaze targets.
    #[error("unknown gaze target label '{0}'")]
    InvalidTargetLabel(String),
}
