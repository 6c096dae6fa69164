// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Ordered categorical vocabularies.
//!
//! A vocabulary's label order is part of the upstream models' training-time
//! feature layout: the index of a label is its offset inside a one-hot block.
//! Never reorder these lists.

use crate::StructureError;

/// An ordered, fixed set of string labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalVocabulary {
    name: &'static str,
    labels: &'static [&'static str],
}

impl CategoricalVocabulary {
    pub const fn new(name: &'static str, labels: &'static [&'static str]) -> Self {
        Self { name, labels }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    pub const fn len(&self) -> usize {
        self.labels.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(&label)
    }

    /// Returns the index of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownLabel`] when `label` is not a member.
    /// There is no fallback index.
    pub fn index_of(&self, label: &str) -> Result<usize, StructureError> {
        self.labels
            .iter()
            .position(|candidate| *candidate == label)
            .ok_or_else(|| StructureError::UnknownLabel {
                vocabulary: self.name,
                label: label.to_string(),
                expected: self.labels,
            })
    }

    /// Label at `index`, if any.
    pub fn label_at(&self, index: usize) -> Option<&'static str> {
        self.labels.get(index).copied()
    }
}

/// Participant roles (speaker / previous speaker).
pub const ROLES: CategoricalVocabulary =
    CategoricalVocabulary::new("roles", &["id", "me", "pm", "ui"]);

/// Addressee roles: every participant role plus the whole group.
pub const ADDRESSEE_ROLES: CategoricalVocabulary =
    CategoricalVocabulary::new("addressee_roles", &["id", "me", "pm", "ui", "group"]);

/// Dialogue act tags.
pub const DIALOGUE_ACTS: CategoricalVocabulary = CategoricalVocabulary::new(
    "dialogue_acts",
    &[
        "ass", "be.neg", "be.pos", "el.ass", "el.inf", "el.sug", "el.und", "inf", "off", "sug",
        "und",
    ],
);
