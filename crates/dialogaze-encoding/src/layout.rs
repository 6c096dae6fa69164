// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed feature layouts.
//!
//! Each pipeline's vector is described by a [`PipelineLayout`]: where every
//! scalar, sub-vector and one-hot block sits. The tables below are the source
//! of truth; the encoder only reads them.
//!
//! ```text
//! addressee (74)
//!  0  you_usage            | 39 speaker_role (4)
//!  1  duration_ms          | 43 prev_speaker_role (4)
//!  2  sentence_length      | 47 prev_addressee_role (5)
//!  3  focus_speaker (8)    | 52 dialogue_act (11)
//! 11  focus_listener_pm (7)| 63 prev_dialogue_act (11)
//! 18  focus_listener_ui (7)|
//! 25  focus_listener_id (7)|
//! 32  focus_listener_me (7)|
//!
//! vfoa (32)
//!  0  start_time    |  7 dialogue_act (11)
//!  1  end_time      | 18 addressee_role (5)
//!  2  duration_ms   | 23 prev_addressee (5)
//!  3  speaker_role  | 28 prev_speaker (4)
//! ```

use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::str::FromStr;

use dialogaze_structures::vocabulary::{ADDRESSEE_ROLES, DIALOGUE_ACTS, ROLES};
use dialogaze_structures::CategoricalVocabulary;
use serde::{Deserialize, Serialize};

/// Which prediction pipeline a record or vector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    Addressee,
    Vfoa,
}

impl PipelineKind {
    pub fn name(self) -> &'static str {
        match self {
            PipelineKind::Addressee => "addressee",
            PipelineKind::Vfoa => "vfoa",
        }
    }

    pub fn layout(self) -> &'static PipelineLayout {
        match self {
            PipelineKind::Addressee => &addressee::LAYOUT,
            PipelineKind::Vfoa => &vfoa::LAYOUT,
        }
    }

    /// Fixed feature vector length for this pipeline.
    pub fn vector_len(self) -> usize {
        self.layout().length
    }
}

impl Display for PipelineKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PipelineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "addressee" => Ok(PipelineKind::Addressee),
            "vfoa" => Ok(PipelineKind::Vfoa),
            other => Err(format!("unknown pipeline '{other}' (expected 'addressee' or 'vfoa')")),
        }
    }
}

/// A single numeric field copied verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarSlot {
    pub field: &'static str,
    pub offset: usize,
}

/// A pre-embedded block copied verbatim; exactly `width` values are expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubVectorSlot {
    pub field: &'static str,
    pub offset: usize,
    pub width: usize,
}

/// A one-hot block: one bit at `base_offset + vocabulary index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalSlot {
    pub field: &'static str,
    pub vocabulary: CategoricalVocabulary,
    pub base_offset: usize,
}

impl CategoricalSlot {
    pub fn range(&self) -> Range<usize> {
        self.base_offset..self.base_offset + self.vocabulary.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineLayout {
    pub pipeline: PipelineKind,
    pub length: usize,
    pub scalars: &'static [ScalarSlot],
    pub sub_vectors: &'static [SubVectorSlot],
    pub categorical: &'static [CategoricalSlot],
}

impl PipelineLayout {
    pub fn categorical_slot(&self, field: &str) -> Option<&CategoricalSlot> {
        self.categorical.iter().find(|slot| slot.field == field)
    }

    pub fn sub_vector_slot(&self, field: &str) -> Option<&SubVectorSlot> {
        self.sub_vectors.iter().find(|slot| slot.field == field)
    }

    /// Every slot as `(field, range)`, sorted by start offset.
    pub fn slot_ranges(&self) -> Vec<(&'static str, Range<usize>)> {
        let mut ranges: Vec<(&'static str, Range<usize>)> = self
            .scalars
            .iter()
            .map(|s| (s.field, s.offset..s.offset + 1))
            .chain(
                self.sub_vectors
                    .iter()
                    .map(|s| (s.field, s.offset..s.offset + s.width)),
            )
            .chain(self.categorical.iter().map(|s| (s.field, s.range())))
            .collect();
        ranges.sort_by_key(|(_, range)| range.start);
        ranges
    }
}

pub mod addressee {
    use super::*;

    pub const LENGTH: usize = 74;

    pub const YOU_USAGE: ScalarSlot = ScalarSlot {
        field: "you_usage",
        offset: 0,
    };
    pub const DURATION_MS: ScalarSlot = ScalarSlot {
        field: "duration_ms",
        offset: 1,
    };
    pub const SENTENCE_LENGTH: ScalarSlot = ScalarSlot {
        field: "sentence_length",
        offset: 2,
    };

    pub const FOCUS_SPEAKER: SubVectorSlot = SubVectorSlot {
        field: "focus_speaker",
        offset: 3,
        width: 8,
    };
    pub const FOCUS_LISTENER_PM: SubVectorSlot = SubVectorSlot {
        field: "focus_listener_pm",
        offset: 11,
        width: 7,
    };
    pub const FOCUS_LISTENER_UI: SubVectorSlot = SubVectorSlot {
        field: "focus_listener_ui",
        offset: 18,
        width: 7,
    };
    pub const FOCUS_LISTENER_ID: SubVectorSlot = SubVectorSlot {
        field: "focus_listener_id",
        offset: 25,
        width: 7,
    };
    pub const FOCUS_LISTENER_ME: SubVectorSlot = SubVectorSlot {
        field: "focus_listener_me",
        offset: 32,
        width: 7,
    };

    pub const SPEAKER_ROLE: CategoricalSlot = CategoricalSlot {
        field: "speaker_role",
        vocabulary: ROLES,
        base_offset: 39,
    };
    pub const PREV_SPEAKER_ROLE: CategoricalSlot = CategoricalSlot {
        field: "prev_speaker_role",
        vocabulary: ROLES,
        base_offset: 43,
    };
    pub const PREV_ADDRESSEE_ROLE: CategoricalSlot = CategoricalSlot {
        field: "prev_addressee_role",
        vocabulary: ADDRESSEE_ROLES,
        base_offset: 47,
    };
    pub const DIALOGUE_ACT: CategoricalSlot = CategoricalSlot {
        field: "dialogue_act",
        vocabulary: DIALOGUE_ACTS,
        base_offset: 52,
    };
    pub const PREV_DIALOGUE_ACT: CategoricalSlot = CategoricalSlot {
        field: "prev_dialogue_act",
        vocabulary: DIALOGUE_ACTS,
        base_offset: 63,
    };

    pub const LAYOUT: PipelineLayout = PipelineLayout {
        pipeline: PipelineKind::Addressee,
        length: LENGTH,
        scalars: &[YOU_USAGE, DURATION_MS, SENTENCE_LENGTH],
        sub_vectors: &[
            FOCUS_SPEAKER,
            FOCUS_LISTENER_PM,
            FOCUS_LISTENER_UI,
            FOCUS_LISTENER_ID,
            FOCUS_LISTENER_ME,
        ],
        categorical: &[
            SPEAKER_ROLE,
            PREV_SPEAKER_ROLE,
            PREV_ADDRESSEE_ROLE,
            DIALOGUE_ACT,
            PREV_DIALOGUE_ACT,
        ],
    };
}

pub mod vfoa {
    use super::*;

    pub const LENGTH: usize = 32;

    pub const START_TIME: ScalarSlot = ScalarSlot {
        field: "start_time",
        offset: 0,
    };
    pub const END_TIME: ScalarSlot = ScalarSlot {
        field: "end_time",
        offset: 1,
    };
    pub const DURATION_MS: ScalarSlot = ScalarSlot {
        field: "duration_ms",
        offset: 2,
    };

    pub const SPEAKER_ROLE: CategoricalSlot = CategoricalSlot {
        field: "speaker_role",
        vocabulary: ROLES,
        base_offset: 3,
    };
    pub const DIALOGUE_ACT: CategoricalSlot = CategoricalSlot {
        field: "dialogue_act",
        vocabulary: DIALOGUE_ACTS,
        base_offset: 7,
    };
    pub const ADDRESSEE_ROLE: CategoricalSlot = CategoricalSlot {
        field: "addressee_role",
        vocabulary: ADDRESSEE_ROLES,
        base_offset: 18,
    };
    pub const PREV_ADDRESSEE: CategoricalSlot = CategoricalSlot {
        field: "prev_addressee",
        vocabulary: ADDRESSEE_ROLES,
        base_offset: 23,
    };
    pub const PREV_SPEAKER: CategoricalSlot = CategoricalSlot {
        field: "prev_speaker",
        vocabulary: ROLES,
        base_offset: 28,
    };

    pub const LAYOUT: PipelineLayout = PipelineLayout {
        pipeline: PipelineKind::Vfoa,
        length: LENGTH,
        scalars: &[START_TIME, END_TIME, DURATION_MS],
        sub_vectors: &[],
        categorical: &[
            SPEAKER_ROLE,
            DIALOGUE_ACT,
            ADDRESSEE_ROLE,
            PREV_ADDRESSEE,
            PREV_SPEAKER,
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Slots must tile `0..length` with no gaps and no overlap.
    fn assert_tiles_exactly(layout: &PipelineLayout) {
        let mut cursor = 0;
        for (field, range) in layout.slot_ranges() {
            assert_eq!(
                range.start, cursor,
                "{}: slot '{}' starts at {} but previous slot ended at {}",
                layout.pipeline, field, range.start, cursor
            );
            cursor = range.end;
        }
        assert_eq!(cursor, layout.length, "{}: slots do not fill the vector", layout.pipeline);
    }

    #[test]
    fn test_addressee_layout_tiles_vector() {
        assert_eq!(addressee::LAYOUT.length, 74);
        assert_tiles_exactly(&addressee::LAYOUT);
    }

    #[test]
    fn test_vfoa_layout_tiles_vector() {
        assert_eq!(vfoa::LAYOUT.length, 32);
        assert_tiles_exactly(&vfoa::LAYOUT);
    }

    #[test]
    fn test_pipeline_kind_parsing() {
        assert_eq!("VFOA".parse::<PipelineKind>().unwrap(), PipelineKind::Vfoa);
        assert_eq!("addressee".parse::<PipelineKind>().unwrap(), PipelineKind::Addressee);
        assert!("gaze".parse::<PipelineKind>().is_err());
        assert_eq!(PipelineKind::Addressee.vector_len(), 74);
        assert_eq!(PipelineKind::Vfoa.vector_len(), 32);
    }

    #[test]
    fn test_slot_lookup() {
        let slot = addressee::LAYOUT.categorical_slot("prev_addressee_role").unwrap();
        assert_eq!(slot.range(), 47..52);
        assert!(vfoa::LAYOUT.sub_vector_slot("focus_speaker").is_none());
    }
}
