// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{DecodeError, PipelineKind};

/// Turn metadata consumed by the addressee pipeline.
///
/// Field names on the wire follow the upstream dialogue manager
/// (`prev_addr_role`, `da`, `prev_da`); the long names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddresseeTurnRecord {
    /// Number of second-person pronouns in the utterance.
    pub you_usage: f64,
    pub duration_ms: f64,
    pub sentence_length: f64,
    pub focus_speaker: Vec<f64>,
    pub focus_listener_pm: Vec<f64>,
    pub focus_listener_ui: Vec<f64>,
    pub focus_listener_id: Vec<f64>,
    pub focus_listener_me: Vec<f64>,
    pub speaker_role: String,
    pub prev_speaker_role: String,
    #[serde(rename = "prev_addr_role", alias = "prev_addressee_role")]
    pub prev_addressee_role: String,
    #[serde(rename = "da", alias = "dialogue_act")]
    pub dialogue_act: String,
    #[serde(rename = "prev_da", alias = "prev_dialogue_act")]
    pub prev_dialogue_act: String,
}

/// Turn metadata consumed by the VFOA pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VfoaTurnRecord {
    pub start_time: f64,
    pub end_time: f64,
    pub duration_ms: f64,
    pub speaker_role: String,
    pub addressee_role: String,
    pub prev_addressee: String,
    pub prev_speaker: String,
    #[serde(rename = "da", alias = "dialogue_act")]
    pub dialogue_act: String,
}

/// A decoded record for either pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnRecord {
    Addressee(AddresseeTurnRecord),
    Vfoa(VfoaTurnRecord),
}

impl TurnRecord {
    pub fn pipeline(&self) -> PipelineKind {
        match self {
            TurnRecord::Addressee(_) => PipelineKind::Addressee,
            TurnRecord::Vfoa(_) => PipelineKind::Vfoa,
        }
    }
}

impl AddresseeTurnRecord {
    pub fn from_json(payload: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(payload).map_err(|source| DecodeError {
            pipeline: PipelineKind::Addressee,
            source,
        })
    }
}

impl VfoaTurnRecord {
    pub fn from_json(payload: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(payload).map_err(|source| DecodeError {
            pipeline: PipelineKind::Vfoa,
            source,
        })
    }
}

/// Decodes a JSON payload (topic prefix already stripped) for `pipeline`.
///
/// Missing required fields are a decode failure. Unrecognised extra fields are
/// ignored.
pub fn decode_turn(pipeline: PipelineKind, payload: &str) -> Result<TurnRecord, DecodeError> {
    match pipeline {
        PipelineKind::Addressee => {
            AddresseeTurnRecord::from_json(payload).map(TurnRecord::Addressee)
        }
        PipelineKind::Vfoa => VfoaTurnRecord::from_json(payload).map(TurnRecord::Vfoa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VFOA_PAYLOAD: &str = r#"{"start_time":0,"end_time":1000,"duration_ms":1000,"speaker_role":"pm","addressee_role":"me","prev_addressee":"me","prev_speaker":"pm","da":"inf"}"#;

    #[test]
    fn test_decode_vfoa_record() {
        let record = VfoaTurnRecord::from_json(VFOA_PAYLOAD).unwrap();
        assert_eq!(record.duration_ms, 1000.0);
        assert_eq!(record.speaker_role, "pm");
        assert_eq!(record.dialogue_act, "inf");
    }

    #[test]
    fn test_decode_turn_dispatches_on_pipeline() {
        let record = decode_turn(PipelineKind::Vfoa, VFOA_PAYLOAD).unwrap();
        assert_eq!(record.pipeline(), PipelineKind::Vfoa);
    }

    #[test]
    fn test_missing_field_is_incomplete_decode() {
        let err = VfoaTurnRecord::from_json(r#"{"start_time":0,"end_time":1000}"#).unwrap_err();
        assert_eq!(err.pipeline, PipelineKind::Vfoa);
        assert!(err.is_incomplete());
        assert!(err.to_string().contains("malformed vfoa turn payload"));
    }

    #[test]
    fn test_syntax_error_is_not_incomplete() {
        let err = decode_turn(PipelineKind::Addressee, "{not json").unwrap_err();
        assert!(!err.is_incomplete());
    }

    #[test]
    fn test_addressee_accepts_long_field_aliases() {
        let payload = r#"{
            "you_usage": 1, "duration_ms": 820, "sentence_length": 6,
            "focus_speaker": [0,0,0,0,0,0,0,0],
            "focus_listener_pm": [0,0,0,0,0,0,0],
            "focus_listener_ui": [0,0,0,0,0,0,0],
            "focus_listener_id": [0,0,0,0,0,0,0],
            "focus_listener_me": [0,0,0,0,0,0,0],
            "speaker_role": "pm", "prev_speaker_role": "ui",
            "prev_addressee_role": "group",
            "dialogue_act": "sug", "prev_dialogue_act": "ass"
        }"#;
        let record = AddresseeTurnRecord::from_json(payload).unwrap();
        assert_eq!(record.prev_addressee_role, "group");
        assert_eq!(record.dialogue_act, "sug");
        assert_eq!(record.prev_dialogue_act, "ass");
    }
}
