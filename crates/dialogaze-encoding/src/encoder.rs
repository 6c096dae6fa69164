// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use dialogaze_structures::FeatureVector;
use tracing::trace;

use crate::layout::{addressee, vfoa};
use crate::{
    AddresseeTurnRecord, CategoricalSlot, EncodeError, PipelineLayout, ScalarSlot, SubVectorSlot,
    TurnRecord, VfoaTurnRecord,
};

/// Writes one record into a zero-filled vector sized by a [`PipelineLayout`].
///
/// The vector is only handed out by [`finish`](Self::finish), so a failed
/// write never leaks a half-encoded vector.
pub struct FeatureVectorBuilder {
    layout: &'static PipelineLayout,
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new(layout: &'static PipelineLayout) -> Self {
        Self {
            layout,
            vector: FeatureVector::zeros(layout.length),
        }
    }

    pub fn layout(&self) -> &'static PipelineLayout {
        self.layout
    }

    pub fn scalar(&mut self, slot: ScalarSlot, value: f64) -> Result<&mut Self, EncodeError> {
        self.vector
            .set(slot.offset, value)
            .map_err(EncodeError::Layout)?;
        Ok(self)
    }

    /// Copies `values` into the slot's reserved range.
    ///
    /// # Errors
    ///
    /// [`EncodeError::SubVectorLength`] if `values.len() != slot.width`. Values
    /// are never truncated or padded.
    pub fn sub_vector(
        &mut self,
        slot: SubVectorSlot,
        values: &[f64],
    ) -> Result<&mut Self, EncodeError> {
        if values.len() != slot.width {
            return Err(EncodeError::SubVectorLength {
                field: slot.field,
                expected: slot.width,
                actual: values.len(),
            });
        }
        self.vector
            .copy_into(slot.offset, values)
            .map_err(EncodeError::Layout)?;
        Ok(self)
    }

    /// Sets the single one-hot bit for `label` inside the slot's block.
    pub fn category(
        &mut self,
        slot: CategoricalSlot,
        label: &str,
    ) -> Result<&mut Self, EncodeError> {
        let index = slot
            .vocabulary
            .index_of(label)
            .map_err(|_| EncodeError::UnknownCategory {
                field: slot.field,
                value: label.to_string(),
                expected: slot.vocabulary.labels(),
            })?;
        self.vector
            .set(slot.base_offset + index, 1.0)
            .map_err(EncodeError::Layout)?;
        Ok(self)
    }

    pub fn finish(self) -> FeatureVector {
        self.vector
    }
}

/// Encodes an addressee turn into its 74-slot vector.
pub fn encode_addressee(record: &AddresseeTurnRecord) -> Result<FeatureVector, EncodeError> {
    let mut builder = FeatureVectorBuilder::new(&addressee::LAYOUT);
    builder
        .scalar(addressee::YOU_USAGE, record.you_usage)?
        .scalar(addressee::DURATION_MS, record.duration_ms)?
        .scalar(addressee::SENTENCE_LENGTH, record.sentence_length)?
        .sub_vector(addressee::FOCUS_SPEAKER, &record.focus_speaker)?
        .sub_vector(addressee::FOCUS_LISTENER_PM, &record.focus_listener_pm)?
        .sub_vector(addressee::FOCUS_LISTENER_UI, &record.focus_listener_ui)?
        .sub_vector(addressee::FOCUS_LISTENER_ID, &record.focus_listener_id)?
        .sub_vector(addressee::FOCUS_LISTENER_ME, &record.focus_listener_me)?
        .category(addressee::SPEAKER_ROLE, &record.speaker_role)?
        .category(addressee::PREV_SPEAKER_ROLE, &record.prev_speaker_role)?
        .category(addressee::PREV_ADDRESSEE_ROLE, &record.prev_addressee_role)?
        .category(addressee::DIALOGUE_ACT, &record.dialogue_act)?
        .category(addressee::PREV_DIALOGUE_ACT, &record.prev_dialogue_act)?;
    let vector = builder.finish();
    trace!("[ENCODER] addressee vector: {:?}", vector.nonzero_offsets());
    Ok(vector)
}

/// Encodes a VFOA turn into its 32-slot vector.
pub fn encode_vfoa(record: &VfoaTurnRecord) -> Result<FeatureVector, EncodeError> {
    let mut builder = FeatureVectorBuilder::new(&vfoa::LAYOUT);
    builder
        .scalar(vfoa::START_TIME, record.start_time)?
        .scalar(vfoa::END_TIME, record.end_time)?
        .scalar(vfoa::DURATION_MS, record.duration_ms)?
        .category(vfoa::SPEAKER_ROLE, &record.speaker_role)?
        .category(vfoa::DIALOGUE_ACT, &record.dialogue_act)?
        .category(vfoa::ADDRESSEE_ROLE, &record.addressee_role)?
        .category(vfoa::PREV_ADDRESSEE, &record.prev_addressee)?
        .category(vfoa::PREV_SPEAKER, &record.prev_speaker)?;
    let vector = builder.finish();
    trace!("[ENCODER] vfoa vector: {:?}", vector.nonzero_offsets());
    Ok(vector)
}

/// Encodes any record with its own pipeline's layout.
pub fn encode(record: &TurnRecord) -> Result<FeatureVector, EncodeError> {
    match record {
        TurnRecord::Addressee(r) => encode_addressee(r),
        TurnRecord::Vfoa(r) => encode_vfoa(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vfoa_record() -> VfoaTurnRecord {
        VfoaTurnRecord {
            start_time: 120.0,
            end_time: 1120.0,
            duration_ms: 1000.0,
            speaker_role: "pm".into(),
            addressee_role: "me".into(),
            prev_addressee: "me".into(),
            prev_speaker: "pm".into(),
            dialogue_act: "inf".into(),
        }
    }

    #[test]
    fn test_encode_vfoa_offsets() {
        let v = encode_vfoa(&vfoa_record()).unwrap();
        assert_eq!(v.len(), 32);
        assert_eq!(v[0], 120.0);
        assert_eq!(v[1], 1120.0);
        assert_eq!(v[2], 1000.0);
        // pm=2 -> 3+2, inf=7 -> 7+7, me=1 -> 18+1, me=1 -> 23+1, pm=2 -> 28+2
        assert_eq!(v.nonzero_offsets(), vec![0, 1, 2, 5, 14, 19, 24, 30]);
    }

    #[test]
    fn test_builder_rejects_short_sub_vector() {
        let mut builder = FeatureVectorBuilder::new(&addressee::LAYOUT);
        let err = builder
            .sub_vector(addressee::FOCUS_SPEAKER, &[1.0; 7])
            .err()
            .unwrap();
        assert_eq!(
            err,
            EncodeError::SubVectorLength {
                field: "focus_speaker",
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_unknown_category_names_field_and_value() {
        let mut record = vfoa_record();
        record.prev_speaker = "group".into();
        let err = encode_vfoa(&record).unwrap_err();
        assert_eq!(err.field(), Some("prev_speaker"));
        match err {
            EncodeError::UnknownCategory { value, .. } => assert_eq!(value, "group"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
