// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-message processing for the two component kinds.
//!
//! A pipeline turns one inbound JSON payload into one outbound payload:
//! decode, encode, predict and (VFOA only) schedule. It keeps no state
//! between messages.

use dialogaze_config::{ModelsConfig, SchedulerConfig};
use dialogaze_encoding::{
    encode_addressee, encode_vfoa, AddresseeTurnRecord, PipelineKind, VfoaTurnRecord,
};
use dialogaze_models::{AddresseePredictor, VfoaPredictor};
use dialogaze_scheduler::{GazeScheduler, TurnContext};
use tracing::{debug, info};

use crate::{PipelineError, RuntimeError};

pub trait TurnPipeline: Send {
    fn kind(&self) -> PipelineKind;

    /// Turns one inbound payload (topic already stripped) into the payload to publish.
    fn process(&self, payload: &str) -> Result<String, PipelineError>;
}

pub struct AddresseePipeline {
    predictor: AddresseePredictor,
}

impl AddresseePipeline {
    pub fn new(predictor: AddresseePredictor) -> Self {
        Self { predictor }
    }

    pub fn load(models: &ModelsConfig) -> Result<Self, RuntimeError> {
        info!("[ADDRESSEE] loading model {}", models.addressee.display());
        Ok(Self::new(AddresseePredictor::load(&models.addressee)?))
    }
}

impl TurnPipeline for AddresseePipeline {
    fn kind(&self) -> PipelineKind {
        PipelineKind::Addressee
    }

    fn process(&self, payload: &str) -> Result<String, PipelineError> {
        let record = AddresseeTurnRecord::from_json(payload)?;
        let vector = encode_addressee(&record)?;
        let label = self.predictor.predict(&vector)?;
        debug!(
            "[ADDRESSEE] speaker={} da={} -> {}",
            record.speaker_role, record.dialogue_act, label
        );
        Ok(label)
    }
}

pub struct VfoaPipeline {
    predictor: VfoaPredictor,
    scheduler: GazeScheduler,
}

impl VfoaPipeline {
    pub fn new(predictor: VfoaPredictor, scheduler: GazeScheduler) -> Self {
        Self {
            predictor,
            scheduler,
        }
    }

    pub fn load(models: &ModelsConfig, scheduler: &SchedulerConfig) -> Result<Self, RuntimeError> {
        info!(
            "[VFOA] loading models {}, {}, {}",
            models.vfoa_turn_count.display(),
            models.vfoa_duration_share.display(),
            models.vfoa_direction.display()
        );
        let predictor = VfoaPredictor::load(
            &models.vfoa_turn_count,
            &models.vfoa_duration_share,
            &models.vfoa_direction,
        )?;
        let scheduler = GazeScheduler::with_threshold(scheduler.share_threshold)?;
        Ok(Self::new(predictor, scheduler))
    }

    pub fn scheduler(&self) -> &GazeScheduler {
        &self.scheduler
    }
}

impl TurnPipeline for VfoaPipeline {
    fn kind(&self) -> PipelineKind {
        PipelineKind::Vfoa
    }

    fn process(&self, payload: &str) -> Result<String, PipelineError> {
        let record = VfoaTurnRecord::from_json(payload)?;
        let vector = encode_vfoa(&record)?;
        let raw = self.predictor.predict(&vector)?;

        let context = TurnContext {
            total_duration_ms: record.duration_ms,
            speaker: &record.speaker_role,
            addressee: &record.addressee_role,
            prev_speaker: &record.prev_speaker,
            prev_addressee: &record.prev_addressee,
        };
        let schedule = self.scheduler.schedule(&raw, &context);
        let output = schedule.serialize();
        debug!(
            "[VFOA] speaker={} addressee={} turns={} -> '{}'",
            record.speaker_role, record.addressee_role, schedule.predicted_turns, output
        );
        Ok(output)
    }
}

/// Loads the pipeline for `kind` from configured model paths.
pub fn load_pipeline(
    kind: PipelineKind,
    models: &ModelsConfig,
    scheduler: &SchedulerConfig,
) -> Result<Box<dyn TurnPipeline>, RuntimeError> {
    Ok(match kind {
        PipelineKind::Addressee => Box::new(AddresseePipeline::load(models)?),
        PipelineKind::Vfoa => Box::new(VfoaPipeline::load(models, scheduler)?),
    })
}
