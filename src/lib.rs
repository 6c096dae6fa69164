// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dialogaze
//!
//! Addressee prediction and speaker gaze scheduling for multi-party dialogue
//! agents. Each turn's metadata arrives as JSON on a topic-framed channel, is
//! encoded into a fixed-layout feature vector, run through pre-trained models
//! and published as either an addressee label or a gaze schedule string.
//!
//! ## Feature Flags
//!
//! - **`core`**: encoding, models and the gaze scheduler (no transport)
//! - **`runtime`** (default): adds the transport layer, configuration and
//!   the polling runtime
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dialogaze::prelude::*;
//!
//! let predictor = VfoaPredictor::load("turns.dgz", "shares.dgz", "direction.dgz")?;
//! let record = VfoaTurnRecord::from_json(
//!     r#"{"start_time":0,"end_time":1000,"duration_ms":1000,"speaker_role":"pm",
//!         "addressee_role":"me","prev_addressee":"me","prev_speaker":"pm","da":"inf"}"#,
//! )?;
//! let raw = predictor.predict(&encode_vfoa(&record)?)?;
//! let schedule = GazeScheduler::new().schedule(
//!     &raw,
//!     &TurnContext {
//!         total_duration_ms: record.duration_ms,
//!         speaker: &record.speaker_role,
//!         addressee: &record.addressee_role,
//!         prev_speaker: &record.prev_speaker,
//!         prev_addressee: &record.prev_addressee,
//!     },
//! );
//! println!("{}", schedule.serialize());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: dialogaze-structures                       │
//! │  (vocabularies, FeatureVector, GazeTarget)              │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: encoding, models, scheduler                │
//! │  (pure computation, no I/O)                             │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  I/O + runtime: dialogaze-io, dialogaze-runtime         │
//! │  (ZMQ pub/sub, polling loop, `dialogaze` binary)        │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub use dialogaze_encoding as encoding;
pub use dialogaze_models as models;
pub use dialogaze_scheduler as scheduler;
pub use dialogaze_structures as structures;

#[cfg(feature = "runtime")]
pub use dialogaze_config as config;

#[cfg(feature = "runtime")]
pub use dialogaze_io as io;

#[cfg(feature = "runtime")]
pub use dialogaze_runtime as runtime;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::encoding::{
        decode_turn, encode, encode_addressee, encode_vfoa, AddresseeTurnRecord, PipelineKind,
        TurnRecord, VfoaTurnRecord,
    };
    pub use crate::models::{AddresseePredictor, Classifier, Predictor, VfoaPredictor};
    pub use crate::scheduler::{GazeAllocation, GazeSchedule, GazeScheduler, TurnContext};
    pub use crate::structures::{FeatureVector, GazeTarget, RawPrediction};

    #[cfg(feature = "runtime")]
    pub use crate::io::{MessagePublisher, MessageSubscriber};

    #[cfg(feature = "runtime")]
    pub use crate::runtime::{PollOutcome, RuntimeLoop, TurnPipeline};
}
