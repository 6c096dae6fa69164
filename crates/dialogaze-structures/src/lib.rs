// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The core crate for dialogaze. Defines the data types shared by the encoder,
//! the prediction adapters and the gaze scheduler.
//!
//! Nothing in here performs I/O. Every type is built per inbound turn and
//! dropped once the outbound result has been published.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
mod feature_vector;
mod gaze_target;
mod raw_prediction;
pub mod vocabulary;

pub use error::StructureError;
pub use feature_vector::FeatureVector;
pub use gaze_target::{GazeTarget, GAZE_TARGET_COUNT};
pub use raw_prediction::RawPrediction;
pub use vocabulary::CategoricalVocabulary;
