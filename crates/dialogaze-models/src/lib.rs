// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dialogaze-models
//!
//! The prediction seam of dialogaze.
//!
//! The pipelines only ever see the [`Predictor`] and [`Classifier`] traits.
//! This crate also ships one concrete backend: linear models stored in a
//! versioned, checksummed artifact file.
//!
//! ## Usage
//! ```ignore
//! use dialogaze_models::{AddresseePredictor, VfoaPredictor};
//!
//! let addressee = AddresseePredictor::load("models/addressee.dgz")?;
//! let vfoa = VfoaPredictor::load(
//!     "models/vfoa_turns.dgz",
//!     "models/vfoa_shares.dgz",
//!     "models/vfoa_direction.dgz",
//! )?;
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod adapters;
mod artifact;
mod error;
mod linear;
mod predictor;

pub use adapters::{AddresseePredictor, VfoaPredictor};
pub use artifact::{
    decode_artifact, encode_artifact, load_model, save_model, ArtifactMetadata, ModelArtifact,
    ModelKind, FORMAT_VERSION, MAGIC,
};
pub use error::{ModelLoadError, ModelSaveError, PredictionError, ShapeError};
pub use linear::{LinearClassifier, LinearLayer, LinearMultiLabel, LinearRegressor};
pub use predictor::{Classifier, Predictor};
