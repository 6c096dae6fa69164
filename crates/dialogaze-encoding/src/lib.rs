// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dialogaze-encoding
//!
//! Converts decoded turn-metadata records into the fixed-length numeric
//! vectors the upstream models were trained on.
//!
//! ## Pipelines
//! - **addressee** (74 slots): scalar prefix, five focus sub-vector blocks and
//!   five one-hot categorical blocks.
//! - **vfoa** (32 slots): scalar prefix and five one-hot categorical blocks.
//!
//! Offsets live in [`layout`] as lookup tables; they mirror the models'
//! training-time feature ordering and must not be re-derived.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod encoder;
mod error;
pub mod layout;
mod records;

pub use encoder::{encode, encode_addressee, encode_vfoa, FeatureVectorBuilder};
pub use error::{DecodeError, EncodeError};
pub use layout::{CategoricalSlot, PipelineKind, PipelineLayout, ScalarSlot, SubVectorSlot};
pub use records::{decode_turn, AddresseeTurnRecord, TurnRecord, VfoaTurnRecord};
