// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dialogaze-runtime
//!
//! Runs one dialogaze component: an addressee predictor or a VFOA gaze
//! scheduler. Messages are polled from an inbound subscriber, processed by a
//! [`TurnPipeline`] and published on an outbound channel.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
pub mod pipeline;
pub mod runtime_loop;
pub mod startup;

pub use error::{PipelineError, RuntimeError};
pub use pipeline::{load_pipeline, AddresseePipeline, TurnPipeline, VfoaPipeline};
pub use runtime_loop::{LoopStats, PollOutcome, RuntimeLoop};
pub use startup::{logging_options, open_endpoints};
