// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dialogaze-scheduler
//!
//! Splits a speaker turn's duration across the gaze targets a VFOA model
//! flagged active.
//!
//! ## Steps
//! 1. One active target takes the whole turn.
//! 2. Otherwise active shares are normalized, shares at or below the
//!    threshold are dropped, and the rest renormalized once.
//! 3. Each retained share is scaled by the turn duration.
//! 4. If speaker and addressee both repeat from the previous turn and the
//!    previous addressee was retained, it is moved to the front.
//!
//! The scheduler is stateless. The caller supplies the previous turn's roles.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod allocation;
mod error;
mod scheduler;

pub use allocation::GazeAllocation;
pub use error::SchedulerError;
pub use scheduler::{
    normalize_and_threshold, GazeSchedule, GazeScheduler, TurnContext, DEFAULT_SHARE_THRESHOLD,
};
