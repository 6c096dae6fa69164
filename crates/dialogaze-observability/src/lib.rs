// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dialogaze-observability
//!
//! Logging setup shared by every dialogaze binary, with per-crate debug flag
//! support.
//!
//! ## Features
//! - `file-logging`: JSON log files in timestamped run folders

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use init::*;

/// Known dialogaze crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "dialogaze-structures",
    "dialogaze-config",
    "dialogaze-encoding",
    "dialogaze-models",
    "dialogaze-scheduler",
    "dialogaze-io",
    "dialogaze-runtime",
];

/// Environment variable listing crates to debug (`all` or comma-separated names)
pub const DEBUG_ENV: &str = "DIALOGAZE_DEBUG";
