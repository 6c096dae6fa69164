// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug flags
//!
//! Crate names come from the binary's `--debug <crate>` option, `--debug-all`,
//! and the `DIALOGAZE_DEBUG` variable.

use std::collections::BTreeSet;

use crate::{DEBUG_ENV, KNOWN_CRATES};

/// Crates whose log output is raised to `debug`
///
/// # Example
/// ```rust
/// use dialogaze_observability::CrateDebugFlags;
///
/// let mut flags = CrateDebugFlags::default();
/// flags.merge_env_value("dialogaze-io");
/// assert!(flags.is_enabled("dialogaze-io"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Adds crates from a `DIALOGAZE_DEBUG`-style value: `all` or a comma-separated list.
    pub fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',') {
            self.enable(crate_name);
        }
    }

    pub fn enable(&mut self, crate_name: &str) {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            self.enabled_crates.insert(crate_name.to_string());
        }
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enabled_crates.insert(crate_name.to_string());
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Enabled crates in name order
    pub fn enabled_crates(&self) -> Vec<&str> {
        self.enabled_crates.iter().map(String::as_str).collect()
    }

    /// Create a tracing filter from debug flags
    ///
    /// Returns a directive string for `EnvFilter`, e.g.
    /// `"info,dialogaze_io=debug"`. Tracing targets use the library name, so
    /// dashes in crate names become underscores.
    pub fn to_filter_string(&self, base_level: &str) -> String {
        let mut filters = vec![base_level.to_ascii_lowercase()];
        for crate_name in &self.enabled_crates {
            filters.push(format!("{}=debug", crate_name.replace('-', "_")));
        }
        filters.join(",")
    }
}

/// Help text for the debug options, shown after a binary's `--help`
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug <crate-name>           Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  {env}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {env}=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        env = DEBUG_ENV
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate() {
        let mut flags = CrateDebugFlags::default();
        flags.enable(" dialogaze-io ");
        assert!(flags.is_enabled("dialogaze-io"));
        assert!(!flags.is_enabled("dialogaze-models"));
    }

    #[test]
    fn test_debug_all() {
        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value("all");
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_env_value() {
        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value(" dialogaze-scheduler, ,dialogaze-runtime");
        assert_eq!(
            flags.enabled_crates(),
            vec!["dialogaze-runtime", "dialogaze-scheduler"]
        );
    }

    #[test]
    fn test_filter_string() {
        let mut flags = CrateDebugFlags::default();
        assert_eq!(flags.to_filter_string("WARN"), "warn");

        flags.enable("dialogaze-io");
        assert_eq!(flags.to_filter_string("info"), "info,dialogaze_io=debug");
    }

    #[test]
    fn test_help_lists_crates_and_env() {
        let help = debug_flags_help();
        for crate_name in KNOWN_CRATES {
            assert!(help.contains(crate_name), "{} missing from help", crate_name);
        }
        assert!(help.contains("DIALOGAZE_DEBUG=all"));
        assert!(help.contains("--debug <crate-name>"));
    }
}
