// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `dialogaze.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DialogazeConfig {
    pub inbound: InboundConfig,
    pub outbound: OutboundConfig,
    pub runtime: RuntimeConfig,
    pub models: ModelsConfig,
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

/// Where turn metadata is read from. The SUB socket connects here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InboundConfig {
    pub host: String,
    pub port: u16,
    /// Subscription topic; empty subscribes to every topic
    pub topic: String,
}

impl Default for InboundConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5555,
            topic: "turn_metadata".to_string(),
        }
    }
}

/// Where predictions are published. The PUB socket binds here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutboundConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5556,
            topic: "gaze_prediction".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Sleep between empty polls of the inbound socket
    pub poll_interval_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

/// Model artifact paths, loaded once at startup
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub addressee: PathBuf,
    pub vfoa_turn_count: PathBuf,
    pub vfoa_duration_share: PathBuf,
    pub vfoa_direction: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            addressee: PathBuf::from("data_files/addressee.dgz"),
            vfoa_turn_count: PathBuf::from("data_files/spk_num_vfoa_turns.dgz"),
            vfoa_duration_share: PathBuf::from("data_files/spk_vfoa_dur.dgz"),
            vfoa_direction: PathBuf::from("data_files/spk_vfoa_dir.dgz"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Normalized shares at or below this are dropped
    pub share_threshold: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            share_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for per-run log folders; unset logs to the console only
    pub log_dir: Option<PathBuf>,
    /// Number of run folders kept under `log_dir`
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            retention_runs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: DialogazeConfig = toml::from_str("[inbound]\nport = 6000\n").unwrap();
        assert_eq!(config.inbound.port, 6000);
        assert_eq!(config.inbound.host, "127.0.0.1");
        assert_eq!(config.inbound.topic, "turn_metadata");
        assert_eq!(config.outbound, OutboundConfig::default());
    }

    #[test]
    fn test_full_file_parses() {
        let toml_str = r#"
            [inbound]
            host = "10.0.0.2"
            port = 7000
            topic = "dm_turns"

            [outbound]
            host = "0.0.0.0"
            port = 7001
            topic = "addressee"

            [runtime]
            poll_interval_ms = 25

            [models]
            addressee = "/opt/models/addr.dgz"

            [scheduler]
            share_threshold = 0.1

            [logging]
            level = "debug"
            log_dir = "/var/log/dialogaze"
            retention_runs = 3
        "#;
        let config: DialogazeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.inbound.topic, "dm_turns");
        assert_eq!(config.outbound.port, 7001);
        assert_eq!(config.runtime.poll_interval_ms, 25);
        assert_eq!(config.models.addressee, PathBuf::from("/opt/models/addr.dgz"));
        assert_eq!(config.models.vfoa_direction, ModelsConfig::default().vfoa_direction);
        assert_eq!(config.scheduler.share_threshold, 0.1);
        assert_eq!(config.logging.log_dir, Some(PathBuf::from("/var/log/dialogaze")));
        assert_eq!(config.logging.retention_runs, 3);
    }
}
