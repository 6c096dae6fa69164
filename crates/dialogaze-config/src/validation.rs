// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that endpoints are usable, that inbound and outbound do not point
//! at the same socket, and that numeric settings are within range.

use crate::{ConfigError, ConfigResult, DialogazeConfig};

/// Log levels accepted by `logging.level`
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    InvalidPort { port_name: String, port: u16 },
    EndpointConflict { host: String, port: u16 },
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort { port_name, port } => {
                write!(f, "Port {} = {} is not a usable port", port_name, port)
            }
            Self::EndpointConflict { host, port } => {
                write!(
                    f,
                    "Endpoint conflict: inbound and outbound both use {}:{}",
                    host, port
                )
            }
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &DialogazeConfig) -> ConfigResult<()> {
    let errors = collect_validation_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Every validation problem in `config`, in check order
pub fn collect_validation_errors(config: &DialogazeConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_endpoints(config, &mut errors);
    validate_value_ranges(config, &mut errors);
    errors
}

fn validate_endpoints(config: &DialogazeConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.inbound.port == 0 {
        errors.push(ConfigValidationError::InvalidPort {
            port_name: "inbound.port".to_string(),
            port: 0,
        });
    }
    if config.outbound.port == 0 {
        errors.push(ConfigValidationError::InvalidPort {
            port_name: "outbound.port".to_string(),
            port: 0,
        });
    }

    if config.inbound.host.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "inbound.host".to_string(),
        });
    }
    if config.outbound.host.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "outbound.host".to_string(),
        });
    }

    // An empty inbound topic subscribes to everything; outbound frames need one.
    if config.outbound.topic.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "outbound.topic".to_string(),
        });
    }
    for (field, topic) in [
        ("inbound.topic", &config.inbound.topic),
        ("outbound.topic", &config.outbound.topic),
    ] {
        if topic.chars().any(char::is_whitespace) {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: format!("topic '{}' must not contain whitespace", topic),
            });
        }
    }

    if config.inbound.host == config.outbound.host && config.inbound.port == config.outbound.port {
        errors.push(ConfigValidationError::EndpointConflict {
            host: config.inbound.host.clone(),
            port: config.inbound.port,
        });
    }
}

fn validate_value_ranges(config: &DialogazeConfig, errors: &mut Vec<ConfigValidationError>) {
    let poll = config.runtime.poll_interval_ms;
    if !(1..=60_000).contains(&poll) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "runtime.poll_interval_ms".to_string(),
            reason: format!("must be between 1 and 60000, got {}", poll),
        });
    }

    let threshold = config.scheduler.share_threshold;
    if !(0.0..1.0).contains(&threshold) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "scheduler.share_threshold".to_string(),
            reason: format!("must be in [0, 1), got {}", threshold),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !VALID_LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.logging.retention_runs == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.retention_runs".to_string(),
            reason: "must keep at least one run".to_string(),
        });
    }
}
