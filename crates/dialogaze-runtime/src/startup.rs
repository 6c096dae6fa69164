// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Config-to-component wiring used by the binary.

use dialogaze_config::{DialogazeConfig, LoggingConfig};
use dialogaze_io::{ZmqTopicPublisher, ZmqTopicSubscriber, ZmqUrl};
use dialogaze_observability::LoggingOptions;
use tracing::info;

use crate::RuntimeError;

pub fn logging_options(logging: &LoggingConfig) -> LoggingOptions {
    LoggingOptions {
        level: logging.level.clone(),
        log_dir: logging.log_dir.clone(),
        retention_runs: logging.retention_runs,
    }
}

/// Connects the inbound SUB socket and binds the outbound PUB socket.
pub fn open_endpoints(
    config: &DialogazeConfig,
) -> Result<(ZmqTopicSubscriber, ZmqTopicPublisher), RuntimeError> {
    let inbound_url =
        ZmqUrl::tcp(&config.inbound.host, config.inbound.port).map_err(RuntimeError::Transport)?;
    let outbound_url =
        ZmqUrl::tcp(&config.outbound.host, config.outbound.port).map_err(RuntimeError::Transport)?;

    let subscriber = ZmqTopicSubscriber::connect(&inbound_url, &config.inbound.topic)
        .map_err(RuntimeError::Transport)?;
    let publisher = ZmqTopicPublisher::bind(&outbound_url, &config.outbound.topic)
        .map_err(RuntimeError::Transport)?;

    info!(
        "[RUNTIME] inbound {} (topic '{}'), outbound {} (topic '{}')",
        inbound_url.as_str(),
        config.inbound.topic,
        publisher.bound_endpoint(),
        config.outbound.topic
    );
    Ok((subscriber, publisher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_logging_options_follow_config() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            log_dir: Some(PathBuf::from("/tmp/dialogaze-logs")),
            retention_runs: 4,
        };
        let options = logging_options(&logging);
        assert_eq!(options.level, "debug");
        assert_eq!(options.log_dir, logging.log_dir);
        assert_eq!(options.retention_runs, 4);
    }

    #[test]
    fn test_empty_inbound_host_is_transport_error() {
        let mut config = DialogazeConfig::default();
        config.inbound.host.clear();
        assert!(matches!(
            open_endpoints(&config),
            Err(RuntimeError::Transport(_))
        ));
    }
}
