// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use dialogaze_config::ConfigError;
use dialogaze_encoding::{DecodeError, EncodeError};
use dialogaze_io::TransportError;
use dialogaze_models::{ModelLoadError, PredictionError};
use dialogaze_scheduler::SchedulerError;
use thiserror::Error;

/// Why a single inbound message produced no output.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("prediction failed: {0}")]
    Prediction(#[from] PredictionError),

    #[error("{0}")]
    Transport(#[from] TransportError),
}

impl PipelineError {
    /// Short stage name for log lines and counters.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Decode(_) => "decode",
            PipelineError::Encode(_) => "encode",
            PipelineError::Prediction(_) => "predict",
            PipelineError::Transport(_) => "transport",
        }
    }
}

/// Startup failures. Any of these stops the process before the loop runs.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("model load failed: {0}")]
    ModelLoad(#[from] ModelLoadError),

    #[error("invalid scheduler settings: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("transport setup failed: {0}")]
    Transport(TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        let err = PipelineError::from(TransportError::InvalidFrame("no separator".into()));
        assert_eq!(err.stage(), "transport");

        let err = PipelineError::from(PredictionError::InputLength {
            expected: 32,
            actual: 31,
        });
        assert_eq!(err.stage(), "predict");
        assert!(err.to_string().starts_with("prediction failed"));
    }
}
