// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Failed to bind publisher socket to address
    CannotBind(String),
    /// Failed to unbind publisher socket from address
    CannotUnbind(String),
    /// Failed to connect subscriber socket to publisher
    CannotConnect(String),
    /// Failed to send data
    SendFailed(String),
    /// Failed to receive data
    ReceiveFailed(String),
    /// Invalid URL format
    InvalidUrl(String),
    /// A received frame is not `"<topic> <payload>"` text for our topic
    InvalidFrame(String),
    /// Socket creation or option setup failed
    SocketCreationFailed(String),
    /// The endpoint was already closed
    Closed,
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::CannotBind(msg) => {
                write!(f, "TransportError: Unable to bind: {}", msg)
            }
            TransportError::CannotUnbind(msg) => {
                write!(f, "TransportError: Unable to unbind: {}", msg)
            }
            TransportError::CannotConnect(msg) => {
                write!(f, "TransportError: Unable to connect: {}", msg)
            }
            TransportError::SendFailed(msg) => {
                write!(f, "TransportError: Send failed: {}", msg)
            }
            TransportError::ReceiveFailed(msg) => {
                write!(f, "TransportError: Receive failed: {}", msg)
            }
            TransportError::InvalidUrl(msg) => {
                write!(f, "TransportError: Invalid URL: {}", msg)
            }
            TransportError::InvalidFrame(msg) => {
                write!(f, "TransportError: Invalid frame: {}", msg)
            }
            TransportError::SocketCreationFailed(msg) => {
                write!(f, "TransportError: Socket creation failed: {}", msg)
            }
            TransportError::Closed => write!(f, "TransportError: Endpoint is closed"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
