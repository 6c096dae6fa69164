// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use tracing::{info, warn};
use zmq::{Context, Socket};

use super::LINGER_MS;
use crate::{frame_message, MessagePublisher, TransportError, ZmqUrl};

/// A ZMQ PUB server that frames every payload with one topic.
///
/// The socket is unbound by [`close`](Self::close), or on drop if `close`
/// was never called.
pub struct ZmqTopicPublisher {
    topic: String,
    /// Endpoint reported by ZMQ after bind (resolves `*` ports)
    bound_endpoint: String,
    #[allow(dead_code)] // Context must be kept alive for socket lifetime
    context: Context,
    socket: Socket,
    bound: bool,
}

impl ZmqTopicPublisher {
    pub fn bind(endpoint: &ZmqUrl, topic: &str) -> Result<Self, TransportError> {
        let context = Context::new();
        let socket = context
            .socket(zmq::PUB)
            .map_err(|e| TransportError::SocketCreationFailed(e.to_string()))?;
        socket
            .set_linger(LINGER_MS)
            .map_err(|e| TransportError::SocketCreationFailed(e.to_string()))?;
        // ZMQ bind is synchronous
        socket
            .bind(endpoint.as_str())
            .map_err(|e| TransportError::CannotBind(e.to_string()))?;

        let bound_endpoint = match socket.get_last_endpoint() {
            Ok(Ok(last)) => last,
            _ => endpoint.to_string(),
        };
        info!("[ZMQ-PUB] Bound to {} (topic '{}')", bound_endpoint, topic);

        Ok(Self {
            topic: topic.to_string(),
            bound_endpoint,
            context,
            socket,
            bound: true,
        })
    }

    pub fn bound_endpoint(&self) -> &str {
        &self.bound_endpoint
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Unbinds the socket. Idempotent.
    pub fn close(&mut self) -> Result<(), TransportError> {
        if !self.bound {
            return Ok(());
        }
        self.bound = false;
        self.socket
            .unbind(&self.bound_endpoint)
            .map_err(|e| TransportError::CannotUnbind(e.to_string()))?;
        info!("[ZMQ-PUB] Unbound from {}", self.bound_endpoint);
        Ok(())
    }
}

impl MessagePublisher for ZmqTopicPublisher {
    fn publish(&mut self, payload: &str) -> Result<(), TransportError> {
        if !self.bound {
            return Err(TransportError::Closed);
        }
        let frame = frame_message(&self.topic, payload);
        // For PUB sockets, this typically succeeds immediately (queues the message)
        self.socket
            .send(frame.as_bytes(), zmq::DONTWAIT)
            .map_err(|e| {
                if e == zmq::Error::EAGAIN {
                    TransportError::SendFailed("Socket would block".to_string())
                } else {
                    TransportError::SendFailed(e.to_string())
                }
            })
    }
}

impl Drop for ZmqTopicPublisher {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("[ZMQ-PUB] {}", e);
        }
    }
}
