// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use tracing::info;
use zmq::{Context, Message, Socket};

use super::LINGER_MS;
use crate::{split_frame, MessageSubscriber, TransportError, ZmqUrl};

/// A ZMQ SUB client filtered on one topic.
///
/// Uses a reusable `zmq::Message` to minimize memory allocations.
///
/// # Example
///
/// ```ignore
/// let endpoint = ZmqUrl::tcp("127.0.0.1", 5555)?;
/// let mut subscriber = ZmqTopicSubscriber::connect(&endpoint, "turns")?;
/// loop {
///     match subscriber.try_receive()? {
///         Some(payload) => process(payload),
///         None => std::thread::sleep(poll_interval),
///     }
/// }
/// ```
pub struct ZmqTopicSubscriber {
    endpoint: ZmqUrl,
    topic: String,
    #[allow(dead_code)] // Context must be kept alive for socket lifetime
    context: Context,
    socket: Socket,
    /// Reusable message buffer
    recv_msg: Message,
}

impl ZmqTopicSubscriber {
    pub fn connect(endpoint: &ZmqUrl, topic: &str) -> Result<Self, TransportError> {
        let context = Context::new();
        let socket = context
            .socket(zmq::SUB)
            .map_err(|e| TransportError::SocketCreationFailed(e.to_string()))?;
        socket
            .set_linger(LINGER_MS)
            .map_err(|e| TransportError::SocketCreationFailed(e.to_string()))?;
        socket
            .set_subscribe(topic.as_bytes())
            .map_err(|e| TransportError::SocketCreationFailed(e.to_string()))?;
        socket
            .connect(endpoint.as_str())
            .map_err(|e| TransportError::CannotConnect(e.to_string()))?;

        info!("[ZMQ-SUB] Connected to {} (topic '{}')", endpoint, topic);

        Ok(Self {
            endpoint: endpoint.clone(),
            topic: topic.to_string(),
            context,
            socket,
            recv_msg: Message::new(),
        })
    }

    pub fn endpoint(&self) -> &ZmqUrl {
        &self.endpoint
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl MessageSubscriber for ZmqTopicSubscriber {
    fn try_receive(&mut self) -> Result<Option<String>, TransportError> {
        match self.socket.recv(&mut self.recv_msg, zmq::DONTWAIT) {
            Ok(()) => {}
            Err(zmq::Error::EAGAIN) => return Ok(None),
            Err(e) => return Err(TransportError::ReceiveFailed(e.to_string())),
        }
        let frame = self.recv_msg.as_str().ok_or_else(|| {
            TransportError::InvalidFrame(format!(
                "{} byte frame is not valid UTF-8",
                self.recv_msg.len()
            ))
        })?;
        let (_, payload) = split_frame(frame, &self.topic)?;
        Ok(Some(payload.to_string()))
    }
}
