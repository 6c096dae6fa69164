// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-process transport over a crossbeam channel.
//!
//! Frames carry the same `"<topic> <payload>"` framing as ZMQ and are
//! filtered the same way: frames whose text does not start with the
//! subscription are skipped silently, and prefix-only matches are rejected.

use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::trace;

use crate::{frame_message, split_frame, MessagePublisher, MessageSubscriber, TransportError};

/// Creates a connected publisher/subscriber pair on `topic`.
pub fn memory_channel(topic: &str) -> (MemoryPublisher, MemorySubscriber) {
    let (sender, receiver) = unbounded();
    (
        MemoryPublisher {
            topic: topic.to_string(),
            sender,
        },
        MemorySubscriber {
            topic: topic.to_string(),
            receiver,
        },
    )
}

#[derive(Debug, Clone)]
pub struct MemoryPublisher {
    topic: String,
    sender: Sender<String>,
}

impl MemoryPublisher {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Sends a frame exactly as given, bypassing framing.
    pub fn send_raw(&self, frame: impl Into<String>) -> Result<(), TransportError> {
        self.sender
            .send(frame.into())
            .map_err(|_| TransportError::Closed)
    }
}

impl MessagePublisher for MemoryPublisher {
    fn publish(&mut self, payload: &str) -> Result<(), TransportError> {
        self.send_raw(frame_message(&self.topic, payload))
    }
}

#[derive(Debug)]
pub struct MemorySubscriber {
    topic: String,
    receiver: Receiver<String>,
}

impl MemorySubscriber {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Every payload currently queued, in arrival order. Invalid frames are skipped.
    pub fn drain(&mut self) -> Vec<String> {
        let mut payloads = Vec::new();
        loop {
            match self.try_receive() {
                Ok(Some(payload)) => payloads.push(payload),
                Ok(None) => return payloads,
                Err(_) => continue,
            }
        }
    }
}

impl MessageSubscriber for MemorySubscriber {
    fn try_receive(&mut self) -> Result<Option<String>, TransportError> {
        loop {
            let frame = match self.receiver.try_recv() {
                Ok(frame) => frame,
                // A dropped publisher looks like a quiet one.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return Ok(None),
            };
            if !frame.starts_with(self.topic.as_str()) {
                trace!("[MEMORY-SUB] skipping frame outside subscription '{}'", self.topic);
                continue;
            }
            let (_, payload) = split_frame(&frame, &self.topic)?;
            return Ok(Some(payload.to_string()));
        }
    }
}
