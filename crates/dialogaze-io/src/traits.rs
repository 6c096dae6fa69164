// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::TransportError;

/// Inbound side: one exclusive receiver per runtime loop.
pub trait MessageSubscriber: Send {
    /// Non-blocking receive of the next payload, topic already stripped.
    ///
    /// `Ok(None)` means nothing is waiting.
    fn try_receive(&mut self) -> Result<Option<String>, TransportError>;
}

/// Outbound side: fire-and-forget, no retries.
pub trait MessagePublisher: Send {
    /// Frames `payload` with this publisher's topic and sends it.
    fn publish(&mut self, payload: &str) -> Result<(), TransportError>;
}
