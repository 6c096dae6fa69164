// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! `"<topic> <payload>"` text frames.

use crate::TransportError;

/// Prefixes `payload` with `topic` and a single space.
pub fn frame_message(topic: &str, payload: &str) -> String {
    let mut frame = String::with_capacity(topic.len() + 1 + payload.len());
    frame.push_str(topic);
    frame.push(' ');
    frame.push_str(payload);
    frame
}

/// Splits a frame at its first space into `(topic, payload)`.
///
/// When `expected_topic` is non-empty the frame's topic must equal it
/// exactly; ZMQ subscriptions only filter by prefix.
pub fn split_frame<'a>(
    frame: &'a str,
    expected_topic: &str,
) -> Result<(&'a str, &'a str), TransportError> {
    let (topic, payload) = frame.split_once(' ').ok_or_else(|| {
        TransportError::InvalidFrame(format!(
            "no topic separator in {} byte frame",
            frame.len()
        ))
    })?;
    if !expected_topic.is_empty() && topic != expected_topic {
        return Err(TransportError::InvalidFrame(format!(
            "topic '{}' does not match subscription '{}'",
            topic, expected_topic
        )));
    }
    Ok((topic, payload))
}
