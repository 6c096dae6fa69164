// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Single-threaded polling loop.
//!
//! One iteration is one non-blocking receive, then (if a message was waiting)
//! process and publish. Failures drop the message and the loop continues.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use dialogaze_io::{MessagePublisher, MessageSubscriber};
use tracing::{debug, info, warn};

use crate::{PipelineError, TurnPipeline};

/// What a single [`RuntimeLoop::poll_once`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing was waiting on the inbound channel
    Idle,
    /// The payload that was published
    Published(String),
    /// The message was dropped; carries the reason
    Dropped(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub received: u64,
    pub published: u64,
    pub dropped: u64,
    pub idle_polls: u64,
}

pub struct RuntimeLoop<S, P> {
    pipeline: Box<dyn TurnPipeline>,
    subscriber: S,
    publisher: P,
    poll_interval: Duration,
    stats: LoopStats,
}

impl<S: MessageSubscriber, P: MessagePublisher> RuntimeLoop<S, P> {
    pub fn new(
        pipeline: Box<dyn TurnPipeline>,
        subscriber: S,
        publisher: P,
        poll_interval: Duration,
    ) -> Self {
        Self {
            pipeline,
            subscriber,
            publisher,
            poll_interval,
            stats: LoopStats::default(),
        }
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Hands back the endpoints so the caller can close them.
    pub fn into_parts(self) -> (S, P, LoopStats) {
        (self.subscriber, self.publisher, self.stats)
    }

    /// Receive, process and publish at most one message.
    pub fn poll_once(&mut self) -> PollOutcome {
        let payload = match self.subscriber.try_receive() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                self.stats.idle_polls += 1;
                return PollOutcome::Idle;
            }
            Err(e) => {
                self.stats.received += 1;
                return self.drop_message(PipelineError::from(e));
            }
        };
        self.stats.received += 1;

        let output = match self.pipeline.process(&payload) {
            Ok(output) => output,
            Err(e) => return self.drop_message(e),
        };

        match self.publisher.publish(&output) {
            Ok(()) => {
                self.stats.published += 1;
                debug!("[RUNTIME] published '{}'", output);
                PollOutcome::Published(output)
            }
            Err(e) => self.drop_message(PipelineError::from(e)),
        }
    }

    /// Polls until `running` is cleared, sleeping after each idle poll.
    pub fn run(&mut self, running: &AtomicBool) -> LoopStats {
        info!(
            "[RUNTIME] {} loop running (poll interval {:?})",
            self.pipeline.kind(),
            self.poll_interval
        );
        while running.load(Ordering::Relaxed) {
            if self.poll_once() == PollOutcome::Idle {
                thread::sleep(self.poll_interval);
            }
        }
        info!(
            "[RUNTIME] stopped: received={} published={} dropped={} idle_polls={}",
            self.stats.received, self.stats.published, self.stats.dropped, self.stats.idle_polls
        );
        self.stats
    }

    fn drop_message(&mut self, error: PipelineError) -> PollOutcome {
        self.stats.dropped += 1;
        warn!("[RUNTIME] dropped message at {} stage: {}", error.stage(), error);
        PollOutcome::Dropped(error.to_string())
    }
}
