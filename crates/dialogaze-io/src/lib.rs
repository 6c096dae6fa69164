// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dialogaze-io
//!
//! Topic-addressed text messaging.
//!
//! Every frame on the wire is `"<topic> <payload>"`. Subscribers strip the
//! topic and hand the payload up; publishers add it. Two transports are
//! provided:
//! - **ZMQ** (`zmq-transport` feature): a SUB socket that connects and a PUB
//!   socket that binds, both non-blocking via `zmq::DONTWAIT`;
//! - **memory**: a crossbeam channel pair with the same framing, for tests
//!   and in-process wiring.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
mod framing;
pub mod memory;
mod traits;
mod url;
#[cfg(feature = "zmq-transport")]
pub mod zmq_transport;

pub use error::TransportError;
pub use framing::{frame_message, split_frame};
pub use memory::{memory_channel, MemoryPublisher, MemorySubscriber};
pub use traits::{MessagePublisher, MessageSubscriber};
pub use url::ZmqUrl;
#[cfg(feature = "zmq-transport")]
pub use zmq_transport::{ZmqTopicPublisher, ZmqTopicSubscriber};
