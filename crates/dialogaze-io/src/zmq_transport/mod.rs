// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! ZMQ endpoints using the `zmq` crate (C bindings), which provides true
//! non-blocking operations via `zmq::DONTWAIT`.
//!
//! The subscriber connects; the publisher binds. Each endpoint owns its own
//! context and socket.

mod publisher;
mod subscriber;

pub use publisher::ZmqTopicPublisher;
pub use subscriber::ZmqTopicSubscriber;

/// Milliseconds a closing socket may spend flushing queued frames.
const LINGER_MS: i32 = 200;

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::{MessagePublisher, MessageSubscriber, ZmqUrl};

    #[test]
    fn test_pub_sub_over_tcp() {
        let bind = ZmqUrl::new("tcp://127.0.0.1:*").unwrap();
        let mut publisher = ZmqTopicPublisher::bind(&bind, "addr_out").unwrap();
        let endpoint = ZmqUrl::new(publisher.bound_endpoint()).unwrap();
        let mut subscriber = ZmqTopicSubscriber::connect(&endpoint, "addr_out").unwrap();

        // PUB drops frames until the subscription has propagated. Keep sending.
        let mut received = None;
        for _ in 0..100 {
            publisher.publish("me").unwrap();
            thread::sleep(Duration::from_millis(20));
            if let Some(payload) = subscriber.try_receive().unwrap() {
                received = Some(payload);
                break;
            }
        }
        assert_eq!(received.as_deref(), Some("me"));

        publisher.close().unwrap();
        assert!(matches!(publisher.publish("late"), Err(crate::TransportError::Closed)));
    }
}
