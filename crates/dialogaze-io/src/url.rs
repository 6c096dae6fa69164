// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::TransportError;

/// URL endpoint struct for ZMQ endpoints. Has validation checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZmqUrl {
    url: String,
}

impl ZmqUrl {
    pub fn new(url: &str) -> Result<Self, TransportError> {
        validate_zmq_url(url)?;
        Ok(ZmqUrl {
            url: url.to_string(),
        })
    }

    /// Builds `tcp://host:port`.
    pub fn tcp(host: &str, port: u16) -> Result<Self, TransportError> {
        Self::new(&format!("tcp://{}:{}", host, port))
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for ZmqUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

fn validate_zmq_url(url: &str) -> Result<(), TransportError> {
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| TransportError::InvalidUrl(format!("'{}' has no scheme", url)))?;
    match scheme {
        "tcp" => {
            let (host, port) = rest.rsplit_once(':').ok_or_else(|| {
                TransportError::InvalidUrl(format!("'{}' is missing a port", url))
            })?;
            if host.is_empty() {
                return Err(TransportError::InvalidUrl(format!(
                    "'{}' is missing a host",
                    url
                )));
            }
            // "*" lets the OS pick a port on bind
            if port != "*" && !matches!(port.parse::<u16>(), Ok(p) if p > 0) {
                return Err(TransportError::InvalidUrl(format!(
                    "'{}' has invalid port '{}'",
                    url, port
                )));
            }
            Ok(())
        }
        "ipc" | "inproc" => {
            if rest.is_empty() {
                return Err(TransportError::InvalidUrl(format!(
                    "'{}' is missing an address",
                    url
                )));
            }
            Ok(())
        }
        other => Err(TransportError::InvalidUrl(format!(
            "unsupported scheme '{}' in '{}'",
            other, url
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tcp_urls() {
        assert_eq!(ZmqUrl::tcp("127.0.0.1", 5555).unwrap().as_str(), "tcp://127.0.0.1:5555");
        assert!(ZmqUrl::new("tcp://*:5555").is_ok());
        assert!(ZmqUrl::new("tcp://127.0.0.1:*").is_ok());
    }

    #[test]
    fn test_rejects_malformed_urls() {
        assert!(matches!(ZmqUrl::new("localhost:5555"), Err(TransportError::InvalidUrl(_))));
        assert!(ZmqUrl::new("tcp://localhost").is_err());
        assert!(ZmqUrl::new("tcp://:5555").is_err());
        assert!(ZmqUrl::new("tcp://localhost:0").is_err());
        assert!(ZmqUrl::new("tcp://localhost:70000").is_err());
        assert!(ZmqUrl::new("udp://localhost:5555").is_err());
        assert!(ZmqUrl::new("ipc://").is_err());
    }

    #[test]
    fn test_ipc_url() {
        assert!(ZmqUrl::new("ipc:///tmp/dialogaze.sock").is_ok());
    }
}
