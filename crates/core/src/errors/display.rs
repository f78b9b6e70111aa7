//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKey { key, reason } => {
                if key.is_empty() {
                    write!(f, "invalid key: {reason}")
                } else {
                    write!(f, "invalid key '{key}': {reason}")
                }
            }
            Error::Loader { message, .. } => f.write_str(message),
            Error::Peer { peer, message } => {
                write!(f, "peer '{peer}' failed: {message}")
            }
            Error::Network { endpoint, message } => {
                write!(f, "network error talking to '{endpoint}': {message}")
            }
            Error::PeerRouterAlreadyRegistered { group } => {
                write!(f, "peer router already registered for group '{group}'")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::GroupNotFound { name } => write!(f, "no such group: {name}"),
            Error::Serialization { message } => {
                write!(f, "serialization error: {message}")
            }
            Error::InFlightAbandoned { key } => {
                write!(f, "in-flight load for key '{key}' was abandoned")
            }
        }
    }
}
