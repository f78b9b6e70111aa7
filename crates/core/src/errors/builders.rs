//! Builder methods for creating errors with context

use super::types::Error;
use std::sync::Arc;

// Helper methods for creating errors with context
impl Error {
    /// Create an invalid key error
    #[must_use]
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a loader error carrying only a message
    #[must_use]
    pub fn loader(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Loader {
            key: key.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a loader error wrapping the loader's own error value.
    ///
    /// The message is the source's `Display` output, unchanged.
    #[must_use]
    pub fn loader_with_source<E>(key: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Loader {
            key: key.into(),
            message: source.to_string(),
            source: Some(Arc::new(source)),
        }
    }

    /// Create a peer error
    #[must_use]
    pub fn peer(peer: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Peer {
            peer: peer.into(),
            message: message.into(),
        }
    }

    /// Create a network error
    #[must_use]
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a group-not-found error
    #[must_use]
    pub fn group_not_found(name: impl Into<String>) -> Self {
        Error::GroupNotFound { name: name.into() }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Error::Serialization {
            message: message.into(),
        }
    }
}
