//! Core error type definitions

use std::sync::Arc;

/// Result type alias for peercache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shared, thread-safe error source.
///
/// Sources are reference counted so that an [`Error`] stays `Clone`: a single
/// failed load is delivered to every caller waiting on the same key.
pub type SharedSource = Arc<dyn std::error::Error + Send + Sync>;

/// Core error type for peercache operations using thiserror
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Key rejected before any cache or network work
    InvalidKey { key: String, reason: String },

    /// The caller-supplied miss-loader failed
    Loader {
        key: String,
        message: String,
        #[source]
        source: Option<SharedSource>,
    },

    /// A remote peer could not serve the key
    Peer { peer: String, message: String },

    /// Transport level failure talking to an endpoint
    Network { endpoint: String, message: String },

    /// A peer router was registered twice on the same group
    PeerRouterAlreadyRegistered { group: String },

    /// Setup misuse or invalid configuration values
    Configuration { message: String },

    /// No group is registered under the requested name
    GroupNotFound { name: String },

    /// Wire encoding or decoding failed
    Serialization { message: String },

    /// The task driving an in-flight load went away before finishing
    InFlightAbandoned { key: String },
}
