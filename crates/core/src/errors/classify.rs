//! Classification helpers for errors

use super::types::Error;

impl Error {
    /// Rejected because of the request itself, before any work was done
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidKey { .. })
    }

    /// Failures that may succeed when retried later
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Peer { .. } | Self::Network { .. } | Self::InFlightAbandoned { .. }
        )
    }

    /// Programming errors raised while wiring groups and peers together
    #[must_use]
    pub const fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::PeerRouterAlreadyRegistered { .. } | Self::Configuration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("boom")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn test_loader_error_is_verbatim() {
        let err = Error::loader_with_source("k", Boom);
        assert_eq!(err.to_string(), "boom");
        assert!(err.source().is_some());

        let cloned = err.clone();
        assert_eq!(cloned.to_string(), "boom");
        assert!(!cloned.is_transient());
    }

    #[test]
    fn test_classification() {
        assert!(Error::invalid_key("", "key is required").is_invalid_argument());
        assert!(Error::peer("http://a", "down").is_transient());
        assert!(Error::network("http://a", "reset").is_transient());
        assert!(Error::PeerRouterAlreadyRegistered {
            group: "scores".into()
        }
        .is_setup_error());
        assert!(!Error::group_not_found("x").is_setup_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::invalid_key("", "key is required").to_string(),
            "invalid key: key is required"
        );
        assert_eq!(
            Error::group_not_found("scores").to_string(),
            "no such group: scores"
        );
    }
}
