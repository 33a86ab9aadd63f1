//! Error types for the DNS API client.
//!
//! # Design
//! Two failure channels are kept apart. `TransportError` covers everything
//! that prevents an HTTP exchange from completing (request construction,
//! connection, timeout, reading the body). API-level failures arrive inside
//! a successfully transported envelope and only become an `Error::Api` for
//! operations that check `success` themselves.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to complete one HTTP exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be built, sent, or its body read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API answered with `success: false`. `errors` holds every
    /// `code: message` pair the API reported, in order.
    #[error("API request failed: {errors}")]
    Api { errors: String },

    /// A zone lookup by name succeeded but returned no zones.
    #[error("no zone named {0:?}")]
    ZoneNotFound(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_display_through_the_wrapper() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = TransportError::from(io).into();
        assert!(matches!(err, Error::Transport(TransportError::Io(_))));
        assert_eq!(err.to_string(), "I/O error: refused");
    }

    #[test]
    fn api_error_carries_aggregated_text() {
        let err = Error::Api {
            errors: "1003: bad auth. ".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed: 1003: bad auth. ");
    }

    #[test]
    fn zone_not_found_names_the_zone() {
        let err = Error::ZoneNotFound("example.com".to_string());
        assert_eq!(err.to_string(), "no zone named \"example.com\"");
    }
}
