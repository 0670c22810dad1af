//! Error taxonomy for the validation and reply contract.
//!
//! The variants carry the HTTP status class they map to; the actual response
//! formatting lives in the server layer so handlers and middleware can
//! pattern-match on the error itself.

use thiserror::Error;

/// Where in the request or response a validation failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    PathParams,
    QueryParams,
    Headers,
    Cookies,
    Body,
    ResponseBody,
    ResponseHeaders,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Location::PathParams => "path parameters",
            Location::QueryParams => "query parameters",
            Location::Headers => "headers",
            Location::Cookies => "cookies",
            Location::Body => "body",
            Location::ResponseBody => "response body",
            Location::ResponseHeaders => "response headers",
        };
        write!(f, "{s}")
    }
}

/// Failures raised by the validation contract and by handlers.
#[derive(Debug, Error)]
pub enum Error {
    /// Client-supplied data failed schema validation (HTTP 400).
    #[error("{location} validation failed")]
    Validation {
        location: Location,
        details: Vec<String>,
    },

    /// The request body could not be decoded under any supported media type
    /// (HTTP 400).
    #[error("unsupported media type `{0}`")]
    UnsupportedMediaType(String),

    /// Outgoing data violated the operation's own response contract
    /// (HTTP 500). Signals a bug on the producing side, never the caller's.
    #[error("{location} validation failed")]
    InternalValidation {
        location: Location,
        details: Vec<String>,
    },

    /// A handler-level failure with an explicit status code.
    #[error("{message}")]
    Handler { status: u16, message: String },
}

impl Error {
    pub fn validation(location: Location, details: Vec<String>) -> Self {
        Error::Validation { location, details }
    }

    pub fn handler(status: u16, message: impl Into<String>) -> Self {
        Error::Handler {
            status,
            message: message.into(),
        }
    }

    /// The HTTP status code this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            Error::Validation { .. } | Error::UnsupportedMediaType(_) => 400,
            Error::InternalValidation { .. } => 500,
            Error::Handler { status, .. } => *status,
        }
    }

    /// Validation details safe to expose to the caller.
    ///
    /// Internal contract failures report no detail: their messages describe
    /// server-side bugs, not anything a client can correct.
    pub fn public_details(&self) -> Option<&[String]> {
        match self {
            Error::Validation { details, .. } => Some(details),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let e = Error::validation(Location::Body, vec!["bad".into()]);
        assert_eq!(e.status(), 400);
        assert_eq!(Error::UnsupportedMediaType("image/png".into()).status(), 400);
        let e = Error::InternalValidation {
            location: Location::ResponseBody,
            details: vec![],
        };
        assert_eq!(e.status(), 500);
        assert_eq!(Error::handler(404, "no such pet").status(), 404);
    }

    #[test]
    fn test_internal_details_not_public() {
        let e = Error::InternalValidation {
            location: Location::ResponseBody,
            details: vec!["score too large".into()],
        };
        assert!(e.public_details().is_none());
    }
}
