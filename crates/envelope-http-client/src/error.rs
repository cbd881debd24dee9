//! Error types

use thiserror::Error;

use crate::request::Method;

/// Classified failure of a request
///
/// Every request ends in either a decoded payload or exactly one of these
/// variants. Variants carrying a `String` hold the server's own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Response body could not be decoded into the expected envelope
    #[error("Response could not be decoded")]
    Undecodable,
    /// Server reported an expired or invalid token
    #[error("Invalid token")]
    InvalidToken,
    /// Server answered 500
    #[error("Internal server error")]
    InternalServerError,
    /// Request was rejected or could not be built
    #[error("Bad request")]
    BadRequest,
    /// Server answered 403
    #[error("{0}")]
    InvalidInfo(String),
    /// Server answered 401
    #[error("Unauthorized")]
    Unauthorized,
    /// Server answered 409
    #[error("{0}")]
    Conflict(String),
    /// Server answered 404
    #[error("{0}")]
    NotFound(String),
    /// Anything else, including transport failures
    #[error("{0}")]
    Custom(String),
    /// Success envelope without a result
    #[error("Empty response")]
    Empty,
}

impl ErrorKind {
    /// Text to show to an end user
    ///
    /// Business errors surface the server's message. Transport and decoding
    /// failures surface `fallback`, which is usually
    /// [`ClientConfig::connectivity_message`](crate::ClientConfig).
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::InvalidInfo(message)
            | Self::Conflict(message)
            | Self::NotFound(message)
            | Self::Custom(message) => message.clone(),
            Self::Undecodable
            | Self::InvalidToken
            | Self::InternalServerError
            | Self::BadRequest
            | Self::Unauthorized
            | Self::Empty => fallback.to_string(),
        }
    }

    /// Server-supplied message, if the variant carries one
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::InvalidInfo(message)
            | Self::Conflict(message)
            | Self::NotFound(message)
            | Self::Custom(message) => Some(message),
            _ => None,
        }
    }
}

/// Reasons a request descriptor could not be built
///
/// The dispatcher reports all of them as [`ErrorKind::BadRequest`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// The final URL string is not a valid URL
    #[error("Invalid URL `{url}`: {source}")]
    InvalidUrl {
        /// URL string that failed to parse
        url: String,
        /// Parser error
        source: url::ParseError,
    },
    /// POST and PUT need body parameters
    #[error("{0} request requires body parameters")]
    MissingBody(Method),
    /// Parameters could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// No builder exists for this method
    #[error("{0} requests are not implemented")]
    NotImplemented(Method),
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::Serialization(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for BuildError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        BuildError::Serialization(err.to_string())
    }
}

/// Failure to obtain any response from the transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Response body could not be read
    #[error("Body error: {0}")]
    Body(String),
    /// Client build error
    #[error("Client build error: {0}")]
    Build(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
