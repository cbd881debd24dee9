//! Response envelope and classification

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ErrorKind;

/// Result of a request - the decoded payload or a classified error
pub type Outcome<T> = Result<T, ErrorKind>;

/// Server messages that mean the bearer token must be replaced
pub const TOKEN_MESSAGES: [&str; 2] = ["Token expired", "Invalid token"];

/// Uniform wrapper around every server response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Payload
    #[serde(rename = "Result")]
    pub result: Option<T>,
    /// Whether the server considers the call successful
    #[serde(rename = "IsSuccess")]
    pub is_success: bool,
    /// Human readable message
    #[serde(rename = "Message", default)]
    pub message: String,
}

/// Status code and body as returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: Vec<u8>,
}

impl RawResponse {
    /// Create a new RawResponse
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Take the response body
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// Turns raw response bytes and a status code into an [`Outcome`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    connectivity_message: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Classifier {
    /// Create a classifier using the fallback message of `config`
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            connectivity_message: config.connectivity_message.clone(),
        }
    }

    fn connectivity(&self) -> ErrorKind {
        ErrorKind::Custom(self.connectivity_message.clone())
    }

    /// Classify a response
    ///
    /// `body` is `None` when the transport produced no response; `status` is
    /// `0` when it produced no status code.
    pub fn classify<T: DeserializeOwned>(&self, body: Option<&[u8]>, status: u16) -> Outcome<T> {
        let Some(body) = body else {
            tracing::warn!("No response body, status {}", status);
            return Err(self.connectivity());
        };

        let envelope: Envelope<T> = serde_json::from_slice(body).map_err(|err| {
            tracing::warn!("Could not decode response envelope: {}", err);
            ErrorKind::Undecodable
        })?;

        self.classify_envelope(envelope, status)
    }

    /// Classify an already decoded envelope
    ///
    /// First match wins: token messages, then the status table for failed
    /// envelopes, then the success flag.
    pub fn classify_envelope<T>(&self, envelope: Envelope<T>, status: u16) -> Outcome<T> {
        if TOKEN_MESSAGES.contains(&envelope.message.as_str()) {
            tracing::warn!("Server rejected token: {}", envelope.message);
            return Err(ErrorKind::InvalidToken);
        }

        if !envelope.is_success {
            match status {
                400 => return Err(ErrorKind::BadRequest),
                403 => return Err(ErrorKind::InvalidInfo(envelope.message)),
                404 => return Err(ErrorKind::NotFound(envelope.message)),
                409 => return Err(ErrorKind::Conflict(envelope.message)),
                500 => return Err(ErrorKind::InternalServerError),
                _ => {}
            }
        }

        match (envelope.is_success, envelope.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(ErrorKind::Empty),
            (false, _) => {
                tracing::debug!(
                    "Unsuccessful envelope with status {}: {}",
                    status,
                    envelope.message
                );
                Err(self.connectivity())
            }
        }
    }
}
