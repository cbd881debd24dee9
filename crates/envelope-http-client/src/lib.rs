//! HTTP client for APIs that wrap every response in a uniform envelope
//!
//! Every response body has the shape
//! `{"Result": <T|null>, "IsSuccess": <bool>, "Message": <string>}`.
//! This crate builds requests from a URL and parameters, sends them over a
//! [`Transport`], and turns the envelope plus the status code into an
//! [`Outcome`]: the decoded `T` or one [`ErrorKind`].
//!
//! # Example
//!
//! ```no_run
//! use envelope_http_client::{
//!     EnvelopeClient, Method, Outcome, Parameters, RequestParameters, Transport,
//! };
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Profile {
//!     name: String,
//! }
//!
//! async fn example<T: Transport>(client: &EnvelopeClient<T>) -> Outcome<Profile> {
//!     let params = RequestParameters::new().query(Parameters::new().with("id", 7));
//!
//!     client
//!         .request("https://api.example.com/profile", Method::Get, &params, Some("token"))
//!         .await
//! }
//! ```
//!
//! With the default `reqwest` feature, `EnvelopeClient::from_config` builds a
//! client over `ReqwestTransport`; any other [`Transport`] can be plugged in
//! with [`EnvelopeClient::with_transport`].

mod client;
mod config;
mod error;
mod params;
mod request;
mod response;
pub mod serde_utils;
pub mod transport;

pub use client::EnvelopeClient;
pub use config::{AddressingMode, ClientConfig, ClientConfigBuilder, DEFAULT_CONNECTIVITY_MESSAGE};
pub use error::{BuildError, ErrorKind, TransportError};
pub use params::{Parameters, RequestParameters};
pub use request::{substitute_route, HttpRequest, Method, RequestBuilder};
pub use response::{Classifier, Envelope, Outcome, RawResponse, TOKEN_MESSAGES};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
