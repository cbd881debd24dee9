//! HTTP transports

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::TransportError;
use crate::request::HttpRequest;
use crate::response::RawResponse;

#[cfg(feature = "reqwest")]
pub mod reqwest_transport;

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

/// Sends a built request and hands back whatever the server answered
///
/// Any status code, including 4xx and 5xx, is a response and must be
/// returned as `Ok`. `Err` is reserved for failing to get a response at all.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait Transport: Send + Sync + Debug {
    /// Send one request
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}
