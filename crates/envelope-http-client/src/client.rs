//! Request dispatcher

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::ErrorKind;
use crate::params::RequestParameters;
use crate::request::{HttpRequest, Method, RequestBuilder};
use crate::response::{Classifier, Outcome};
use crate::transport::Transport;
#[cfg(feature = "reqwest")]
use crate::transport::ReqwestTransport;

/// Builds, sends and classifies requests
///
/// Cheap to clone; clones share the transport. The configuration is read
/// only, so one instance can serve any number of concurrent requests.
#[derive(Debug)]
pub struct EnvelopeClient<T: Transport> {
    transport: Arc<T>,
    builder: RequestBuilder,
    classifier: Classifier,
}

impl<T: Transport> Clone for EnvelopeClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            builder: self.builder,
            classifier: self.classifier.clone(),
        }
    }
}

#[cfg(feature = "reqwest")]
impl EnvelopeClient<ReqwestTransport> {
    /// Create a client with the default reqwest transport
    pub fn from_config(config: &ClientConfig) -> Result<Self, crate::TransportError> {
        Ok(Self::with_transport(
            ReqwestTransport::from_config(config)?,
            config,
        ))
    }
}

impl<T: Transport> EnvelopeClient<T> {
    /// Create a client over `transport`
    pub fn with_transport(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            builder: RequestBuilder::new(config),
            classifier: Classifier::new(config),
        }
    }

    /// Transport used by this client
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request that [`EnvelopeClient::request`] would send
    pub fn build_request(
        &self,
        url: &str,
        method: Method,
        params: &RequestParameters,
        token: Option<&str>,
    ) -> Result<HttpRequest, crate::BuildError> {
        let request = self.builder.build(method, url, params)?;
        Ok(match token {
            Some(token) => request.with_bearer_token(token),
            None => request,
        })
    }

    /// Send a request and classify the response
    #[instrument(skip(self, params, token))]
    pub async fn request<R>(
        &self,
        url: &str,
        method: Method,
        params: &RequestParameters,
        token: Option<&str>,
    ) -> Outcome<R>
    where
        R: DeserializeOwned,
    {
        let request = match self.build_request(url, method, params, token) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!("Could not build {} request: {}", method, err);
                return Err(ErrorKind::BadRequest);
            }
        };

        tracing::debug!("Sending {} {}", request.method, request.url);

        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!("Received status {}", response.status());
                self.classifier
                    .classify(Some(response.body()), response.status())
            }
            Err(err) => {
                tracing::warn!("Transport failed: {}", err);
                self.classifier.classify(None, 0)
            }
        }
    }

    /// Like [`EnvelopeClient::request`], delivering the outcome to `callback`
    ///
    /// `callback` runs exactly once.
    pub async fn request_with<R, F>(
        &self,
        url: &str,
        method: Method,
        params: &RequestParameters,
        token: Option<&str>,
        callback: F,
    ) where
        R: DeserializeOwned,
        F: FnOnce(Outcome<R>),
    {
        callback(self.request(url, method, params, token).await);
    }
}

impl<T: Transport + 'static> EnvelopeClient<T> {
    /// Run [`EnvelopeClient::request_with`] on the tokio runtime
    ///
    /// Returns immediately. `callback` runs exactly once, on whichever
    /// runtime thread completes the request.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn_request<R, F>(
        &self,
        url: impl Into<String>,
        method: Method,
        params: RequestParameters,
        token: Option<String>,
        callback: F,
    ) -> JoinHandle<()>
    where
        R: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<R>) + Send + 'static,
    {
        let client = self.clone();
        let url = url.into();
        tokio::spawn(async move {
            client
                .request_with(&url, method, &params, token.as_deref(), callback)
                .await
        })
    }
}
