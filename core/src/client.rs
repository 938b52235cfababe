//! SOAP client: owns the transport and hands out request builders.
//!
//! # Design
//! `Client` holds a shared `Transport` and an immutable `ClientConfig`.
//! Request builders borrow the client for their whole life, so the
//! per-call timeout can only change through `set_timeout`, which consumes
//! the client before any builder exists. Every request created afterwards
//! sees the same value; there is no shared mutable state to race on.
//! Cloning a client is cheap and shares the transport's connection pool.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::request::RequestBuilder;
use crate::transport::{Transport, TransportConfig, UreqTransport};

/// Configuration for a `Client`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Overall bound on one dispatch, from connect until the body is read.
    /// `None` leaves only the transport's own phase timeouts in force.
    pub timeout: Option<Duration>,
    /// Tuning for the default transport. Ignored by `Client::with_transport`.
    pub transport: TransportConfig,
}

/// Entry point for building and dispatching SOAP requests.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
}

impl Client {
    /// Client over the default ureq transport with default tuning.
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(UreqTransport::new(config.transport)),
            timeout: config.timeout,
        }
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            timeout: None,
        }
    }

    /// Set the overall per-call timeout for every request this client
    /// creates from now on.
    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Fresh request builder bound to this client, with no headers set.
    ///
    /// `Req` is the outgoing envelope, `Res` the shape decoded from a
    /// `200 OK` reply and `Fault` the shape decoded from any other status.
    pub fn new_request<Req, Res, Fault>(&self) -> RequestBuilder<'_, Req, Res, Fault>
    where
        Res: DeserializeOwned + Default,
        Fault: DeserializeOwned + Default,
    {
        RequestBuilder::new(self)
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse};

    struct Unreachable;

    impl Transport for Unreachable {
        fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Connect("unreachable".to_string()))
        }
    }

    #[derive(Debug, Default, serde::Deserialize)]
    struct Nothing {}

    #[test]
    fn new_client_has_no_timeout() {
        assert_eq!(Client::new().timeout(), None);
    }

    #[test]
    fn set_timeout_is_kept() {
        let client = Client::with_transport(Unreachable).set_timeout(Duration::from_secs(10));
        assert_eq!(client.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn from_config_uses_config_timeout() {
        let client = Client::from_config(ClientConfig {
            timeout: Some(Duration::from_millis(250)),
            ..ClientConfig::default()
        });
        assert_eq!(client.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn new_request_starts_empty() {
        let client = Client::with_transport(Unreachable);
        let request = client.new_request::<(), Nothing, Nothing>();
        assert!(request.headers().is_empty());
        assert_eq!(request.url(), "");
        assert!(request.started_at().is_none());
    }

    #[test]
    fn clones_share_the_transport() {
        let client = Client::with_transport(Unreachable);
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.transport, &clone.transport));
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = ClientConfig {
            timeout: Some(Duration::from_secs(5)),
            ..ClientConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
