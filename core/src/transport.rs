//! Transport provider: the component that performs the network I/O.
//!
//! # Design
//! `Transport` is the seam between the request builder and the network. The
//! default implementation, `UreqTransport`, wraps a pooled `ureq::Agent`
//! tuned by `TransportConfig` so the client behaves reasonably under
//! concurrent callers without per-call setup. Tests swap in scripted
//! transports that never open a socket.
//!
//! Non-2xx replies are data, not errors: the agent is built with
//! `http_status_as_error(false)` so a SOAP fault delivered with HTTP 500 still
//! reaches the caller with its body.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::config::IpFamily;
use ureq::{Agent, Proxy};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one blocking HTTP exchange.
///
/// Implementations must be usable from several threads at once; the client
/// shares a single provider among every request it creates.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.as_ref().send(request)
    }
}

/// Connection tuning for the default transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Upper bound on establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Resolve and connect over both IPv4 and IPv6.
    pub dual_stack: bool,
    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY`.
    pub proxy_from_env: bool,
    /// Idle connections kept across all hosts.
    pub max_idle_connections: usize,
    /// Idle connections kept per host.
    pub max_idle_connections_per_host: usize,
    /// How long an idle pooled connection may be reused.
    pub idle_timeout: Duration,
    /// Extra allowance on top of `connect_timeout` for the TLS handshake.
    pub tls_handshake_timeout: Duration,
    /// Wait for `100 Continue` before sending the body anyway.
    pub expect_continue_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            dual_stack: true,
            proxy_from_env: true,
            max_idle_connections: 100,
            max_idle_connections_per_host: default_idle_per_host(),
            idle_timeout: Duration::from_secs(90),
            tls_handshake_timeout: Duration::from_secs(10),
            expect_continue_timeout: Duration::from_secs(1),
        }
    }
}

/// One more than the available parallelism.
fn default_idle_per_host() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        + 1
}

/// Default transport over a pooled `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    config: TransportConfig,
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        let ip_family = if config.dual_stack {
            IpFamily::Any
        } else {
            IpFamily::Ipv4Only
        };
        let proxy = if config.proxy_from_env {
            Proxy::try_from_env()
        } else {
            None
        };

        // ureq's connect phase covers the TLS handshake, so both allowances
        // are folded into one bound.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(config.connect_timeout + config.tls_handshake_timeout))
            .timeout_await_100(Some(config.expect_continue_timeout))
            .max_idle_connections(config.max_idle_connections)
            .max_idle_connections_per_host(config.max_idle_connections_per_host)
            .max_idle_age(config.idle_timeout)
            .ip_family(ip_family)
            .proxy(proxy)
            .build()
            .new_agent();

        Self { agent, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Post => self.agent.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.config().timeout_global(Some(timeout)).build();
        }

        let mut response = builder.send(&request.body[..]).map_err(map_ureq_error)?;

        let status = response.status();
        let headers = header_pairs(response.headers());
        let body = response.body_mut().read_to_vec().map_err(map_ureq_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// Reply headers as owned pairs. Values outside visible ASCII are decoded
/// lossily rather than dropped.
fn header_pairs(headers: &ureq::http::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(t) => TransportError::Timeout(format!("{t:?}")),
        ureq::Error::HostNotFound => TransportError::Connect("host not found".to_string()),
        ureq::Error::ConnectionFailed => TransportError::Connect("connection failed".to_string()),
        ureq::Error::BadUri(uri) => TransportError::InvalidUrl(uri),
        ureq::Error::Tls(msg) => TransportError::Tls(msg.to_string()),
        ureq::Error::Io(e) => match e.kind() {
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::AddrNotAvailable => TransportError::Connect(e.to_string()),
            std::io::ErrorKind::TimedOut => TransportError::Timeout(e.to_string()),
            _ => TransportError::Io(e.to_string()),
        },
        other => TransportError::Other(other.to_string()),
    }
}
