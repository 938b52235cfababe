//! HTTP exchange types for the transport seam.
//!
//! # Design
//! These types describe one HTTP request and its reply as plain data. The
//! request builder produces an `HttpRequest`, hands it to a `Transport`, and
//! gets an `HttpResponse` back. Keeping both sides as owned data means a
//! scripted transport can stand in for the network in tests without any
//! socket at all.

use std::time::Duration;

/// Status code that routes a reply to the success slot.
const STATUS_OK: u16 = 200;

/// HTTP method for a request. SOAP over HTTP only ever POSTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// An outbound HTTP request described as plain data.
///
/// `headers` are sent verbatim; nothing is added on top of them by the
/// request builder. `timeout` bounds the whole call when set.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub timeout: Option<Duration>,
}

/// A completed HTTP reply described as plain data.
///
/// `reason` is the reason phrase ("OK", "Internal Server Error"), empty when
/// the status code has none.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for the one status decoded as a success; anything else is a fault.
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Status line in the `"200 OK"` form.
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

/// Case-insensitive header lookup shared by requests and responses.
pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
