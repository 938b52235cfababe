//! Snapshot of a completed SOAP call.

use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Result, SoapError};
use crate::http::{find_header, HttpResponse};
use crate::request::RequestBuilder;

/// The reply to one dispatch.
///
/// Holds the raw HTTP reply and borrows the request builder that produced
/// it, so `decoded_result` and `decoded_fault` read the builder's slots
/// directly. Both are always available; `status_code` tells which one the
/// dispatch actually wrote.
#[derive(Debug)]
pub struct Response<'r, Req, Res, Fault> {
    source: &'r RequestBuilder<'r, Req, Res, Fault>,
    raw: HttpResponse,
    request_id: Uuid,
    started_at: DateTime<Utc>,
    received_at: DateTime<Utc>,
    decode_error: Option<SoapError>,
}

impl<'r, Req, Res, Fault> Response<'r, Req, Res, Fault> {
    pub(crate) fn new(
        source: &'r RequestBuilder<'r, Req, Res, Fault>,
        raw: HttpResponse,
        request_id: Uuid,
        started_at: DateTime<Utc>,
        received_at: DateTime<Utc>,
        decode_error: Option<SoapError>,
    ) -> Self {
        Self {
            source,
            raw,
            request_id,
            started_at,
            received_at,
            decode_error,
        }
    }

    /// The full reply body as received.
    pub fn raw_body(&self) -> &[u8] {
        &self.raw.body
    }

    /// The reply body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.raw.body).into_owned()
    }

    /// Status line, e.g. `"200 OK"`.
    pub fn status(&self) -> String {
        self.raw.status_line()
    }

    pub fn status_code(&self) -> u16 {
        self.raw.status
    }

    /// True when the reply was routed to the success slot.
    pub fn is_success(&self) -> bool {
        self.raw.is_ok()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.raw.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.raw.headers, name)
    }

    /// The success slot of the originating request.
    pub fn decoded_result(&self) -> &'r Res {
        self.source.success_payload()
    }

    /// The fault slot of the originating request.
    pub fn decoded_fault(&self) -> &'r Fault {
        self.source.fault_payload()
    }

    /// Why the selected slot could not be decoded, if it could not.
    pub fn decode_error(&self) -> Option<&SoapError> {
        self.decode_error.as_ref()
    }

    /// Turn a decode failure into an `Err`, keeping the response otherwise.
    pub fn into_checked(mut self) -> Result<Self> {
        match self.decode_error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// The request that produced this response.
    pub fn request(&self) -> &'r RequestBuilder<'r, Req, Res, Fault> {
        self.source
    }

    /// Identifier attached to this dispatch's log span.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// When the transport returned the reply.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Time between starting the dispatch and receiving the reply.
    pub fn elapsed(&self) -> Duration {
        (self.received_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }
}
