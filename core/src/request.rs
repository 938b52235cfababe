//! Request builder and the dispatch pipeline.
//!
//! # Design
//! A `RequestBuilder` collects the endpoint, headers and three payloads: the
//! outgoing envelope, the success shape and the fault shape. Setters take and
//! return the builder so calls chain; nothing is validated until `dispatch`.
//!
//! `dispatch` is the only place a decision is made. A `200 OK` reply is
//! decoded into the success slot, anything else into the fault slot. Only
//! one slot is written per call and a failed decode leaves it unchanged. The
//! returned `Response` borrows the builder to read the slots back, so the
//! decoded values are never copied.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, debug_span, warn};
use uuid::Uuid;

use crate::client::Client;
use crate::codec;
use crate::error::{DecodeBranch, Result, SoapError};
use crate::http::{find_header, HttpMethod, HttpRequest};
use crate::payload::{IntoPayloadSlot, PayloadSlot};
use crate::response::Response;

/// Mutable, single-use description of one SOAP call.
#[derive(Debug)]
pub struct RequestBuilder<'c, Req, Res, Fault> {
    client: &'c Client,
    url: String,
    headers: Vec<(String, String)>,
    outgoing: Option<Req>,
    success: PayloadSlot<Res>,
    fault: PayloadSlot<Fault>,
    started_at: Option<DateTime<Utc>>,
}

impl<'c, Req, Res, Fault> RequestBuilder<'c, Req, Res, Fault>
where
    Res: DeserializeOwned + Default,
    Fault: DeserializeOwned + Default,
{
    pub(crate) fn new(client: &'c Client) -> Self {
        Self {
            client,
            url: String::new(),
            headers: Vec::new(),
            outgoing: None,
            success: PayloadSlot::default(),
            fault: PayloadSlot::default(),
            started_at: None,
        }
    }

    /// Set the endpoint the envelope is POSTed to.
    ///
    /// ```ignore
    /// client.new_request().set_url("http://example.com/calculator.asmx")
    /// ```
    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set a single header, replacing any earlier value for the same name.
    ///
    /// Names compare case-insensitively; the spelling first used is kept.
    /// Nothing is added on top of these headers, so `Content-Type` and
    /// `SOAPAction` are the caller's to set:
    ///
    /// ```ignore
    /// client.new_request()
    ///     .set_header("Content-Type", "text/xml; charset=utf-8")
    ///     .set_header("SOAPAction", "http://example.com/calculator/Add")
    /// ```
    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some((_, existing)) => *existing = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Set several headers at once, as if by repeated `set_header`.
    pub fn set_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self = self.set_header(name, value);
        }
        self
    }

    /// Set the envelope serialized as the request body.
    pub fn set_outgoing_payload(mut self, payload: Req) -> Self {
        self.outgoing = Some(payload);
        self
    }

    /// Set the shape a `200 OK` reply is decoded into.
    ///
    /// Accepts a bare value, a borrowed value (copied, never written to) or a
    /// ready-made `PayloadSlot`.
    pub fn set_success_payload(mut self, payload: impl IntoPayloadSlot<Res>) -> Self {
        self.success = payload.into_payload_slot();
        self
    }

    /// Set the shape any non-`200` reply is decoded into. Same normalisation
    /// as `set_success_payload`.
    pub fn set_fault_payload(mut self, payload: impl IntoPayloadSlot<Fault>) -> Self {
        self.fault = payload.into_payload_slot();
        self
    }
}

impl<'c, Req, Res, Fault> RequestBuilder<'c, Req, Res, Fault> {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn outgoing_payload(&self) -> Option<&Req> {
        self.outgoing.as_ref()
    }

    pub fn success_payload(&self) -> &Res {
        self.success.get()
    }

    pub fn fault_payload(&self) -> &Fault {
        self.fault.get()
    }

    /// When the most recent dispatch started, if any.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }
}

impl<'c, Req, Res, Fault> RequestBuilder<'c, Req, Res, Fault>
where
    Req: Serialize,
    Res: DeserializeOwned + Default,
    Fault: DeserializeOwned + Default,
{
    /// Send the request and decode the reply into the matching slot.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::MissingUrl` or `SoapError::Serialize` before any
    /// network activity, and `SoapError::Transport` when no reply arrived.
    /// A reply whose body does not decode still yields `Ok`; the failure is
    /// available from `Response::decode_error`.
    ///
    /// The builder should be treated as consumed afterwards. Dispatching it
    /// again sends a second, independent request.
    pub fn dispatch(&mut self) -> Result<Response<'_, Req, Res, Fault>> {
        if self.url.is_empty() {
            return Err(SoapError::MissingUrl);
        }
        let body = match &self.outgoing {
            Some(payload) => codec::encode(payload).map_err(SoapError::Serialize)?,
            None => Vec::new(),
        };

        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body,
            timeout: self.client.timeout(),
        };

        let request_id = Uuid::new_v4();
        let span = debug_span!("soap_dispatch", %request_id, url = %self.url);
        let _enter = span.enter();

        let started_at = Utc::now();
        self.started_at = Some(started_at);
        debug!(bytes = request.body.len(), "sending SOAP request");

        let reply = self.client.transport().send(&request).map_err(|e| {
            warn!(error = %e, "SOAP transport failed");
            SoapError::from(e)
        })?;
        let received_at = Utc::now();
        debug!(
            status = reply.status,
            bytes = reply.body.len(),
            elapsed_ms = (received_at - started_at).num_milliseconds(),
            "SOAP reply received"
        );

        let (branch, outcome) = if reply.is_ok() {
            (
                DecodeBranch::Success,
                codec::decode_into(&reply.body, self.success.get_mut()),
            )
        } else {
            (
                DecodeBranch::Fault,
                codec::decode_into(&reply.body, self.fault.get_mut()),
            )
        };
        let decode_error = outcome.err().map(|message| {
            warn!(%branch, status = reply.status, error = %message, "failed to decode SOAP reply");
            SoapError::decode(branch, reply.status, message)
        });

        Ok(Response::new(
            &*self,
            reply,
            request_id,
            started_at,
            received_at,
            decode_error,
        ))
    }
}
