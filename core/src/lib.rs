//! Blocking client helper for SOAP web services.
//!
//! # Overview
//! Builds an outbound XML envelope, POSTs it, and routes the reply into a
//! typed success payload or a typed fault payload depending on the HTTP
//! status code.
//!
//! ```ignore
//! let client = soap_core::Client::new();
//! let mut request = client
//!     .new_request::<NumberToWordsRequest, NumberToWordsResponse, FaultEnvelope>()
//!     .set_url("https://www.dataaccess.com/webservicesserver/numberconversion.wso")
//!     .set_header("Content-Type", "text/xml; charset=utf-8")
//!     .set_outgoing_payload(payload);
//! let response = request.dispatch()?;
//! if response.is_success() {
//!     println!("{}", response.decoded_result().body.result.words);
//! } else {
//!     println!("{}", response.decoded_fault().message());
//! }
//! ```
//!
//! # Design
//! - `Client` owns a shared `Transport` (ureq by default) and an immutable
//!   per-call timeout.
//! - `RequestBuilder` is the only place control decisions happen: `200 OK`
//!   decodes into the success slot, any other status into the fault slot.
//! - A decode failure is reported on the `Response`, never instead of it, so
//!   the raw body stays inspectable.
//! - Payload shapes are plain serde types; element names and namespaces are
//!   the caller's concern.

pub mod client;
pub mod codec;
pub mod envelope;
pub mod error;
pub mod http;
pub mod payload;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{Client, ClientConfig};
pub use envelope::{Fault, FaultBody, FaultDetail, FaultEnvelope};
pub use error::{DecodeBranch, Result, SoapError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use payload::{IntoPayloadSlot, PayloadSlot};
pub use request::RequestBuilder;
pub use response::Response;
pub use transport::{Transport, TransportConfig, UreqTransport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
