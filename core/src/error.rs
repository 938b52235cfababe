//! Error types for SOAP dispatch.
//!
//! # Design
//! Three failure families exist. A `TransportError` means no reply was
//! received and no `Response` exists. A decode failure happens after a reply
//! arrived, so it travels inside the `Response` (see
//! `Response::decode_error`) rather than replacing it. Serialization and
//! missing-URL failures are caught before anything touches the network.

use std::fmt;

use thiserror::Error;

/// Result type alias for SOAP operations.
pub type Result<T> = std::result::Result<T, SoapError>;

/// Failures raised by a `Transport` while performing the HTTP exchange.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The destination URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The host could not be resolved or refused the connection.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The configured timeout elapsed before the reply arrived.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// TLS negotiation failed.
    #[error("tls error: {0}")]
    Tls(String),

    /// Socket-level I/O failure while sending or reading.
    #[error("i/o error: {0}")]
    Io(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// Which payload slot a decode was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeBranch {
    Success,
    Fault,
}

impl fmt::Display for DecodeBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeBranch::Success => write!(f, "success"),
            DecodeBranch::Fault => write!(f, "fault"),
        }
    }
}

/// Errors returned by the request builder and response.
#[derive(Debug, Clone, Error)]
pub enum SoapError {
    /// `dispatch` was called before `set_url`.
    #[error("request url is not set")]
    MissingUrl,

    /// The outgoing payload could not be serialized to XML.
    #[error("failed to serialize outgoing payload: {0}")]
    Serialize(String),

    /// The HTTP exchange itself failed; no response was produced.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The reply body could not be decoded into the selected payload slot.
    #[error("failed to decode {branch} payload from HTTP {status} reply: {message}")]
    Decode {
        branch: DecodeBranch,
        status: u16,
        message: String,
    },
}

impl SoapError {
    pub fn decode(branch: DecodeBranch, status: u16, message: impl Into<String>) -> Self {
        SoapError::Decode {
            branch,
            status,
            message: message.into(),
        }
    }

    /// True when the error came from the transport and no reply exists.
    pub fn is_transport(&self) -> bool {
        matches!(self, SoapError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_message_names_branch_and_status() {
        let err = SoapError::decode(DecodeBranch::Fault, 500, "missing field `Body`");
        assert_eq!(
            err.to_string(),
            "failed to decode fault payload from HTTP 500 reply: missing field `Body`"
        );
    }

    #[test]
    fn transport_error_is_transparent() {
        let err: SoapError = TransportError::Connect("refused".to_string()).into();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "connection failed: refused");
    }
}
