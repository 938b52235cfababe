//! XML payload codec backed by quick-xml's serde support.
//!
//! Element names, namespaces and attributes are whatever the payload types
//! declare through serde attributes (`#[serde(rename = "soap:Body")]`,
//! `#[serde(rename = "@xmlns:soap")]`). Encoding writes those names verbatim.
//! Decoding matches elements on their local name with the prefix stripped, so
//! a shape that is both sent and received names the prefix for serialization
//! only: `#[serde(rename(serialize = "soap:Body", deserialize = "Body"))]`.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize `value` into an XML document.
///
/// The root element takes the serde name of `T`.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, String> {
    quick_xml::se::to_string(value)
        .map(String::into_bytes)
        .map_err(|e| e.to_string())
}

/// Deserialize an XML document into a fresh `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
    quick_xml::de::from_reader(bytes).map_err(|e| e.to_string())
}

/// Deserialize an XML document into an existing slot.
///
/// The slot is only overwritten when decoding succeeds; on failure it keeps
/// whatever it held before.
pub fn decode_into<T: DeserializeOwned>(bytes: &[u8], slot: &mut T) -> Result<(), String> {
    *slot = decode(bytes)?;
    Ok(())
}
