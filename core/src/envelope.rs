//! Ready-made SOAP 1.1 fault shape.
//!
//! Services that report errors with the standard `Fault` element can use
//! `FaultEnvelope` as the fault type of a request instead of declaring their
//! own. Elements are matched on their local names, so `soap:Body`,
//! `soapenv:Body`, `SOAP-ENV:Body` and a bare `Body` all decode the same way.

use serde::Deserialize;

/// `<Envelope><Body><Fault>..</Fault></Body></Envelope>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FaultEnvelope {
    #[serde(rename = "Body", default)]
    pub body: FaultBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FaultBody {
    #[serde(rename = "Fault", default)]
    pub fault: Fault,
}

/// SOAP 1.1 fault details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Fault {
    /// e.g. `soap:Server`, `soap:Client`
    #[serde(default)]
    pub faultcode: String,
    #[serde(default)]
    pub faultstring: String,
    #[serde(default)]
    pub detail: FaultDetail,
}

/// Text content of `<detail>`. Child elements are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FaultDetail {
    #[serde(rename = "$text", default)]
    pub text: String,
}

impl FaultEnvelope {
    pub fn code(&self) -> &str {
        &self.body.fault.faultcode
    }

    pub fn message(&self) -> &str {
        &self.body.fault.faultstring
    }

    pub fn detail(&self) -> &str {
        &self.body.fault.detail.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn decodes_prefixed_fault() {
        let xml = br#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
            <soap:Body>
                <soap:Fault>
                    <faultcode>soap:Server</faultcode>
                    <faultstring>Error processing request</faultstring>
                    <detail>row 7 invalid</detail>
                </soap:Fault>
            </soap:Body>
        </soap:Envelope>"#;
        let envelope: FaultEnvelope = codec::decode(xml).unwrap();
        assert_eq!(envelope.code(), "soap:Server");
        assert_eq!(envelope.message(), "Error processing request");
        assert_eq!(envelope.detail(), "row 7 invalid");
    }

    #[test]
    fn decodes_unprefixed_fault() {
        let xml = b"<Envelope><Body><Fault><faultcode>Client</faultcode>\
            <faultstring>bad input</faultstring></Fault></Body></Envelope>";
        let envelope: FaultEnvelope = codec::decode(xml).unwrap();
        assert_eq!(envelope.code(), "Client");
        assert_eq!(envelope.message(), "bad input");
        assert_eq!(envelope.detail(), "");
    }

    #[test]
    fn any_prefix_matches() {
        for prefix in ["soapenv", "s", "SOAP-ENV", "env"] {
            let xml = format!(
                r#"<{prefix}:Envelope xmlns:{prefix}="http://schemas.xmlsoap.org/soap/envelope/"><{prefix}:Body><{prefix}:Fault><faultcode>{prefix}:Client</faultcode><faultstring>nope</faultstring><detail/></{prefix}:Fault></{prefix}:Body></{prefix}:Envelope>"#
            );
            let envelope: FaultEnvelope = codec::decode(xml.as_bytes()).unwrap();
            assert_eq!(envelope.code(), format!("{prefix}:Client"), "{prefix}");
            assert_eq!(envelope.message(), "nope", "{prefix}");
            assert_eq!(envelope.detail(), "", "{prefix}");
        }
    }
}
