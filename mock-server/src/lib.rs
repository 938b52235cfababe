use std::time::Duration;

use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const NUMBER_CONVERSION_NS: &str = "http://www.dataaccess.com/webservicesserver/";

pub const HELLO_BODY: &str = "<Envelope><Body><Response><string>Hello World!</string></Response></Body></Envelope>";
pub const FAULT_MESSAGE: &str = "Error processing request";
pub const MALFORMED_BODY: &str = "this is not an xml document";
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

// ---------------------------------------------------------------------------
// Envelope shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NumberToWordsRequest {
    #[serde(rename = "Body")]
    pub body: NumberToWordsRequestBody,
}

#[derive(Debug, Deserialize)]
pub struct NumberToWordsRequestBody {
    #[serde(rename = "NumberToWords")]
    pub number_to_words: NumberToWords,
}

#[derive(Debug, Deserialize)]
pub struct NumberToWords {
    #[serde(rename = "ubiNum")]
    pub ubi_num: String,
}

#[derive(Debug, Serialize)]
#[serde(rename = "soap:Envelope")]
pub struct NumberToWordsReply {
    #[serde(rename = "@xmlns:soap")]
    pub xmlns_soap: String,
    #[serde(rename = "soap:Body")]
    pub body: NumberToWordsReplyBody,
}

#[derive(Debug, Serialize)]
pub struct NumberToWordsReplyBody {
    #[serde(rename = "NumberToWordsResponse")]
    pub response: NumberToWordsResponse,
}

#[derive(Debug, Serialize)]
pub struct NumberToWordsResponse {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    #[serde(rename = "NumberToWordsResult")]
    pub result: String,
}

#[derive(Debug, Serialize)]
#[serde(rename = "soap:Envelope")]
pub struct FaultReply {
    #[serde(rename = "@xmlns:soap")]
    pub xmlns_soap: String,
    #[serde(rename = "soap:Body")]
    pub body: FaultReplyBody,
}

#[derive(Debug, Serialize)]
pub struct FaultReplyBody {
    #[serde(rename = "soap:Fault")]
    pub fault: FaultDetail,
}

#[derive(Debug, Serialize)]
pub struct FaultDetail {
    pub faultcode: String,
    pub faultstring: String,
}

/// What the `/action` endpoint saw on the incoming request.
#[derive(Debug, Serialize)]
#[serde(rename = "Envelope")]
pub struct ActionReport {
    #[serde(rename = "Body")]
    pub body: ActionReportBody,
}

#[derive(Debug, Serialize)]
pub struct ActionReportBody {
    #[serde(rename = "Action")]
    pub action: ReceivedHeaders,
}

#[derive(Debug, Serialize)]
pub struct ReceivedHeaders {
    #[serde(rename = "soapAction")]
    pub soap_action: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn app() -> Router {
    Router::new()
        .route("/hello", post(hello))
        .route("/fault", post(fault))
        .route("/echo", post(echo))
        .route("/action", post(action))
        .route("/malformed", post(malformed))
        .route("/slow", post(slow))
        .route("/numberconversion", post(number_conversion))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn xml(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body.into()).into_response()
}

fn fault_response(code: &str, message: &str) -> Response {
    let reply = FaultReply {
        xmlns_soap: SOAP_ENV_NS.to_string(),
        body: FaultReplyBody {
            fault: FaultDetail {
                faultcode: code.to_string(),
                faultstring: message.to_string(),
            },
        },
    };
    match quick_xml::se::to_string(&reply) {
        Ok(body) => xml(StatusCode::INTERNAL_SERVER_ERROR, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn hello() -> Response {
    xml(StatusCode::OK, HELLO_BODY)
}

async fn fault() -> Response {
    fault_response("soap:Server", FAULT_MESSAGE)
}

async fn echo(headers: HeaderMap, body: Bytes) -> Response {
    let content_type = header_value(&headers, header::CONTENT_TYPE.as_str());
    let content_type = if content_type.is_empty() {
        XML_CONTENT_TYPE.to_string()
    } else {
        content_type
    };
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

async fn action(headers: HeaderMap) -> Response {
    let report = ActionReport {
        body: ActionReportBody {
            action: ReceivedHeaders {
                soap_action: header_value(&headers, "soapaction"),
                content_type: header_value(&headers, header::CONTENT_TYPE.as_str()),
            },
        },
    };
    match quick_xml::se::to_string(&report) {
        Ok(body) => xml(StatusCode::OK, body),
        Err(e) => fault_response("soap:Server", &e.to_string()),
    }
}

async fn malformed() -> Response {
    xml(StatusCode::OK, MALFORMED_BODY)
}

async fn slow() -> Response {
    tokio::time::sleep(SLOW_DELAY).await;
    xml(StatusCode::OK, HELLO_BODY)
}

async fn number_conversion(body: Bytes) -> Response {
    let request: NumberToWordsRequest = match quick_xml::de::from_reader(body.as_ref()) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed NumberToWords envelope");
            return fault_response("soap:Client", FAULT_MESSAGE);
        }
    };
    let number: u64 = match request.body.number_to_words.ubi_num.trim().parse() {
        Ok(n) => n,
        Err(_) => return fault_response("soap:Server", FAULT_MESSAGE),
    };

    let reply = NumberToWordsReply {
        xmlns_soap: SOAP_ENV_NS.to_string(),
        body: NumberToWordsReplyBody {
            response: NumberToWordsResponse {
                xmlns: NUMBER_CONVERSION_NS.to_string(),
                result: number_to_words(number),
            },
        },
    };
    match quick_xml::se::to_string(&reply) {
        Ok(body) => xml(StatusCode::OK, body),
        Err(e) => fault_response("soap:Server", &e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Number spelling
// ---------------------------------------------------------------------------

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

/// Spell out `n` in English words, e.g. `777` -> `"seven hundred seventy-seven"`.
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }
    let mut parts = Vec::new();
    let mut rest = n;
    for (scale, name) in SCALES {
        if rest >= scale {
            parts.push(format!("{} {name}", below_thousand(rest / scale)));
            rest %= scale;
        }
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }
    parts.join(" ")
}

fn below_thousand(n: u64) -> String {
    let hundreds = (n / 100) as usize;
    let rem = (n % 100) as usize;
    let mut words = Vec::new();
    if hundreds > 0 {
        words.push(format!("{} hundred", ONES[hundreds]));
    }
    if rem >= 20 {
        let tens = TENS[rem / 10];
        if rem % 10 > 0 {
            words.push(format!("{tens}-{}", ONES[rem % 10]));
        } else {
            words.push(tens.to_string());
        }
    } else if rem > 0 {
        words.push(ONES[rem].to_string());
    }
    words.join(" ")
}
