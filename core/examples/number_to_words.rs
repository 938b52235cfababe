//! Spell a number through a NumberToWords SOAP service.
//!
//! ```text
//! cargo run -p soap-core --example number_to_words -- 777
//! cargo run -p soap-core --example number_to_words -- 777 http://127.0.0.1:3000/numberconversion
//! ```
//!
//! The second form talks to the bundled mock server (`cargo run -p mock-server`).

use serde::{Deserialize, Serialize};
use soap_core::{Client, FaultEnvelope};
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "https://www.dataaccess.com/webservicesserver/numberconversion.wso";
const SOAP_ACTION: &str =
    "https://www.dataaccess.com/webservicesserver/NumberConversion.wso?op=NumberToWords";

#[derive(Debug, Serialize)]
#[serde(rename = "soap:Envelope")]
struct NumberToWordsRequest {
    #[serde(rename = "@xmlns:soap")]
    soap: String,
    #[serde(rename = "soap:Body")]
    body: NumberToWordsRequestBody,
}

#[derive(Debug, Serialize)]
struct NumberToWordsRequestBody {
    #[serde(rename = "NumberToWords")]
    number_to_words: NumberToWords,
}

#[derive(Debug, Serialize)]
struct NumberToWords {
    #[serde(rename = "@xmlns")]
    xmlns: String,
    #[serde(rename = "ubiNum")]
    ubi_num: String,
}

#[derive(Debug, Default, Deserialize)]
struct NumberToWordsEnvelope {
    #[serde(rename = "Body")]
    body: NumberToWordsBody,
}

#[derive(Debug, Default, Deserialize)]
struct NumberToWordsBody {
    #[serde(rename = "NumberToWordsResponse")]
    response: NumberToWordsResponse,
}

#[derive(Debug, Default, Deserialize)]
struct NumberToWordsResponse {
    #[serde(rename = "NumberToWordsResult")]
    result: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let number = args.next().unwrap_or_else(|| "777".to_string());
    let url = args.next().unwrap_or_else(|| DEFAULT_URL.to_string());

    let payload = NumberToWordsRequest {
        soap: "http://schemas.xmlsoap.org/soap/envelope/".to_string(),
        body: NumberToWordsRequestBody {
            number_to_words: NumberToWords {
                xmlns: "http://www.dataaccess.com/webservicesserver/".to_string(),
                ubi_num: number,
            },
        },
    };

    let client = Client::new();
    let mut request = client
        .new_request::<NumberToWordsRequest, NumberToWordsEnvelope, FaultEnvelope>()
        .set_url(url)
        .set_header("Content-Type", "text/xml; charset=utf-8")
        .set_header("SOAPAction", SOAP_ACTION)
        .set_outgoing_payload(payload);
    let response = request.dispatch()?.into_checked()?;

    if response.is_success() {
        println!("{}", response.decoded_result().body.response.result.trim());
    } else {
        println!(
            "service fault ({}): {}",
            response.status(),
            response.decoded_fault().message()
        );
    }
    Ok(())
}
