use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, FAULT_MESSAGE, HELLO_BODY, MALFORMED_BODY, NUMBER_CONVERSION_NS, SOAP_ENV_NS};
use tower::ServiceExt;

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

fn soap_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "text/xml; charset=utf-8")
        .body(body.to_string())
        .unwrap()
}

fn number_request(number: &str) -> String {
    format!(
        r#"<soap:Envelope xmlns:soap="{SOAP_ENV_NS}"><soap:Body><NumberToWords xmlns="{NUMBER_CONVERSION_NS}"><ubiNum>{number}</ubiNum></NumberToWords></soap:Body></soap:Envelope>"#
    )
}

// --- hello ---

#[tokio::test]
async fn hello_returns_fixed_envelope() {
    let resp = app().oneshot(soap_request("/hello", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "text/xml; charset=utf-8"
    );
    assert_eq!(body_text(resp).await, HELLO_BODY);
}

#[tokio::test]
async fn get_is_not_allowed() {
    let resp = app()
        .oneshot(Request::builder().uri("/hello").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- fault ---

#[tokio::test]
async fn fault_returns_500_with_fault_envelope() {
    let resp = app().oneshot(soap_request("/fault", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(resp).await;
    assert!(body.contains("<soap:Fault>"));
    assert!(body.contains(&format!("<faultstring>{FAULT_MESSAGE}</faultstring>")));
}

// --- echo ---

#[tokio::test]
async fn echo_returns_request_body() {
    let payload = "<Envelope><Body><value>ping</value></Body></Envelope>";
    let resp = app().oneshot(soap_request("/echo", payload)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, payload);
}

// --- action ---

#[tokio::test]
async fn action_reports_soap_action_header() {
    let request = Request::builder()
        .method("POST")
        .uri("/action")
        .header("SOAPAction", "urn:example#Ping")
        .header(http::header::CONTENT_TYPE, "application/soap+xml")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<soapAction>urn:example#Ping</soapAction>"));
    assert!(body.contains("<contentType>application/soap+xml</contentType>"));
}

// --- malformed ---

#[tokio::test]
async fn malformed_returns_non_xml_with_200() {
    let resp = app().oneshot(soap_request("/malformed", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, MALFORMED_BODY);
}

// --- number conversion ---

#[tokio::test]
async fn number_conversion_spells_number() {
    let resp = app()
        .oneshot(soap_request("/numberconversion", &number_request("777")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<NumberToWordsResult>seven hundred seventy-seven</NumberToWordsResult>"));
}

#[tokio::test]
async fn number_conversion_rejects_non_numeric_input() {
    let resp = app()
        .oneshot(soap_request("/numberconversion", &number_request("seven")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(resp).await;
    assert!(body.contains("<faultcode>soap:Server</faultcode>"));
}

#[tokio::test]
async fn number_conversion_rejects_garbage_envelope() {
    let resp = app()
        .oneshot(soap_request("/numberconversion", "garbage"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(resp).await;
    assert!(body.contains("<faultcode>soap:Client</faultcode>"));
}
