//! End-to-end tests of the assembled router with in-memory services.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use trainpay_backend::{
    app_state::AppState, build_router, service_factory::TrainpayServiceFactory,
};
use trainpay_common::{
    transport_error, BoxFuture, CardDetails, CardToken, Charge, NewCharge, ObjectStorage,
    PaymentGateway, TrainpayError,
};
use trainpay_config::{
    AppConfig, FirebaseConfig, HttpConfig, LoggingConfig, OmiseConfig, ServerConfig, UploadConfig,
};

// --- Fakes ---

#[derive(Default)]
struct FakeGateway {
    calls: Mutex<Vec<String>>,
    charges: Mutex<Vec<NewCharge>>,
    /// Charge object returned by `create_charge`; `None` simulates a gateway error
    charge_reply: Option<Value>,
}

impl PaymentGateway for FakeGateway {
    fn create_token<'a>(&'a self, card: &'a CardDetails) -> BoxFuture<'a, CardToken, TrainpayError> {
        Box::pin(async move {
            self.calls.lock().unwrap().push("token".to_string());
            let id = format!("tokn_for_{}", card.get("number").and_then(Value::as_str).unwrap_or("?"));
            Ok(CardToken {
                raw: json!({"id": id}),
                id,
            })
        })
    }

    fn create_charge<'a>(&'a self, charge: &'a NewCharge) -> BoxFuture<'a, Charge, TrainpayError> {
        Box::pin(async move {
            self.calls.lock().unwrap().push("charge".to_string());
            self.charges.lock().unwrap().push(charge.clone());
            match &self.charge_reply {
                Some(reply) => Ok(Charge::from_json(reply.clone())?),
                None => Err(transport_error("authentication failed")),
            }
        })
    }
}

#[derive(Default)]
struct FakeStorage {
    objects: Mutex<Vec<(String, Bytes, String)>>,
    signed_at: Mutex<Vec<DateTime<Utc>>>,
    fail: bool,
}

impl ObjectStorage for FakeStorage {
    fn save<'a>(
        &'a self,
        path: &'a str,
        data: Bytes,
        content_type: &'a str,
    ) -> BoxFuture<'a, (), TrainpayError> {
        Box::pin(async move {
            if self.fail {
                return Err(transport_error("The specified bucket does not exist."));
            }
            self.objects
                .lock()
                .unwrap()
                .push((path.to_string(), data, content_type.to_string()));
            Ok(())
        })
    }

    fn signed_read_url<'a>(
        &'a self,
        path: &'a str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> BoxFuture<'a, String, TrainpayError> {
        Box::pin(async move {
            self.signed_at.lock().unwrap().push(issued_at);
            Ok(format!(
                "https://storage.googleapis.com/trainpay-demo.appspot.com/{path}?X-Goog-Date={}&X-Goog-Expires={}",
                issued_at.format("%Y%m%dT%H%M%SZ"),
                ttl.as_secs()
            ))
        })
    }
}

// --- Harness ---

fn config(static_dir: Option<String>) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir,
        },
        omise: OmiseConfig {
            public_key: "pkey_test_5x".to_string(),
            secret_key: "skey_test_5x".to_string(),
            currency: "thb".to_string(),
            default_description: "Training Payment".to_string(),
            api_base: "https://api.omise.co".to_string(),
            vault_base: "https://vault.omise.co".to_string(),
        },
        firebase: FirebaseConfig {
            service_account_path: "/unused".to_string(),
            bucket: "trainpay-demo.appspot.com".to_string(),
            storage_api_base: "https://storage.googleapis.com".to_string(),
            signing_host: "storage.googleapis.com".to_string(),
            emulator_host: None,
        },
        upload: UploadConfig {
            max_body_bytes: 64 * 1024,
        },
        http: HttpConfig { timeout_secs: 5 },
        logging: LoggingConfig {
            level: "debug".to_string(),
            directory: None,
            file_prefix: "trainpay.log".to_string(),
        },
    }
}

fn app_with(gateway: Arc<FakeGateway>, storage: Arc<FakeStorage>) -> Router {
    app_with_config(config(None), gateway, storage)
}

fn app_with_config(config: AppConfig, gateway: Arc<FakeGateway>, storage: Arc<FakeStorage>) -> Router {
    let factory = TrainpayServiceFactory::from_services(gateway, storage);
    build_router(&AppState::new(Arc::new(config), Arc::new(factory)))
}

fn successful_charge() -> Value {
    json!({
        "object": "charge",
        "id": "chrg_test_5xuy4w91xqz7d1w9u0t",
        "status": "successful",
        "amount": 10000,
        "currency": "thb",
        "paid_at": "2024-05-01T10:00:00Z"
    })
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const BOUNDARY: &str = "trainpay-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a str, &'a [u8]),
}

fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, content_type, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/upload-slip")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// --- /test ---

#[tokio::test]
async fn test_health_check_always_ok() {
    let app = app_with(Arc::default(), Arc::default());

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(Request::post("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["time"].is_string());
    }
}

// --- /charge ---

#[tokio::test]
async fn test_charge_missing_fields_is_400() {
    let gateway = Arc::new(FakeGateway {
        charge_reply: Some(successful_charge()),
        ..FakeGateway::default()
    });
    let app = app_with(gateway.clone(), Arc::default());

    for body in [json!({"amount": 10000}), json!({"token": "tokn_test_1"}), json!({"token": "tokn_test_1", "amount": 0})] {
        let response = app.clone().oneshot(json_request("/charge", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Missing token or amount"}));
    }
    assert!(gateway.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_charge_without_json_body_is_400_json() {
    let app = app_with(Arc::default(), Arc::default());

    let no_body = Request::post("/charge").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(no_body).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing token or amount");

    let broken = Request::post("/charge")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"token\": "))
        .unwrap();
    let response = app.oneshot(broken).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_charge_success_echoes_gateway_id() {
    let gateway = Arc::new(FakeGateway {
        charge_reply: Some(successful_charge()),
        ..FakeGateway::default()
    });
    let app = app_with(gateway.clone(), Arc::default());

    let response = app
        .oneshot(json_request("/charge", json!({"token": "tokn_test_1", "amount": 10000})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Payment successful");
    assert_eq!(body["chargeId"], "chrg_test_5xuy4w91xqz7d1w9u0t");
    assert_eq!(body["charge"], successful_charge());

    let sent = gateway.charges.lock().unwrap()[0].clone();
    assert_eq!(sent.currency, "thb");
    assert_eq!(sent.card, "tokn_test_1");
}

#[tokio::test]
async fn test_charge_declined_is_400_with_charge() {
    let declined = json!({"id": "chrg_test_2", "status": "failed", "failure_code": "insufficient_fund"});
    let gateway = Arc::new(FakeGateway {
        charge_reply: Some(declined.clone()),
        ..FakeGateway::default()
    });
    let app = app_with(gateway, Arc::default());

    let response = app
        .oneshot(json_request("/charge", json!({"token": "tokn_test_1", "amount": 10000})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Payment failed", "charge": declined})
    );
}

#[tokio::test]
async fn test_charge_gateway_error_is_500() {
    let app = app_with(Arc::default(), Arc::default());

    let response = app
        .oneshot(json_request("/charge", json!({"token": "tokn_test_1", "amount": 10000})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "authentication failed"}));
}

// --- /pay-with-card ---

#[tokio::test]
async fn test_pay_with_card_tokenizes_then_charges() {
    let gateway = Arc::new(FakeGateway {
        charge_reply: Some(successful_charge()),
        ..FakeGateway::default()
    });
    let app = app_with(gateway.clone(), Arc::default());

    let response = app
        .oneshot(json_request(
            "/pay-with-card",
            json!({"card": {"number": "4242424242424242"}, "amount": 10000}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "successful");
    assert_eq!(body["chargeId"], "chrg_test_5xuy4w91xqz7d1w9u0t");
    assert_eq!(body["amount"], 10000);
    assert_eq!(body["paidAt"], "2024-05-01T10:00:00Z");
    assert_eq!(body["charge"], successful_charge());

    assert_eq!(*gateway.calls.lock().unwrap(), vec!["token", "charge"]);
    let sent = gateway.charges.lock().unwrap()[0].clone();
    assert_eq!(sent.card, "tokn_for_4242424242424242");
    assert_eq!(sent.description.as_deref(), Some("Training Payment"));
}

#[tokio::test]
async fn test_pay_with_card_missing_card_is_400() {
    let gateway = Arc::new(FakeGateway::default());
    let app = app_with(gateway.clone(), Arc::default());

    let response = app
        .oneshot(json_request("/pay-with-card", json!({"amount": 10000})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Missing card info or amount"}));
    assert!(gateway.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_pay_with_card_declined_reports_failure_message() {
    let declined = json!({
        "id": "chrg_test_3",
        "status": "failed",
        "failure_code": "insufficient_fund",
        "failure_message": "insufficient funds in the account or the card has reached the credit limit"
    });
    let gateway = Arc::new(FakeGateway {
        charge_reply: Some(declined.clone()),
        ..FakeGateway::default()
    });
    let app = app_with(gateway, Arc::default());

    let response = app
        .oneshot(json_request(
            "/pay-with-card",
            json!({"card": {"number": "4111111111140011"}, "amount": 10000, "description": "Bootcamp"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "failed",
            "message": "insufficient funds in the account or the card has reached the credit limit",
            "charge": declined
        })
    );
}

// --- /upload-slip ---

#[tokio::test]
async fn test_upload_slip_stores_and_returns_signed_url() {
    let storage = Arc::new(FakeStorage::default());
    let app = app_with(Arc::default(), storage.clone());
    let slip = vec![0xAB; 1024];

    let before = Utc::now();
    let response = app
        .oneshot(multipart_request(&[
            Part::Text("folderPath", "slips/2024"),
            Part::File("slip", "a.png", "image/png", &slip),
        ]))
        .await
        .unwrap();
    let after = Utc::now();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Upload successful");
    assert_eq!(body["path"], "slips/2024/a.png");
    let url = body["url"].as_str().unwrap();
    assert!(url.contains("X-Goog-Expires=600"), "{url}");

    let objects = storage.objects.lock().unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].0, "slips/2024/a.png");
    assert_eq!(objects[0].1.len(), 1024);
    assert_eq!(objects[0].2, "image/png");

    let signed_at = storage.signed_at.lock().unwrap()[0];
    assert!(before <= signed_at && signed_at <= after);
    assert!(url.contains(&format!("X-Goog-Date={}", signed_at.format("%Y%m%dT%H%M%SZ"))));
}

#[tokio::test]
async fn test_upload_slip_missing_parts_is_400() {
    let storage = Arc::new(FakeStorage::default());
    let app = app_with(Arc::default(), storage.clone());
    let cases = [
        multipart_request(&[Part::Text("folderPath", "slips/2024")]),
        multipart_request(&[Part::File("slip", "a.png", "image/png", b"png")]),
        multipart_request(&[
            Part::Text("folderPath", ""),
            Part::File("slip", "a.png", "image/png", b"png"),
        ]),
        multipart_request(&[
            Part::Text("folderPath", "slips/2024"),
            Part::Text("slip", "not-a-file"),
        ]),
        json_request("/upload-slip", json!({"folderPath": "slips"})),
    ];

    for request in cases {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Missing slip file or folderPath"})
        );
    }
    assert!(storage.objects.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_slip_storage_error_is_500_with_details() {
    let storage = Arc::new(FakeStorage {
        fail: true,
        ..FakeStorage::default()
    });
    let app = app_with(Arc::default(), storage);

    let response = app
        .oneshot(multipart_request(&[
            Part::Text("folderPath", "slips"),
            Part::File("slip", "a.png", "image/png", b"png"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Upload failed", "details": "The specified bucket does not exist."})
    );
}

#[tokio::test]
async fn test_upload_slip_over_body_limit_is_rejected() {
    let storage = Arc::new(FakeStorage::default());
    let app = app_with(Arc::default(), storage.clone());
    let too_big = vec![0u8; 128 * 1024];

    let response = app
        .oneshot(multipart_request(&[
            Part::Text("folderPath", "slips"),
            Part::File("slip", "big.png", "image/png", &too_big),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(storage.objects.lock().unwrap().is_empty());
}

// --- Ambient surface ---

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let app = app_with(Arc::default(), Arc::default());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/charge")
                .header(header::ORIGIN, "https://trainpay.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_unknown_paths_fall_back_to_static_files() {
    let public = format!("{}/tests/fixtures/public", env!("CARGO_MANIFEST_DIR"));
    let app = app_with_config(config(Some(public)), Arc::default(), Arc::default());

    let response = app
        .clone()
        .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<h1>Trainpay</h1>"));

    let response = app
        .oneshot(Request::get("/missing.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
