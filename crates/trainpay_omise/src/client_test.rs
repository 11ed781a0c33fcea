use crate::client::{card_form, OmiseClient};
use crate::error::OmiseError;
use crate::service::OmiseGateway;
use serde_json::{json, Map, Value};
use trainpay_common::{create_client, NewCharge, PaymentGateway, TrainpayError};
use trainpay_config::OmiseConfig;
use wiremock::matchers::{basic_auth, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OmiseClient {
    let config = OmiseConfig {
        public_key: "pkey_test_5x".to_string(),
        secret_key: "skey_test_5x".to_string(),
        currency: "thb".to_string(),
        default_description: "Training Payment".to_string(),
        api_base: server.uri(),
        vault_base: server.uri(),
    };
    OmiseClient::new(&config, create_client(5, false).unwrap())
}

fn card() -> Map<String, Value> {
    json!({
        "name": "Somchai Prasert",
        "number": "4242424242424242",
        "expiration_month": 12,
        "expiration_year": 2030,
        "security_code": "123"
    })
    .as_object()
    .unwrap()
    .clone()
}

#[test]
fn test_card_form_uses_bracketed_keys_and_drops_nested_values() {
    let mut card = card();
    card.insert("billing".to_string(), json!({"city": "Bangkok"}));
    card.insert("city".to_string(), Value::Null);

    let form = card_form(&card);

    assert!(form.contains(&("card[number]".to_string(), "4242424242424242".to_string())));
    assert!(form.contains(&("card[expiration_month]".to_string(), "12".to_string())));
    assert_eq!(form.len(), 5);
}

#[tokio::test]
async fn test_create_token_posts_card_to_vault_with_public_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tokens"))
        .and(basic_auth("pkey_test_5x", ""))
        .and(body_string_contains("card%5Bnumber%5D=4242424242424242"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "token",
            "id": "tokn_test_123",
            "used": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = OmiseGateway::new(client_for(&server));
    let token = gateway.create_token(&card()).await.unwrap();

    assert_eq!(token.id, "tokn_test_123");
    assert_eq!(token.raw["object"], "token");
}

#[tokio::test]
async fn test_create_charge_posts_form_with_secret_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/charges"))
        .and(basic_auth("skey_test_5x", ""))
        .and(body_string_contains("amount=150000"))
        .and(body_string_contains("currency=thb"))
        .and(body_string_contains("card=tokn_test_123"))
        .and(body_string_contains("description=Training+Payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "charge",
            "id": "chrg_test_1",
            "status": "successful",
            "amount": 150000,
            "paid_at": "2024-05-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = OmiseGateway::new(client_for(&server));
    let charge = gateway
        .create_charge(&NewCharge {
            amount: 150000,
            currency: "thb".to_string(),
            card: "tokn_test_123".to_string(),
            description: Some("Training Payment".to_string()),
        })
        .await
        .unwrap();

    assert!(charge.is_successful());
    assert_eq!(charge.id, "chrg_test_1");
    assert_eq!(charge.raw["amount"], 150000);
}

#[tokio::test]
async fn test_declined_charge_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "charge",
            "id": "chrg_test_2",
            "status": "failed",
            "amount": 150000,
            "failure_code": "insufficient_fund",
            "failure_message": "insufficient funds in the account or the card has reached the credit limit"
        })))
        .mount(&server)
        .await;

    let gateway = OmiseGateway::new(client_for(&server));
    let charge = gateway
        .create_charge(&NewCharge {
            amount: 150000,
            currency: "thb".to_string(),
            card: "tokn_test_123".to_string(),
            description: None,
        })
        .await
        .unwrap();

    assert!(!charge.is_successful());
    assert_eq!(charge.failure_code.as_deref(), Some("insufficient_fund"));
}

#[tokio::test]
async fn test_error_object_maps_to_api_error_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/charges"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "object": "error",
            "location": "https://www.omise.co/api-errors#authentication-failure",
            "code": "authentication_failure",
            "message": "authentication failed"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .create_charge(&NewCharge {
            amount: 100,
            currency: "thb".to_string(),
            card: "tokn_test_123".to_string(),
            description: None,
        })
        .await
        .unwrap_err();

    match err {
        OmiseError::ApiError {
            status_code,
            code,
            message,
        } => {
            assert_eq!(status_code, 401);
            assert_eq!(code.as_deref(), Some("authentication_failure"));
            assert_eq!(message, "authentication failed");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tokens"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let gateway = OmiseGateway::new(client_for(&server));
    let err = gateway.create_token(&card()).await.unwrap_err();

    assert!(matches!(err, TrainpayError::TransportError(ref m) if m == "Bad Gateway"));
}

#[tokio::test]
async fn test_token_without_id_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": "token"})))
        .mount(&server)
        .await;

    let gateway = OmiseGateway::new(client_for(&server));
    let err = gateway.create_token(&card()).await.unwrap_err();

    assert!(matches!(err, TrainpayError::TransportError(_)));
}
