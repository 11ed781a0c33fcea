// --- File: crates/trainpay_omise/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    CardChargeFailedResponse, CardChargeResponse, ChargeFailedResponse, ChargeResponse,
};
use crate::logic::{CardChargeRequest, ChargeRequest};

#[utoipa::path(
    post,
    path = "/charge",
    request_body(content = ChargeRequest, example = json!({
        "token": "tokn_test_5xp6ca4d8wyxr3t3tly",
        "amount": 150000
    })),
    responses(
        (status = 200, description = "Charge successful", body = ChargeResponse),
        (status = 400, description = "Missing token or amount, or the charge was declined", body = ChargeFailedResponse),
        (status = 500, description = "Omise API error")
    ),
    tag = "Payments"
)]
fn doc_charge_handler() {}

#[utoipa::path(
    post,
    path = "/pay-with-card",
    request_body(content = CardChargeRequest, example = json!({
        "card": {
            "name": "Somchai Prasert",
            "number": "4242424242424242",
            "expiration_month": 12,
            "expiration_year": 2030,
            "security_code": "123"
        },
        "amount": 150000,
        "description": "Rust Bootcamp seat"
    })),
    responses(
        (status = 200, description = "Card tokenized and charged", body = CardChargeResponse),
        (status = 400, description = "Missing card or amount, or the charge was declined", body = CardChargeFailedResponse),
        (status = 500, description = "Omise API error during tokenization or charge")
    ),
    tag = "Payments"
)]
fn doc_pay_with_card_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_charge_handler, doc_pay_with_card_handler),
    components(schemas(
        ChargeRequest,
        CardChargeRequest,
        ChargeResponse,
        ChargeFailedResponse,
        CardChargeResponse,
        CardChargeFailedResponse
    )),
    tags((name = "Payments", description = "Omise card payments"))
)]
pub struct OmiseApiDoc;
