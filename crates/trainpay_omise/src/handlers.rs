// --- File: crates/trainpay_omise/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use trainpay_common::{logging::log_error, payload_or_default, PaymentGateway, TrainpayError};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::logic::{
    charge_with_card, charge_with_token, CardChargeRequest, ChargeRequest, ChargeSettings,
    PAYMENT_FAILED,
};

// --- State for Omise Handlers ---
#[derive(Clone)]
pub struct OmiseState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub settings: ChargeSettings,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChargeResponse {
    pub message: String,
    pub charge_id: String,
    /// The gateway's full charge object
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub charge: Value,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChargeFailedResponse {
    pub error: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub charge: Value,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CardChargeResponse {
    /// Always `"successful"`
    pub status: String,
    pub charge_id: String,
    pub amount: i64,
    pub paid_at: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub charge: Value,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CardChargeFailedResponse {
    /// Always `"failed"`
    pub status: String,
    pub message: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub charge: Value,
}

/// Charges a card token created on the client.
#[axum::debug_handler]
pub async fn charge_handler(
    State(state): State<Arc<OmiseState>>,
    payload: Result<Json<ChargeRequest>, JsonRejection>,
) -> Response {
    let request = payload_or_default(payload);

    match charge_with_token(state.gateway.as_ref(), &state.settings, request).await {
        Ok(charge) => Json(ChargeResponse {
            message: "Payment successful".to_string(),
            charge_id: charge.id,
            charge: charge.raw,
        })
        .into_response(),
        Err(TrainpayError::DomainFailure { payload, .. }) => (
            StatusCode::BAD_REQUEST,
            Json(ChargeFailedResponse {
                error: PAYMENT_FAILED.to_string(),
                charge: payload,
            }),
        )
            .into_response(),
        Err(err) => {
            log_error(&err, "Charge request failed");
            err.into_response()
        }
    }
}

/// Tokenizes raw card details and charges them in one call.
#[axum::debug_handler]
pub async fn pay_with_card_handler(
    State(state): State<Arc<OmiseState>>,
    payload: Result<Json<CardChargeRequest>, JsonRejection>,
) -> Response {
    let request = payload_or_default(payload);

    match charge_with_card(state.gateway.as_ref(), &state.settings, request).await {
        Ok(charge) => Json(CardChargeResponse {
            status: "successful".to_string(),
            charge_id: charge.id,
            amount: charge.amount,
            paid_at: charge.paid_at,
            charge: charge.raw,
        })
        .into_response(),
        Err(TrainpayError::DomainFailure { message, payload }) => (
            StatusCode::BAD_REQUEST,
            Json(CardChargeFailedResponse {
                status: "failed".to_string(),
                message,
                charge: payload,
            }),
        )
            .into_response(),
        Err(err) => {
            log_error(&err, "Card payment failed");
            err.into_response()
        }
    }
}
