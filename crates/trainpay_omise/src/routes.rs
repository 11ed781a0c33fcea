// --- File: crates/trainpay_omise/src/routes.rs ---

use crate::handlers::{charge_handler, pay_with_card_handler, OmiseState};
use crate::logic::ChargeSettings;
use axum::{routing::post, Router};
use std::sync::Arc;
use trainpay_common::PaymentGateway;

/// Creates a router containing all routes for the payment feature.
pub fn routes(gateway: Arc<dyn PaymentGateway>, settings: ChargeSettings) -> Router {
    let omise_state = Arc::new(OmiseState { gateway, settings });

    Router::new()
        .route("/charge", post(charge_handler))
        .route("/pay-with-card", post(pay_with_card_handler))
        .with_state(omise_state)
}
