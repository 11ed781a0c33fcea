// --- File: crates/trainpay_omise/src/service.rs ---
use serde_json::Value;
use trainpay_common::{
    BoxFuture, CardDetails, CardToken, Charge, NewCharge, PaymentGateway, TrainpayError,
};

use crate::client::OmiseClient;
use crate::error::OmiseError;

/// [`PaymentGateway`] backed by the Omise REST API.
pub struct OmiseGateway {
    client: OmiseClient,
}

impl OmiseGateway {
    /// Create a new Omise payment gateway
    pub fn new(client: OmiseClient) -> Self {
        Self { client }
    }
}

impl PaymentGateway for OmiseGateway {
    fn create_token<'a>(
        &'a self,
        card: &'a CardDetails,
    ) -> BoxFuture<'a, CardToken, TrainpayError> {
        Box::pin(async move {
            let raw = self.client.create_token(card).await?;
            let id = raw
                .get("id")
                .and_then(Value::as_str)
                .ok_or(OmiseError::MissingField("id"))?
                .to_string();

            Ok(CardToken { id, raw })
        })
    }

    fn create_charge<'a>(&'a self, charge: &'a NewCharge) -> BoxFuture<'a, Charge, TrainpayError> {
        Box::pin(async move {
            let raw = self.client.create_charge(charge).await?;
            let charge = Charge::from_json(raw).map_err(OmiseError::from)?;
            Ok(charge)
        })
    }
}
