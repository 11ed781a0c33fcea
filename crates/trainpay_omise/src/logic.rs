// --- File: crates/trainpay_omise/src/logic.rs ---
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use trainpay_common::{
    domain_failure, validation_error, Charge, NewCharge, PaymentGateway, TrainpayError,
};
use trainpay_config::OmiseConfig;

// Conditionally import ToSchema if openapi feature is enabled
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const MISSING_TOKEN_OR_AMOUNT: &str = "Missing token or amount";
pub const MISSING_CARD_OR_AMOUNT: &str = "Missing card info or amount";
pub const PAYMENT_FAILED: &str = "Payment failed";
pub const CHARGE_FAILED: &str = "Charge failed";

// --- Data Structures ---

/// Body of `POST /charge`.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChargeRequest {
    /// Card token created client-side with the public key
    #[cfg_attr(feature = "openapi", schema(example = "tokn_test_5xp6ca4d8wyxr3t3tly"))]
    pub token: Option<String>,
    /// Amount in satang (100 = 1 THB)
    #[cfg_attr(feature = "openapi", schema(example = 150000))]
    pub amount: Option<i64>,
}

/// Body of `POST /pay-with-card`.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CardChargeRequest {
    /// Raw card fields: `name`, `number`, `expiration_month`, `expiration_year`, `security_code`
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub card: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(example = 150000))]
    pub amount: Option<i64>,
    pub description: Option<String>,
}

/// Per-deployment charge parameters.
#[derive(Debug, Clone)]
pub struct ChargeSettings {
    pub currency: String,
    pub default_description: String,
}

impl From<&OmiseConfig> for ChargeSettings {
    fn from(config: &OmiseConfig) -> Self {
        Self {
            currency: config.currency.clone(),
            default_description: config.default_description.clone(),
        }
    }
}

// --- Core Logic Functions ---

/// Charges a pre-created card token.
///
/// Returns the charge only when the gateway reports it successful. Any other
/// status becomes a `DomainFailure` carrying the gateway's charge object.
pub async fn charge_with_token(
    gateway: &dyn PaymentGateway,
    settings: &ChargeSettings,
    request: ChargeRequest,
) -> Result<Charge, TrainpayError> {
    let token = request.token.filter(|token| !token.is_empty());
    let amount = request.amount.filter(|amount| *amount > 0);
    let (Some(token), Some(amount)) = (token, amount) else {
        return Err(validation_error(MISSING_TOKEN_OR_AMOUNT));
    };

    let charge = gateway
        .create_charge(&NewCharge {
            amount,
            currency: settings.currency.clone(),
            card: token,
            description: None,
        })
        .await?;

    if charge.is_successful() {
        info!("[Omise Logic] Charge {} successful ({} {})", charge.id, amount, settings.currency);
        Ok(charge)
    } else {
        warn!("[Omise Logic] Charge {} ended with status {}", charge.id, charge.status);
        Err(domain_failure(PAYMENT_FAILED, charge.raw))
    }
}

/// Tokenizes raw card details, then charges the token.
///
/// If tokenization fails no charge is attempted. A declined charge becomes a
/// `DomainFailure` whose message is the gateway's `failure_message`, or
/// [`CHARGE_FAILED`] when it gave none.
pub async fn charge_with_card(
    gateway: &dyn PaymentGateway,
    settings: &ChargeSettings,
    request: CardChargeRequest,
) -> Result<Charge, TrainpayError> {
    let card = match request.card {
        Some(Value::Object(card)) if !card.is_empty() => card,
        _ => return Err(validation_error(MISSING_CARD_OR_AMOUNT)),
    };
    let Some(amount) = request.amount.filter(|amount| *amount > 0) else {
        return Err(validation_error(MISSING_CARD_OR_AMOUNT));
    };

    let token = gateway.create_token(&card).await?;
    info!("[Omise Logic] Card tokenized as {}", token.id);

    let description = request
        .description
        .filter(|description| !description.is_empty())
        .unwrap_or_else(|| settings.default_description.clone());

    let charge = gateway
        .create_charge(&NewCharge {
            amount,
            currency: settings.currency.clone(),
            card: token.id,
            description: Some(description),
        })
        .await?;

    if charge.is_successful() {
        info!("[Omise Logic] Card charge {} successful", charge.id);
        Ok(charge)
    } else {
        let message = charge
            .failure_message
            .clone()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| CHARGE_FAILED.to_string());
        warn!(
            "[Omise Logic] Card charge {} failed: {} ({:?})",
            charge.id, message, charge.failure_code
        );
        Err(domain_failure(message, charge.raw))
    }
}
