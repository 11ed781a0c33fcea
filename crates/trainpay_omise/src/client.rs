// --- File: crates/trainpay_omise/src/client.rs ---
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};
use trainpay_common::{CardDetails, NewCharge};
use trainpay_config::OmiseConfig;

use crate::error::OmiseError;

/// Thin client for the two Omise endpoints Trainpay uses.
///
/// Tokens are created on the vault host with the public key; charges on the
/// API host with the secret key. Both authenticate with HTTP basic auth, key as
/// username and an empty password, and send form-encoded bodies.
#[derive(Clone)]
pub struct OmiseClient {
    http: Client,
    public_key: String,
    secret_key: String,
    api_base: String,
    vault_base: String,
}

impl OmiseClient {
    pub fn new(config: &OmiseConfig, http: Client) -> Self {
        Self {
            http,
            public_key: config.public_key.clone(),
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.clone(),
            vault_base: config.vault_base.clone(),
        }
    }

    /// `POST {vault}/tokens`, returning the token object.
    pub async fn create_token(&self, card: &CardDetails) -> Result<Value, OmiseError> {
        let url = format!("{}/tokens", self.vault_base);
        debug!("[Omise] Creating card token via {}", url);

        let request = self
            .http
            .post(&url)
            .basic_auth(&self.public_key, None::<&str>)
            .form(&card_form(card));

        send(request).await
    }

    /// `POST {api}/charges`, returning the charge object whatever its status.
    pub async fn create_charge(&self, charge: &NewCharge) -> Result<Value, OmiseError> {
        let url = format!("{}/charges", self.api_base);

        let mut form_body = vec![
            ("amount".to_string(), charge.amount.to_string()),
            ("currency".to_string(), charge.currency.clone()),
            ("card".to_string(), charge.card.clone()),
        ];
        if let Some(description) = &charge.description {
            form_body.push(("description".to_string(), description.clone()));
        }

        info!(
            "[Omise] Creating charge of {} {} via {}",
            charge.amount, charge.currency, url
        );

        let request = self
            .http
            .post(&url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form_body);

        send(request).await
    }
}

/// Flattens card fields into Omise's bracketed form keys (`card[number]=...`).
/// Nested objects, arrays and nulls have no form representation and are dropped.
pub(crate) fn card_form(card: &CardDetails) -> Vec<(String, String)> {
    card.iter()
        .filter_map(|(field, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((format!("card[{field}]"), value))
        })
        .collect()
}

async fn send(request: RequestBuilder) -> Result<Value, OmiseError> {
    let response = request.send().await?;
    let status = response.status();
    let body_text = response.text().await?;

    debug!("[Omise] API response status: {}", status);

    let parsed = serde_json::from_str::<Value>(&body_text);
    let is_error_object = parsed
        .as_ref()
        .map(|body| body.get("object").and_then(Value::as_str) == Some("error"))
        .unwrap_or(false);

    if status.is_success() && !is_error_object {
        return Ok(parsed?);
    }

    let (code, message) = match parsed {
        Ok(body) => (
            body.get("code").and_then(Value::as_str).map(str::to_string),
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(body_text),
        ),
        Err(_) => (None, body_text),
    };
    info!(
        "[Omise] API request failed with HTTP status: {}. Code: {:?}. Message: {}",
        status, code, message
    );

    Err(OmiseError::ApiError {
        status_code: status.as_u16(),
        code,
        message,
    })
}
