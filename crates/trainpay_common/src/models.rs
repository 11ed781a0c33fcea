// --- File: crates/trainpay_common/src/models.rs ---
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw card fields as sent by the client (`name`, `number`, `expiration_month`, ...).
///
/// Forwarded to the gateway's tokenization endpoint without interpretation.
pub type CardDetails = Map<String, Value>;

/// A charge to be created against a card token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharge {
    /// Amount in the smallest currency unit (satang for THB)
    pub amount: i64,
    pub currency: String,
    /// Single-use card token
    pub card: String,
    pub description: Option<String>,
}

/// A single-use card token issued by the gateway.
#[derive(Debug, Clone)]
pub struct CardToken {
    pub id: String,
    /// The gateway's full token object
    pub raw: Value,
}

/// A charge as reported by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub failure_code: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
    /// The gateway's full charge object, echoed back to callers
    #[serde(skip)]
    pub raw: Value,
}

impl Charge {
    pub const STATUS_SUCCESSFUL: &'static str = "successful";

    /// Only an explicit "successful" counts; pending and failed charges do not.
    pub fn is_successful(&self) -> bool {
        self.status == Self::STATUS_SUCCESSFUL
    }

    /// Reads a gateway charge object, keeping the original JSON in `raw`.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let mut charge: Charge = serde_json::from_value(value.clone())?;
        charge.raw = value;
        Ok(charge)
    }
}

/// Where an uploaded slip ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredSlip {
    /// Object path inside the bucket (`{folderPath}/{filename}`)
    pub path: String,
    /// Time-limited read URL
    pub url: String,
}
