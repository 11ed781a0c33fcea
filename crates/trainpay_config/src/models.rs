// --- File: crates/trainpay_config/src/models.rs ---

use serde::Deserialize;
use std::fmt;

use crate::env_vars::config_path_to_env_var;
use crate::env_vars::legacy_env_var_for;
use crate::ConfigLoadError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CURRENCY: &str = "thb";
pub const DEFAULT_CHARGE_DESCRIPTION: &str = "Training Payment";
pub const DEFAULT_OMISE_API_BASE: &str = "https://api.omise.co";
pub const DEFAULT_OMISE_VAULT_BASE: &str = "https://vault.omise.co";
pub const DEFAULT_STORAGE_API_BASE: &str = "https://storage.googleapis.com";
pub const DEFAULT_SIGNING_HOST: &str = "storage.googleapis.com";
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// --- General Server Config ---
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for requests that match no API route.
    pub static_dir: Option<String>,
}

// --- Omise Config ---
// Keys come from OMISE_PUBLIC_KEY / OMISE_SECRET_KEY in the original deployment.
#[derive(Clone)]
pub struct OmiseConfig {
    pub public_key: String,
    pub secret_key: String,
    /// Currency used for every charge (lowercase ISO 4217).
    pub currency: String,
    /// Description sent with card charges that do not carry their own.
    pub default_description: String,
    pub api_base: String,
    pub vault_base: String,
}

impl fmt::Debug for OmiseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmiseConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("currency", &self.currency)
            .field("default_description", &self.default_description)
            .field("api_base", &self.api_base)
            .field("vault_base", &self.vault_base)
            .finish()
    }
}

// --- Firebase Storage Config ---
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Path to the service account JSON document (FIREBASE_SERVICE_ACCOUNT).
    pub service_account_path: String,
    /// Bucket name (FIREBASE_BUCKET), e.g. `my-project.appspot.com`.
    pub bucket: String,
    pub storage_api_base: String,
    /// Host that signed URLs are minted for.
    pub signing_host: String,
    /// `host:port` of a local Storage emulator; uploads go there when set.
    pub emulator_host: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
    pub file_prefix: String,
}

// --- Unified App Configuration ---
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub omise: OmiseConfig,
    pub firebase: FirebaseConfig,
    pub upload: UploadConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

// --- Raw (unvalidated) layout, as read from files and environment ---

#[derive(Debug, Deserialize, Default)]
pub(crate) struct RawConfig {
    #[serde(default)]
    server: RawServerConfig,
    #[serde(default)]
    omise: RawOmiseConfig,
    #[serde(default)]
    firebase: RawFirebaseConfig,
    #[serde(default)]
    upload: RawUploadConfig,
    #[serde(default)]
    http: RawHttpConfig,
    #[serde(default)]
    logging: RawLoggingConfig,
}

#[derive(Debug, Deserialize, Default)]
struct RawServerConfig {
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawOmiseConfig {
    public_key: Option<String>,
    secret_key: Option<String>,
    currency: Option<String>,
    default_description: Option<String>,
    api_base: Option<String>,
    vault_base: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawFirebaseConfig {
    service_account_path: Option<String>,
    bucket: Option<String>,
    storage_api_base: Option<String>,
    signing_host: Option<String>,
    emulator_host: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawUploadConfig {
    max_body_bytes: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
struct RawHttpConfig {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct RawLoggingConfig {
    level: Option<String>,
    directory: Option<String>,
    file_prefix: Option<String>,
}

/// Collects the names of required keys that are absent or blank.
struct Required {
    missing: Vec<String>,
}

impl Required {
    fn take(&mut self, path: &str, value: Option<String>) -> String {
        match non_blank(value) {
            Some(v) => v,
            None => {
                let hint = match legacy_env_var_for(path) {
                    Some(legacy) => format!("{path} (set {legacy} or {})", config_path_to_env_var(path)),
                    None => format!("{path} (set {})", config_path_to_env_var(path)),
                };
                self.missing.push(hint);
                String::new()
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
    non_blank(value).unwrap_or_else(|| default.to_string())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

impl RawConfig {
    /// Turns the raw layout into an [`AppConfig`], reporting every missing secret at once.
    pub(crate) fn validate(self) -> Result<AppConfig, ConfigLoadError> {
        let mut required = Required { missing: Vec::new() };

        let public_key = required.take("omise.public_key", self.omise.public_key);
        let secret_key = required.take("omise.secret_key", self.omise.secret_key);
        let service_account_path =
            required.take("firebase.service_account_path", self.firebase.service_account_path);
        let bucket = required.take("firebase.bucket", self.firebase.bucket);

        if !required.missing.is_empty() {
            return Err(ConfigLoadError::Missing(required.missing));
        }

        let currency = or_default(self.omise.currency, DEFAULT_CURRENCY).to_lowercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigLoadError::Invalid(format!(
                "omise.currency must be a three-letter ISO 4217 code, got '{currency}'"
            )));
        }

        let max_body_bytes = self.upload.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        if max_body_bytes == 0 {
            return Err(ConfigLoadError::Invalid(
                "upload.max_body_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(AppConfig {
            server: ServerConfig {
                host: or_default(self.server.host, DEFAULT_HOST),
                port: self.server.port.unwrap_or(DEFAULT_PORT),
                static_dir: match self.server.static_dir {
                    Some(dir) => non_blank(Some(dir)),
                    None => Some("public".to_string()),
                },
            },
            omise: OmiseConfig {
                public_key,
                secret_key,
                currency,
                default_description: or_default(
                    self.omise.default_description,
                    DEFAULT_CHARGE_DESCRIPTION,
                ),
                api_base: trim_base(or_default(self.omise.api_base, DEFAULT_OMISE_API_BASE)),
                vault_base: trim_base(or_default(self.omise.vault_base, DEFAULT_OMISE_VAULT_BASE)),
            },
            firebase: FirebaseConfig {
                service_account_path,
                bucket,
                storage_api_base: trim_base(or_default(
                    self.firebase.storage_api_base,
                    DEFAULT_STORAGE_API_BASE,
                )),
                signing_host: or_default(self.firebase.signing_host, DEFAULT_SIGNING_HOST),
                emulator_host: non_blank(self.firebase.emulator_host),
            },
            upload: UploadConfig { max_body_bytes },
            http: HttpConfig {
                timeout_secs: self.http.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            },
            logging: LoggingConfig {
                level: or_default(self.logging.level, "info"),
                directory: non_blank(self.logging.directory),
                file_prefix: or_default(self.logging.file_prefix, "trainpay.log"),
            },
        })
    }
}
