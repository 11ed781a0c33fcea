//! Access tokens for the Cloud Storage JSON API.
//!
//! Production uses the service account through yup-oauth2, which caches and
//! refreshes tokens itself. The Storage emulator accepts the fixed `owner` token.

use std::sync::Arc;
use trainpay_common::BoxFuture;
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

use crate::error::StorageError;

/// Read/write access to objects, nothing more.
pub const STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";

/// Bearer token accepted by the Firebase Storage emulator.
pub const EMULATOR_TOKEN: &str = "owner";

/// A source of bearer tokens for Storage requests.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> BoxFuture<'_, String, StorageError>;
}

/// Tokens minted for a service account.
pub struct ServiceAccountTokenSource {
    auth: DefaultAuthenticator,
}

impl ServiceAccountTokenSource {
    pub async fn new(sa_key: ServiceAccountKey) -> Result<Self, StorageError> {
        let auth = ServiceAccountAuthenticator::builder(sa_key)
            .build()
            .await
            .map_err(|e| StorageError::AuthError(e.to_string()))?;
        Ok(Self { auth })
    }
}

impl TokenSource for ServiceAccountTokenSource {
    fn access_token(&self) -> BoxFuture<'_, String, StorageError> {
        Box::pin(async move {
            let auth_token = self
                .auth
                .token(&[STORAGE_SCOPE])
                .await
                .map_err(|e| StorageError::AuthError(e.to_string()))?;

            match auth_token.token() {
                Some(token) => Ok(token.to_string()),
                None => Err(StorageError::AuthError("No token available".to_string())),
            }
        })
    }
}

/// Always hands out the same token.
pub struct StaticTokenSource(pub String);

impl StaticTokenSource {
    pub fn emulator() -> Arc<dyn TokenSource> {
        Arc::new(Self(EMULATOR_TOKEN.to_string()))
    }
}

impl TokenSource for StaticTokenSource {
    fn access_token(&self) -> BoxFuture<'_, String, StorageError> {
        let token = self.0.clone();
        Box::pin(async move { Ok(token) })
    }
}
