use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use trainpay_common::{BoxFuture, ObjectStorage, TrainpayError};
use trainpay_config::FirebaseConfig;
use yup_oauth2::read_service_account_key;

use crate::auth::{ServiceAccountTokenSource, StaticTokenSource, TokenSource};
use crate::client::StorageClient;
use crate::error::StorageError;
use crate::signing::UrlSigner;

/// [`ObjectStorage`] backed by a Firebase Storage bucket.
pub struct FirebaseStorage {
    client: StorageClient,
    signer: UrlSigner,
}

impl FirebaseStorage {
    pub fn new(client: StorageClient, signer: UrlSigner) -> Self {
        Self { client, signer }
    }

    /// Reads the service account and wires uploads to Cloud Storage, or to the
    /// emulator when one is configured. Signed URLs always use the service
    /// account key.
    pub async fn from_config(config: &FirebaseConfig, http: Client) -> Result<Self, StorageError> {
        let sa_key = read_service_account_key(Path::new(&config.service_account_path))
            .await
            .map_err(|e| {
                StorageError::Credentials(format!("{}: {}", config.service_account_path, e))
            })?;

        let signer = UrlSigner::new(
            sa_key.client_email.clone(),
            &sa_key.private_key,
            config.signing_host.clone(),
        )?;

        let (api_base, tokens): (String, Arc<dyn TokenSource>) = match &config.emulator_host {
            Some(host) => {
                info!("Using Firebase Storage emulator at {}", host);
                (format!("http://{host}"), StaticTokenSource::emulator())
            }
            None => (
                config.storage_api_base.clone(),
                Arc::new(ServiceAccountTokenSource::new(sa_key).await?),
            ),
        };

        Ok(Self::new(
            StorageClient::new(http, api_base, config.bucket.clone(), tokens),
            signer,
        ))
    }
}

impl ObjectStorage for FirebaseStorage {
    fn save<'a>(
        &'a self,
        path: &'a str,
        data: Bytes,
        content_type: &'a str,
    ) -> BoxFuture<'a, (), TrainpayError> {
        Box::pin(async move {
            self.client.upload(path, data, content_type).await?;
            Ok(())
        })
    }

    fn signed_read_url<'a>(
        &'a self,
        path: &'a str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> BoxFuture<'a, String, TrainpayError> {
        Box::pin(async move {
            let url = self
                .signer
                .signed_get_url(self.client.bucket(), path, issued_at, ttl)?;
            Ok(url)
        })
    }
}
