// --- File: crates/services/trainpay_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the Omise gateway and Firebase storage handles once at startup. Both
//! share one reqwest client, and with it one connection pool.

use std::sync::Arc;
use tracing::info;
use trainpay_common::{
    create_client, transport_error, ObjectStorage, PaymentGateway, ServiceFactory, TrainpayError,
};
use trainpay_config::AppConfig;
use trainpay_firebase::FirebaseStorage;
use trainpay_omise::{OmiseClient, OmiseGateway};

/// Service factory for the production backends.
pub struct TrainpayServiceFactory {
    payment_gateway: Arc<dyn PaymentGateway>,
    object_storage: Arc<dyn ObjectStorage>,
}

impl TrainpayServiceFactory {
    /// Create the service handles from configuration.
    ///
    /// Fails when the service account cannot be read or its key is unusable.
    pub async fn new(config: &AppConfig) -> Result<Self, TrainpayError> {
        let http = create_client(config.http.timeout_secs, true).map_err(transport_error)?;

        let payment_gateway = Arc::new(OmiseGateway::new(OmiseClient::new(
            &config.omise,
            http.clone(),
        )));
        info!("Omise gateway ready (API {})", config.omise.api_base);

        let object_storage = Arc::new(FirebaseStorage::from_config(&config.firebase, http).await?);
        info!("Firebase storage ready (bucket {})", config.firebase.bucket);

        Ok(Self::from_services(payment_gateway, object_storage))
    }

    /// Wrap already constructed services, e.g. test doubles.
    pub fn from_services(
        payment_gateway: Arc<dyn PaymentGateway>,
        object_storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            payment_gateway,
            object_storage,
        }
    }
}

impl ServiceFactory for TrainpayServiceFactory {
    fn payment_gateway(&self) -> Arc<dyn PaymentGateway> {
        self.payment_gateway.clone()
    }

    fn object_storage(&self) -> Arc<dyn ObjectStorage> {
        self.object_storage.clone()
    }
}
