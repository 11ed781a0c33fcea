// --- File: crates/trainpay_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers and logic depend on these traits, never on the Omise or Google
//! clients directly, so tests can substitute in-memory fakes.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::error::TrainpayError;
use crate::models::{CardDetails, CardToken, Charge, NewCharge};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A card payment gateway.
pub trait PaymentGateway: Send + Sync {
    /// Exchange raw card details for a single-use token.
    fn create_token<'a>(&'a self, card: &'a CardDetails)
        -> BoxFuture<'a, CardToken, TrainpayError>;

    /// Create a charge against a token.
    ///
    /// A charge the gateway created but did not complete is still `Ok`;
    /// callers inspect [`Charge::status`].
    fn create_charge<'a>(&'a self, charge: &'a NewCharge) -> BoxFuture<'a, Charge, TrainpayError>;
}

/// A bucket-style object store that can hand out signed read URLs.
pub trait ObjectStorage: Send + Sync {
    /// Store `data` at `path`, replacing any existing object.
    fn save<'a>(
        &'a self,
        path: &'a str,
        data: Bytes,
        content_type: &'a str,
    ) -> BoxFuture<'a, (), TrainpayError>;

    /// A URL granting read access to `path` from `issued_at` for `ttl`.
    fn signed_read_url<'a>(
        &'a self,
        path: &'a str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> BoxFuture<'a, String, TrainpayError>;
}

/// A factory for creating service implementations.
pub trait ServiceFactory: Send + Sync {
    fn payment_gateway(&self) -> Arc<dyn PaymentGateway>;

    fn object_storage(&self) -> Arc<dyn ObjectStorage>;
}
