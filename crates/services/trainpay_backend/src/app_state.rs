// --- File: crates/services/trainpay_backend/src/app_state.rs ---
use std::sync::Arc;
use trainpay_common::ServiceFactory;
use trainpay_config::AppConfig;

/// Application state shared by the router builder.
///
/// Everything in here is built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration loaded at startup.
    pub config: Arc<AppConfig>,

    /// Payment gateway and object storage handles.
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, service_factory: Arc<dyn ServiceFactory>) -> Self {
        Self {
            config,
            service_factory,
        }
    }
}
