// --- File: crates/trainpay_omise/src/lib.rs ---

pub mod client;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

#[cfg(test)]
mod client_test;

// Re-export for main backend
pub use client::OmiseClient;
pub use error::OmiseError; // Re-export the error type
pub use handlers::OmiseState;
pub use logic::{CardChargeRequest, ChargeRequest, ChargeSettings};
pub use routes::routes;
pub use service::OmiseGateway; // Re-export the payment gateway
