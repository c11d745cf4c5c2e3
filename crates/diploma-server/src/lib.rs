//! Diploma Server - certificate issuance and verification API
//!
//! Issues certificate documents for a recipient and grade, stores the
//! rendered PDF, and lets anyone holding a certificate identifier verify it.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod service;
pub mod stores;

pub use config::Config;
pub use error::AppError;
pub use routes::create_router;
pub use service::{CertificateService, Verification};
