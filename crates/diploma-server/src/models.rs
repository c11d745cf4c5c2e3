//! Database models for issued certificates.

pub mod certificate;

pub use certificate::{Certificate, NewCertificate};
