//! Request and response bodies of the certificate API.
//!
//! Shared by the server and the command-line client so both sides agree
//! on the wire shape.

use serde::{Deserialize, Serialize};

/// Confirmation message returned on every successful issuance.
pub const CERTIFICATE_CREATED: &str = "Certificate created!";

/// Message returned when a verified identifier has a record.
pub const VALID_CERTIFICATE: &str = "Valid certificate";

/// Message returned when a verified identifier has no record.
pub const INVALID_CERTIFICATE: &str = "Invalid certificate";

/// Body of an issue request.
///
/// No format validation is applied: empty or unusual strings are accepted
/// as-is and flow through to the rendered document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueCertificateRequest {
    /// Caller-assigned certificate identifier.
    pub id: String,
    /// Recipient display name.
    pub name: String,
    /// Recipient grade or level.
    pub grade: String,
}

/// Body of a successful issue response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueCertificateResponse {
    pub message: String,
    /// Public URL of the rendered artifact.
    pub url: String,
}

impl IssueCertificateResponse {
    pub fn created(url: String) -> Self {
        Self {
            message: CERTIFICATE_CREATED.to_string(),
            url,
        }
    }
}

/// Body of a verify response.
///
/// `name` and `url` are present only for a valid certificate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyCertificateResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl VerifyCertificateResponse {
    pub fn valid(name: String, url: String) -> Self {
        Self {
            message: VALID_CERTIFICATE.to_string(),
            name: Some(name),
            url: Some(url),
        }
    }

    pub fn invalid() -> Self {
        Self {
            message: INVALID_CERTIFICATE.to_string(),
            name: None,
            url: None,
        }
    }

    /// Returns true if this response reports a valid certificate.
    pub fn is_valid(&self) -> bool {
        self.name.is_some()
    }
}
