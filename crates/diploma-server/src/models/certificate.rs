//! Certificate record model.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use diploma_core::artifact_url;

/// Represents an issued certificate stored in the database.
///
/// Written once on first issuance and never updated afterwards.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Certificate {
    /// Caller-assigned identifier.
    pub id: String,
    /// Recipient name as given on first issuance.
    pub name: String,
    /// Recipient grade as given on first issuance.
    pub grade: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new certificate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCertificate {
    pub id: String,
    pub name: String,
    pub grade: String,
}

impl Certificate {
    /// Returns the public URL of this certificate's artifact.
    pub fn artifact_url(&self, base_url: &str) -> String {
        artifact_url(base_url, &self.id)
    }
}
