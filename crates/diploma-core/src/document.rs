//! Rendering input for a certificate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the certificate template is rendered from.
///
/// Built fresh on every issuance from the request values, the issue date
/// and the emblem asset. It is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertificateDocument {
    pub id: String,
    pub name: String,
    pub grade: String,
    /// Issue date formatted as `DD/MM/YYYY`.
    pub issued_date: String,
    /// Base64-encoded emblem image, inlined into the markup.
    pub emblem: String,
}

impl CertificateDocument {
    /// Creates a document for the given recipient, issued on `date`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        grade: impl Into<String>,
        date: NaiveDate,
        emblem: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade: grade.into(),
            issued_date: format_issued_date(date),
            emblem: emblem.into(),
        }
    }
}

/// Formats a date as day/month/year with zero padding.
pub fn format_issued_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
