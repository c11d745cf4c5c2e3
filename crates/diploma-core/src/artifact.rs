//! Addressing of rendered certificate artifacts.
//!
//! Artifact keys and public URLs are derived purely from the certificate
//! identifier. Nothing here checks that an artifact actually exists.

/// Content type of every stored certificate artifact.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Returns the object key a certificate artifact is stored under (`{id}.pdf`).
pub fn artifact_key(id: &str) -> String {
    format!("{}.pdf", id)
}

/// Returns the public URL of a certificate artifact (`{base_url}/{id}.pdf`).
///
/// The base is used verbatim; configure it without a trailing slash.
pub fn artifact_url(base_url: &str, id: &str) -> String {
    format!("{}/{}", base_url, artifact_key(id))
}
