// Diploma Core - Shared certificate types for issuance and verification

pub mod artifact;
pub mod document;
pub mod hash;
pub mod types;

pub use artifact::{artifact_key, artifact_url, PDF_CONTENT_TYPE};
pub use document::{format_issued_date, CertificateDocument};
pub use hash::sha256_hex;
pub use types::{
    IssueCertificateRequest, IssueCertificateResponse, VerifyCertificateResponse,
    CERTIFICATE_CREATED, INVALID_CERTIFICATE, VALID_CERTIFICATE,
};
