//! Storage adapters for certificate records and rendered artifacts.
//!
//! The issuance and verification workflows only see these traits, so the
//! backing stores can be swapped (PostgreSQL or in-memory records, S3 or
//! local-disk artifacts) without touching workflow code.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Certificate, NewCertificate};

pub mod artifacts;
pub mod records;

pub use artifacts::{LocalArtifactStore, S3ArtifactStore};
pub use records::PgRecordStore;

/// Structured store of certificate records keyed by identifier.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Looks up the record stored under `id`.
    async fn find_by_id(&self, id: &str) -> Result<Option<Certificate>, AppError>;

    /// Inserts a record unless one already exists for the same identifier.
    ///
    /// Returns `true` if a row was written. An existing record is never
    /// overwritten.
    async fn insert(&self, certificate: &NewCertificate) -> Result<bool, AppError>;
}

/// Blob store holding publicly readable certificate artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Stores `body` under `key`, replacing any previous object.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), AppError>;
}
