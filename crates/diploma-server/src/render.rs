//! Turning a certificate into a printable document.
//!
//! Rendering happens in two steps: a [`TemplateRenderer`] fills the
//! certificate template into markup, and a [`DocumentCompositor`] lays the
//! markup out as a paginated PDF.

use async_trait::async_trait;

use crate::error::AppError;
use diploma_core::CertificateDocument;

pub mod compositor;
pub mod template;

pub use compositor::{ChromeCompositor, PageFormat};
pub use template::{emblem_base64, HandlebarsRenderer};

/// Fills the certificate template with a document's fields.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, document: &CertificateDocument) -> Result<String, AppError>;
}

/// Converts markup into document bytes.
#[async_trait]
pub trait DocumentCompositor: Send + Sync {
    async fn compose(&self, markup: String) -> Result<Vec<u8>, AppError>;
}
