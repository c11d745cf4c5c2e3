//! Handlebars-backed certificate template.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use handlebars::Handlebars;

use super::TemplateRenderer;
use crate::error::AppError;
use diploma_core::CertificateDocument;

/// Registry name of the certificate template.
const CERTIFICATE_TEMPLATE_NAME: &str = "certificate";

/// Certificate template source, compiled into the binary.
const CERTIFICATE_TEMPLATE: &str = include_str!("../../templates/certificate.hbs");

static EMBLEM_BASE64: LazyLock<String> =
    LazyLock::new(|| BASE64_STANDARD.encode(include_bytes!("../../assets/emblem.svg")));

/// Returns the emblem image, base64-encoded.
///
/// Encoded once per process and shared by every issuance.
pub fn emblem_base64() -> &'static str {
    &EMBLEM_BASE64
}

/// Template renderer with the certificate template precompiled.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Compiles the built-in certificate template.
    pub fn new() -> Result<Self, AppError> {
        Self::with_template(CERTIFICATE_TEMPLATE)
    }

    /// Compiles a custom certificate template.
    pub fn with_template(source: &str) -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(CERTIFICATE_TEMPLATE_NAME, source)
            .map_err(|e| AppError::Render(format!("Invalid certificate template: {}", e)))?;
        Ok(Self { registry })
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, document: &CertificateDocument) -> Result<String, AppError> {
        self.registry
            .render(CERTIFICATE_TEMPLATE_NAME, document)
            .map_err(|e| AppError::Render(format!("Failed to render certificate: {}", e)))
    }
}
