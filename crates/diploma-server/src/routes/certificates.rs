//! Certificate issuance and verification endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::AppError;
use crate::service::{CertificateService, Verification};
use diploma_core::{IssueCertificateRequest, IssueCertificateResponse, VerifyCertificateResponse};

/// Creates the certificates router.
pub fn router(service: Arc<CertificateService>) -> Router {
    Router::new()
        .route("/", post(issue_certificate))
        .route("/{id}", get(verify_certificate))
        .with_state(service)
}

/// POST /api/v1/certificates
///
/// Issues a certificate for `{id, name, grade}`. Re-issuing an existing
/// identifier re-renders and re-uploads the document and answers with the
/// same 201 body.
async fn issue_certificate(
    State(service): State<Arc<CertificateService>>,
    Json(request): Json<IssueCertificateRequest>,
) -> Result<(StatusCode, Json<IssueCertificateResponse>), AppError> {
    let response = service.issue(&request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/certificates/{id}
///
/// Verifies a certificate. A known identifier answers 201 with the stored
/// name and artifact URL, an unknown one answers 400.
async fn verify_certificate(
    State(service): State<Arc<CertificateService>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<VerifyCertificateResponse>), AppError> {
    let verification = service.verify(&id).await?;
    Ok((verification_status(&verification), Json(verification.into())))
}

/// Status code for a verification outcome.
///
/// Valid certificates answer 201, kept for compatibility with existing
/// clients.
fn verification_status(verification: &Verification) -> StatusCode {
    match verification {
        Verification::Valid { .. } => StatusCode::CREATED,
        Verification::Invalid => StatusCode::BAD_REQUEST,
    }
}
