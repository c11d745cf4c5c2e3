//! Certificate issuance and verification workflows.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::error::AppError;
use crate::models::NewCertificate;
use crate::render::{emblem_base64, DocumentCompositor, TemplateRenderer};
use crate::stores::{ArtifactStore, RecordStore};
use diploma_core::{
    artifact_key, artifact_url, sha256_hex, CertificateDocument, IssueCertificateRequest,
    IssueCertificateResponse, VerifyCertificateResponse, PDF_CONTENT_TYPE,
};

/// Outcome of a verification lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// A record exists; `name` is the name stored at first issuance.
    Valid { name: String, url: String },
    /// No record exists for the identifier.
    Invalid,
}

impl From<Verification> for VerifyCertificateResponse {
    fn from(verification: Verification) -> Self {
        match verification {
            Verification::Valid { name, url } => VerifyCertificateResponse::valid(name, url),
            Verification::Invalid => VerifyCertificateResponse::invalid(),
        }
    }
}

/// Orchestrates the record store, renderer, compositor and artifact store.
///
/// Every step of a call runs in order and any failure aborts the call.
/// Nothing is rolled back: a record inserted before a failing render or
/// upload stays in place.
pub struct CertificateService {
    records: Arc<dyn RecordStore>,
    artifacts: Arc<dyn ArtifactStore>,
    renderer: Arc<dyn TemplateRenderer>,
    compositor: Arc<dyn DocumentCompositor>,
    base_artifact_url: String,
}

impl CertificateService {
    pub fn new(
        records: Arc<dyn RecordStore>,
        artifacts: Arc<dyn ArtifactStore>,
        renderer: Arc<dyn TemplateRenderer>,
        compositor: Arc<dyn DocumentCompositor>,
        base_artifact_url: impl Into<String>,
    ) -> Self {
        Self {
            records,
            artifacts,
            renderer,
            compositor,
            base_artifact_url: base_artifact_url.into(),
        }
    }

    /// Issues a certificate dated today (local time).
    pub async fn issue(
        &self,
        request: &IssueCertificateRequest,
    ) -> Result<IssueCertificateResponse, AppError> {
        self.issue_on(request, Local::now().date_naive()).await
    }

    /// Issues a certificate dated `date`.
    ///
    /// The record is created only on first issuance for an identifier. The
    /// document is always rendered from the request values and always
    /// re-uploaded, even when an older record with different values exists.
    pub async fn issue_on(
        &self,
        request: &IssueCertificateRequest,
        date: NaiveDate,
    ) -> Result<IssueCertificateResponse, AppError> {
        match self.records.find_by_id(&request.id).await? {
            Some(existing) => {
                tracing::info!(
                    id = %existing.id,
                    "Certificate record already exists, skipping insert"
                );
            }
            None => {
                let inserted = self
                    .records
                    .insert(&NewCertificate {
                        id: request.id.clone(),
                        name: request.name.clone(),
                        grade: request.grade.clone(),
                    })
                    .await?;
                if inserted {
                    tracing::info!(id = %request.id, "Created certificate record");
                } else {
                    tracing::info!(id = %request.id, "Certificate record created concurrently");
                }
            }
        }

        let document = CertificateDocument::new(
            request.id.as_str(),
            request.name.as_str(),
            request.grade.as_str(),
            date,
            emblem_base64(),
        );

        let markup = self.renderer.render(&document)?;
        tracing::debug!(id = %request.id, bytes = markup.len(), "Rendered certificate markup");

        let pdf = self.compositor.compose(markup).await?;

        let key = artifact_key(&request.id);
        let digest = sha256_hex(&pdf);
        let size = pdf.len();
        self.artifacts.put(&key, pdf, PDF_CONTENT_TYPE).await?;
        tracing::info!(%key, size, sha256 = %digest, "Stored certificate artifact");

        Ok(IssueCertificateResponse::created(artifact_url(
            &self.base_artifact_url,
            &request.id,
        )))
    }

    /// Looks up the certificate stored under `id`.
    ///
    /// The returned URL is derived from the identifier; the artifact itself
    /// is not checked.
    pub async fn verify(&self, id: &str) -> Result<Verification, AppError> {
        let verification = match self.records.find_by_id(id).await? {
            Some(certificate) => Verification::Valid {
                url: certificate.artifact_url(&self.base_artifact_url),
                name: certificate.name,
            },
            None => Verification::Invalid,
        };
        tracing::debug!(id, valid = verification != Verification::Invalid, "Verified certificate");
        Ok(verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::models::Certificate;
    use crate::render::HandlebarsRenderer;

    pub const BASE_URL: &str = "https://files.example.com";

    #[derive(Default)]
    pub struct MemoryRecords {
        pub rows: Mutex<HashMap<String, Certificate>>,
    }

    #[async_trait]
    impl RecordStore for MemoryRecords {
        async fn find_by_id(&self, id: &str) -> Result<Option<Certificate>, AppError> {
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }

        async fn insert(&self, certificate: &NewCertificate) -> Result<bool, AppError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&certificate.id) {
                return Ok(false);
            }
            rows.insert(
                certificate.id.clone(),
                Certificate {
                    id: certificate.id.clone(),
                    name: certificate.name.clone(),
                    grade: certificate.grade.clone(),
                    created_at: Utc::now(),
                },
            );
            Ok(true)
        }
    }

    #[derive(Default)]
    pub struct MemoryArtifacts {
        pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
        pub puts: Mutex<usize>,
        pub fail: bool,
    }

    #[async_trait]
    impl ArtifactStore for MemoryArtifacts {
        async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), AppError> {
            if self.fail {
                return Err(AppError::Storage("bucket unreachable".to_string()));
            }
            *self.puts.lock().unwrap() += 1;
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), (body, content_type.to_string()));
            Ok(())
        }
    }

    /// Compositor that passes the markup through as the document bytes.
    pub struct EchoCompositor;

    #[async_trait]
    impl DocumentCompositor for EchoCompositor {
        async fn compose(&self, markup: String) -> Result<Vec<u8>, AppError> {
            Ok(markup.into_bytes())
        }
    }

    struct FailingCompositor;

    #[async_trait]
    impl DocumentCompositor for FailingCompositor {
        async fn compose(&self, _markup: String) -> Result<Vec<u8>, AppError> {
            Err(AppError::Render("browser crashed".to_string()))
        }
    }

    /// Record store where another issuer inserts between our check and insert.
    struct LostRaceRecords {
        inner: MemoryRecords,
        checked: Mutex<bool>,
    }

    impl LostRaceRecords {
        fn new(winner: NewCertificate) -> Self {
            let inner = MemoryRecords::default();
            inner.rows.lock().unwrap().insert(
                winner.id.clone(),
                Certificate {
                    id: winner.id,
                    name: winner.name,
                    grade: winner.grade,
                    created_at: Utc::now(),
                },
            );
            Self {
                inner,
                checked: Mutex::new(false),
            }
        }
    }

    #[async_trait]
    impl RecordStore for LostRaceRecords {
        async fn find_by_id(&self, id: &str) -> Result<Option<Certificate>, AppError> {
            let first_check = !std::mem::replace(&mut *self.checked.lock().unwrap(), true);
            if first_check {
                return Ok(None);
            }
            self.inner.find_by_id(id).await
        }

        async fn insert(&self, certificate: &NewCertificate) -> Result<bool, AppError> {
            self.inner.insert(certificate).await
        }
    }

    struct Fixture {
        records: Arc<MemoryRecords>,
        artifacts: Arc<MemoryArtifacts>,
        service: CertificateService,
    }

    fn fixture_with(
        artifacts: MemoryArtifacts,
        compositor: Arc<dyn DocumentCompositor>,
    ) -> Fixture {
        let records = Arc::new(MemoryRecords::default());
        let artifacts = Arc::new(artifacts);
        let service = CertificateService::new(
            records.clone(),
            artifacts.clone(),
            Arc::new(HandlebarsRenderer::new().unwrap()),
            compositor,
            BASE_URL,
        );
        Fixture {
            records,
            artifacts,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MemoryArtifacts::default(), Arc::new(EchoCompositor))
    }

    fn request(id: &str, name: &str, grade: &str) -> IssueCertificateRequest {
        IssueCertificateRequest {
            id: id.to_string(),
            name: name.to_string(),
            grade: grade.to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn artifact_text(fixture: &Fixture, key: &str) -> String {
        let objects = fixture.artifacts.objects.lock().unwrap();
        String::from_utf8(objects.get(key).expect("artifact stored").0.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_issue_stores_record_and_artifact() {
        let fixture = fixture();

        let response = fixture
            .service
            .issue_on(&request("u1", "Ada", "A"), date())
            .await
            .unwrap();

        assert_eq!(response.message, "Certificate created!");
        assert_eq!(response.url, "https://files.example.com/u1.pdf");

        let stored = fixture.records.rows.lock().unwrap().get("u1").cloned().unwrap();
        assert_eq!((stored.name.as_str(), stored.grade.as_str()), ("Ada", "A"));

        let objects = fixture.artifacts.objects.lock().unwrap();
        let (_, content_type) = objects.get("u1.pdf").unwrap();
        assert_eq!(content_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_reissue_keeps_record_but_renders_request_values() {
        let fixture = fixture();
        fixture
            .service
            .issue_on(&request("u1", "Ada", "A"), date())
            .await
            .unwrap();
        fixture
            .service
            .issue_on(&request("u1", "Ada2", "B"), date())
            .await
            .unwrap();

        let stored = fixture.records.rows.lock().unwrap().get("u1").cloned().unwrap();
        assert_eq!(stored.name, "Ada");
        assert_eq!(stored.grade, "A");

        let rendered = artifact_text(&fixture, "u1.pdf");
        assert!(rendered.contains("Ada2"));
        assert!(rendered.contains("<strong>B</strong>"));
        assert!(rendered.contains("01/06/2024"));
        assert_eq!(*fixture.artifacts.puts.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_verify_returns_originally_stored_name() {
        let fixture = fixture();
        for name in ["Ada", "Ada2", "Ada3"] {
            fixture
                .service
                .issue_on(&request("u1", name, "A"), date())
                .await
                .unwrap();
        }

        let verification = fixture.service.verify("u1").await.unwrap();
        assert_eq!(
            verification,
            Verification::Valid {
                name: "Ada".to_string(),
                url: "https://files.example.com/u1.pdf".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_verify_unknown_identifier_is_invalid() {
        let fixture = fixture();
        let verification = fixture.service.verify("ghost").await.unwrap();
        assert_eq!(verification, Verification::Invalid);

        let response = VerifyCertificateResponse::from(verification);
        assert_eq!(response.message, "Invalid certificate");
        assert!(response.name.is_none());
        assert!(response.url.is_none());
    }

    #[tokio::test]
    async fn test_issue_and_verify_agree_on_url() {
        let fixture = fixture();
        let issued = fixture
            .service
            .issue_on(&request("cert-42", "Grace", "B+"), date())
            .await
            .unwrap();

        match fixture.service.verify("cert-42").await.unwrap() {
            Verification::Valid { url, .. } => assert_eq!(url, issued.url),
            Verification::Invalid => panic!("expected valid certificate"),
        }
    }

    #[tokio::test]
    async fn test_upload_failure_leaves_record_in_place() {
        let fixture = fixture_with(
            MemoryArtifacts {
                fail: true,
                ..Default::default()
            },
            Arc::new(EchoCompositor),
        );

        let result = fixture
            .service
            .issue_on(&request("u1", "Ada", "A"), date())
            .await;
        assert!(matches!(result, Err(AppError::Storage(_))));

        assert!(fixture.records.rows.lock().unwrap().contains_key("u1"));
        assert!(matches!(
            fixture.service.verify("u1").await.unwrap(),
            Verification::Valid { .. }
        ));
    }

    #[tokio::test]
    async fn test_compose_failure_skips_upload() {
        let fixture = fixture_with(MemoryArtifacts::default(), Arc::new(FailingCompositor));

        let result = fixture
            .service
            .issue_on(&request("u1", "Ada", "A"), date())
            .await;
        assert!(matches!(result, Err(AppError::Render(_))));
        assert_eq!(*fixture.artifacts.puts.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_fields_are_accepted() {
        let fixture = fixture();
        let response = fixture
            .service
            .issue_on(&request("u9", "", ""), date())
            .await
            .unwrap();
        assert_eq!(response.url, "https://files.example.com/u9.pdf");
    }

    #[tokio::test]
    async fn test_issue_after_losing_insert_race() {
        let records = Arc::new(LostRaceRecords::new(NewCertificate {
            id: "u1".to_string(),
            name: "First".to_string(),
            grade: "A".to_string(),
        }));
        let artifacts = Arc::new(MemoryArtifacts::default());
        let service = CertificateService::new(
            records.clone(),
            artifacts.clone(),
            Arc::new(HandlebarsRenderer::new().unwrap()),
            Arc::new(EchoCompositor),
            BASE_URL,
        );

        let response = service
            .issue_on(&request("u1", "Second", "B"), date())
            .await
            .unwrap();
        assert_eq!(response.message, "Certificate created!");
        assert_eq!(response.url, "https://files.example.com/u1.pdf");

        let stored = records.inner.rows.lock().unwrap().get("u1").cloned().unwrap();
        assert_eq!(stored.name, "First");
        assert_eq!(stored.grade, "A");

        let objects = artifacts.objects.lock().unwrap();
        let rendered = String::from_utf8(objects.get("u1.pdf").unwrap().0.clone()).unwrap();
        assert!(rendered.contains("Second"));
        drop(objects);

        assert_eq!(
            service.verify("u1").await.unwrap(),
            Verification::Valid {
                name: "First".to_string(),
                url: "https://files.example.com/u1.pdf".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_concurrent_first_issuance_keeps_one_record() {
        let fixture = fixture();
        let first = request("u7", "Ada", "A");
        let second = request("u7", "Grace", "B");

        let (a, b) = tokio::join!(
            fixture.service.issue_on(&first, date()),
            fixture.service.issue_on(&second, date()),
        );
        assert_eq!(a.unwrap().url, "https://files.example.com/u7.pdf");
        assert_eq!(b.unwrap().url, "https://files.example.com/u7.pdf");

        let rows = fixture.records.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        let stored = rows.get("u7").unwrap();
        assert!(
            (stored.name.as_str(), stored.grade.as_str()) == ("Ada", "A")
                || (stored.name.as_str(), stored.grade.as_str()) == ("Grace", "B")
        );
        assert_eq!(*fixture.artifacts.puts.lock().unwrap(), 2);
    }
}
