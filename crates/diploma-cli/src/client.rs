//! Blocking HTTP client for the certificate API.

use diploma_core::{IssueCertificateRequest, IssueCertificateResponse, VerifyCertificateResponse};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a certificate identifier is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Client bound to one Diploma server.
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn certificates_url(&self) -> String {
        format!("{}/api/v1/certificates", self.base_url)
    }

    fn certificate_url(&self, id: &str) -> String {
        format!(
            "{}/{}",
            self.certificates_url(),
            utf8_percent_encode(id, PATH_SEGMENT)
        )
    }

    /// Issues (or re-issues) a certificate.
    pub fn issue(&self, request: &IssueCertificateRequest) -> anyhow::Result<IssueCertificateResponse> {
        let response = ureq::post(&self.certificates_url())
            .send_json(request)
            .map_err(|e| anyhow::anyhow!("Issue request failed: {}", e))?;
        Ok(response.into_json()?)
    }

    /// Verifies a certificate.
    ///
    /// The server answers an unknown identifier with 400 and an
    /// "Invalid certificate" body, which is returned as a normal response.
    pub fn verify(&self, id: &str) -> anyhow::Result<VerifyCertificateResponse> {
        match ureq::get(&self.certificate_url(id)).call() {
            Ok(response) => Ok(response.into_json()?),
            Err(ureq::Error::Status(400, response)) => Ok(response.into_json()?),
            Err(e) => Err(anyhow::anyhow!("Verify request failed: {}", e)),
        }
    }
}
