//! Server configuration from command-line flags and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Diploma certificate server.
#[derive(Debug, Clone, Parser)]
#[command(name = "diploma-server")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// PostgreSQL connection string for certificate records
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind_addr: SocketAddr,

    /// Prefix for public certificate URLs (`{prefix}/{id}.pdf`)
    #[arg(long, env = "BASE_ARTIFACT_URL")]
    pub base_artifact_url: String,

    /// S3 bucket receiving rendered certificates
    #[arg(long, env = "BUCKET_NAME")]
    pub bucket_name: Option<String>,

    /// Write certificates to local disk instead of uploading them
    #[arg(long, env = "OFFLINE")]
    pub offline: bool,

    /// Directory certificates are written to in offline mode
    #[arg(long, env = "OFFLINE_DIR", default_value = "./certificates")]
    pub offline_dir: PathBuf,

    /// Chromium binary used to print certificates (auto-detected if unset)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,
}

/// Where rendered certificates are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactBackend {
    S3 { bucket: String },
    Local { dir: PathBuf },
}

impl Config {
    /// Resolves the artifact backend from the offline flag.
    pub fn artifact_backend(&self) -> anyhow::Result<ArtifactBackend> {
        if self.offline {
            return Ok(ArtifactBackend::Local {
                dir: self.offline_dir.clone(),
            });
        }

        match &self.bucket_name {
            Some(bucket) if !bucket.is_empty() => Ok(ArtifactBackend::S3 {
                bucket: bucket.clone(),
            }),
            _ => Err(anyhow::anyhow!(
                "BUCKET_NAME is required unless running with --offline"
            )),
        }
    }
}
