// Diploma Server - entry point

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use diploma_server::config::ArtifactBackend;
use diploma_server::render::{ChromeCompositor, HandlebarsRenderer};
use diploma_server::stores::{ArtifactStore, LocalArtifactStore, PgRecordStore, S3ArtifactStore};
use diploma_server::{create_router, db, CertificateService, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let artifacts: Arc<dyn ArtifactStore> = match config.artifact_backend()? {
        ArtifactBackend::S3 { bucket } => {
            tracing::info!(%bucket, "Uploading certificates to S3");
            Arc::new(S3ArtifactStore::from_env(bucket).await)
        }
        ArtifactBackend::Local { dir } => {
            tracing::info!(dir = %dir.display(), "Offline mode, writing certificates to disk");
            Arc::new(LocalArtifactStore::new(dir))
        }
    };

    let service = CertificateService::new(
        Arc::new(PgRecordStore::new(pool)),
        artifacts,
        Arc::new(HandlebarsRenderer::new()?),
        Arc::new(ChromeCompositor::new(config.chrome_path.clone())),
        config.base_artifact_url.clone(),
    );

    let app = create_router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "Diploma server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
