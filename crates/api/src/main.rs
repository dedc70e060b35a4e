use std::sync::Arc;

use anyhow::Context;

use catalog_api::config::{AppConfig, Backend};
use catalog_infra::repository::{InMemoryRepository, PostgresRepository, Repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_observability::init();

    let config = AppConfig::from_env()?;

    let repo: Arc<dyn Repository> = match &config.backend {
        Backend::Memory => Arc::new(InMemoryRepository::new()),
        Backend::Postgres { url } => {
            let pool = sqlx::PgPool::connect(url)
                .await
                .context("failed to connect to database")?;
            let repo = PostgresRepository::new(pool);
            repo.migrate()
                .await
                .context("failed to ensure products schema")?;
            Arc::new(repo)
        }
    };

    let app = catalog_api::app::build_app(repo);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server exiting");
    Ok(())
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
