//! # HTTP server
//!
//! Application state and the axum serving loop. All collaborators are
//! explicitly constructed at startup and injected through the state; there
//! is no ambient global state.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::audit::AuditLog;
use crate::auth::JwtManager;
use crate::config::AppConfig;
use crate::routes::create_routes;
use crate::storage::ObjectStorage;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub jwt: Arc<JwtManager>,
    pub storage: Arc<dyn ObjectStorage>,
    pub audit: AuditLog,
    pub http: reqwest::Client,
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AppConfig,
        db: DatabaseConnection,
        storage: Arc<dyn ObjectStorage>,
        http: reqwest::Client,
    ) -> Self {
        let db = Arc::new(db);
        Self {
            jwt: Arc::new(JwtManager::new(
                &config.auth.jwt_secret,
                config.auth.jwt_expires_in,
            )),
            audit: AuditLog::new(db.clone()),
            storage,
            http,
            config: Arc::new(config),
            db,
        }
    }
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        state.config.server.bind_address, state.config.server.port
    )
    .parse()
    .context("invalid server bind address")?;

    let mut router = create_routes(state.clone()).layer(TraceLayer::new_for_http());

    if state.config.server.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")
}
