//! HTTP server initialization and runtime setup.
//!
//! Handles store and identity provider setup and the Axum server lifecycle.

use crate::application::services::{CreationLimit, IdentityGate, SlugService};
use crate::config::{Config, IdentityBackend, StoreBackend};
use crate::domain::gateway::StoreGateway;
use crate::domain::identity::IdentityProvider;
use crate::domain::repositories::{HitRepository, SlugRepository};
use crate::infrastructure::identity::{
    HttpIdentityConfig, HttpIdentityProvider, StaticIdentityProvider,
};
use crate::infrastructure::persistence::{MemoryStore, PgHitRepository, PgSlugRepository};
use crate::routes::app_router;
use crate::shutdown;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

/// Repositories selected by [`StoreBackend`], plus the pool to close on shutdown.
pub struct Store {
    pub slugs: Arc<dyn SlugRepository>,
    pub hits: Arc<dyn HitRepository>,
    pub pool: Option<PgPool>,
}

/// Connects to PostgreSQL within `STORE_CONNECT_TIMEOUT` and applies migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable in time or a migration fails.
pub async fn connect_postgres(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = tokio::time::timeout(
        config.store_connect_timeout(),
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.store_operation_timeout())
            .connect(database_url),
    )
    .await
    .with_context(|| {
        format!(
            "Database not reachable within {}s",
            config.store_connect_timeout
        )
    })?
    .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Builds the repositories for the configured backend.
pub async fn build_store(config: &Config) -> Result<Store> {
    match (config.store_backend, config.database_url.as_deref()) {
        (StoreBackend::Postgres, Some(database_url)) => {
            let pool = connect_postgres(config, database_url).await?;
            let pool_arc = Arc::new(pool.clone());
            Ok(Store {
                slugs: Arc::new(PgSlugRepository::new(pool_arc.clone())),
                hits: Arc::new(PgHitRepository::new(pool_arc)),
                pool: Some(pool),
            })
        }
        (StoreBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required for the postgres store")
        }
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            Ok(Store {
                slugs: store.clone(),
                hits: store,
                pool: None,
            })
        }
    }
}

/// Builds the identity provider client for the configured backend.
///
/// # Errors
///
/// Returns an error if the HTTP provider is missing credentials or its
/// client cannot be constructed.
pub fn build_identity_provider(config: &Config) -> Result<Arc<dyn IdentityProvider>> {
    match config.identity_backend {
        IdentityBackend::Http => {
            let provider = HttpIdentityProvider::new(HttpIdentityConfig {
                base_url: config
                    .identity_url
                    .clone()
                    .context("IDENTITY_URL must be set")?,
                api_key: config
                    .identity_api_key
                    .clone()
                    .context("IDENTITY_API_KEY must be set")?,
                timeout: config.identity_timeout(),
            })
            .context("Failed to initialize identity provider")?;
            tracing::info!("Identity provider: http");
            Ok(Arc::new(provider))
        }
        IdentityBackend::Static => {
            let provider = StaticIdentityProvider::from_list(&config.identity_static_users);
            if provider.is_empty() {
                tracing::warn!("Static identity provider has no users; every request will be rejected");
            }
            tracing::info!(users = provider.len(), "Identity provider: static");
            Ok(Arc::new(provider))
        }
    }
}

/// Wires the policy engine from its parts.
pub fn build_state(
    config: &Config,
    store: &Store,
    identity: Arc<dyn IdentityProvider>,
) -> AppState {
    let gateway = StoreGateway::new(
        store.slugs.clone(),
        store.hits.clone(),
        config.store_operation_timeout(),
    );
    let limit = CreationLimit::new(config.slug_limit, config.slug_limit_window_days);
    let slug_service = SlugService::new(gateway, IdentityGate::new(identity), limit);

    AppState::new(Arc::new(slug_service))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Document store (PostgreSQL with migrations, or in-memory)
/// - Identity provider client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Store connection or migration fails
/// - Identity provider configuration is unusable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    let identity = build_identity_provider(&config)?;
    let state = build_state(&config, &store, identity);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown::signal())
        .await?;

    if let Some(pool) = store.pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Server stopped");
    Ok(())
}
