//! # Yoga Booking API
//!
//! The API crate provides the web server for the studio booking service:
//! public booking endpoints, the admin time slot endpoints, health checks and
//! a Prometheus metrics export.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into arbitrator and repository calls
//! - **Middleware**: Error to HTTP mapping and request metrics
//! - **Config**: Handle environment and application configuration
//!
//! Handlers only see the repository traits from `yoga-core`, so the same
//! router runs over PostgreSQL in production and over the in-process store in
//! tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error mapping and request metrics
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode, header},
};
use eyre::{Result, WrapErr};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::{BoxError, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::LevelFilter};
use yoga_core::{
    arbitrator::BookingArbitrator,
    metrics::Metrics,
    queries::BookingQueries,
    repository::{CatalogRepository, SlotRepository},
};

use crate::config::ApiConfig;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use yoga_api::ApiState;
/// use yoga_db::memory::MemoryRepository;
///
/// let state = Arc::new(ApiState::new(Arc::new(MemoryRepository::new()), "docs"));
/// ```
pub struct ApiState {
    pub slots: Arc<dyn SlotRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub arbitrator: BookingArbitrator,
    pub queries: BookingQueries,
    /// Counters and histograms exported on `/metrics`
    pub metrics: Arc<Metrics>,
}

impl ApiState {
    /// Builds the state over a store that implements both repository traits.
    pub fn new<R>(repository: Arc<R>, service_name: impl Into<String>) -> Self
    where
        R: SlotRepository + CatalogRepository + 'static,
    {
        Self::from_parts(
            repository.clone(),
            repository,
            Arc::new(Metrics::new(service_name)),
        )
    }

    pub fn from_parts(
        slots: Arc<dyn SlotRepository>,
        catalog: Arc<dyn CatalogRepository>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            arbitrator: BookingArbitrator::new(slots.clone(), catalog.clone(), metrics.clone()),
            queries: BookingQueries::new(slots.clone()),
            slots,
            catalog,
            metrics,
        }
    }
}

/// Installs the global `fmt` subscriber.
///
/// `level` is the default; a `RUST_LOG` directive overrides it.
pub fn init_tracing(level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Assembles every route and the middleware stack around them.
///
/// Kept separate from [`start_server`] so tests can drive the exact router
/// that production serves.
pub fn build_router(state: Arc<ApiState>, config: &ApiConfig) -> Result<Router> {
    let metrics = state.metrics.clone();

    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Prometheus export
        .merge(routes::metrics::routes())
        // Public booking endpoints
        .merge(routes::booking::routes())
        .merge(routes::time_slot::routes())
        // Admin time slot management
        .merge(routes::admin::routes())
        .layer(axum::middleware::from_fn_with_state(
            metrics,
            middleware::metrics::track_requests,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin '{}'", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    Ok(app)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "detail": "Request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": format!("Unhandled internal error: {}", err) })),
        )
    }
}

/// Starts the API server with the provided configuration and state
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use yoga_api::{ApiState, config::ApiConfig, start_server};
/// # use yoga_db::{create_pool, pg::PgRepository};
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let pool = create_pool(&config.database_url, config.db_max_connections).await?;
/// let state = Arc::new(ApiState::new(Arc::new(PgRepository::new(pool)), &config.service_name));
/// start_server(config, state).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: ApiConfig, state: Arc<ApiState>) -> Result<()> {
    init_tracing(config.log_level)?;

    let app = build_router(state, &config)?;

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
