//! Weather Normalisation API Server
//!
//! REST endpoints around the normalization engine: raw and batch
//! normalization, live fetch from the weather provider, health and metrics.

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use weather_normalizer::Normalizer;
use weather_provider::{MockWeatherSource, OpenWeatherClient, ProviderError, WeatherSource};

pub mod boundary;
pub mod error;
pub mod routes;
pub mod settings;

pub use error::ApiError;
pub use settings::{BatchSettings, LogSettings, Settings};

/// Application state shared across handlers
pub struct AppState {
    /// Normalization engine
    pub normalizer: Normalizer,
    /// Live weather source
    pub provider: Arc<dyn WeatherSource>,
    /// Batch endpoint limits
    pub batch: BatchSettings,
    /// Prometheus handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(provider: Arc<dyn WeatherSource>, batch: BatchSettings) -> Self {
        Self {
            normalizer: Normalizer::default(),
            provider,
            batch,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Build state from settings, choosing the mock or HTTP provider
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let provider: Arc<dyn WeatherSource> = if settings.provider.mock {
            Arc::new(MockWeatherSource::new())
        } else {
            Arc::new(OpenWeatherClient::new(settings.provider.client_config())?)
        };
        Ok(Self::new(provider, settings.batch.clone()))
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health/live", get(routes::health::live))
        .route("/health/ready", get(routes::health::ready))
        .route("/weather/normalize", post(routes::weather::normalize_reading))
        .route("/weather/normalize/batch", post(routes::batch::normalize_batch))
        .route("/weather/current", get(routes::weather::current_weather))
        .route("/metrics", get(routes::metrics::render))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Initialize logging; `RUST_LOG` takes precedence over the configured level
pub fn init_logging(settings: &LogSettings) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

/// Run the server until Ctrl-C
pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    info!(
        "Serving with provider '{}' (configured: {})",
        state.provider.name(),
        state.provider.is_configured()
    );
    let app = create_router(Arc::new(state));

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
