use std::{any::Any, error::Error, sync::Arc};

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use http::{HeaderValue, StatusCode};
use reqwest::Client;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info, Level};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub mod drivers;
pub mod races;
pub mod standings;

use crate::{
    cache::ResponseCache,
    handlers::health::{health_check, root},
    models::error::Error as ApiError,
    routes::{drivers::driver_routes, races::race_routes, standings::standings_routes},
    services::{ergast::ErgastClient, f1_data::F1DataService},
    utils::{config::Config, state::AppState},
};

fn init_tracing(log_level: &str) {
    let level = match log_level {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter = filter::Targets::new()
        .with_target("tower_http::trace::on_response", Level::TRACE)
        .with_target("tower_http::trace::on_request", Level::TRACE)
        .with_target("tower_http::trace::make_span", Level::DEBUG)
        .with_target("axum::rejection", Level::TRACE)
        .with_target(env!("CARGO_PKG_NAME"), level)
        .with_default(Level::INFO);

    let tracing_layer = tracing_subscriber::fmt::layer();

    Registry::default().with(tracing_layer).with(filter).init();
}

pub async fn make_app(config: Config) -> Result<Router, Box<dyn Error>> {
    init_tracing(&config.log_level);

    info!("Initializing application...");
    let cache = ResponseCache::connect(config.redis_url.as_deref()).await;
    info!("Response cache ready ({} backend)", cache.backend_name());

    let http_client = Client::builder()
        .user_agent(concat!("formulahub/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let provider = ErgastClient::new(http_client, config.ergast_base_url.clone());
    info!("Upstream provider at {}", config.ergast_base_url);

    let state = Arc::new(AppState::new(
        config,
        cache,
        F1DataService::new(Arc::new(provider)),
    ));
    let app = build_router(state);
    info!("Application initialized successfully");

    Ok(app)
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let config = &state.config;
    let prefix = config.api_prefix.trim_end_matches('/');

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    Router::new()
        .route("/", get(root))
        .route(&format!("{prefix}/health"), get(health_check))
        .nest(&format!("{prefix}/drivers"), driver_routes())
        .nest(&format!("{prefix}/races"), race_routes())
        .nest(&format!("{prefix}/standings"), standings_routes())
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unexpected error".to_string()
    };
    error!("Request handler panicked: {}", detail);
    ApiError::internal(&detail).into_response()
}
