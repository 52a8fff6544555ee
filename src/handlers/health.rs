use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{models::health::HealthResponse, utils::state::AppState};

/// Probes the provider on every call; the cache is never consulted.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let provider_status = state
        .data
        .provider_status(state.config.current_season)
        .await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider_status,
    })
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "FormulaHub API is running!",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handlers::test_support::state_with, services::ergast::fake::FakeProvider};

    #[tokio::test]
    async fn reports_provider_error() {
        let (state, provider) = state_with(FakeProvider::failing());
        let Json(res) = health_check(State(state.clone())).await;
        assert_eq!(res.status, "healthy");
        assert!(res.provider_status.starts_with("error: "));

        health_check(State(state)).await;
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn reports_healthy_provider() {
        let (state, _) = state_with(FakeProvider::default());
        let Json(res) = health_check(State(state)).await;
        assert_eq!(res.provider_status, "healthy");
        assert_eq!(res.version, "1.0.0");
    }

    #[tokio::test]
    async fn root_reports_api_version() {
        let Json(body) = root().await;
        assert_eq!(body["message"], "FormulaHub API is running!");
        assert_eq!(body["version"], "1.0.0");
    }
}
