use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    cache::keys,
    handlers::{Query, SeasonQuery},
    models::{
        driver::{Driver, DriversResponse},
        error::Error,
    },
    utils::state::AppState,
};

pub async fn get_drivers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeasonQuery>,
) -> Result<Json<DriversResponse>, Error> {
    let cache_key = keys::drivers(params.season);
    if let Some(cached) = state.cache.get::<DriversResponse>(&cache_key).await {
        return Ok(Json(cached));
    }

    let season = state.season_or_current(params.season);
    let drivers = state.data.drivers(season).await;
    if drivers.is_empty() {
        return Err(Error::not_found("No drivers found for this season"));
    }

    let response = DriversResponse {
        total: drivers.len(),
        drivers,
        season,
    };
    state
        .cache
        .set(&cache_key, &response, state.config.cache_ttls.drivers)
        .await;

    Ok(Json(response))
}

pub async fn get_driver(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
    Query(params): Query<SeasonQuery>,
) -> Result<Json<Driver>, Error> {
    let cache_key = keys::driver(&driver_id, params.season);
    if let Some(cached) = state.cache.get::<Driver>(&cache_key).await {
        return Ok(Json(cached));
    }

    let season = state.season_or_current(params.season);
    let driver = state
        .data
        .drivers(season)
        .await
        .into_iter()
        .find(|d| d.driver_id == driver_id)
        .ok_or_else(|| Error::not_found(&format!("Driver {driver_id} not found")))?;

    state
        .cache
        .set(&cache_key, &driver, state.config.cache_ttls.drivers)
        .await;

    Ok(Json(driver))
}
