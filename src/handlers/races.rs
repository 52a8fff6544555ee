use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    cache::keys,
    handlers::{Query, SeasonQuery},
    models::{
        error::Error,
        race::{NextRaceInfo, Race, RaceResult, RacesResponse},
    },
    utils::{
        race_utils::{is_live, next_race, time_remaining},
        state::AppState,
    },
};

pub async fn get_races(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeasonQuery>,
) -> Result<Json<RacesResponse>, Error> {
    let cache_key = keys::races(params.season);
    if let Some(cached) = state.cache.get::<RacesResponse>(&cache_key).await {
        return Ok(Json(cached));
    }

    let season = state.season_or_current(params.season);
    let races = state.data.races(season).await;
    if races.is_empty() {
        return Err(Error::not_found("No races found for this season"));
    }

    let response = RacesResponse {
        total: races.len(),
        races,
        season,
    };
    state
        .cache
        .set(&cache_key, &response, state.config.cache_ttls.races)
        .await;

    Ok(Json(response))
}

pub async fn get_next_race(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeasonQuery>,
) -> Result<Json<NextRaceInfo>, Error> {
    let cache_key = keys::next_race(params.season);
    if let Some(cached) = state.cache.get::<NextRaceInfo>(&cache_key).await {
        return Ok(Json(cached));
    }

    let season = state.season_or_current(params.season);
    let races = state.data.races(season).await;
    let now = Utc::now();
    let race = next_race(&races, now)
        .cloned()
        .ok_or_else(|| Error::not_found("No upcoming races found"))?;

    let remaining = match race.starts_at() {
        Some(start) => time_remaining(start, now),
        None => return Err(Error::internal("Error calculating time remaining")),
    };
    let response = NextRaceInfo {
        is_live: is_live(&remaining),
        time_remaining: remaining,
        race,
    };
    state
        .cache
        .set(&cache_key, &response, state.config.cache_ttls.next_race)
        .await;

    Ok(Json(response))
}

async fn find_race(state: &AppState, race_id: &str, season: Option<u32>) -> Result<Race, Error> {
    let season = state.season_or_current(season);
    state
        .data
        .races(season)
        .await
        .into_iter()
        .find(|r| r.race_id == race_id)
        .ok_or_else(|| Error::not_found(&format!("Race {race_id} not found")))
}

pub async fn get_race(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<String>,
    Query(params): Query<SeasonQuery>,
) -> Result<Json<Race>, Error> {
    let cache_key = keys::race(&race_id, params.season);
    if let Some(cached) = state.cache.get::<Race>(&cache_key).await {
        return Ok(Json(cached));
    }

    let race = find_race(&state, &race_id, params.season).await?;
    state
        .cache
        .set(&cache_key, &race, state.config.cache_ttls.races)
        .await;

    Ok(Json(race))
}

pub async fn get_race_results(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<String>,
    Query(params): Query<SeasonQuery>,
) -> Result<Json<Vec<RaceResult>>, Error> {
    let cache_key = keys::race_results(&race_id, params.season);
    if let Some(cached) = state.cache.get::<Vec<RaceResult>>(&cache_key).await {
        return Ok(Json(cached));
    }

    let race = find_race(&state, &race_id, params.season).await?;
    let results = state.data.race_results(race.season, race.round).await;
    if results.is_empty() {
        return Err(Error::not_found("No results found for this race"));
    }

    state
        .cache
        .set(&cache_key, &results, state.config.cache_ttls.race_results)
        .await;

    Ok(Json(results))
}
