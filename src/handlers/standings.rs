use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    cache::keys,
    handlers::Query,
    models::{
        error::Error,
        standing::{DriverStanding, StandingsResponse},
    },
    utils::state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct StandingsQuery {
    pub season: Option<u32>,
    #[serde(alias = "round_num")]
    pub round: Option<u32>,
}

pub async fn get_standings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StandingsQuery>,
) -> Result<Json<StandingsResponse>, Error> {
    let cache_key = keys::standings(params.season, params.round);
    if let Some(cached) = state.cache.get::<StandingsResponse>(&cache_key).await {
        return Ok(Json(cached));
    }

    let season = state.season_or_current(params.season);
    let standings = state.data.standings(season, params.round).await;
    if standings.is_empty() {
        return Err(Error::not_found("No standings found for this season/round"));
    }

    let response = StandingsResponse {
        standings,
        season,
        round: params.round.unwrap_or(0),
    };
    state
        .cache
        .set(&cache_key, &response, state.config.cache_ttls.standings)
        .await;

    Ok(Json(response))
}

pub async fn get_driver_standing(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
    Query(params): Query<StandingsQuery>,
) -> Result<Json<DriverStanding>, Error> {
    let cache_key = keys::driver_standing(&driver_id, params.season, params.round);
    if let Some(cached) = state.cache.get::<DriverStanding>(&cache_key).await {
        return Ok(Json(cached));
    }

    let season = state.season_or_current(params.season);
    let standing = state
        .data
        .standings(season, params.round)
        .await
        .into_iter()
        .find(|s| s.driver.driver_id == driver_id)
        .ok_or_else(|| Error::not_found(&format!("Standing for driver {driver_id} not found")))?;

    state
        .cache
        .set(&cache_key, &standing, state.config.cache_ttls.standings)
        .await;

    Ok(Json(standing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handlers::test_support::state_with,
        services::ergast::fake::{self, FakeProvider},
    };
    use http::StatusCode;

    fn provider() -> FakeProvider {
        FakeProvider {
            standings: vec![
                fake::standing(1, "279", "piastri"),
                fake::standing(2, "275", "norris"),
            ],
            ..FakeProvider::default()
        }
    }

    #[tokio::test]
    async fn omitted_round_reports_zero_and_fetches_latest() {
        let (state, provider) = state_with(provider());
        let Json(res) = get_standings(State(state.clone()), Query(StandingsQuery::default()))
            .await
            .unwrap();
        assert_eq!(res.round, 0);
        assert_eq!(res.season, 2025);
        assert_eq!(res.standings[0].driver.driver_id, "piastri");
        assert_eq!(*provider.last_standings_round.lock().unwrap(), Some(None));
        assert!(state.cache.exists("standings:current:latest").await);
    }

    #[tokio::test]
    async fn explicit_round_is_cached_separately() {
        let (state, provider) = state_with(provider());
        let query = |round| {
            Query(StandingsQuery {
                season: Some(2025),
                round,
            })
        };

        get_standings(State(state.clone()), query(None)).await.unwrap();
        let Json(res) = get_standings(State(state.clone()), query(Some(5))).await.unwrap();
        get_standings(State(state.clone()), query(Some(0))).await.unwrap();

        assert_eq!(res.round, 5);
        assert_eq!(provider.calls(), 3);
        assert!(state.cache.exists("standings:2025:5").await);
        assert!(state.cache.exists("standings:2025:0").await);
        assert!(state.cache.exists("standings:2025:latest").await);
    }

    #[tokio::test]
    async fn no_standings_is_not_found() {
        let (state, _) = state_with(FakeProvider::default());
        let err = get_standings(State(state), Query(StandingsQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(err.code, StatusCode::NOT_FOUND);
        assert_eq!(err.body.0["detail"], "No standings found for this season/round");
    }

    #[tokio::test]
    async fn driver_standing_lookup() {
        let (state, _) = state_with(provider());
        let Json(standing) = get_driver_standing(
            State(state.clone()),
            Path("norris".to_string()),
            Query(StandingsQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(standing.position, 2);
        assert_eq!(standing.points, 275.0);
        assert!(
            state
                .cache
                .exists("driver_standing:norris:current:latest")
                .await
        );
    }

    #[tokio::test]
    async fn repeated_driver_standing_is_served_from_cache() {
        let (state, provider) = state_with(provider());
        let query = || {
            Query(StandingsQuery {
                season: Some(2025),
                round: Some(10),
            })
        };

        for _ in 0..2 {
            let Json(standing) = get_driver_standing(
                State(state.clone()),
                Path("piastri".to_string()),
                query(),
            )
            .await
            .unwrap();
            assert_eq!(standing.position, 1);
        }
        assert_eq!(provider.calls(), 1);
        assert!(state.cache.exists("driver_standing:piastri:2025:10").await);
    }

    #[tokio::test]
    async fn unknown_driver_standing_is_not_found() {
        let (state, _) = state_with(FakeProvider::failing());
        let err = get_driver_standing(
            State(state),
            Path("verstappen".to_string()),
            Query(StandingsQuery::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, StatusCode::NOT_FOUND);
        assert_eq!(err.body.0["detail"], "Standing for driver verstappen not found");
    }
}
