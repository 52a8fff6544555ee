use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::races::{get_next_race, get_race, get_race_results, get_races},
    utils::state::AppState,
};

pub fn race_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_races))
        .route("/next", get(get_next_race))
        .route("/{race_id}", get(get_race))
        .route("/{race_id}/results", get(get_race_results))
}
