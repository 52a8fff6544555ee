use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::standings::{get_driver_standing, get_standings},
    utils::state::AppState,
};

pub fn standings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_standings))
        .route("/driver/{driver_id}", get(get_driver_standing))
}
