use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::drivers::{get_driver, get_drivers},
    utils::state::AppState,
};

pub fn driver_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_drivers))
        .route("/{driver_id}", get(get_driver))
}
