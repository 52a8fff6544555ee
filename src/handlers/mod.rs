pub mod drivers;
pub mod health;
pub mod races;
pub mod standings;

use axum::extract::FromRequestParts;
use serde::Deserialize;

use crate::models::error::Error;

/// `axum::extract::Query` with rejections rendered as a `{detail}` body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct Query<T>(pub T);

#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<u32>,
}
