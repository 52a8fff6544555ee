use serde::{Deserialize, Serialize};

use crate::models::driver::{Constructor, Driver};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStanding {
    pub position: u32,
    pub points: f64,
    pub wins: u32,
    pub driver: Driver,
    pub constructor: Constructor,
}

/// `round` is 0 when the latest standings were requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub standings: Vec<DriverStanding>,
    pub season: u32,
    pub round: u32,
}
