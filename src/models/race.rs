use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Start time used when the provider has no time-of-day for a race.
pub const DEFAULT_RACE_TIME: &str = "12:00:00Z";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    #[serde(rename = "raceId")]
    pub race_id: String,
    pub season: u32,
    pub round: u32,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(rename = "circuitName")]
    pub circuit_name: String,
    #[serde(rename = "circuitId")]
    pub circuit_id: String,
    pub date: String,
    pub time: String,
    pub country: String,
    pub locality: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub longitude: Option<f64>,
}

impl Race {
    /// Combined `date` + `time` as a UTC instant.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M:%SZ").ok()?;
        Some(date.and_time(time).and_utc())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacesResponse {
    pub races: Vec<Race>,
    pub season: u32,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextRaceInfo {
    pub race: Race,
    pub time_remaining: TimeRemaining,
    pub is_live: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDriver {
    #[serde(rename = "driverId")]
    pub driver_id: String,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultConstructor {
    #[serde(rename = "constructorId")]
    pub constructor_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    /// 0 when the driver was not classified.
    pub position: u32,
    pub driver: ResultDriver,
    pub constructor: ResultConstructor,
    pub status: String,
    pub points: f64,
}
