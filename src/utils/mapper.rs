//! Conversion from Ergast records to the API's response shapes.
//!
//! Every function here takes the raw record list of one provider call and
//! returns the records it could map. A record missing a required field is
//! skipped; it never fails the whole list.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::models::{
    driver::{Constructor, Driver},
    race::{Race, RaceResult, ResultConstructor, ResultDriver, DEFAULT_RACE_TIME},
    standing::DriverStanding,
};

const UNKNOWN_TEAM: &str = "Unknown";

#[derive(Deserialize)]
struct ErgastDriver {
    #[serde(rename = "driverId")]
    driver_id: String,
    #[serde(rename = "givenName")]
    given_name: String,
    #[serde(rename = "familyName")]
    family_name: String,
    nationality: String,
    #[serde(rename = "permanentNumber")]
    permanent_number: Option<String>,
}

#[derive(Deserialize)]
struct ErgastConstructor {
    #[serde(rename = "constructorId")]
    constructor_id: Option<String>,
    name: Option<String>,
    nationality: Option<String>,
}

#[derive(Deserialize)]
struct ErgastLocation {
    lat: Option<String>,
    long: Option<String>,
    locality: String,
    country: String,
}

#[derive(Deserialize)]
struct ErgastCircuit {
    #[serde(rename = "circuitId")]
    circuit_id: String,
    #[serde(rename = "circuitName")]
    circuit_name: String,
    #[serde(rename = "Location")]
    location: ErgastLocation,
}

#[derive(Deserialize)]
struct ErgastRace {
    round: String,
    #[serde(rename = "raceName")]
    race_name: String,
    #[serde(rename = "Circuit")]
    circuit: ErgastCircuit,
    date: String,
    time: Option<String>,
}

#[derive(Deserialize)]
struct ErgastStanding {
    position: String,
    points: String,
    wins: Option<String>,
    #[serde(rename = "Driver")]
    driver: ErgastDriver,
    #[serde(rename = "Constructors", default)]
    constructors: Vec<ErgastConstructor>,
}

#[derive(Deserialize)]
struct ErgastResult {
    position: Option<String>,
    #[serde(rename = "positionText")]
    position_text: Option<String>,
    points: Option<String>,
    status: Option<String>,
    #[serde(rename = "Driver")]
    driver: ErgastDriver,
    #[serde(rename = "Constructor")]
    constructor: Option<ErgastConstructor>,
}

fn portrait_url(driver_id: &str) -> String {
    format!("/static/drivers/{driver_id}.jpg")
}

/// Decodes each record on its own and drops the ones that don't fit.
fn decode_each<T, U>(
    records: &[Value],
    kind: &'static str,
    mut map: impl FnMut(T) -> Option<U>,
) -> Vec<U>
where
    T: serde::de::DeserializeOwned,
{
    records
        .iter()
        .filter_map(|record| {
            let mapped = T::deserialize(record).ok().and_then(&mut map);
            if mapped.is_none() {
                debug!("Skipping unmappable {} record", kind);
            }
            mapped
        })
        .collect()
}

impl ErgastDriver {
    fn into_driver(self, team: Option<String>) -> Driver {
        Driver {
            portrait_url: Some(portrait_url(&self.driver_id)),
            driver_id: self.driver_id,
            given_name: self.given_name,
            family_name: self.family_name,
            nationality: self.nationality,
            permanent_number: self.permanent_number.filter(|n| !n.is_empty()),
            team,
        }
    }
}

pub fn map_drivers(records: &[Value]) -> Vec<Driver> {
    decode_each(records, "driver", |driver: ErgastDriver| {
        Some(driver.into_driver(Some(UNKNOWN_TEAM.to_string())))
    })
}

pub fn map_races(season: u32, records: &[Value]) -> Vec<Race> {
    decode_each(records, "race", |race: ErgastRace| {
        let round = race.round.trim().parse().ok()?;
        let location = race.circuit.location;
        Some(Race {
            race_id: format!("{season}_{}", race.race_name),
            season,
            round,
            race_name: race.race_name,
            circuit_name: race.circuit.circuit_name,
            circuit_id: race.circuit.circuit_id,
            date: race.date,
            time: race
                .time
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_RACE_TIME.to_string()),
            country: location.country,
            locality: location.locality,
            latitude: location.lat.and_then(|v| v.parse().ok()),
            longitude: location.long.and_then(|v| v.parse().ok()),
        })
    })
}

pub fn map_standings(records: &[Value]) -> Vec<DriverStanding> {
    decode_each(records, "standing", |standing: ErgastStanding| {
        let position = standing.position.trim().parse().ok()?;
        let points = standing.points.trim().parse::<f64>().ok()?;
        let wins = standing
            .wins
            .and_then(|w| w.trim().parse().ok())
            .unwrap_or(0);
        let constructor = standing
            .constructors
            .into_iter()
            .next()
            .map(|c| Constructor {
                constructor_id: c.constructor_id.unwrap_or_else(|| "unknown".to_string()),
                name: c.name.unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
                nationality: c.nationality.unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
            })
            .unwrap_or_else(Constructor::unknown);

        Some(DriverStanding {
            position,
            points: points.max(0.0),
            wins,
            driver: standing.driver.into_driver(Some(constructor.name.clone())),
            constructor,
        })
    })
}

pub fn map_results(records: &[Value]) -> Vec<RaceResult> {
    decode_each(records, "result", |result: ErgastResult| {
        // Retired or disqualified drivers carry a letter in positionText
        let classified = result
            .position_text
            .as_deref()
            .map_or(true, |text| text.trim().parse::<u32>().is_ok());
        let position = result
            .position
            .filter(|_| classified)
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0);
        let constructor = result.constructor.map_or_else(
            || ResultConstructor {
                constructor_id: "unknown".to_string(),
                name: UNKNOWN_TEAM.to_string(),
            },
            |c| ResultConstructor {
                constructor_id: c.constructor_id.unwrap_or_else(|| "unknown".to_string()),
                name: c.name.unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
            },
        );

        Some(RaceResult {
            position,
            driver: ResultDriver {
                driver_id: result.driver.driver_id,
                given_name: result.driver.given_name,
                family_name: result.driver.family_name,
                nationality: result.driver.nationality,
            },
            constructor,
            status: result.status.unwrap_or_else(|| "Finished".to_string()),
            points: result
                .points
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(0.0),
        })
    })
}
