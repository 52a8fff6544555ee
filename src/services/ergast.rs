use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde_json::{from_str, Value};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider answered with status {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response is missing {0}")]
    MissingField(&'static str),
}

/// Read-only source of raw season data, in the provider's own record shapes.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn drivers(&self, season: u32) -> Result<Vec<Value>, UpstreamError>;

    async fn race_schedule(&self, season: u32) -> Result<Vec<Value>, UpstreamError>;

    /// `None` asks for the standings after the latest completed round.
    async fn driver_standings(
        &self,
        season: u32,
        round: Option<u32>,
    ) -> Result<Vec<Value>, UpstreamError>;

    async fn race_results(&self, season: u32, round: u32) -> Result<Vec<Value>, UpstreamError>;

    /// Cheap liveness check against the provider.
    async fn probe(&self, season: u32) -> Result<(), UpstreamError> {
        self.drivers(season).await.map(|_| ())
    }
}

/// Ergast-compatible HTTP API (Jolpica mirror by default).
#[derive(Clone)]
pub struct ErgastClient {
    http_client: Client,
    base_url: String,
}

impl ErgastClient {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}/{path}/?format=json&limit=100", self.base_url);
        debug!("GET {}", url);

        let res = self.http_client.get(&url).send().await?;
        if !res.status().is_success() {
            return Err(UpstreamError::Status(res.status()));
        }
        let body = res.text().await?;
        Ok(from_str(&body)?)
    }
}

fn records(value: &Value, field: &'static str) -> Result<Vec<Value>, UpstreamError> {
    value
        .as_array()
        .cloned()
        .ok_or(UpstreamError::MissingField(field))
}

#[async_trait]
impl StatsProvider for ErgastClient {
    async fn drivers(&self, season: u32) -> Result<Vec<Value>, UpstreamError> {
        let res = self.fetch(&format!("{season}/drivers")).await?;
        records(&res["MRData"]["DriverTable"]["Drivers"], "DriverTable.Drivers")
    }

    async fn race_schedule(&self, season: u32) -> Result<Vec<Value>, UpstreamError> {
        let res = self.fetch(&format!("{season}/races")).await?;
        records(&res["MRData"]["RaceTable"]["Races"], "RaceTable.Races")
    }

    async fn driver_standings(
        &self,
        season: u32,
        round: Option<u32>,
    ) -> Result<Vec<Value>, UpstreamError> {
        let path = match round {
            Some(round) => format!("{season}/{round}/driverstandings"),
            None => format!("{season}/driverstandings"),
        };
        let res = self.fetch(&path).await?;
        let lists = records(
            &res["MRData"]["StandingsTable"]["StandingsLists"],
            "StandingsTable.StandingsLists",
        )?;
        match lists.first() {
            Some(list) => records(&list["DriverStandings"], "DriverStandings"),
            None => Ok(Vec::new()),
        }
    }

    async fn race_results(&self, season: u32, round: u32) -> Result<Vec<Value>, UpstreamError> {
        let res = self.fetch(&format!("{season}/{round}/results")).await?;
        let races = records(&res["MRData"]["RaceTable"]["Races"], "RaceTable.Races")?;
        match races.first() {
            Some(race) => records(&race["Results"], "Results"),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
pub mod fake {
    //! Canned provider for handler and service tests.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    pub struct FakeProvider {
        pub drivers: Vec<Value>,
        pub races: Vec<Value>,
        pub standings: Vec<Value>,
        pub results: Vec<Value>,
        pub failing: bool,
        pub calls: AtomicUsize,
        pub last_standings_round: std::sync::Mutex<Option<Option<u32>>>,
    }

    impl FakeProvider {
        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn answer(&self, records: &[Value]) -> Result<Vec<Value>, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                return Err(UpstreamError::Status(StatusCode::SERVICE_UNAVAILABLE));
            }
            Ok(records.to_vec())
        }
    }

    #[async_trait]
    impl StatsProvider for FakeProvider {
        async fn drivers(&self, _season: u32) -> Result<Vec<Value>, UpstreamError> {
            self.answer(&self.drivers)
        }

        async fn race_schedule(&self, _season: u32) -> Result<Vec<Value>, UpstreamError> {
            self.answer(&self.races)
        }

        async fn driver_standings(
            &self,
            _season: u32,
            round: Option<u32>,
        ) -> Result<Vec<Value>, UpstreamError> {
            if let Ok(mut last) = self.last_standings_round.lock() {
                *last = Some(round);
            }
            self.answer(&self.standings)
        }

        async fn race_results(&self, _season: u32, _round: u32) -> Result<Vec<Value>, UpstreamError> {
            self.answer(&self.results)
        }
    }

    pub fn driver(id: &str, given: &str, family: &str) -> Value {
        json!({
            "driverId": id,
            "permanentNumber": "44",
            "code": "HAM",
            "givenName": given,
            "familyName": family,
            "dateOfBirth": "1985-01-07",
            "nationality": "British"
        })
    }

    pub fn race(season: u32, round: u32, name: &str, date: &str, time: Option<&str>) -> Value {
        let mut race = json!({
            "season": season.to_string(),
            "round": round.to_string(),
            "raceName": name,
            "Circuit": {
                "circuitId": format!("circuit_{round}"),
                "circuitName": format!("{name} Circuit"),
                "Location": {
                    "lat": "26.0325",
                    "long": "50.5106",
                    "locality": "Sakhir",
                    "country": "Bahrain"
                }
            },
            "date": date
        });
        if let Some(time) = time {
            race["time"] = json!(time);
        }
        race
    }

    pub fn standing(position: u32, points: &str, driver_id: &str) -> Value {
        json!({
            "position": position.to_string(),
            "positionText": position.to_string(),
            "points": points,
            "wins": "2",
            "Driver": driver(driver_id, "Given", "Family"),
            "Constructors": [{
                "constructorId": "mclaren",
                "name": "McLaren",
                "nationality": "British"
            }]
        })
    }

    pub fn result(position: &str, position_text: &str, driver_id: &str, status: &str) -> Value {
        json!({
            "number": "4",
            "position": position,
            "positionText": position_text,
            "points": "25",
            "Driver": driver(driver_id, "Lando", "Norris"),
            "Constructor": {
                "constructorId": "mclaren",
                "name": "McLaren",
                "nationality": "British"
            },
            "status": status
        })
    }
}
