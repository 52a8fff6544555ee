use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::{
    models::{
        driver::Driver,
        race::{Race, RaceResult},
        standing::DriverStanding,
    },
    services::ergast::{StatsProvider, UpstreamError},
    utils::mapper::{map_drivers, map_races, map_results, map_standings},
};

/// Season data as the API serves it. A failed provider call is logged and
/// reads as an empty collection.
#[derive(Clone)]
pub struct F1DataService {
    provider: Arc<dyn StatsProvider>,
}

fn records_or_empty(
    res: Result<Vec<Value>, UpstreamError>,
    what: &str,
    season: u32,
) -> Vec<Value> {
    res.unwrap_or_else(|e| {
        error!("Error fetching {} for season {}: {}", what, season, e);
        Vec::new()
    })
}

impl F1DataService {
    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        Self { provider }
    }

    pub async fn drivers(&self, season: u32) -> Vec<Driver> {
        let records = records_or_empty(self.provider.drivers(season).await, "drivers", season);
        map_drivers(&records)
    }

    pub async fn races(&self, season: u32) -> Vec<Race> {
        let records = records_or_empty(
            self.provider.race_schedule(season).await,
            "races",
            season,
        );
        map_races(season, &records)
    }

    /// Round `None` (or 0) means the latest standings.
    pub async fn standings(&self, season: u32, round: Option<u32>) -> Vec<DriverStanding> {
        let round = round.filter(|r| *r > 0);
        let records = records_or_empty(
            self.provider.driver_standings(season, round).await,
            "standings",
            season,
        );
        map_standings(&records)
    }

    pub async fn race_results(&self, season: u32, round: u32) -> Vec<RaceResult> {
        let records = records_or_empty(
            self.provider.race_results(season, round).await,
            "race results",
            season,
        );
        map_results(&records)
    }

    /// `"healthy"`, or `"error: <reason>"` when the provider can't be reached.
    pub async fn provider_status(&self, season: u32) -> String {
        match self.provider.probe(season).await {
            Ok(()) => "healthy".to_string(),
            Err(e) => format!("error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ergast::fake::{self, FakeProvider};

    #[tokio::test]
    async fn failing_provider_yields_empty_collections() {
        let service = F1DataService::new(Arc::new(FakeProvider::failing()));
        assert!(service.drivers(2025).await.is_empty());
        assert!(service.races(2025).await.is_empty());
        assert!(service.standings(2025, None).await.is_empty());
        assert!(service.race_results(2025, 1).await.is_empty());
    }

    #[tokio::test]
    async fn provider_status_reports_probe_failure() {
        let service = F1DataService::new(Arc::new(FakeProvider::failing()));
        let status = service.provider_status(2025).await;
        assert!(status.starts_with("error: "), "{status}");

        let service = F1DataService::new(Arc::new(FakeProvider::default()));
        assert_eq!(service.provider_status(2025).await, "healthy");
    }

    #[tokio::test]
    async fn round_zero_asks_for_latest_standings() {
        let provider = Arc::new(FakeProvider {
            standings: vec![fake::standing(1, "25", "piastri")],
            ..FakeProvider::default()
        });
        let service = F1DataService::new(provider.clone());

        service.standings(2025, Some(0)).await;
        assert_eq!(*provider.last_standings_round.lock().unwrap(), Some(None));

        service.standings(2025, Some(7)).await;
        assert_eq!(*provider.last_standings_round.lock().unwrap(), Some(Some(7)));
    }
}
