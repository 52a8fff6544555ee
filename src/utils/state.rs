use crate::{cache::ResponseCache, services::f1_data::F1DataService, utils::config::Config};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub cache: ResponseCache,
    pub data: F1DataService,
}

impl AppState {
    pub fn new(config: Config, cache: ResponseCache, data: F1DataService) -> Self {
        AppState {
            config,
            cache,
            data,
        }
    }

    /// Season used when a request doesn't name one.
    pub fn season_or_current(&self, season: Option<u32>) -> u32 {
        season.unwrap_or(self.config.current_season)
    }
}
