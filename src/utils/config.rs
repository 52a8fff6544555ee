use std::str::FromStr;

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://localhost:3000,http://127.0.0.1:5173";

/// Time-to-live, in seconds, for each cached resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub drivers: u64,
    pub races: u64,
    pub race_results: u64,
    pub standings: u64,
    pub next_race: u64,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            drivers: 3600,
            races: 7200,
            race_results: 3600,
            standings: 1800,
            next_race: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub api_prefix: String,
    pub redis_url: Option<String>,
    pub current_season: u32,
    pub ergast_base_url: String,
    pub cors_origins: Vec<String>,
    pub static_dir: String,
    pub log_level: String,
    pub cache_ttls: CacheTtls,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0:8000".to_string(),
            api_prefix: "/api".to_string(),
            redis_url: None,
            current_season: 2025,
            ergast_base_url: "https://api.jolpi.ca/ergast/f1".to_string(),
            cors_origins: split_list(DEFAULT_CORS_ORIGINS),
            static_dir: "static".to_string(),
            log_level: "info".to_string(),
            cache_ttls: CacheTtls::default(),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn init() -> Self {
        let defaults = Config::default();
        Config {
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr),
            api_prefix: env_or("API_PREFIX", defaults.api_prefix),
            redis_url: std::env::var("REDIS_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            current_season: env_parse("CURRENT_SEASON", defaults.current_season),
            ergast_base_url: env_or("ERGAST_BASE_URL", defaults.ergast_base_url),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.cors_origins),
            static_dir: env_or("STATIC_DIR", defaults.static_dir),
            log_level: env_or("LOG_LEVEL", defaults.log_level).to_lowercase(),
            cache_ttls: defaults.cache_ttls,
        }
    }
}
