//! Cache key builders: `{resource}:{id or season}:{selector}`.
//!
//! A season that was not given renders as `current` and a round that was not
//! given as `latest`, so a request that relies on defaults never shares an entry
//! with one that names the same season explicitly.

fn season_part(season: Option<u32>) -> String {
    season.map_or_else(|| "current".to_string(), |s| s.to_string())
}

fn round_part(round: Option<u32>) -> String {
    round.map_or_else(|| "latest".to_string(), |r| r.to_string())
}

pub fn drivers(season: Option<u32>) -> String {
    format!("drivers:{}", season_part(season))
}

pub fn driver(driver_id: &str, season: Option<u32>) -> String {
    format!("driver:{}:{}", driver_id, season_part(season))
}

pub fn races(season: Option<u32>) -> String {
    format!("races:{}", season_part(season))
}

pub fn next_race(season: Option<u32>) -> String {
    format!("next_race:{}", season_part(season))
}

pub fn race(race_id: &str, season: Option<u32>) -> String {
    format!("race:{}:{}", race_id, season_part(season))
}

pub fn race_results(race_id: &str, season: Option<u32>) -> String {
    format!("race_results:{}:{}", race_id, season_part(season))
}

pub fn standings(season: Option<u32>, round: Option<u32>) -> String {
    format!("standings:{}:{}", season_part(season), round_part(round))
}

pub fn driver_standing(driver_id: &str, season: Option<u32>, round: Option<u32>) -> String {
    format!(
        "driver_standing:{}:{}:{}",
        driver_id,
        season_part(season),
        round_part(round)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_as_placeholders() {
        assert_eq!(drivers(None), "drivers:current");
        assert_eq!(standings(None, None), "standings:current:latest");
        assert_eq!(
            driver_standing("hamilton", None, None),
            "driver_standing:hamilton:current:latest"
        );
    }

    #[test]
    fn explicit_values_are_kept() {
        assert_eq!(race("2024_Bahrain Grand Prix", Some(2024)), "race:2024_Bahrain Grand Prix:2024");
        assert_eq!(standings(Some(2023), Some(5)), "standings:2023:5");
    }

    #[test]
    fn explicit_round_zero_differs_from_latest() {
        assert_ne!(standings(Some(2025), Some(0)), standings(Some(2025), None));
    }

    #[test]
    fn resources_do_not_collide() {
        assert_ne!(race("x", None), race_results("x", None));
        assert_ne!(races(None), next_race(None));
        assert_ne!(drivers(Some(2025)), driver("2025", None));
    }
}
