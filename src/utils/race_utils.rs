use chrono::{DateTime, Utc};

use crate::models::race::{Race, TimeRemaining};

pub const RACE_LIVE_MESSAGE: &str = "Race is happening now!";

/// First race, in round order, that starts strictly after `now`.
///
/// The schedule is ordered by round before scanning so a provider returning
/// races out of order cannot change the answer. Races whose start time cannot
/// be parsed are skipped.
pub fn next_race(races: &[Race], now: DateTime<Utc>) -> Option<&Race> {
    let mut schedule: Vec<&Race> = races.iter().collect();
    schedule.sort_by_key(|race| race.round);

    schedule
        .into_iter()
        .find(|race| race.starts_at().is_some_and(|start| start > now))
}

pub fn time_remaining(start: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    if start <= now {
        return TimeRemaining {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            message: Some(RACE_LIVE_MESSAGE.to_string()),
        };
    }

    let total = (start - now).num_seconds();
    TimeRemaining {
        days: total / 86_400,
        hours: (total % 86_400) / 3_600,
        minutes: (total % 3_600) / 60,
        seconds: total % 60,
        message: None,
    }
}

pub fn is_live(remaining: &TimeRemaining) -> bool {
    remaining.message.as_deref() == Some(RACE_LIVE_MESSAGE)
}
