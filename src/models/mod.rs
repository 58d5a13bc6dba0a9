pub mod game;
pub mod user;

use chrono::{DateTime, Utc};

pub use game::{Game, GameFilters, GameRecord, Review, ReviewRecord};
pub use user::{User, UserRecord};

/// Convert a Unix microsecond timestamp to RFC3339, defaulting to now if invalid
pub fn timestamp_to_rfc3339(timestamp_micros: i64) -> String {
    DateTime::from_timestamp_micros(timestamp_micros)
        .unwrap_or_else(Utc::now)
        .to_rfc3339()
}
