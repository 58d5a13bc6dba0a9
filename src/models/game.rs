use serde::{Deserialize, Serialize};

use super::timestamp_to_rfc3339;

/// A single review, stored inside its game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub user_id: String,
    pub rating: f64,
    pub comment: String,
    pub date: i64,
}

/// Game record stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub price: f64,
    pub featured: bool,
    pub trending: bool,
    pub release_date: i64,
    pub publisher: String,
    /// Mean of `reviews[*].rating`, 0 when there are none
    pub rating: f64,
    pub reviews: Vec<ReviewRecord>,
    /// Listing order
    pub created_at: i64,
}

impl GameRecord {
    /// Append a review and recompute the average rating
    pub fn add_review(&mut self, review: ReviewRecord) {
        self.reviews.push(review);
        self.rating = average_rating(&self.reviews);
    }
}

/// Arithmetic mean of the review ratings
pub fn average_rating(reviews: &[ReviewRecord]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: f64 = reviews.iter().map(|r| r.rating).sum();
    total / reviews.len() as f64
}

/// Review as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_id: String,
    pub rating: f64,
    pub comment: String,
    pub date: String,
}

/// Game as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub price: f64,
    pub featured: bool,
    pub trending: bool,
    pub release_date: String,
    pub publisher: String,
    pub rating: f64,
    pub reviews: Vec<Review>,
}

impl From<GameRecord> for Game {
    fn from(record: GameRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            image_url: record.image_url,
            price: record.price,
            featured: record.featured,
            trending: record.trending,
            release_date: timestamp_to_rfc3339(record.release_date),
            publisher: record.publisher,
            rating: record.rating,
            reviews: record
                .reviews
                .into_iter()
                .map(|r| Review {
                    user_id: r.user_id,
                    rating: r.rating,
                    comment: r.comment,
                    date: timestamp_to_rfc3339(r.date),
                })
                .collect(),
        }
    }
}

/// Query filters for the game listing
///
/// Empty values are treated as absent. `featured` and `trending` match
/// `true` only for the literal string "true".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameFilters {
    pub category: Option<String>,
    pub featured: Option<String>,
    pub trending: Option<String>,
    pub search: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl GameFilters {
    /// True when the game satisfies every supplied filter
    pub fn matches(&self, game: &GameRecord) -> bool {
        if let Some(category) = present(&self.category) {
            if game.category != category {
                return false;
            }
        }
        if let Some(featured) = present(&self.featured) {
            if game.featured != (featured == "true") {
                return false;
            }
        }
        if let Some(trending) = present(&self.trending) {
            if game.trending != (trending == "true") {
                return false;
            }
        }
        if let Some(search) = present(&self.search) {
            if !game.title.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}
