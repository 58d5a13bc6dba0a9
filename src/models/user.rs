use serde::{Deserialize, Serialize};

/// User record stored in redb
/// Uses Unix microsecond timestamps for compact storage with bincode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    /// Trimmed and lowercased
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
    /// Game ids in the order they were added
    pub library: Vec<String>,
    pub created_at: i64,
}

impl UserRecord {
    /// Whether the game is already in this user's library
    pub fn owns(&self, game_id: &str) -> bool {
        self.library.iter().any(|id| id == game_id)
    }
}

/// Public user fields returned by the API; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
        }
    }
}

/// Canonical form used for storing and looking up email addresses
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
