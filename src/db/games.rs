//! Game collection: catalog records with their embedded reviews.

use std::collections::BTreeSet;

use redb::{Database, ReadableTable};

use super::{decode, encode, now_micros, tables};
use crate::error::{AppError, Result};
use crate::models::{GameFilters, GameRecord, ReviewRecord};

/// Validated fields for a new game
#[derive(Debug, Clone)]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub price: f64,
    pub featured: bool,
    pub trending: bool,
    pub publisher: String,
}

/// Persist a new game with no reviews and a zero rating
pub fn insert_game(db: &Database, new: NewGame) -> Result<GameRecord> {
    let now = now_micros();
    let record = GameRecord {
        id: uuid::Uuid::new_v4().to_string(),
        title: new.title,
        description: new.description,
        category: new.category,
        image_url: new.image_url,
        price: new.price,
        featured: new.featured,
        trending: new.trending,
        release_date: now,
        publisher: new.publisher,
        rating: 0.0,
        reviews: Vec::new(),
        created_at: now,
    };

    let write_txn = db.begin_write()?;
    {
        let mut games = write_txn.open_table(tables::GAMES)?;
        let bytes = encode(&record)?;
        games.insert(record.id.as_str(), bytes.as_slice())?;
    }
    write_txn.commit()?;

    tracing::info!("Game created: {} ({})", record.title, record.id);
    Ok(record)
}

/// Look up a game by id
pub fn get_game(db: &Database, game_id: &str) -> Result<Option<GameRecord>> {
    let read_txn = db.begin_read()?;
    let games = read_txn.open_table(tables::GAMES)?;
    let game = games
        .get(game_id)?
        .map(|bytes| decode(bytes.value()))
        .transpose()?;
    Ok(game)
}

fn all_games(db: &Database) -> Result<Vec<GameRecord>> {
    let read_txn = db.begin_read()?;
    let games = read_txn.open_table(tables::GAMES)?;

    let mut records = Vec::new();
    for entry in games.iter()? {
        let (_, bytes) = entry?;
        records.push(decode::<GameRecord>(bytes.value())?);
    }
    Ok(records)
}

/// All games matching the filters, in creation order
pub fn list_games(db: &Database, filters: &GameFilters) -> Result<Vec<GameRecord>> {
    let mut games: Vec<GameRecord> = all_games(db)?
        .into_iter()
        .filter(|g| filters.matches(g))
        .collect();
    games.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(games)
}

/// Distinct categories across all games, sorted
pub fn list_categories(db: &Database) -> Result<Vec<String>> {
    let categories: BTreeSet<String> = all_games(db)?.into_iter().map(|g| g.category).collect();
    Ok(categories.into_iter().collect())
}

/// Append a review and recompute the game's average rating
///
/// The read, recompute and write happen in one write transaction. redb
/// admits a single writer at a time, so concurrent reviews of the same game
/// are applied one after another and none is lost.
pub fn add_review(
    db: &Database,
    game_id: &str,
    user_id: &str,
    rating: f64,
    comment: String,
) -> Result<GameRecord> {
    let write_txn = db.begin_write()?;
    let game = {
        let mut games = write_txn.open_table(tables::GAMES)?;
        let mut game: GameRecord = games
            .get(game_id)?
            .map(|bytes| decode(bytes.value()))
            .transpose()?
            .ok_or(AppError::GameNotFound)?;

        game.add_review(ReviewRecord {
            user_id: user_id.to_string(),
            rating,
            comment,
            date: now_micros(),
        });

        let bytes = encode(&game)?;
        games.insert(game_id, bytes.as_slice())?;
        game
    };
    write_txn.commit()?;

    tracing::info!(
        "Review added to game {} by user {} (rating now {:.2})",
        game_id,
        user_id,
        game.rating
    );
    Ok(game)
}
