//! User collection: accounts, unique indexes and per-user libraries.

use redb::{Database, ReadableTable};

use super::{decode, encode, now_micros, tables};
use crate::error::{AppError, Result};
use crate::models::{GameRecord, UserRecord};

/// Insert a new user, enforcing username and email uniqueness
///
/// The index checks and the inserts share one write transaction, so two
/// concurrent registrations for the same name cannot both succeed.
pub fn create_user(
    db: &Database,
    username: &str,
    email: &str,
    password_hash: String,
) -> Result<UserRecord> {
    let record = UserRecord {
        id: uuid::Uuid::new_v4().to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        library: Vec::new(),
        created_at: now_micros(),
    };

    let write_txn = db.begin_write()?;
    {
        let mut emails = write_txn.open_table(tables::USER_EMAILS)?;
        let mut usernames = write_txn.open_table(tables::USER_USERNAMES)?;

        if emails.get(email)?.is_some() || usernames.get(username)?.is_some() {
            return Err(AppError::UserAlreadyExists);
        }

        emails.insert(email, record.id.as_str())?;
        usernames.insert(username, record.id.as_str())?;

        let mut users = write_txn.open_table(tables::USERS)?;
        let bytes = encode(&record)?;
        users.insert(record.id.as_str(), bytes.as_slice())?;
    }
    write_txn.commit()?;

    tracing::info!("New user registered: {}", record.id);
    Ok(record)
}

/// Look up a user by id
pub fn get_user(db: &Database, user_id: &str) -> Result<Option<UserRecord>> {
    let read_txn = db.begin_read()?;
    let users = read_txn.open_table(tables::USERS)?;
    let user = users
        .get(user_id)?
        .map(|bytes| decode(bytes.value()))
        .transpose()?;
    Ok(user)
}

/// Look up a user by normalized email
pub fn find_by_email(db: &Database, email: &str) -> Result<Option<UserRecord>> {
    let read_txn = db.begin_read()?;
    let emails = read_txn.open_table(tables::USER_EMAILS)?;
    let user_id = match emails.get(email)? {
        Some(id) => id.value().to_string(),
        None => return Ok(None),
    };

    let users = read_txn.open_table(tables::USERS)?;
    let user = users
        .get(user_id.as_str())?
        .map(|bytes| decode(bytes.value()))
        .transpose()?;
    Ok(user)
}

/// Append a game to a user's library
///
/// Fails with `AlreadyInLibrary` when the game is already there.
pub fn add_to_library(db: &Database, user_id: &str, game_id: &str) -> Result<()> {
    let write_txn = db.begin_write()?;
    {
        let games = write_txn.open_table(tables::GAMES)?;
        if games.get(game_id)?.is_none() {
            return Err(AppError::GameNotFound);
        }
        drop(games);

        let mut users = write_txn.open_table(tables::USERS)?;
        let mut user: UserRecord = users
            .get(user_id)?
            .map(|bytes| decode(bytes.value()))
            .transpose()?
            .ok_or(AppError::UserNotFound)?;

        if user.owns(game_id) {
            return Err(AppError::AlreadyInLibrary);
        }

        user.library.push(game_id.to_string());
        let bytes = encode(&user)?;
        users.insert(user_id, bytes.as_slice())?;
    }
    write_txn.commit()?;

    tracing::info!("Game {} added to library of user {}", game_id, user_id);
    Ok(())
}

/// Resolve a user's library into full game records, in insertion order
///
/// Ids that no longer resolve to a game are skipped.
pub fn library_games(db: &Database, user_id: &str) -> Result<Vec<GameRecord>> {
    let read_txn = db.begin_read()?;
    let users = read_txn.open_table(tables::USERS)?;
    let user: UserRecord = users
        .get(user_id)?
        .map(|bytes| decode(bytes.value()))
        .transpose()?
        .ok_or(AppError::UserNotFound)?;

    let games_table = read_txn.open_table(tables::GAMES)?;
    let mut games = Vec::with_capacity(user.library.len());
    for game_id in &user.library {
        match games_table.get(game_id.as_str())? {
            Some(bytes) => games.push(decode(bytes.value())?),
            None => tracing::warn!("Library of {} references missing game {}", user_id, game_id),
        }
    }

    Ok(games)
}
