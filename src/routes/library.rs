use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::AuthUser;
use crate::db::users;
use crate::error::Result;
use crate::models::Game;
use crate::routes::validation::parse_game_id;
use crate::routes::MessageResponse;
use crate::AppState;

/// Games in the caller's library, in the order they were added
pub async fn get_library(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Game>>> {
    let db = state.db.clone();
    let records = tokio::task::spawn_blocking(move || users::library_games(&db, &user_id)).await??;

    Ok(Json(records.into_iter().map(Game::from).collect()))
}

/// Add a game to the caller's library
///
/// Returns 400 if the game is already there.
pub async fn add_to_library(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(game_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let game_id = parse_game_id(&game_id)?;

    let db = state.db.clone();
    tokio::task::spawn_blocking(move || users::add_to_library(&db, &user_id, &game_id)).await??;

    Ok(Json(MessageResponse::new("Game added to library")))
}
