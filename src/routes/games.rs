use std::collections::HashMap;
use std::path::Path as FsPath;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection}, Multipart, Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::db::games::{self, NewGame};
use crate::error::{AppError, Result};
use crate::extract::JsonBody;
use crate::models::{Game, GameFilters};
use crate::routes::validation::{
    parse_flag, parse_game_id, parse_price, required_field, validate_rating,
};
use crate::uploads::{store_image, ImageUpload};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

/// List games, optionally filtered by category, flags and title search
///
/// GET /api/games?category=&featured=&trending=&search=
pub async fn list_games(
    State(state): State<AppState>,
    Query(filters): Query<GameFilters>,
) -> Result<Json<Vec<Game>>> {
    let db = state.db.clone();
    let records = tokio::task::spawn_blocking(move || games::list_games(&db, &filters)).await??;

    Ok(Json(records.into_iter().map(Game::from).collect()))
}

/// Fetch a single game
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>> {
    let id = parse_game_id(&id)?;

    let db = state.db.clone();
    let record = tokio::task::spawn_blocking(move || games::get_game(&db, &id))
        .await??
        .ok_or(AppError::GameNotFound)?;

    Ok(Json(Game::from(record)))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::ImageTooLarge
    } else {
        AppError::InvalidInput(err.body_text())
    }
}

/// Create a game from a multipart form
///
/// Text fields: title, description, category, price, publisher, and
/// optionally featured, trending, imageUrl. File field: image.
/// Every check runs before the image or the record is written.
pub async fn create_game(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Game>)> {
    let mut multipart = multipart?;
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            // An empty file input is the same as no image
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            image = Some(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            fields.insert(name, value);
        }
    }

    let title = required_field(fields.remove("title"), "title")?;
    let description = required_field(fields.remove("description"), "description")?;
    let category = required_field(fields.remove("category"), "category")?;
    let price = parse_price(&required_field(fields.remove("price"), "price")?)?;
    let publisher = required_field(fields.remove("publisher"), "publisher")?;
    let featured = parse_flag(fields.get("featured").map(String::as_str), "featured")?;
    let trending = parse_flag(fields.get("trending").map(String::as_str), "trending")?;

    let image_url = match image {
        Some(upload) => {
            let extension = upload.validate()?;
            let upload_dir = FsPath::new(&state.config.upload_dir);
            store_image(upload_dir, &extension, &upload.bytes).await?
        }
        None => fields
            .remove("imageUrl")
            .map(|url| url.trim().to_string())
            .unwrap_or_default(),
    };

    let new_game = NewGame {
        title,
        description,
        category,
        image_url,
        price,
        featured,
        trending,
        publisher,
    };

    let db = state.db.clone();
    let record = tokio::task::spawn_blocking(move || games::insert_game(&db, new_game)).await??;
    tracing::info!("Game {} created by user {}", record.id, user_id);

    Ok((StatusCode::CREATED, Json(Game::from(record))))
}

/// Add a review to a game and return the updated game
pub async fn add_review(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ReviewRequest>,
) -> Result<(StatusCode, Json<Game>)> {
    let id = parse_game_id(&id)?;
    let rating = payload
        .rating
        .ok_or_else(|| AppError::InvalidInput("rating is required".to_string()))
        .and_then(validate_rating)?;
    let comment = payload.comment.unwrap_or_default();

    let db = state.db.clone();
    let record =
        tokio::task::spawn_blocking(move || games::add_review(&db, &id, &user_id, rating, comment))
            .await??;

    Ok((StatusCode::CREATED, Json(Game::from(record))))
}

/// Distinct categories across the catalog
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let db = state.db.clone();
    let categories = tokio::task::spawn_blocking(move || games::list_categories(&db)).await??;
    Ok(Json(categories))
}
