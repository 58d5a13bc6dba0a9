pub mod auth;
pub mod games;
pub mod health;
pub mod library;
pub mod validation;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::constants::{MAX_CREATE_GAME_BODY_BYTES, UPLOADS_URL_PREFIX};
use crate::AppState;

pub use auth::{login_user, register_user};
pub use games::{add_review, create_game, get_game, list_categories, list_games};
pub use health::health_check;
pub use library::{add_to_library, get_library};

/// Body for responses that only carry a status message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Build the full application router
///
/// API routes, uploaded images under `/uploads`, and the static front-end
/// as the fallback.
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(register_user))
        .route("/api/login", post(login_user))
        .route(
            "/api/games",
            get(list_games)
                .post(create_game)
                .layer(DefaultBodyLimit::max(MAX_CREATE_GAME_BODY_BYTES)),
        )
        .route("/api/games/:id", get(get_game))
        .route("/api/games/:id/reviews", post(add_review))
        .route("/api/categories", get(list_categories))
        .route("/api/library", get(get_library))
        .route("/api/library/:game_id", post(add_to_library))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&config.upload_dir))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors_layer(&config))
        .with_state(state);

    if config.log_requests {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}
