use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::db::users;
use crate::error::{AppError, LoginFailure, Result};
use crate::extract::JsonBody;
use crate::models::user::normalize_email;
use crate::models::{User, UserRecord};
use crate::routes::validation::required_field;
use crate::routes::MessageResponse;
use crate::security::{hash_password, issue_token, verify_dummy_password, verify_password};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

fn required_password(password: Option<String>) -> Result<String> {
    password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::InvalidInput("password is required".to_string()))
}

/// Register a new user
///
/// Returns 400 if the username or email is already taken. The password is
/// hashed with Argon2id before it reaches the store.
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let username = required_field(payload.username, "username")?;
    let email = normalize_email(&required_field(payload.email, "email")?);
    let password = required_password(payload.password)?;

    let db = state.db.clone();
    tokio::task::spawn_blocking(move || -> Result<UserRecord> {
        let password_hash = hash_password(&password)?;
        users::create_user(&db, &username, &email, password_hash)
    })
    .await??;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Log in with email and password
///
/// Unknown emails and wrong passwords get the same 400 response, and both
/// pay for one Argon2 verify.
pub async fn login_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = normalize_email(&required_field(payload.email, "email")?);
    let password = required_password(payload.password)?;

    let db = state.db.clone();
    let user = tokio::task::spawn_blocking(move || -> Result<UserRecord> {
        let user = match users::find_by_email(&db, &email)? {
            Some(user) => user,
            None => {
                verify_dummy_password(&password);
                return Err(AppError::InvalidCredentials(LoginFailure::UnknownEmail));
            }
        };

        if !verify_password(&password, &user.password_hash) {
            return Err(AppError::InvalidCredentials(LoginFailure::WrongPassword));
        }
        Ok(user)
    })
    .await??;

    let token = issue_token(&user.id, &state.config.app_secret_key)?;
    tracing::info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        token,
        user: User::from(&user),
    }))
}
