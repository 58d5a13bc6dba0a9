use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::security::{bearer_token, verify_token};
use crate::AppState;

/// Id of the user whose bearer token accompanied the request
///
/// Handlers that take this extractor only run once the token has been
/// verified; otherwise the request is rejected with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let user_id = verify_token(bearer_token(header), &state.config.app_secret_key)?;
        Ok(AuthUser(user_id))
    }
}
