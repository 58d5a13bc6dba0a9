use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use sha2::Sha256;
use std::sync::OnceLock;

use crate::constants::TOKEN_EXPIRY_SECS;
use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with Argon2id and a fresh random salt
///
/// Returns the PHC string (algorithm, parameters, salt and hash together),
/// which is all that is ever stored for a user.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// Verify a password against a stored PHC hash
///
/// An unparseable stored hash is reported as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Stored password hash is malformed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Run a full Argon2 verify against a fixed hash that matches no user
///
/// Login calls this when the email is unknown so that path costs the same
/// as a wrong password. Always returns false.
pub fn verify_dummy_password(password: &str) -> bool {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let dummy = DUMMY_HASH.get_or_init(|| match hash_password("gamevault-dummy-password") {
        Ok(hash) => Some(hash),
        Err(e) => {
            tracing::error!("Failed to build dummy password hash: {}", e);
            None
        }
    });
    if let Some(hash) = dummy {
        verify_password(password, hash);
    }
    false
}

// =============================================================================
// Bearer Tokens
// =============================================================================

/// Issue a bearer token for a user, valid for 24 hours
///
/// Format: `<user_id>:<expiry>.<hex signature>`
pub fn issue_token(user_id: &str, secret: &str) -> Result<String> {
    issue_token_at(user_id, secret, chrono::Utc::now().timestamp())
}

/// Issue a token as if the current time were `now` (unix seconds)
pub fn issue_token_at(user_id: &str, secret: &str, now: i64) -> Result<String> {
    let payload = format!("{}:{}", user_id, now + TOKEN_EXPIRY_SECS);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::TokenSigning(e.to_string()))?;
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", payload, signature))
}

/// Verify a bearer token and return the user id it binds
pub fn verify_token(token: Option<&str>, secret: &str) -> Result<String> {
    verify_token_at(token, secret, chrono::Utc::now().timestamp())
}

/// Verify a token against the clock value `now` (unix seconds)
///
/// Fails when the token is missing, malformed, expired or signed with
/// another key. The signature check is constant-time.
pub fn verify_token_at(token: Option<&str>, secret: &str, now: i64) -> Result<String> {
    let token = token.ok_or(AppError::MissingToken)?;

    let (payload, signature) = token.rsplit_once('.').ok_or(AppError::InvalidToken)?;
    let (user_id, expiry) = payload.split_once(':').ok_or(AppError::InvalidToken)?;
    if user_id.is_empty() {
        return Err(AppError::InvalidToken);
    }
    let expiry: i64 = expiry.parse().map_err(|_| AppError::InvalidToken)?;

    let sig_bytes = hex::decode(signature).map_err(|_| {
        tracing::warn!("Invalid hex signature format");
        AppError::InvalidToken
    })?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| {
        tracing::error!("Failed to create HMAC instance");
        AppError::InvalidToken
    })?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&sig_bytes)
        .map_err(|_| AppError::InvalidToken)?;

    if now > expiry {
        return Err(AppError::InvalidToken);
    }

    Ok(user_id.to_string())
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let header = header?.trim();
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
