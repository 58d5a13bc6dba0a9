use crate::error::{AppError, Result};

/// Trim a required text field, rejecting missing or blank values
pub fn required_field(value: Option<String>, name: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::InvalidInput(format!("{} is required", name))),
    }
}

/// Check that an id is a well-formed UUID and return it in canonical form
pub fn parse_game_id(raw: &str) -> Result<String> {
    uuid::Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| AppError::InvalidGameId)
}

/// Parse a price, which must be a finite non-negative number
pub fn parse_price(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(AppError::InvalidInput(
            "Price must be a non-negative number".to_string(),
        )),
    }
}

/// Parse an optional boolean form field; absent or blank means false
pub fn parse_flag(raw: Option<&str>, name: &str) -> Result<bool> {
    match raw.map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(_) => Err(AppError::InvalidInput(format!(
            "{} must be true or false",
            name
        ))),
    }
}

/// A review rating must be a finite number
pub fn validate_rating(rating: f64) -> Result<f64> {
    if rating.is_finite() {
        Ok(rating)
    } else {
        Err(AppError::InvalidInput(
            "Rating must be a number".to_string(),
        ))
    }
}
