use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body
///
/// Same as `axum::Json`, but a body that is not JSON, has the wrong
/// content type or does not fit `T` is rejected through `AppError`, so the
/// client gets a 400 with the usual `{"message"}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
