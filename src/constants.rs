/// Maximum uploaded image size in bytes (5MB)
pub const MAX_IMAGE_SIZE_BYTES: usize = 5_242_880;

/// Request body ceiling for game creation.
/// Larger than the image limit so oversized files reach our own size check.
pub const MAX_CREATE_GAME_BODY_BYTES: usize = 4 * MAX_IMAGE_SIZE_BYTES;

/// File extensions accepted for game images
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Content types accepted for game images
pub const ALLOWED_IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Bearer token lifetime (24 hours)
pub const TOKEN_EXPIRY_SECS: i64 = 86_400;

/// URL prefix under which uploaded images are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for a game id that is not a valid UUID
pub const ERR_INVALID_GAME_ID: &str = "Invalid game id";

/// Error message for rejected image types
pub const ERR_ONLY_IMAGES: &str = "Only images are allowed";

/// Error message for images over the size ceiling
pub const ERR_FILE_TOO_LARGE: &str = "File exceeds size limit";

/// Generic login failure; never reveals which part was wrong
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid email or password";
