//! Common validation and normalization helpers.

use validator::ValidationError;

/// Minimum accepted password length for member and admin accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Normalizes an email for storage and lookup: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates that a password meets the minimum length.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_length");
        err.message = Some("Password is required and must be at least 6 characters".into());
        Err(err)
    }
}

lazy_static::lazy_static! {
    // Standard watch/embed/short-link URLs with an 11-character video id.
    static ref YOUTUBE_REGEX: regex::Regex = regex::Regex::new(
        r"(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([A-Za-z0-9_-]{11})"
    )
    .unwrap();
    static ref YOUTUBE_SHORTS_REGEX: regex::Regex =
        regex::Regex::new(r"/shorts/([A-Za-z0-9_-]{11})([#&?/]|$)").unwrap();
}

/// Returns true for standard YouTube URLs, including Shorts.
pub fn is_valid_youtube_url(url: &str) -> bool {
    YOUTUBE_REGEX.is_match(url) || YOUTUBE_SHORTS_REGEX.is_match(url)
}

/// `validator` adapter for optional YouTube URL fields.
pub fn validate_youtube_url(url: &str) -> Result<(), ValidationError> {
    if is_valid_youtube_url(url) {
        Ok(())
    } else {
        let mut err = ValidationError::new("youtube_url");
        err.message = Some("Invalid YouTube URL".into());
        Err(err)
    }
}
