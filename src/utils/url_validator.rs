//! Absolute URL validation for bookmark targets.

use url::Url;

/// Longest URL accepted for a bookmark.
pub const MAX_URL_LENGTH: usize = 2000;

/// Errors that can occur while validating a bookmark URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP, HTTPS and FTP URLs are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not exceed {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Checks that `input` is a syntactically valid absolute URL.
///
/// # Rules
///
/// 1. **Syntax**: must parse as an absolute URL (relative references fail)
/// 2. **Protocol**: `http`, `https` or `ftp`
/// 3. **Host**: must be present
/// 4. **Length**: at most [`MAX_URL_LENGTH`] characters
///
/// The input is not rewritten; callers store the trimmed string they passed in.
///
/// # Errors
///
/// Returns the first rule that fails.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_absolute_url("https://react.dev").is_ok());
/// assert!(validate_absolute_url("not-a-url").is_err());
/// ```
pub fn validate_absolute_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.chars().count() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" | "ftp" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
