//! Error types for the blog front-end behaviours.
//!
//! This module defines the centralized error type [`BlogfrontError`] and a type alias
//! [`Result`]. The `Display` text of the fetch-related variants is exactly what the
//! list controller shows to readers, prefixed with `Error: `.

use thiserror::Error;

/// The main error type for blogfront operations.
///
/// Only errors that survive the retry budget ever reach the page. Cache decode
/// failures are swallowed by the cache layer and never become a `BlogfrontError`
/// visible to the user.
///
/// # Examples
///
/// ```
/// use blogfront::BlogfrontError;
///
/// let err = BlogfrontError::Status { status: 500 };
/// assert_eq!(format!("Error: {err}"), "Error: Failed to fetch blogs");
/// ```
#[derive(Debug, Error)]
pub enum BlogfrontError {
    /// The endpoint answered with a non-success status code.
    #[error("Failed to fetch blogs")]
    Status {
        /// HTTP status code of the rejected response.
        status: u16,
    },

    /// The response body was not a JSON array of record objects.
    ///
    /// The string holds the decoder's detail for logs; the reader-facing text is
    /// fixed.
    #[error("Unexpected API response")]
    UnexpectedResponse(String),

    /// The request never produced a response (offline, CORS, DNS...).
    #[error("{0}")]
    Network(String),

    /// Reading from or writing to the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem I/O failed while loading a config or theme file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for blogfront operations.
pub type Result<T> = std::result::Result<T, BlogfrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_render_reader_facing_text() {
        assert_eq!(
            BlogfrontError::Status { status: 503 }.to_string(),
            "Failed to fetch blogs"
        );
        assert_eq!(
            BlogfrontError::UnexpectedResponse("expected a sequence".into()).to_string(),
            "Unexpected API response"
        );
        assert_eq!(
            BlogfrontError::Network("NetworkError when attempting to fetch resource.".into())
                .to_string(),
            "NetworkError when attempting to fetch resource."
        );
    }
}
