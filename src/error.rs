use thiserror::Error;

/// Error types for play-count aggregation.
///
/// Only [`PlaysError::Io`] raised while reading the set list ever reaches the
/// top level. Every other variant is produced inside a page fetch or a
/// provider resolver and is turned into "no plays" at that boundary.
///
/// ```rust
/// use set_plays::{list::read_list, PlaysError};
///
/// match read_list("does/not/exist.md") {
///     Err(PlaysError::Io(e)) => eprintln!("cannot read list: {e}"),
///     Err(e) => eprintln!("other error: {e}"),
///     Ok(entries) => println!("{} sets", entries.len()),
/// }
/// ```
#[derive(Error, Debug)]
pub enum PlaysError {
    /// HTTP/network related errors.
    ///
    /// Connection failures, DNS errors and body read failures all end up here.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication failures.
    ///
    /// A provider rejected the configured credentials, or a token exchange
    /// did not produce a usable token.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The server answered with a status the caller does not handle.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// A response body or page did not contain what we expected.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A URL could not be built or parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A credential needed for a resolution step is not configured.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// File system I/O errors, raised when the set list cannot be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PlaysError {
    fn from(e: serde_json::Error) -> Self {
        PlaysError::Parse(e.to_string())
    }
}
