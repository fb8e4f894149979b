//! Error types for the tvdb-core library
//!
//! Every error raised by this crate is a variant of [`Error`], so callers can
//! match broadly or on a specific condition.

use thiserror::Error;

/// Error type for all catalog operations
#[derive(Error, Debug)]
pub enum Error {
    /// The payload was not well-formed XML, or parsed but contained none of
    /// the expected records. Usually means the backend returned an HTML error
    /// page with a 200 status.
    #[error("bad data received: {0}")]
    BadData(String),

    /// The HTTP transport failed before a response was obtained
    #[error("connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// The server answered with an unexpected non-success status
    #[error("bad status returned from server: {0}")]
    ConnectionFailed(String),

    /// The server reported a definitive 404, or the payload carried an
    /// explicit error marker
    #[error("not found: {0}")]
    NotFound(String),

    /// A series or episode id lookup matched nothing
    #[error("id not found: {0}")]
    IdNotFound(String),

    /// A field was requested on an entity that does not carry it
    #[error("{entity} has no attribute {name}")]
    AttributeNotFound { entity: &'static str, name: String },

    /// A sequence index (season/episode number) does not exist
    #[error("index {0} not found")]
    IndexNotFound(String),

    /// The caller supplied a malformed language, id or index
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A find/filter predicate failed while being evaluated
    #[error("predicate failed: {0}")]
    Predicate(String),

    /// No mirror matches the requested capability mask
    #[error("no mirror matching mask {0} found")]
    NoMirror(u32),
}

/// Result type alias for all catalog operations
pub type Result<T> = std::result::Result<T, Error>;
