//! Error types for the movie API client.
//!
//! # Design
//! Errors fall into two groups. Validation errors (`InvalidConfiguration`,
//! `InvalidId`, `InvalidImdbId`, `EmptyQuery`) are detected before any
//! request is built. Round-trip errors (`Transport`, `Parse`, `Http`, `Api`)
//! are produced only by the response classifier after a network attempt.
//! `UnknownOperation` exists for name lookups in the endpoint registry and
//! cannot be reached through the typed client surface.

use thiserror::Error;

/// Errors delivered to operation callbacks or returned by constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RottenError {
    /// No non-empty access key could be resolved at construction.
    #[error("Invalid API key")]
    InvalidConfiguration,

    /// An operation name outside the fixed registry was looked up.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A movie id was missing or not made only of decimal digits.
    #[error("Invalid id.")]
    InvalidId,

    /// An IMDB id did not match an optional `tt` followed by digits.
    #[error("Invalid IMDB id.")]
    InvalidImdbId,

    /// A search query was empty after trimming whitespace.
    #[error("Query must be a non-empty string.")]
    EmptyQuery,

    /// The transport failed before a response was received.
    #[error("{0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("Error parsing the response !")]
    Parse,

    /// The server answered with a status other than 200.
    #[error("Status code : {0}")]
    Http(u16),

    /// The body carried an embedded `error` member.
    #[error("{0}")]
    Api(String),
}

/// Fieldless discriminant of [`RottenError`], handy for matching in tests
/// and for callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidConfiguration,
    UnknownOperation,
    InvalidId,
    InvalidImdbId,
    EmptyQuery,
    TransportError,
    ParseError,
    HttpError,
    ApiError,
}

impl RottenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RottenError::InvalidConfiguration => ErrorKind::InvalidConfiguration,
            RottenError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            RottenError::InvalidId => ErrorKind::InvalidId,
            RottenError::InvalidImdbId => ErrorKind::InvalidImdbId,
            RottenError::EmptyQuery => ErrorKind::EmptyQuery,
            RottenError::Transport(_) => ErrorKind::TransportError,
            RottenError::Parse => ErrorKind::ParseError,
            RottenError::Http(_) => ErrorKind::HttpError,
            RottenError::Api(_) => ErrorKind::ApiError,
        }
    }

    /// True for errors raised before any request leaves the process.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RottenError::InvalidConfiguration
                | RottenError::UnknownOperation(_)
                | RottenError::InvalidId
                | RottenError::InvalidImdbId
                | RottenError::EmptyQuery
        )
    }
}
