//! Error types for the clx-log library.
//!
//! This module provides the [`Error`] enum and [`Result`] type alias used
//! throughout the library for error handling.

use thiserror::Error;

/// Error type for clx-log operations.
///
/// Formatting and emitting records never fails; errors only come out of
/// construction-time validation and usage preconditions.
#[derive(Error, Debug)]
pub enum Error {
    /// A record template could not be parsed.
    #[error(transparent)]
    Tera(#[from] tera::Error),

    /// A string could not be parsed as a severity level.
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    /// A progress bar was requested for an iterator without an exact size
    /// and no explicit length was supplied.
    #[error("progress bar length is unknown; pass an explicit length for iterators without an exact size")]
    UnknownLength,
}

/// A specialized `Result` type for clx-log operations.
///
/// This is defined as `std::result::Result<T, clx_log::Error>` for convenience.
pub type Result<T> = std::result::Result<T, Error>;
