//! Unified error types for tgmark.
//!
//! Errors fall into two groups:
//!
//! - **Archive-level** ([`Io`](TgmarkError::Io), [`Parse`](TgmarkError::Parse))
//!   abort the whole run.
//! - **Post-level** ([`MissingField`](TgmarkError::MissingField),
//!   [`InvalidDate`](TgmarkError::InvalidDate),
//!   [`InvalidPost`](TgmarkError::InvalidPost)) abort a single post; the
//!   converter reports them and moves on to the next one.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for tgmark operations.
pub type Result<T> = std::result::Result<T, TgmarkError>;

/// The error type for all tgmark operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TgmarkError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - The output directory can't be created
    /// - A post file can't be written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse the archive file.
    #[error("Failed to parse Telegram export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A post lacks a field its content requires.
    ///
    /// Raised for a `text_link` without `href`, a `custom_emoji` without
    /// `document_id`, media without `file`, or a written post without a
    /// `date`.
    #[error("Post #{post_id} is missing required field '{field}'")]
    MissingField {
        /// The id of the affected post
        post_id: i64,
        /// The missing field name
        field: &'static str,
    },

    /// The post's `date` is not an ISO-8601 timestamp.
    #[error("Post #{post_id} has invalid date '{input}'")]
    InvalidDate {
        /// The id of the affected post
        post_id: i64,
        /// The unparseable date string
        input: String,
    },

    /// A post record doesn't match the expected shape.
    #[error("Post #{post_id} is malformed: {message}")]
    InvalidPost {
        /// The id of the affected post, or `-1` when the record has none
        post_id: i64,
        /// Description of what's wrong
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TgmarkError {
    /// Creates an archive parse error.
    pub fn archive_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        TgmarkError::Parse { source, path }
    }

    /// Creates a missing field error.
    pub fn missing_field(post_id: i64, field: &'static str) -> Self {
        TgmarkError::MissingField { post_id, field }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(post_id: i64, input: impl Into<String>) -> Self {
        TgmarkError::InvalidDate {
            post_id,
            input: input.into(),
        }
    }

    /// Creates an invalid post error.
    pub fn invalid_post(post_id: i64, message: impl Into<String>) -> Self {
        TgmarkError::InvalidPost {
            post_id,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TgmarkError::Io(_))
    }

    /// Returns `true` if this is an archive parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, TgmarkError::Parse { .. })
    }

    /// Returns `true` if the error only affects a single post.
    pub fn is_post_level(&self) -> bool {
        matches!(
            self,
            TgmarkError::MissingField { .. }
                | TgmarkError::InvalidDate { .. }
                | TgmarkError::InvalidPost { .. }
        )
    }
}
