//! Warning reporting for recoverable conversion problems.
//!
//! Rendering never logs through global state directly. Instead every
//! routine that may drop content takes a [`Reporter`] handle and pushes a
//! [`Warning`] into it. The CLI passes a [`LogReporter`] that forwards to
//! `tracing`; tests pass a [`CollectingReporter`] and inspect what was
//! reported.
//!
//! # Example
//!
//! ```rust
//! use tgmark::report::{CollectingReporter, Reporter, Warning};
//!
//! let reporter = CollectingReporter::new();
//! reporter.warn(Warning::UnknownSpan { post_id: 7, kind: "cashtag".into() });
//!
//! assert_eq!(reporter.len(), 1);
//! assert!(reporter.warnings()[0].to_string().contains("cashtag"));
//! ```
//!
//! Any `Fn(Warning)` closure is a reporter too:
//!
//! ```rust
//! use tgmark::report::{Reporter, Warning};
//!
//! let print = |w: Warning| eprintln!("{}", w);
//! print.warn(Warning::UnsupportedPost { post_id: 1, kind: "poll".into() });
//! ```

use std::cell::RefCell;
use std::fmt;

/// A recoverable problem found while converting an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A span of an unrecognized kind was dropped from the body.
    UnknownSpan { post_id: i64, kind: String },
    /// A post with an unsupported `type` was skipped.
    UnsupportedPost { post_id: i64, kind: String },
    /// A service post with an unsupported `action` was skipped.
    UnsupportedAction { post_id: i64, action: String },
    /// A post failed to convert and was skipped.
    SkippedPost { post_id: i64, reason: String },
}

impl Warning {
    /// Returns the id of the post the warning is about.
    pub fn post_id(&self) -> i64 {
        match self {
            Warning::UnknownSpan { post_id, .. }
            | Warning::UnsupportedPost { post_id, .. }
            | Warning::UnsupportedAction { post_id, .. }
            | Warning::SkippedPost { post_id, .. } => *post_id,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownSpan { post_id, kind } => write!(
                f,
                "Unknown text object type '{}' in post #{}, skipped",
                kind, post_id
            ),
            Warning::UnsupportedPost { post_id, kind } => write!(
                f,
                "The type of post #{} is '{}' and it is not supported",
                post_id, kind
            ),
            Warning::UnsupportedAction { post_id, action } => write!(
                f,
                "Post #{} is a service post with action '{}' and it is not supported",
                post_id, action
            ),
            Warning::SkippedPost { post_id, reason } => {
                write!(f, "Post #{} skipped: {}", post_id, reason)
            }
        }
    }
}

/// Sink for [`Warning`]s.
pub trait Reporter {
    /// Records one warning.
    fn warn(&self, warning: Warning);
}

impl<F> Reporter for F
where
    F: Fn(Warning),
{
    fn warn(&self, warning: Warning) {
        self(warning);
    }
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warn(&self, warning: Warning) {
        tracing::warn!("{}", warning);
    }
}

/// Keeps every warning in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    warnings: RefCell<Vec<Warning>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the warnings recorded so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }

    /// Consumes the reporter, returning the recorded warnings.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings.into_inner()
    }
}

impl Reporter for CollectingReporter {
    fn warn(&self, warning: Warning) {
        self.warnings.borrow_mut().push(warning);
    }
}
