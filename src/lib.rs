//! # tgmark
//!
//! Convert Telegram Desktop channel exports (`result.json`) into one
//! Markdown note per post, ready to drop into an Obsidian vault.
//!
//! ## Overview
//!
//! Each `message` post becomes a file named `{YYYY-MM-DD}-{id}.md` holding:
//!
//! - **Front matter** — title, date, hashtags, sender and provenance
//! - **Attachments** — photo (`![image](...)`) and media (`![[...]]`) embeds
//! - **Text** — Telegram's rich-text entities rendered as Markdown
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tgmark::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let archive = load_archive(Path::new("result.json"))?;
//!     let config = ConvertConfig::new().with_out_dir("vault/channel");
//!
//!     let stats = convert_archive(&archive, &config, &LogReporter)?;
//!     println!("{} of {} posts written", stats.written, stats.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering a Single Span
//!
//! ```rust
//! use tgmark::prelude::*;
//!
//! let reporter = CollectingReporter::new();
//! let span = Span::TextLink {
//!     text: "click".into(),
//!     href: Some("https://example.com".into()),
//! };
//!
//! let out = render_span(&span, 1, &ConvertConfig::new(), &reporter)?;
//! assert_eq!(out.as_deref(), Some("[click](https://example.com)"));
//! # Ok::<(), tgmark::TgmarkError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`archive`] — Export model ([`Archive`](archive::Archive), [`Post`](archive::Post)) and loader
//! - [`span`] — Text entities ([`Span`](span::Span))
//! - [`render`] — Span, body and header rendering
//! - [`convert`] — Per-post file conversion ([`convert_archive`](convert::convert_archive))
//! - [`report`] — Warning sinks ([`Reporter`](report::Reporter))
//! - [`config`] — [`ConvertConfig`](config::ConvertConfig)
//! - [`cli`] — CLI arguments (requires `cli` feature)
//! - [`error`] — [`TgmarkError`], [`Result`]

pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod render;
pub mod report;
pub mod span;

// Re-export the main types at the crate root for convenience
pub use error::{Result, TgmarkError};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use tgmark::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{Result, TgmarkError};

    // Model
    pub use crate::archive::{Archive, Post, PostDate, PostKind, PostText, load_archive, parse_archive};
    pub use crate::span::{Span, TextPart};

    // Rendering
    pub use crate::render::{render_body, render_header, render_post, render_span};

    // Conversion
    pub use crate::config::ConvertConfig;
    pub use crate::convert::{ConvertStats, PostOutcome, convert_archive, convert_post, post_filename};

    // Reporting
    pub use crate::report::{CollectingReporter, LogReporter, Reporter, Warning};
}
