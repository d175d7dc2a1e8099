//! Markdown rendering of a single post.
//!
//! - [`entity`] - one span to markup ([`render_span`])
//! - [`body`] - attachments and text of a post ([`render_body`])
//! - [`header`] - front matter ([`render_header`])
//!
//! [`render_post`] glues them into the content of one output file.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tgmark::archive::Post;
//! use tgmark::config::ConvertConfig;
//! use tgmark::render::render_post;
//! use tgmark::report::CollectingReporter;
//!
//! let post = Post::from_value(&json!({
//!     "id": 3,
//!     "type": "message",
//!     "date": "2024-01-15T10:30:00",
//!     "text": [{"type": "bold", "text": " hi "}]
//! }))?;
//!
//! let reporter = CollectingReporter::new();
//! let markdown = render_post(&post, 1, &ConvertConfig::new(), &reporter)?;
//! assert_eq!(
//!     markdown,
//!     "---\ntitle: 3\ndate: 2024-01-15 10:30:00\nlayout: post\n---\n\n**hi**\n"
//! );
//! # Ok::<(), tgmark::TgmarkError>(())
//! ```

pub mod body;
pub mod entity;
pub mod header;

pub use body::{render_body, render_text};
pub use entity::{de_escape, escape_reference, render_span};
pub use header::render_header;

use crate::archive::Post;
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::report::Reporter;

/// Renders the full file content of a post: header, blank line, body.
pub fn render_post(
    post: &Post,
    owner_id: i64,
    config: &ConvertConfig,
    reporter: &dyn Reporter,
) -> Result<String> {
    let header = render_header(post, owner_id)?;
    let body = render_body(post, config, reporter)?;
    Ok(format!("{}\n{}\n", header, body))
}
