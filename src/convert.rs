//! Archive-to-files conversion.
//!
//! Posts are handled strictly one after another: each `message` post is
//! rendered completely, then written to `{out_dir}/{YYYY-MM-DD}-{id}.md`.
//! A post that fails to convert is reported and skipped; the run goes on.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tgmark::archive::load_archive;
//! use tgmark::config::ConvertConfig;
//! use tgmark::convert::convert_archive;
//! use tgmark::report::LogReporter;
//!
//! let archive = load_archive(Path::new("result.json"))?;
//! let config = ConvertConfig::new().with_out_dir("notes");
//! let stats = convert_archive(&archive, &config, &LogReporter)?;
//! println!("{} posts written", stats.written);
//! # Ok::<(), tgmark::TgmarkError>(())
//! ```

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::archive::{Archive, Post, PostKind};
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::render::render_post;
use crate::report::{Reporter, Warning};

/// The only service action that is skipped without a warning.
const CLEAR_HISTORY: &str = "clear_history";

/// What happened to a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// The post was written to this file.
    Written(PathBuf),
    /// The post was skipped silently (history clears).
    Ignored,
    /// The post was skipped with a warning.
    Unsupported,
}

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub total: usize,
    pub written: usize,
    pub ignored: usize,
    pub skipped: usize,
}

impl ConvertStats {
    /// Share of posts that made it to disk, in percent.
    pub fn written_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.written as f64 / self.total as f64) * 100.0
    }
}

/// Returns the output file name of a post, e.g. `2024-01-15-12.md`.
pub fn post_filename(post: &Post) -> Result<String> {
    let date = post.parsed_date()?;
    Ok(format!("{}-{}.md", date.date(), post.id))
}

/// Converts every post of an archive into `config.out_dir`.
///
/// Only a failure to create the output directory is returned as an error.
/// Everything else is reported through `reporter` and counted in the stats.
pub fn convert_archive(
    archive: &Archive,
    config: &ConvertConfig,
    reporter: &dyn Reporter,
) -> Result<ConvertStats> {
    fs::create_dir_all(&config.out_dir)?;

    let mut stats = ConvertStats::default();
    for value in &archive.messages {
        stats.total += 1;

        let outcome = Post::from_value(value)
            .and_then(|post| convert_post(&post, archive.id, config, reporter));

        match outcome {
            Ok(PostOutcome::Written(path)) => {
                debug!(path = %path.display(), "post written");
                stats.written += 1;
            }
            Ok(PostOutcome::Ignored) => stats.ignored += 1,
            Ok(PostOutcome::Unsupported) => stats.skipped += 1,
            Err(e) => {
                let post_id = value.get("id").and_then(serde_json::Value::as_i64).unwrap_or(-1);
                reporter.warn(Warning::SkippedPost {
                    post_id,
                    reason: e.to_string(),
                });
                stats.skipped += 1;
            }
        }
    }

    info!(
        total = stats.total,
        written = stats.written,
        ignored = stats.ignored,
        skipped = stats.skipped,
        "conversion finished"
    );
    Ok(stats)
}

/// Converts one post, writing its file when it is a `message`.
///
/// The file is written only after the whole post rendered successfully.
pub fn convert_post(
    post: &Post,
    owner_id: i64,
    config: &ConvertConfig,
    reporter: &dyn Reporter,
) -> Result<PostOutcome> {
    match &post.kind {
        PostKind::Message => {
            let content = render_post(post, owner_id, config, reporter)?;
            let path = config.out_dir.join(post_filename(post)?);
            fs::write(&path, content)?;
            Ok(PostOutcome::Written(path))
        }
        PostKind::Service if post.action.as_deref() == Some(CLEAR_HISTORY) => {
            debug!(post_id = post.id, "service post with action 'clear_history', skipped");
            Ok(PostOutcome::Ignored)
        }
        PostKind::Service => {
            reporter.warn(Warning::UnsupportedAction {
                post_id: post.id,
                action: post.action.clone().unwrap_or_default(),
            });
            Ok(PostOutcome::Unsupported)
        }
        PostKind::Other(kind) => {
            reporter.warn(Warning::UnsupportedPost {
                post_id: post.id,
                kind: kind.clone(),
            });
            Ok(PostOutcome::Unsupported)
        }
    }
}
