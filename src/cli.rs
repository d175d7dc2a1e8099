//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`LogLevel`] - Logging verbosity accepted by `--log-level`

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ConvertConfig, DEFAULT_OUT_DIR};

/// Convert an exported Telegram channel `result.json` into a bunch of
/// Markdown posts ready to use with Obsidian.
#[derive(Parser, Debug, Clone)]
#[command(name = "tgmark")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    tgmark result.json
    tgmark result.json --out-dir vault/channel
    tgmark result.json --photo-dir attachments --log-level debug")]
pub struct Args {
    /// result.json file from the Telegram export
    #[arg(value_name = "JSON_FILE")]
    pub json: PathBuf,

    /// Output directory for Markdown files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Logging level (overrides RUST_LOG; default: warn)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Location of image files. Only changes the links in the Markdown text
    #[arg(long, value_name = "DIR")]
    pub photo_dir: Option<String>,

    /// Location of media files. Only changes the links in the Markdown text
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<String>,

    /// Location of sticker files used by custom emoji
    #[arg(long, value_name = "DIR")]
    pub stickers_dir: Option<String>,

    /// Turn links to posts of the same private channel into #id anchors
    #[arg(long)]
    pub anchor_channel_links: bool,
}

impl Args {
    /// Builds the conversion settings from the parsed arguments.
    pub fn convert_config(&self) -> ConvertConfig {
        let mut config = ConvertConfig::new()
            .with_out_dir(self.out_dir.clone())
            .with_anchor_channel_links(self.anchor_channel_links);
        if let Some(dir) = &self.photo_dir {
            config = config.with_photo_dir(dir.clone());
        }
        if let Some(dir) = &self.media_dir {
            config = config.with_media_dir(dir.clone());
        }
        if let Some(dir) = &self.stickers_dir {
            config = config.with_stickers_dir(dir.clone());
        }
        config
    }
}

/// Logging verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Returns the `tracing` filter directive for this level.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter())
    }
}
