//! Telegram Desktop export (`result.json`) model and loader.
//!
//! The export has the following structure:
//! ```json
//! {
//!   "name": "Channel Name",
//!   "type": "public_channel",
//!   "id": 1234567890,
//!   "messages": [
//!     {
//!       "id": 12,
//!       "type": "message",
//!       "date": "2024-01-15T10:30:00",
//!       "from": "Channel Name",
//!       "from_id": "channel1234567890",
//!       "photo": "photos/photo_1@15-01-2024_10-30-00.jpg",
//!       "text": "Hello" | ["Hello ", {"type": "bold", "text": "world"}],
//!       "text_entities": [{"type": "plain", "text": "Hello "}, ...]
//!     }
//!   ]
//! }
//! ```
//!
//! Posts are kept as raw JSON inside [`Archive`] and decoded one by one with
//! [`Post::from_value`], so a single malformed record doesn't prevent the
//! rest of the archive from being converted.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TgmarkError};
use crate::span::{Span, TextPart};

/// Top-level export container.
#[derive(Debug, Clone, Deserialize)]
pub struct Archive {
    /// Id of the exporting account or channel
    pub id: i64,
    /// Chat name, if exported
    #[serde(default)]
    pub name: Option<String>,
    /// Chat type (`public_channel`, `personal_chat`, ...)
    #[serde(rename = "type", default)]
    pub chat_type: Option<String>,
    /// Post records in export order
    pub messages: Vec<Value>,
}

impl Archive {
    /// Returns the sender id Telegram assigns to the owner account.
    pub fn owner_tag(&self) -> String {
        owner_tag(self.id)
    }
}

/// Builds the `from_id` value of posts sent by the owner account.
pub fn owner_tag(owner_id: i64) -> String {
    format!("user{}", owner_id)
}

/// Reads and parses an export file.
pub fn load_archive(path: &Path) -> Result<Archive> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| TgmarkError::archive_parse(e, Some(path.to_path_buf())))
}

/// Parses an export from a string.
pub fn parse_archive(content: &str) -> Result<Archive> {
    serde_json::from_str(content).map_err(|e| TgmarkError::archive_parse(e, None))
}

/// Record type of a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum PostKind {
    /// Regular user content
    Message,
    /// Administrative event (pin, history clear, ...)
    Service,
    /// Anything else
    Other(String),
}

impl From<String> for PostKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "message" => PostKind::Message,
            "service" => PostKind::Service,
            _ => PostKind::Other(kind),
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostKind::Message => write!(f, "message"),
            PostKind::Service => write!(f, "service"),
            PostKind::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// The `text` field: a plain string or an array of parts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PostText {
    Plain(String),
    Parts(Vec<TextPart>),
}

/// A single exported post.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: i64,
    /// ISO-8601 timestamp, usually without offset
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: PostKind,
    #[serde(default)]
    pub text: Option<PostText>,
    #[serde(default)]
    pub text_entities: Option<Vec<Span>>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub from_id: Option<String>,
    #[serde(default)]
    pub forwarded_from: Option<String>,
    #[serde(default)]
    pub saved_from: Option<String>,
    /// Service action (`clear_history`, `pin_message`, ...)
    #[serde(default)]
    pub action: Option<String>,
}

impl Post {
    /// Decodes one record of the `messages` array.
    ///
    /// The error carries the record's `id` when it has one, `-1` otherwise.
    pub fn from_value(value: &Value) -> Result<Post> {
        Post::deserialize(value).map_err(|e| {
            let post_id = value.get("id").and_then(Value::as_i64).unwrap_or(-1);
            TgmarkError::invalid_post(post_id, e.to_string())
        })
    }

    /// Parses the `date` field.
    ///
    /// A missing `date` is reported here, not when the record is decoded.
    pub fn parsed_date(&self) -> Result<PostDate> {
        let date = self
            .date
            .as_deref()
            .ok_or_else(|| TgmarkError::missing_field(self.id, "date"))?;
        PostDate::parse(date).ok_or_else(|| TgmarkError::invalid_date(self.id, date))
    }

    /// Returns the spans hashtags are collected from: `text_entities` when
    /// exported, otherwise the entity objects of `text`.
    pub fn spans(&self) -> Vec<&Span> {
        if let Some(entities) = &self.text_entities {
            return entities.iter().collect();
        }
        match &self.text {
            Some(PostText::Parts(parts)) => parts
                .iter()
                .filter_map(|part| match part {
                    TextPart::Span(span) => Some(span),
                    TextPart::Raw(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns hashtag texts in order of appearance, duplicates kept.
    pub fn hashtags(&self) -> Vec<&str> {
        self.spans()
            .into_iter()
            .filter(|span| span.is_hashtag())
            .map(Span::text)
            .collect()
    }
}

/// A post timestamp, optionally carrying a UTC offset.
///
/// Displays as `YYYY-MM-DD HH:MM:SS[.ffffff][+HH:MM]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostDate {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl PostDate {
    /// Parses an ISO-8601 timestamp with or without offset.
    pub fn parse(input: &str) -> Option<PostDate> {
        if let Ok(local) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(PostDate {
                local,
                offset: None,
            });
        }
        DateTime::parse_from_rfc3339(input)
            .ok()
            .map(|dt| PostDate {
                local: dt.naive_local(),
                offset: Some(*dt.offset()),
            })
    }

    /// Calendar date portion.
    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%d %H:%M:%S"))?;
        if self.local.nanosecond() != 0 {
            write!(f, ".{:06}", self.local.nanosecond() / 1_000)?;
        }
        if let Some(offset) = self.offset {
            write!(f, "{}", offset)?;
        }
        Ok(())
    }
}
