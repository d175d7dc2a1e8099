//! Inline text annotations ("entities") of a Telegram post.
//!
//! Telegram Desktop exports rich text as an array of objects, each tagged
//! with a `type`:
//!
//! ```json
//! [
//!   "Read ",
//!   {"type": "bold", "text": "this"},
//!   {"type": "text_link", "text": "post", "href": "https://t.me/chan/5"}
//! ]
//! ```
//!
//! Every object deserializes into a [`Span`]. Kinds this crate doesn't know
//! land in [`Span::Unknown`] with the original tag preserved, so the
//! renderer can report them instead of failing the whole archive.

use serde::Deserialize;

/// One annotated fragment of a post's text.
///
/// Auxiliary fields that the export may omit (`href`, `document_id`) are
/// kept optional here; the renderer decides whether their absence is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSpan")]
pub enum Span {
    Plain(String),
    Bold(String),
    Italic(String),
    Underline(String),
    Strikethrough(String),
    /// Inline code.
    Code(String),
    /// Code block, with the language tag Telegram attaches when known.
    Pre {
        text: String,
        language: Option<String>,
    },
    /// Link with custom display text.
    TextLink {
        text: String,
        href: Option<String>,
    },
    /// Bare URL detected by Telegram.
    Link(String),
    Email(String),
    Phone(String),
    /// `@username` mention.
    Mention(String),
    /// Mention of a user without a public username.
    MentionName {
        text: String,
        user_id: Option<i64>,
    },
    Hashtag(String),
    Blockquote(String),
    Spoiler(String),
    /// Custom emoji; `document_id` points at the exported sticker file.
    CustomEmoji {
        text: String,
        document_id: Option<String>,
    },
    BankCard(String),
    /// Any kind not listed above.
    Unknown { kind: String, text: String },
}

impl Span {
    /// Returns the export's `type` tag for this span.
    pub fn kind(&self) -> &str {
        match self {
            Span::Plain(_) => "plain",
            Span::Bold(_) => "bold",
            Span::Italic(_) => "italic",
            Span::Underline(_) => "underline",
            Span::Strikethrough(_) => "strikethrough",
            Span::Code(_) => "code",
            Span::Pre { .. } => "pre",
            Span::TextLink { .. } => "text_link",
            Span::Link(_) => "link",
            Span::Email(_) => "email",
            Span::Phone(_) => "phone",
            Span::Mention(_) => "mention",
            Span::MentionName { .. } => "mention_name",
            Span::Hashtag(_) => "hashtag",
            Span::Blockquote(_) => "blockquote",
            Span::Spoiler(_) => "spoiler",
            Span::CustomEmoji { .. } => "custom_emoji",
            Span::BankCard(_) => "bank_card",
            Span::Unknown { kind, .. } => kind,
        }
    }

    /// Returns the raw text payload, as exported.
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(text)
            | Span::Bold(text)
            | Span::Italic(text)
            | Span::Underline(text)
            | Span::Strikethrough(text)
            | Span::Code(text)
            | Span::Link(text)
            | Span::Email(text)
            | Span::Phone(text)
            | Span::Mention(text)
            | Span::Hashtag(text)
            | Span::Blockquote(text)
            | Span::Spoiler(text)
            | Span::BankCard(text) => text,
            Span::Pre { text, .. }
            | Span::TextLink { text, .. }
            | Span::MentionName { text, .. }
            | Span::CustomEmoji { text, .. }
            | Span::Unknown { text, .. } => text,
        }
    }

    /// Returns `true` for hashtag spans.
    pub fn is_hashtag(&self) -> bool {
        matches!(self, Span::Hashtag(_))
    }
}

/// Wire shape of a text entity object.
#[derive(Debug, Deserialize)]
struct RawSpan {
    #[serde(rename = "type")]
    kind: String,
    text: String,
    href: Option<String>,
    document_id: Option<String>,
    user_id: Option<i64>,
    language: Option<String>,
}

impl From<RawSpan> for Span {
    fn from(raw: RawSpan) -> Self {
        let RawSpan {
            kind,
            text,
            href,
            document_id,
            user_id,
            language,
        } = raw;

        match kind.as_str() {
            "plain" => Span::Plain(text),
            "bold" => Span::Bold(text),
            "italic" => Span::Italic(text),
            "underline" => Span::Underline(text),
            "strikethrough" => Span::Strikethrough(text),
            "code" => Span::Code(text),
            "pre" => Span::Pre {
                text,
                language: language.filter(|l| !l.is_empty()),
            },
            "text_link" => Span::TextLink { text, href },
            "link" => Span::Link(text),
            "email" => Span::Email(text),
            "phone" => Span::Phone(text),
            "mention" => Span::Mention(text),
            "mention_name" => Span::MentionName { text, user_id },
            "hashtag" => Span::Hashtag(text),
            "blockquote" => Span::Blockquote(text),
            "spoiler" => Span::Spoiler(text),
            "custom_emoji" => Span::CustomEmoji { text, document_id },
            "bank_card" => Span::BankCard(text),
            _ => Span::Unknown { kind, text },
        }
    }
}

/// An element of a post's `text` array: a bare string or an entity object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TextPart {
    Raw(String),
    Span(Span),
}
