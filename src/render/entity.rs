//! Per-span Markdown rendering.
//!
//! [`render_span`] looks at one [`Span`] and nothing else. It returns
//! `Ok(Some(markup))` for spans that produce output, `Ok(None)` for spans
//! that intentionally produce none (hashtags, unknown kinds), and `Err` when
//! a span lacks a field its kind requires.

use tracing::debug;

use crate::config::ConvertConfig;
use crate::error::{Result, TgmarkError};
use crate::report::{Reporter, Warning};
use crate::span::Span;

/// Link texts Telegram uses for "invisible" links that carry a preview image.
const ZERO_WIDTH_TEXTS: [&str; 3] = ["\u{200b}", "\u{200b}\u{200b}", "\u{a0}"];

/// Links to posts of private channels; rewritten into local anchors when enabled.
const CHANNEL_LINK_PREFIX: &str = "https://t.me/c/";

const PROFILE_URL: &str = "https://t.me/";

/// Undoes the export's string escaping.
///
/// Exactly five sequences are replaced, in this order: `\n`, `\r`, `\t`,
/// `\"` and `\\`. Telegram Desktop's serializer knows a few more (`\b`,
/// `\f` and `\uXXXX`), which are left as is.
pub fn de_escape(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

/// Backslash-escapes space, `\`, `/`, `(` and `)` in a sticker reference.
pub fn escape_reference(reference: &str) -> String {
    let mut escaped = String::with_capacity(reference.len());
    for c in reference.chars() {
        if matches!(c, ' ' | '\\' | '/' | '(' | ')') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders one span into Markdown.
pub fn render_span(
    span: &Span,
    post_id: i64,
    config: &ConvertConfig,
    reporter: &dyn Reporter,
) -> Result<Option<String>> {
    debug!(post_id, kind = span.kind(), "rendering text object");

    let text = de_escape(span.text());

    let rendered = match span {
        Span::Plain(_) | Span::Phone(_) | Span::BankCard(_) => text,
        Span::Bold(_) => wrap(&text, "**", "**"),
        Span::Italic(_) => wrap(&text, "*", "*"),
        Span::Underline(_) => wrap(&text, "<u>", "</u>"),
        Span::Strikethrough(_) => wrap(&text, "<s>", "</s>"),
        Span::Code(_) => wrap(&text, "`", "`"),
        Span::Pre { language, .. } => {
            format!("```{}\n{}\n```", language.as_deref().unwrap_or(""), text.trim())
        }
        Span::TextLink { href, .. } => {
            let href = href
                .as_deref()
                .ok_or_else(|| TgmarkError::missing_field(post_id, "href"))?;
            text_link(&text, href, config)
        }
        Span::Link(_) => {
            let link = text.trim();
            if link.starts_with("https://") {
                format!("<{}>", link)
            } else {
                format!("<https://{}>", link)
            }
        }
        Span::Email(_) => format!("<{}>", text.trim()),
        Span::Mention(_) => {
            let handle = text.trim();
            let handle = handle.strip_prefix('@').unwrap_or(handle);
            format!("<{}{}>", PROFILE_URL, handle)
        }
        Span::Hashtag(_) => return Ok(None),
        Span::Blockquote(_) => format!("> {}", text),
        Span::Spoiler(_) => format!("> [!info]\n> {}\n", text),
        Span::CustomEmoji { document_id, .. } => {
            let document_id = document_id
                .as_deref()
                .ok_or_else(|| TgmarkError::missing_field(post_id, "document_id"))?;
            let source = escape_reference(&config.sticker_ref(document_id));
            format!("![{}]({})\n\n", text, source)
        }
        // Users without a public handle have no profile URL to link to.
        Span::MentionName { .. } | Span::Unknown { .. } => {
            reporter.warn(Warning::UnknownSpan {
                post_id,
                kind: span.kind().to_string(),
            });
            return Ok(None);
        }
    };

    Ok(Some(rendered))
}

/// Wraps trimmed text in markers, keeping the line breaks that trimming ate.
fn wrap(text: &str, open: &str, close: &str) -> String {
    let mut out = format!("{}{}{}", open, text.trim(), close);
    if text.ends_with('\n') {
        let empty_lines = text.split('\n').filter(|line| line.is_empty()).count();
        out.push_str(&"\n".repeat(empty_lines));
    }
    out
}

fn text_link(text: &str, href: &str, config: &ConvertConfig) -> String {
    if ZERO_WIDTH_TEXTS.contains(&text) {
        debug!(href, "zero-width link text, rendering as inline image");
        return format!("> ![]({})\n\n", href);
    }

    let mut out = if config.anchor_channel_links && href.starts_with(CHANNEL_LINK_PREFIX) {
        let anchor = href.rsplit('/').next().unwrap_or(href);
        format!("[{}](#{})", text, anchor)
    } else {
        format!("[{}]({})", text, href)
    };

    if text.contains('\n') && text.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CollectingReporter;

    fn render(span: Span) -> Option<String> {
        let reporter = CollectingReporter::new();
        let out = render_span(&span, 1, &ConvertConfig::new(), &reporter).unwrap();
        assert!(reporter.is_empty());
        out
    }

    #[test]
    fn test_de_escape() {
        assert_eq!(de_escape(r"a\nb"), "a\nb");
        assert_eq!(de_escape(r"tab\there"), "tab\there");
        assert_eq!(de_escape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(de_escape(r"back\\slash"), "back\\slash");
        assert_eq!(de_escape(r"cr\r"), "cr\r");
    }

    #[test]
    fn test_de_escape_leaves_other_sequences() {
        assert_eq!(de_escape(r"\b\fA"), r"\b\fA");
    }

    #[test]
    fn test_escape_reference() {
        assert_eq!(
            escape_reference("stickers/sticker (1).webp"),
            r"stickers\/sticker\ \(1\).webp"
        );
        assert_eq!(escape_reference(r"a\b"), r"a\\b");
        assert_eq!(escape_reference("plain.webp"), "plain.webp");
    }

    #[test]
    fn test_plain_passthrough() {
        assert_eq!(render(Span::Plain("  as is  ".into())).unwrap(), "  as is  ");
        assert_eq!(render(Span::Phone("+1 555 0100".into())).unwrap(), "+1 555 0100");
        assert_eq!(render(Span::BankCard("4111 1111".into())).unwrap(), "4111 1111");
    }

    #[test]
    fn test_bold_trims() {
        assert_eq!(render(Span::Bold(" hi ".into())).unwrap(), "**hi**");
    }

    #[test]
    fn test_bold_keeps_trailing_newline() {
        assert_eq!(render(Span::Bold("Title\n".into())).unwrap(), "**Title**\n");
        assert_eq!(render(Span::Bold("Title\n\n".into())).unwrap(), "**Title**\n\n");
    }

    #[test]
    fn test_inline_wrappers() {
        assert_eq!(render(Span::Italic("it".into())).unwrap(), "*it*");
        assert_eq!(render(Span::Underline("u".into())).unwrap(), "<u>u</u>");
        assert_eq!(render(Span::Strikethrough("s".into())).unwrap(), "<s>s</s>");
        assert_eq!(render(Span::Code(" x ".into())).unwrap(), "`x`");
    }

    #[test]
    fn test_pre() {
        let out = render(Span::Pre {
            text: "\nfn main() {}\n".into(),
            language: None,
        });
        assert_eq!(out.unwrap(), "```\nfn main() {}\n```");

        let out = render(Span::Pre {
            text: "let x = 1;".into(),
            language: Some("rust".into()),
        });
        assert_eq!(out.unwrap(), "```rust\nlet x = 1;\n```");
    }

    #[test]
    fn test_text_link() {
        let out = render(Span::TextLink {
            text: "click".into(),
            href: Some("https://example.com".into()),
        });
        assert_eq!(out.unwrap(), "[click](https://example.com)");
    }

    #[test]
    fn test_text_link_trailing_newline() {
        let out = render(Span::TextLink {
            text: "click\n".into(),
            href: Some("https://example.com".into()),
        });
        assert_eq!(out.unwrap(), "[click\n](https://example.com)\n");
    }

    #[test]
    fn test_zero_width_text_link_is_image() {
        for text in ["\u{200b}", "\u{200b}\u{200b}", "\u{a0}"] {
            let out = render(Span::TextLink {
                text: text.into(),
                href: Some("https://t.me/x/5".into()),
            });
            assert_eq!(out.unwrap(), "> ![](https://t.me/x/5)\n\n");
        }
    }

    #[test]
    fn test_text_link_missing_href() {
        let reporter = CollectingReporter::new();
        let span = Span::TextLink {
            text: "x".into(),
            href: None,
        };
        let err = render_span(&span, 77, &ConvertConfig::new(), &reporter).unwrap_err();
        assert!(matches!(
            err,
            TgmarkError::MissingField {
                post_id: 77,
                field: "href"
            }
        ));
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_channel_anchor_rewrite() {
        let reporter = CollectingReporter::new();
        let span = Span::TextLink {
            text: "earlier".into(),
            href: Some("https://t.me/c/123456/789".into()),
        };

        let out = render_span(&span, 1, &ConvertConfig::new(), &reporter).unwrap();
        assert_eq!(out.unwrap(), "[earlier](https://t.me/c/123456/789)");

        let config = ConvertConfig::new().with_anchor_channel_links(true);
        let out = render_span(&span, 1, &config, &reporter).unwrap();
        assert_eq!(out.unwrap(), "[earlier](#789)");
    }

    #[test]
    fn test_link_scheme_prepended() {
        assert_eq!(render(Span::Link("example.com".into())).unwrap(), "<https://example.com>");
        assert_eq!(
            render(Span::Link(" https://example.com ".into())).unwrap(),
            "<https://example.com>"
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(render(Span::Email("a@b.io".into())).unwrap(), "<a@b.io>");
    }

    #[test]
    fn test_mention() {
        assert_eq!(render(Span::Mention("@durov".into())).unwrap(), "<https://t.me/durov>");
    }

    #[test]
    fn test_hashtag_is_silent() {
        assert!(render(Span::Hashtag("#rust".into())).is_none());
    }

    #[test]
    fn test_blockquote_and_spoiler() {
        assert_eq!(render(Span::Blockquote("quote".into())).unwrap(), "> quote");
        assert_eq!(
            render(Span::Spoiler("secret".into())).unwrap(),
            "> [!info]\n> secret\n"
        );
    }

    #[test]
    fn test_custom_emoji() {
        let out = render(Span::CustomEmoji {
            text: "🔥".into(),
            document_id: Some("stickers/sticker (1).webp".into()),
        });
        assert_eq!(out.unwrap(), "![🔥](stickers\\/sticker\\ \\(1\\).webp)\n\n");
    }

    #[test]
    fn test_custom_emoji_with_stickers_dir() {
        let reporter = CollectingReporter::new();
        let config = ConvertConfig::new().with_stickers_dir("emoji");
        let span = Span::CustomEmoji {
            text: "👍".into(),
            document_id: Some("stickers/like.webp".into()),
        };
        let out = render_span(&span, 1, &config, &reporter).unwrap();
        assert_eq!(out.unwrap(), "![👍](emoji\\/like.webp)\n\n");
    }

    #[test]
    fn test_unknown_kind_warns_once() {
        let reporter = CollectingReporter::new();
        let span = Span::Unknown {
            kind: "cashtag".into(),
            text: "$USD".into(),
        };
        let out = render_span(&span, 9, &ConvertConfig::new(), &reporter).unwrap();
        assert!(out.is_none());
        assert_eq!(
            reporter.into_warnings(),
            vec![Warning::UnknownSpan {
                post_id: 9,
                kind: "cashtag".into()
            }]
        );
    }

    #[test]
    fn test_mention_name_treated_as_unknown() {
        let reporter = CollectingReporter::new();
        let span = Span::MentionName {
            text: "Bob".into(),
            user_id: Some(42),
        };
        let out = render_span(&span, 3, &ConvertConfig::new(), &reporter).unwrap();
        assert!(out.is_none());
        assert_eq!(
            reporter.into_warnings(),
            vec![Warning::UnknownSpan {
                post_id: 3,
                kind: "mention_name".into()
            }]
        );
    }

    #[test]
    fn test_escaped_newline_becomes_real() {
        assert_eq!(render(Span::Plain(r"one\ntwo".into())).unwrap(), "one\ntwo");
        assert_eq!(render(Span::Plain(r"a\\b".into())).unwrap(), "a\\b");
    }
}
