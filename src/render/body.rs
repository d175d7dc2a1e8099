//! Post body rendering: attachments first, then text.

use crate::archive::{Post, PostText};
use crate::config::ConvertConfig;
use crate::error::{Result, TgmarkError};
use crate::report::Reporter;
use crate::span::{Span, TextPart};

use super::entity::render_span;

/// Renders the body of a post.
///
/// Order: photo embed, media embed, then the text. Spans are rendered one by
/// one in export order; spans that produce no output are left out.
pub fn render_body(post: &Post, config: &ConvertConfig, reporter: &dyn Reporter) -> Result<String> {
    let mut body = String::new();

    if let Some(photo) = &post.photo {
        body.push_str(&format!("![image]({})\n\n", config.photo_ref(photo)));
    }

    if post.media_type.is_some() {
        let file = post
            .file
            .as_deref()
            .ok_or_else(|| TgmarkError::missing_field(post.id, "file"))?;
        body.push_str(&format!("![[{}]]\n\n", config.media_ref(file)));
    }

    body.push_str(&render_text(post, config, reporter)?);
    Ok(body)
}

/// Renders the text of a post without attachments.
///
/// A plain-string `text` is returned verbatim.
pub fn render_text(post: &Post, config: &ConvertConfig, reporter: &dyn Reporter) -> Result<String> {
    match (&post.text, &post.text_entities) {
        (Some(PostText::Plain(text)), _) => Ok(text.clone()),
        (Some(PostText::Parts(parts)), _) => {
            let mut text = String::new();
            for part in parts {
                match part {
                    TextPart::Raw(raw) => text.push_str(raw),
                    TextPart::Span(span) => {
                        if let Some(rendered) = render_span(span, post.id, config, reporter)? {
                            text.push_str(&rendered);
                        }
                    }
                }
            }
            Ok(text)
        }
        (None, Some(entities)) => render_spans(entities, post.id, config, reporter),
        (None, None) => Ok(String::new()),
    }
}

fn render_spans(
    spans: &[Span],
    post_id: i64,
    config: &ConvertConfig,
    reporter: &dyn Reporter,
) -> Result<String> {
    let mut text = String::new();
    for span in spans {
        if let Some(rendered) = render_span(span, post_id, config, reporter)? {
            text.push_str(&rendered);
        }
    }
    Ok(text)
}
