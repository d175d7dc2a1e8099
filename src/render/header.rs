//! YAML front matter for a rendered post.

use crate::archive::{Post, owner_tag};
use crate::error::Result;

/// Renders the front-matter block of a post.
///
/// ```text
/// ---
/// title: 12
/// date: 2024-01-15 10:30:00
/// tags: #rust #news
/// from: 'Alice' (user1)
/// forwarded\_from: 'Some Channel'
/// layout: post
/// ---
/// ```
///
/// `tags` only appears when the post has hashtags, `from` only when the
/// sender isn't the owner account, and the provenance fields only when
/// exported.
pub fn render_header(post: &Post, owner_id: i64) -> Result<String> {
    let date = post.parsed_date()?;

    let mut header = format!("---\ntitle: {}\ndate: {}\n", post.id, date);

    let tags = post.hashtags();
    if !tags.is_empty() {
        header.push_str(&format!("tags: {}\n", tags.join(" ")));
    }

    if let Some(from_id) = &post.from_id {
        if *from_id != owner_tag(owner_id) {
            // deleted accounts are exported with `"from": null`
            let name = post.from.as_deref().unwrap_or_default();
            header.push_str(&format!("from: '{}' ({})\n", name, from_id));
        }
    }

    if let Some(forwarded_from) = &post.forwarded_from {
        header.push_str(&format!("forwarded\\_from: '{}'\n", forwarded_from));
    }

    if let Some(saved_from) = &post.saved_from {
        header.push_str(&format!("saved\\_from: '{}'\n", saved_from));
    }

    header.push_str("layout: post\n---\n");
    Ok(header)
}
