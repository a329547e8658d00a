//! Raw comment parts → markdown text, tags and inline link references.

use crate::manifest::{RawComment, RawCommentPart};
use crate::model::{DocBlockTag, DocComment, DocReference};
use crate::render::reference_from_target;

const LINK_TAGS: &[&str] = &["@link", "@linkcode", "@linkplain"];

/// Convert a raw comment, collecting `{@link}` targets as unresolved references.
pub fn convert(package: &str, raw: &RawComment) -> DocComment {
    let mut links = Vec::new();
    let summary = join_parts(package, &raw.summary, &mut links);

    let block_tags = raw
        .block_tags
        .iter()
        .map(|tag| DocBlockTag {
            tag: tag.tag.clone(),
            text: join_parts(package, &tag.content, &mut links).trim().to_string(),
        })
        .collect();

    DocComment {
        summary: summary.trim().to_string(),
        block_tags,
        modifier_tags: raw.modifier_tags.clone(),
        links,
    }
}

/// Plain text of a part list, without collecting links.
pub fn plain_text(parts: &[RawCommentPart]) -> String {
    parts.iter().map(part_text).collect::<String>().trim().to_string()
}

fn join_parts(package: &str, parts: &[RawCommentPart], links: &mut Vec<DocReference>) -> String {
    let mut text = String::new();
    for part in parts {
        if let RawCommentPart::InlineTag { tag, text: label, target } = part
            && LINK_TAGS.contains(&tag.as_str())
        {
            links.push(reference_from_target(package, label.trim(), target.as_ref(), None));
        }
        text.push_str(part_text(part));
    }
    text
}

fn part_text(part: &RawCommentPart) -> &str {
    match part {
        RawCommentPart::Text { text }
        | RawCommentPart::Code { text }
        | RawCommentPart::InlineTag { text, .. }
        | RawCommentPart::RelativeLink { text } => text,
    }
}
