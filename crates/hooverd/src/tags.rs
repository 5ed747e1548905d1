//! Tag extraction.
//!
//! Each request format carries tags differently; all of them come out as an
//! ordered list of `Tag`s. Repeats are kept. JSON tags keep their exact
//! order; header tags keep the order of first appearance (see `header_tags`).

use axum::http::HeaderMap;
use hooverd_tx::Tag;
use hooverd_types::constants::TAG_HEADER_PREFIX;

use crate::decode::{RequestFormat, ShorthandTag};
use crate::error::{HooverError, HooverResult};

/// Extract the ordered tag list of a decoded request.
pub fn extract_tags(request: &RequestFormat) -> HooverResult<Vec<Tag>> {
    match request {
        RequestFormat::JsonShorthand { tags, .. } => tags.iter().map(shorthand_tag).collect(),
        RequestFormat::JsonExplicit { tags, .. } => Ok(tags
            .iter()
            .map(|t| Tag::new(t.name.as_str(), t.value.as_str()))
            .collect()),
        RequestFormat::RawHeaders { headers, .. } => header_tags(headers),
    }
}

fn shorthand_tag(object: &ShorthandTag) -> HooverResult<Tag> {
    let mut entries = object.iter();
    let (name, value) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(HooverError::Decode(format!(
                "shorthand tag must have exactly one entry, got {}",
                object.len()
            )))
        }
    };
    let value = value
        .as_str()
        .ok_or_else(|| HooverError::Decode(format!("value of tag `{}` must be a string", name)))?;
    Ok(Tag::new(name.as_str(), value))
}

/// Tags from `x-tag-<name>` headers.
///
/// Header names arrive lower-cased from the transport, so tag names do too:
/// `x-tag-Content-Type` yields `content-type`, which is not the
/// `Content-Type` tag gateways serve data with. Send such tags through `/tx`.
///
/// Headers come out in the order their names first appeared. All values of
/// a repeated name are grouped at that position, so `a:1, b:2, a:3` yields
/// `a:1, a:3, b:2`; the transport does not keep the interleaving.
fn header_tags(headers: &HeaderMap) -> HooverResult<Vec<Tag>> {
    let mut tags = Vec::new();
    for (name, value) in headers.iter() {
        let Some(tag_name) = strip_prefix_ignore_case(name.as_str(), TAG_HEADER_PREFIX) else {
            continue;
        };
        let value = value.to_str().map_err(|_| {
            HooverError::Decode(format!("header `{}` is not valid UTF-8", name))
        })?;
        tags.push(Tag::new(tag_name, value));
    }
    Ok(tags)
}

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        name.get(prefix.len()..)
    } else {
        None
    }
}
