//! Textual serialization of references.
//!
//! The format places a kind-specific separator before each segment:
//!
//! ```text
//! wiki:Space.Nested.Page            document
//! wiki:Space.Page@file.txt          attachment
//! wiki:Space.Page^XWiki\.Tag[0]     object
//! wiki:Space.Page^XWiki\.Tag[0].tag object property
//! ```
//!
//! Separator characters and the escape character inside names are prefixed with `\`, so
//! every serialized string splits back into exactly the segments it came from.

use crate::{EntityKind, EntityReference};

/// The escape character.
pub const ESCAPE: char = '\\';

/// Characters that separate segments and therefore need escaping inside names.
pub const SEPARATORS: [char; 4] = [':', '.', '@', '^'];

/// Escapes separator and escape characters in a single segment name.
pub fn escape_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch == ESCAPE || SEPARATORS.contains(&ch) {
            escaped.push(ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Serializes a reference, including its wiki.
pub fn serialize(reference: &EntityReference) -> String {
    write_segments(reference, true)
}

/// Serializes a reference relative to its wiki.
///
/// For a space chain this is the dotted space path, e.g. `Dev.Guide`.
pub fn serialize_local(reference: &EntityReference) -> String {
    write_segments(reference, false)
}

/// Writes the segments of `reference`, root first.
fn write_segments(reference: &EntityReference, include_wiki: bool) -> String {
    let mut out = String::new();
    let mut previous: Option<EntityKind> = None;

    for segment in reference.segments() {
        let kind = segment.kind();
        if kind == EntityKind::Wiki && !include_wiki {
            continue;
        }
        if let Some(previous) = previous {
            out.push(separator(kind, previous));
        }
        out.push_str(&escape_name(segment.name()));
        previous = Some(kind);
    }

    out
}

/// Returns the separator written between a `previous` segment and a `kind` segment.
fn separator(kind: EntityKind, previous: EntityKind) -> char {
    match (kind, previous) {
        (EntityKind::Space, EntityKind::Wiki) => ':',
        (EntityKind::Attachment, _) => '@',
        (EntityKind::Object, _) => '^',
        _ => '.',
    }
}
