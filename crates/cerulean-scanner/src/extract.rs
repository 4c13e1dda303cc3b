//! Name extraction from LinkedIn result titles.
//!
//! Profile results are titled `"<Full Name> - <headline> | LinkedIn"`. The
//! separator is matched with its surrounding spaces so that hyphenated
//! surnames (`"Smith-Jones"`) are not split.

use cerulean_core::{CleanName, RawTitle};

/// Separator between the name and the headline in a profile title.
pub const SEPARATOR: &str = " - ";

/// Extract the person name from a result title.
///
/// Returns `None` when the title has no separator; those are company pages,
/// posts and other noise, and are dropped without comment. Otherwise returns
/// the text before the first separator, trimmed. The result is not validated
/// further and may be empty (`" - headline"`).
#[must_use]
pub fn extract_name(title: &RawTitle) -> Option<CleanName> {
    let raw = title.as_str();
    let end = raw.find(SEPARATOR)?;
    Some(CleanName::new(raw[..end].trim()))
}
