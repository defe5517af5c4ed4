//! Media-type selection.
//!
//! Swagger 2.0 carries one schema per request or response, OpenAPI 3.x one per media
//! type. When several are declared the representative one is chosen by priority:
//! `application/json`, then any other `application/*` type, then the first entry. Ties keep
//! document order.

use indexmap::{IndexMap, IndexSet};
use mime::Mime;

use super::Warnings;

pub(crate) const APPLICATION_JSON: &str = "application/json";
pub(crate) const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub(crate) const MULTIPART_FORM_DATA: &str = "multipart/form-data";

fn priority(media_type: &str) -> u8 {
    match media_type.parse::<Mime>() {
        Ok(mime) if mime.essence_str() == mime::APPLICATION_JSON.essence_str() => 0,
        Ok(mime) if mime.type_() == mime::APPLICATION => 1,
        _ => 2,
    }
}

/// Returns the representative entry of a content map.
pub(crate) fn select<V>(content: &IndexMap<String, V>) -> Option<(&str, &V)> {
    content
        .iter()
        .min_by_key(|(media_type, _)| priority(media_type))
        .map(|(media_type, value)| (media_type.as_str(), value))
}

/// Same as [`select`], recording a warning when other entries are dropped.
pub(crate) fn select_reporting<'a, V>(
    content: &'a IndexMap<String, V>,
    what: &str,
    warnings: &mut Warnings,
) -> Option<(&'a str, &'a V)> {
    let selected = select(content)?;
    if content.len() > 1 {
        warnings.push(format!(
            "{what} has {} content types: only '{}' is converted",
            content.len(),
            selected.0
        ));
    }
    Some(selected)
}

/// Compares media types without their parameters.
pub(crate) fn has_essence(media_type: &str, essence: &str) -> bool {
    media_type
        .parse::<Mime>()
        .is_ok_and(|mime| mime.essence_str() == essence)
}

/// Returns `true` for `application/x-www-form-urlencoded` and `multipart/form-data`.
pub(crate) fn is_form(media_type: &str) -> bool {
    has_essence(media_type, FORM_URLENCODED) || has_essence(media_type, MULTIPART_FORM_DATA)
}

/// Collects media types in first-seen order without duplicates.
pub(crate) fn union<'a>(media_types: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    media_types
        .into_iter()
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Media types to expand a legacy body or response into.
///
/// Falls back from the operation list to the document list, then to `application/json`.
pub(crate) fn effective<'a>(operation: &'a [String], document: &'a [String]) -> Vec<&'a str> {
    let chosen = if operation.is_empty() { document } else { operation };
    if chosen.is_empty() {
        vec![APPLICATION_JSON]
    } else {
        chosen.iter().map(String::as_str).collect()
    }
}
