//! Splitting a subordinate character (minion) out of a converted statblock.
//!
//! A minion lives at `document/public/character/minions/character`. The
//! split document is a copy of the primary one with the minion moved into
//! `document/public/character`, so it reads like any other character.

use crate::config::ATTRIBUTE_PREFIX;
use crate::document::Document;
use crate::error::{ExtractorError, Result};

/// Path from the document root to the primary character.
pub const CHARACTER_PATH: [&str; 3] = ["document", "public", "character"];

/// Path from the document root to the primary character's minion container.
pub const MINIONS_PATH: [&str; 4] = ["document", "public", "character", "minions"];

/// Path from the document root to a minion character.
pub const MINION_PATH: [&str; 5] = ["document", "public", "character", "minions", "character"];

/// A minion split out of a primary statblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minion {
    /// Value of the minion's `name` attribute.
    pub name: String,
    /// Standalone document with the minion in the primary character slot.
    pub document: Document,
}

/// Extract the minion from `primary`, if it has one.
///
/// `primary` is not modified.
///
/// # Returns
/// * `Ok(None)` when any step of the minion path is missing or is a scalar
/// * `Ok(Some(minion))` for a single minion object
///
/// # Errors
/// * `ExtractorError::MultipleMinions` when several minion siblings exist,
///   within one `minions` element or spread over repeated ones
/// * `ExtractorError::MissingField` when the minion has no name attribute
///
/// # Examples
/// ```
/// use statblock_extractor::{minion::split_minion, xml::transform_str};
///
/// let primary = transform_str(
///     r#"<document><public><character name="Bob">
///          <minions><character name="Fido"/></minions>
///        </character></public></document>"#,
/// ).unwrap();
///
/// let minion = split_minion(&primary).unwrap().unwrap();
/// assert_eq!(minion.name, "Fido");
/// ```
pub fn split_minion(primary: &Document) -> Result<Option<Minion>> {
    let character = match minion_characters(primary).as_slice() {
        [] => return Ok(None),
        [single] => *single,
        many => return Err(ExtractorError::MultipleMinions { count: many.len() }),
    };

    let name_key = format!("{ATTRIBUTE_PREFIX}name");
    let name = character
        .get(&name_key)
        .and_then(Document::as_str)
        .ok_or_else(|| ExtractorError::MissingField {
            field: name_key.clone(),
            context: MINION_PATH.join("/"),
        })?
        .to_string();

    let mut document = primary.clone();
    if !document.set_path(&CHARACTER_PATH, character.clone()) {
        // minion_characters already walked every parent of CHARACTER_PATH
        return Ok(None);
    }

    tracing::debug!(minion = %name, "split minion from primary character");

    Ok(Some(Minion { name, document }))
}

/// Collect minion-shaped values under every `minions` element.
///
/// Repeated `minions` elements are searched as well. Scalar placeholders
/// count only when they sit among siblings.
fn minion_characters(primary: &Document) -> Vec<&Document> {
    let containers = match primary.get_path(&MINIONS_PATH) {
        Some(Document::Sequence(items)) => items.as_slice(),
        Some(single) => std::slice::from_ref(single),
        None => return Vec::new(),
    };

    let mut characters = Vec::new();
    for container in containers {
        match container.get(MINION_PATH[4]) {
            Some(character @ Document::Object(_)) => characters.push(character),
            Some(Document::Sequence(items)) => characters.extend(items),
            Some(Document::Scalar(_)) | None => {}
        }
    }
    characters
}
