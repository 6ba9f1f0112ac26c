//! Conversion of statblock XML into a [`Document`].
//!
//! The rules are schema-agnostic:
//! - attributes become `_`-prefixed entries, in source order
//! - child elements are grouped by tag name in first-occurrence order; a
//!   group of one is stored directly, larger groups become a sequence
//! - an element with neither attributes nor children becomes its trimmed
//!   text, or the empty string
//! - text next to attributes or children is dropped
//! - names keep their namespace prefix as written (`xml:lang`, `hl:x`)
//!
//! The returned document always has a single key, the root tag name.

use indexmap::IndexMap;
use roxmltree::{Node, ParsingOptions};

use super::utils::{direct_text, element_children, get_attribute_name, get_tag_name};
use crate::config::ATTRIBUTE_PREFIX;
use crate::document::{Document, Object};
use crate::error::{ExtractorError, Result};

/// Convert XML bytes into a document.
///
/// Input must be UTF-8; a leading byte order mark is ignored.
///
/// # Errors
/// `ExtractorError::MalformedInput` when the bytes are not UTF-8 or not
/// well-formed XML.
///
/// # Examples
/// ```
/// use statblock_extractor::xml::transform;
///
/// let doc = transform(br#"<character name="Bob"><race>Human</race></character>"#).unwrap();
/// let character = doc.get("character").unwrap();
/// assert_eq!(character.get("_name").and_then(|v| v.as_str()), Some("Bob"));
/// assert_eq!(character.get("race").and_then(|v| v.as_str()), Some("Human"));
/// ```
pub fn transform(xml: &[u8]) -> Result<Document> {
    let text = std::str::from_utf8(xml)
        .map_err(|e| ExtractorError::MalformedInput(format!("input is not valid UTF-8: {e}")))?;
    transform_str(text)
}

/// Convert an XML string into a document.
pub fn transform_str(xml: &str) -> Result<Document> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options)?;
    let root = doc.root_element();

    let root_name = get_tag_name(root);
    tracing::trace!(root = %root_name, "converting XML document");

    let mut wrapper = Object::new();
    wrapper.insert(root_name, convert_element(root));
    Ok(Document::Object(wrapper))
}

/// Convert a single element and its subtree.
fn convert_element(node: Node<'_, '_>) -> Document {
    let mut object = Object::new();

    for attr in node.attributes() {
        object.insert(
            format!("{ATTRIBUTE_PREFIX}{}", get_attribute_name(node, &attr)),
            Document::Scalar(attr.value().to_string()),
        );
    }

    let mut groups: IndexMap<String, Vec<Document>> = IndexMap::new();
    for child in element_children(node) {
        groups
            .entry(get_tag_name(child))
            .or_default()
            .push(convert_element(child));
    }

    if object.is_empty() && groups.is_empty() {
        return Document::Scalar(direct_text(node));
    }

    for (tag, mut items) in groups {
        // A tag spelled like a prefixed attribute shares its key; both values
        // are kept, attribute first.
        if let Some(attribute) = object.get_mut(&tag) {
            items.insert(0, std::mem::replace(attribute, Document::empty()));
            *attribute = Document::Sequence(items);
            continue;
        }

        let value = match <[Document; 1]>::try_from(items) {
            Ok([single]) => single,
            Err(items) => Document::Sequence(items),
        };
        object.insert(tag, value);
    }

    Document::Object(object)
}
