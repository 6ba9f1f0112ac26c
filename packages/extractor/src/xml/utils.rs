//! XML utility functions for navigating roxmltree DOM trees.

use roxmltree::{Attribute, Node};

/// Get the tag name as written in the source, namespace prefix included.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use statblock_extractor::xml::get_tag_name;
///
/// let xml = r#"<document xmlns:hl="urn:herolab"><hl:public/></document>"#;
/// let doc = Document::parse(xml).unwrap();
/// let public = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "document");
/// assert_eq!(get_tag_name(public), "hl:public");
/// ```
pub fn get_tag_name(node: Node<'_, '_>) -> String {
    let name = node.tag_name();
    qualified_name(node, name.namespace(), name.name())
}

/// Get an attribute name of `node` as written in the source, namespace
/// prefix included.
pub fn get_attribute_name(node: Node<'_, '_>, attr: &Attribute<'_, '_>) -> String {
    qualified_name(node, attr.namespace(), attr.name())
}

/// Join the prefix bound to `namespace` in scope at `node` with `local`.
fn qualified_name(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

/// Get all element children of a node.
///
/// Text nodes, comments and processing instructions are skipped.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Concatenate the direct text children of a node, trimmed.
///
/// Unlike `Node::text`, this also picks up text split by comments or
/// CDATA sections. Text inside child elements is not included.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use statblock_extractor::xml::direct_text;
///
/// let doc = Document::parse("<hp> 12 <!-- base --> </hp>").unwrap();
/// assert_eq!(direct_text(doc.root_element()), "12");
/// ```
pub fn direct_text(node: Node<'_, '_>) -> String {
    let text: String = node
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect();
    text.trim().to_string()
}
