//! Structural equivalence of two subsystem documents
//!
//! Two documents are equivalent when their canonical forms are equal. The
//! canonical form drops namespace declarations and prefixes, trims text,
//! treats attributes as an unordered set and stably sorts children by name,
//! so siblings of different names may be reordered but same-named siblings
//! keep their relative order.

use crate::errors::Result;
use crate::markup::{self, Node};

#[derive(Debug, PartialEq, Eq)]
struct CanonicalElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<CanonicalElement>,
}

impl CanonicalElement {
    fn from_node(node: &Node) -> Self {
        let mut attributes: Vec<(String, String)> = node
            .attributes
            .iter()
            .map(|a| (a.name.clone(), a.value.clone()))
            .collect();
        attributes.sort();

        let mut children: Vec<CanonicalElement> =
            node.children.iter().map(CanonicalElement::from_node).collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            name: node.name.clone(),
            attributes,
            text: node.text.clone(),
            children,
        }
    }
}

/// Compare two documents, describing the first difference found
///
/// Returns `Ok(None)` when the documents are equivalent.
///
/// # Errors
///
/// Returns a `MalformedStructure` error if either document is not
/// well-formed markup.
///
/// # Example
///
/// ```
/// use foxconf_core::compare_documents;
///
/// let diff = compare_documents(
///     "<a x=\"1\" y=\"2\"><b/><c/></a>",
///     "<a y=\"2\" x=\"1\">\n  <c/>\n  <b/>\n</a>",
/// )
/// .unwrap();
/// assert_eq!(diff, None);
/// ```
pub fn compare_documents(expected: &str, actual: &str) -> Result<Option<String>> {
    let expected = CanonicalElement::from_node(&markup::read_document(expected)?);
    let actual = CanonicalElement::from_node(&markup::read_document(actual)?);
    Ok(first_difference(&expected, &actual, ""))
}

/// Whether two documents are structurally equivalent
///
/// # Errors
///
/// As [`compare_documents`].
pub fn documents_equivalent(expected: &str, actual: &str) -> Result<bool> {
    Ok(compare_documents(expected, actual)?.is_none())
}

fn first_difference(
    expected: &CanonicalElement,
    actual: &CanonicalElement,
    parent_path: &str,
) -> Option<String> {
    let path = format!("{parent_path}/{}", expected.name);

    if expected.name != actual.name {
        return Some(format!(
            "{parent_path}/: expected element '{}', found '{}'",
            expected.name, actual.name
        ));
    }
    if expected.attributes != actual.attributes {
        return Some(format!(
            "{path}: expected attributes {}, found {}",
            render_attributes(&expected.attributes),
            render_attributes(&actual.attributes)
        ));
    }
    if expected.text != actual.text {
        return Some(format!(
            "{path}: expected text '{}', found '{}'",
            expected.text, actual.text
        ));
    }
    if expected.children.len() != actual.children.len() {
        return Some(format!(
            "{path}: expected children [{}], found [{}]",
            child_names(&expected.children),
            child_names(&actual.children)
        ));
    }
    expected
        .children
        .iter()
        .zip(&actual.children)
        .find_map(|(e, a)| first_difference(e, a, &path))
}

fn render_attributes(attributes: &[(String, String)]) -> String {
    let rendered = attributes
        .iter()
        .map(|(name, value)| format!("{name}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{rendered}}}")
}

fn child_names(children: &[CanonicalElement]) -> String {
    children
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
