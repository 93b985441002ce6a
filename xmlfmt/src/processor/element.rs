//! Element rendering
//!
//! Renders one element node: opening tag, namespace declarations,
//! attributes, children (recursing through the resolver), closing tag. Owns
//! the whitespace-preservation policy for the element's subtree.

use std::collections::HashMap;

use xot::{NameId, NamespaceId, Node, Xot};

use crate::format_result::FormatResult;

use super::{NodeKind, Processor, ProcessorResolver};

/// Namespace URI bound to the reserved `xml` prefix
const XML_NAMESPACE_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// Decides whether an element's subtree preserves whitespace
///
/// Receives the document model, the element node, the element's attributes
/// keyed by fully-qualified name, and the flag inherited from the enclosing
/// scope. Must be pure; the result is threaded into every child.
pub type PreserveSpaceFn =
    Box<dyn Fn(&Xot, Node, &HashMap<String, String>, bool) -> bool + Send + Sync>;

/// Options for the element processor
pub struct ElementProcessorOptions {
    /// Attribute that switches whitespace preservation for a subtree
    pub preserve_space_attribute: String,
    /// Custom preserve-space decision, replacing the attribute check
    pub preserve_space_fn: Option<PreserveSpaceFn>,
}

impl Default for ElementProcessorOptions {
    fn default() -> Self {
        ElementProcessorOptions {
            preserve_space_attribute: "xml:space".to_string(),
            preserve_space_fn: None,
        }
    }
}

/// Renders element nodes and drives their children through the resolver
pub struct ElementProcessor {
    options: ElementProcessorOptions,
}

impl ElementProcessor {
    /// Create an element processor with the given options
    pub fn new(options: ElementProcessorOptions) -> Self {
        ElementProcessor { options }
    }

    /// Render the namespace declarations recorded on the element
    fn process_namespaces(&self, xot: &Xot, node: Node, result: &mut FormatResult) {
        for (prefix_id, namespace_id) in xot.namespaces(node).iter() {
            let prefix = xot.prefix_str(prefix_id);
            let uri = xot.namespace_str(*namespace_id);
            if prefix.is_empty() {
                result.append(&format!(" xmlns=\"{}\"", uri));
            } else {
                result.append(&format!(" xmlns:{}=\"{}\"", prefix, uri));
            }
        }
    }

    /// Render the element's attributes and build the lookup by full name
    fn process_attributes(
        &self,
        xot: &Xot,
        node: Node,
        result: &mut FormatResult,
    ) -> HashMap<String, String> {
        let mut lookup = HashMap::new();
        for (name_id, value) in xot.attributes(node).iter() {
            result.append(" ");
            let full_name = self.process_attribute(xot, node, name_id, value, result);
            lookup.insert(full_name, value.to_string());
        }

        lookup
    }

    /// Render a single attribute and return its fully-qualified name
    fn process_attribute(
        &self,
        xot: &Xot,
        node: Node,
        name_id: NameId,
        value: &str,
        result: &mut FormatResult,
    ) -> String {
        let name = qualified_name(xot, node, name_id);
        result.append(&format!("{}=\"{}\"", name, escape_attribute_value(value)));
        name
    }

    /// Effective preserve-space flag for the element's subtree
    fn check_preserve_space(
        &self,
        xot: &Xot,
        node: Node,
        attributes: &HashMap<String, String>,
        preserve_space: bool,
    ) -> bool {
        if let Some(preserve_space_fn) = &self.options.preserve_space_fn {
            return preserve_space_fn(xot, node, attributes, preserve_space);
        }

        self.check_preserve_space_default(attributes, preserve_space)
    }

    /// Default policy: the reserved attribute decides, otherwise inherit
    fn check_preserve_space_default(
        &self,
        attributes: &HashMap<String, String>,
        preserve_space: bool,
    ) -> bool {
        match attributes.get(&self.options.preserve_space_attribute) {
            Some(value) => value == "preserve",
            None => preserve_space,
        }
    }
}

impl Default for ElementProcessor {
    fn default() -> Self {
        Self::new(ElementProcessorOptions::default())
    }
}

impl Processor for ElementProcessor {
    fn process(
        &self,
        xot: &Xot,
        node: Node,
        resolver: &ProcessorResolver,
        result: &mut FormatResult,
        preserve_space: bool,
        last_kind: Option<NodeKind>,
    ) {
        // only handle elements
        let element = match xot.element(node) {
            Some(element) => element,
            None => return,
        };

        // no break when preserving, and none right after a text sibling so
        // inline mixed content keeps its shape
        if !preserve_space && last_kind != Some(NodeKind::Text) {
            result.line_break();
        }

        let name = qualified_name(xot, node, element.name());
        result.append(&format!("<{}", name));

        self.process_namespaces(xot, node, result);
        let attributes = self.process_attributes(xot, node, result);

        if xot.first_child(node).is_none() {
            result.append("/>");
            return;
        }

        result.append(">");
        result.indent();

        let node_preserve_space =
            self.check_preserve_space(xot, node, &attributes, preserve_space);

        let mut last = None;
        for child in xot.children(node) {
            last = resolver.process(xot, child, result, node_preserve_space, last);
        }

        result.outdent();
        if !node_preserve_space && last != Some(NodeKind::Text) {
            result.line_break();
        }
        result.append(&format!("</{}>", name));
    }
}

/// Qualified name for an element or attribute name in the scope of `node`
///
/// Names without a namespace, and namespaces for which no prefix is in
/// scope, render as the bare local name.
fn qualified_name(xot: &Xot, node: Node, name_id: NameId) -> String {
    let local = xot.local_name_str(name_id);
    let namespace_id = xot.namespace_for_name(name_id);
    if namespace_id == xot.no_namespace() {
        return local.to_string();
    }

    match prefix_for_namespace(xot, node, namespace_id) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}

/// Find the prefix bound to a namespace in the scope of `node`
///
/// Walks the element and its ancestors for a declaration. The `xml` prefix
/// is implicitly declared on every document and never appears in the tree.
fn prefix_for_namespace(xot: &Xot, node: Node, namespace_id: NamespaceId) -> Option<String> {
    if xot.namespace_str(namespace_id) == XML_NAMESPACE_URI {
        return Some("xml".to_string());
    }

    let mut current = Some(node);
    while let Some(candidate) = current {
        if xot.element(candidate).is_some() {
            for (prefix_id, candidate_namespace) in xot.namespaces(candidate).iter() {
                if *candidate_namespace == namespace_id {
                    return Some(xot.prefix_str(prefix_id).to_string());
                }
            }
        }
        current = xot.parent(candidate);
    }

    None
}

/// Escape XML special characters in an attribute value
///
/// The ampersand is replaced first so the entities introduced by the other
/// replacements are not escaped again.
fn escape_attribute_value(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
