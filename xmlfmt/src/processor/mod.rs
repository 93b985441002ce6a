//! Node processors for the formatting engine
//!
//! Each node kind is rendered by a [`Processor`]. The [`ProcessorResolver`]
//! maps kinds to processors and is the single entry point every recursive
//! call goes through:
//!
//! ```text
//! Formatter → ProcessorResolver::process(node)
//!     → ElementProcessor (recursing through the resolver per child)
//!     → ContentProcessor / TextProcessor (leaves)
//! ```

mod content;
mod element;
mod text;

pub use content::ContentProcessor;
pub use element::{ElementProcessor, ElementProcessorOptions, PreserveSpaceFn};
pub use text::TextProcessor;

use std::collections::HashMap;

use xot::{Node, Value, Xot};

use crate::format_result::FormatResult;

/// Kind of a node in the document tree
///
/// Closed enumeration the processor registry is keyed on. The document model
/// folds CDATA sections into text at parse time and rejects document-type
/// declarations, so `Cdata` and `Doctype` only occur in trees built by hand
/// or by another producer; they stay registered so such trees still render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root node
    Document,
    /// Element node
    Element,
    /// Text run
    Text,
    /// CDATA section
    Cdata,
    /// Comment
    Comment,
    /// Processing instruction
    ProcessingInstruction,
    /// Document-type declaration
    Doctype,
}

impl NodeKind {
    /// Identify the kind of a node, if it is part of the enumeration
    ///
    /// Attribute and namespace nodes never appear in a child list and map to
    /// `None`.
    pub fn of(xot: &Xot, node: Node) -> Option<NodeKind> {
        match xot.value(node) {
            Value::Document => Some(NodeKind::Document),
            Value::Element(_) => Some(NodeKind::Element),
            Value::Text(_) => Some(NodeKind::Text),
            Value::Comment(_) => Some(NodeKind::Comment),
            Value::ProcessingInstruction(_) => Some(NodeKind::ProcessingInstruction),
            _ => None,
        }
    }
}

/// Renders one node into a [`FormatResult`]
///
/// `preserve_space` is the whitespace-preservation flag inherited from the
/// enclosing scope; `last_kind` is the kind of the sibling rendered
/// immediately before this node, if any. Both arrive as plain parameters so
/// no state leaks across unrelated subtrees.
pub trait Processor: Send + Sync {
    /// Render `node` into `result`
    fn process(
        &self,
        xot: &Xot,
        node: Node,
        resolver: &ProcessorResolver,
        result: &mut FormatResult,
        preserve_space: bool,
        last_kind: Option<NodeKind>,
    );
}

/// Registry mapping node kinds to their processors
///
/// Holds one processor per registered kind plus an optional fallback for
/// unregistered kinds. Built once, then only read; concurrent use is safe.
#[derive(Default)]
pub struct ProcessorResolver {
    processors: HashMap<NodeKind, Box<dyn Processor>>,
    fallback: Option<Box<dyn Processor>>,
}

impl ProcessorResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        ProcessorResolver {
            processors: HashMap::new(),
            fallback: None,
        }
    }

    /// Register a processor for a node kind
    pub fn add(&mut self, kind: NodeKind, processor: Box<dyn Processor>) {
        self.processors.insert(kind, processor);
    }

    /// Set the processor used for kinds without a registered one
    pub fn set_fallback(&mut self, processor: Box<dyn Processor>) {
        self.fallback = Some(processor);
    }

    /// Look up the processor registered for a kind
    pub fn resolve(&self, kind: NodeKind) -> Option<&dyn Processor> {
        self.processors.get(&kind).map(|processor| processor.as_ref())
    }

    /// Dispatch a node to its processor and return the kind that was handled
    ///
    /// Unregistered kinds fall back to the fallback processor; without one
    /// the node is silently skipped. The returned kind lets the caller track
    /// what was rendered last across a sibling sequence.
    pub fn process(
        &self,
        xot: &Xot,
        node: Node,
        result: &mut FormatResult,
        preserve_space: bool,
        last_kind: Option<NodeKind>,
    ) -> Option<NodeKind> {
        let kind = match NodeKind::of(xot, node) {
            Some(kind) => kind,
            None => return last_kind,
        };

        let processor = self.processors.get(&kind).or(self.fallback.as_ref());
        if let Some(processor) = processor {
            processor.process(xot, node, self, result, preserve_space, last_kind);
        }

        Some(kind)
    }
}

/// Literal textual form of a leaf node
///
/// Text renders with markup characters escaped, comments and processing
/// instructions with their delimiters restored. Kinds without a textual form
/// produce an empty string.
pub(crate) fn literal_form(xot: &Xot, node: Node) -> String {
    match xot.value(node) {
        Value::Text(text) => escape_text(text.get()),
        Value::Comment(comment) => format!("<!--{}-->", comment.get()),
        Value::ProcessingInstruction(pi) => {
            let target = xot.local_name_str(pi.target());
            match pi.data() {
                Some(data) => format!("<?{} {}?>", target, data),
                None => format!("<?{}?>", target),
            }
        }
        _ => String::new(),
    }
}

/// Escape XML markup characters in text content
///
/// The ampersand is replaced first so the entities introduced by the other
/// replacements are not escaped again.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
