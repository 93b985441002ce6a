//! Top-level formatting driver
//!
//! Builds the processor registry once at construction and drives it across
//! a document's top-level sibling chain.

use tracing::debug;
use xot::{Node, Xot};

use crate::declaration::XmlDeclaration;
use crate::error::FormatError;
use crate::format_result::{FormatResult, FormatResultOptions};
use crate::processor::{
    ContentProcessor, ElementProcessor, ElementProcessorOptions, NodeKind, PreserveSpaceFn,
    ProcessorResolver, TextProcessor,
};

/// Options controlling the formatter output
pub struct FormatterOptions {
    /// Sequence appended on a line break
    pub linebreak: String,
    /// Unit repeated once per indentation level
    pub indentation: String,
    /// Attribute that switches whitespace preservation for a subtree
    pub preserve_space_attribute: String,
    /// Custom preserve-space decision, replacing the attribute check
    pub preserve_space_fn: Option<PreserveSpaceFn>,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        FormatterOptions {
            linebreak: "\r\n".to_string(),
            indentation: "\t".to_string(),
            preserve_space_attribute: "xml:space".to_string(),
            preserve_space_fn: None,
        }
    }
}

impl FormatterOptions {
    /// Create the default options
    pub fn new() -> Self {
        FormatterOptions::default()
    }

    /// Set the line break sequence
    pub fn with_linebreak(mut self, linebreak: &str) -> Self {
        self.linebreak = linebreak.to_string();
        self
    }

    /// Set the indentation unit
    pub fn with_indentation(mut self, indentation: &str) -> Self {
        self.indentation = indentation.to_string();
        self
    }

    /// Set the attribute name checked for whitespace preservation
    pub fn with_preserve_space_attribute(mut self, attribute: &str) -> Self {
        self.preserve_space_attribute = attribute.to_string();
        self
    }

    /// Set a custom preserve-space decision function
    pub fn with_preserve_space_fn(mut self, preserve_space_fn: PreserveSpaceFn) -> Self {
        self.preserve_space_fn = Some(preserve_space_fn);
        self
    }
}

/// Formats XML into a better readable format by inserting linebreaks and
/// indents
///
/// One instance holds one fixed configuration and one fully-wired processor
/// registry; both are immutable after construction, so an instance can be
/// shared across threads.
pub struct Formatter {
    result_options: FormatResultOptions,
    resolver: ProcessorResolver,
}

impl Formatter {
    /// Create a formatter with the default options
    pub fn new() -> Self {
        Self::with_options(FormatterOptions::default())
    }

    /// Create a formatter with the given options
    pub fn with_options(options: FormatterOptions) -> Self {
        let FormatterOptions {
            linebreak,
            indentation,
            preserve_space_attribute,
            preserve_space_fn,
        } = options;

        let mut resolver = ProcessorResolver::new();
        resolver.add(
            NodeKind::Element,
            Box::new(ElementProcessor::new(ElementProcessorOptions {
                preserve_space_attribute,
                preserve_space_fn,
            })),
        );

        // text runs are copied verbatim so mixed content keeps its shape
        resolver.add(NodeKind::Text, Box::new(TextProcessor));
        resolver.add(NodeKind::Cdata, Box::new(TextProcessor));

        // opaque kinds are copied literally, one per line
        resolver.add(NodeKind::Comment, Box::new(ContentProcessor));
        resolver.add(NodeKind::ProcessingInstruction, Box::new(ContentProcessor));
        resolver.add(NodeKind::Doctype, Box::new(ContentProcessor));

        // copy content on unknown kinds instead of aborting
        resolver.set_fallback(Box::new(ContentProcessor));

        Formatter {
            result_options: FormatResultOptions {
                linebreak,
                indentation,
            },
            resolver,
        }
    }

    /// Parse the given XML and return it formatted
    ///
    /// The declared version and encoding are carried over into the output
    /// prolog. Parse failures propagate unchanged.
    pub fn format(&self, xml: &str) -> Result<String, FormatError> {
        let declaration = XmlDeclaration::detect(xml);
        let mut xot = Xot::new();
        let document = xot.parse(xml)?;
        debug!(bytes = xml.len(), "formatting XML source");
        Ok(self.format_parsed(&xot, document, &declaration))
    }

    /// Format a document tree the caller already parsed
    ///
    /// `node` is the document node or any of its top-level children. The
    /// prolog uses the defaults since a parsed tree carries no declaration.
    pub fn format_document(&self, xot: &Xot, node: Node) -> String {
        debug!("formatting parsed document");
        self.format_parsed(xot, node, &XmlDeclaration::default())
    }

    fn format_parsed(&self, xot: &Xot, node: Node, declaration: &XmlDeclaration) -> String {
        let mut result = FormatResult::new(self.result_options.clone());
        self.process_declaration(declaration, &mut result);

        // find the first node in document order; doctype, comment and
        // processing-instruction nodes may precede the document element
        let start = if xot.is_document(node) {
            xot.document_element(node).unwrap_or(node)
        } else {
            node
        };
        let mut first = start;
        while let Some(previous) = xot.previous_sibling(first) {
            first = previous;
        }

        // go through all top-level nodes
        let mut last_kind = None;
        let mut current = Some(first);
        while let Some(node) = current {
            last_kind = self.resolver.process(xot, node, &mut result, false, last_kind);
            current = xot.next_sibling(node);
        }

        result.into_content()
    }

    fn process_declaration(&self, declaration: &XmlDeclaration, result: &mut FormatResult) {
        result.append(&format!(
            "<?xml version=\"{}\"",
            declaration.version.as_deref().unwrap_or("1.0")
        ));
        if let Some(encoding) = &declaration.encoding {
            result.append(&format!(" encoding=\"{}\"", encoding));
        }
        result.append("?>");
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}
