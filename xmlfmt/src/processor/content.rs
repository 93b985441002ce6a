//! Literal-copy processor for opaque node kinds

use xot::{Node, Xot};

use crate::format_result::FormatResult;

use super::{literal_form, NodeKind, Processor, ProcessorResolver};

/// Copies a node's literal textual form
///
/// Used for comments, processing instructions and document-type
/// declarations, and as the fallback for unknown kinds. Outside a
/// preserve-space scope the literal form is trimmed at both ends and placed
/// on its own line.
pub struct ContentProcessor;

impl Processor for ContentProcessor {
    fn process(
        &self,
        xot: &Xot,
        node: Node,
        _resolver: &ProcessorResolver,
        result: &mut FormatResult,
        preserve_space: bool,
        _last_kind: Option<NodeKind>,
    ) {
        let mut content = literal_form(xot, node);
        if !preserve_space {
            // strip surrounding whitespace only, never interior whitespace
            content = content.trim().to_string();
            if !content.is_empty() {
                result.line_break();
            }
        }

        result.append(&content);
    }
}
