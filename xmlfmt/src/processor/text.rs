//! Verbatim processor for text runs

use xot::{Node, Xot};

use crate::format_result::FormatResult;

use super::{literal_form, NodeKind, Processor, ProcessorResolver};

/// Copies a text run exactly as it appears
///
/// No trimming and no line break, so text keeps its inline placement and
/// mixed content does not reflow.
pub struct TextProcessor;

impl Processor for TextProcessor {
    fn process(
        &self,
        xot: &Xot,
        node: Node,
        _resolver: &ProcessorResolver,
        result: &mut FormatResult,
        _preserve_space: bool,
        _last_kind: Option<NodeKind>,
    ) {
        result.append(&literal_form(xot, node));
    }
}
