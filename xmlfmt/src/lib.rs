//! xmlfmt: XML pretty-printing library
//!
//! Formats an already-parsed XML document tree into human-readable text:
//! consistent indentation, configurable line breaks, and whitespace
//! preservation for subtrees marked with `xml:space="preserve"`.
//!
//! This library provides:
//! - A node-dispatch formatting engine with a processor per node kind
//! - Mixed-content handling that never breaks lines next to text
//! - A configurable whitespace-preservation policy
//!
//! ```rust
//! let formatted = xmlfmt::format("<root><a/><b attr=\"x\"/></root>")?;
//! assert_eq!(
//!     formatted,
//!     "<?xml version=\"1.0\"?>\r\n<root>\r\n\t<a/>\r\n\t<b attr=\"x\"/>\r\n</root>"
//! );
//! # Ok::<(), xmlfmt::FormatError>(())
//! ```

pub use xot;

pub mod declaration;
pub mod error;
pub mod format_result;
pub mod formatter;
pub mod processor;

pub use declaration::XmlDeclaration;
pub use error::FormatError;
pub use format_result::{FormatResult, FormatResultOptions};
pub use formatter::{Formatter, FormatterOptions};
pub use processor::{
    ContentProcessor, ElementProcessor, ElementProcessorOptions, NodeKind, PreserveSpaceFn,
    Processor, ProcessorResolver, TextProcessor,
};

/// Formats the passed XML into a better readable format by inserting
/// linebreaks and indents
pub fn format(xml: &str) -> Result<String, FormatError> {
    Formatter::new().format(xml)
}

/// Like [`format`], with options to control the output
pub fn format_with_options(xml: &str, options: FormatterOptions) -> Result<String, FormatError> {
    Formatter::with_options(options).format(xml)
}
