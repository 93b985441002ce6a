//! XML declaration handling
//!
//! The document model does not retain the source's XML declaration, so the
//! version and encoding for the output prolog are read off the raw text
//! before parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*<\?xml\s+version\s*=\s*["']([^"']+)["'](?:\s+encoding\s*=\s*["']([^"']+)["'])?"#,
    )
    .unwrap()
});

/// Version and encoding declared by a document, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlDeclaration {
    /// Declared XML version
    pub version: Option<String>,
    /// Declared encoding
    pub encoding: Option<String>,
}

impl XmlDeclaration {
    /// Read the declaration off the start of an XML source text
    pub fn detect(xml: &str) -> Self {
        match DECLARATION_RE.captures(xml) {
            Some(captures) => XmlDeclaration {
                version: captures.get(1).map(|m| m.as_str().to_string()),
                encoding: captures.get(2).map(|m| m.as_str().to_string()),
            },
            None => XmlDeclaration::default(),
        }
    }
}
