//! Output buffer for the formatting process
//!
//! `FormatResult` accumulates the formatted text and tracks the current
//! indentation level. It has no knowledge of the document tree; processors
//! drive it.

/// Options controlling the text a `FormatResult` produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResultOptions {
    /// Sequence appended on a line break
    pub linebreak: String,
    /// Unit repeated once per indentation level after a line break
    pub indentation: String,
}

impl Default for FormatResultOptions {
    fn default() -> Self {
        FormatResultOptions {
            linebreak: "\r\n".to_string(),
            indentation: "\t".to_string(),
        }
    }
}

/// Accumulates formatted output together with the current indentation level
#[derive(Debug)]
pub struct FormatResult {
    buffer: String,
    level: usize,
    options: FormatResultOptions,
}

impl FormatResult {
    /// Create an empty result with the given options
    pub fn new(options: FormatResultOptions) -> Self {
        FormatResult {
            buffer: String::new(),
            level: 0,
            options,
        }
    }

    /// Append the given content to the buffer
    pub fn append(&mut self, content: &str) {
        self.buffer.push_str(content);
    }

    /// Append a line break followed by the current indentation
    ///
    /// Does nothing while the buffer is still empty, so output never starts
    /// with a blank line.
    pub fn line_break(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        self.buffer.push_str(&self.options.linebreak);
        self.buffer.push_str(&self.options.indentation.repeat(self.level));
    }

    /// Increase the indentation level
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decrease the indentation level
    ///
    /// The level never goes below zero; callers pair every `indent` with one
    /// `outdent` on the same scope.
    pub fn outdent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Current content of the buffer
    pub fn content(&self) -> &str {
        &self.buffer
    }

    /// Consume the result and return the accumulated content
    pub fn into_content(self) -> String {
        self.buffer
    }
}

impl Default for FormatResult {
    fn default() -> Self {
        Self::new(FormatResultOptions::default())
    }
}
