//! The low-level output sink contract and the plain-text reference sink.
//!
//! The printer drives a sink through atomic, token-classified writes so that
//! rich consumers (highlighting renderers, hyperlinking viewers) can act on
//! token class and symbol identity. Most classified writes have provided
//! defaults that fall back to [`TextOutput::write`], so a minimal sink only
//! implements raw text, line breaks, indentation, and position queries.

use arabica_common::TextLocation;

/// The abstract sink the text formatter drives.
///
/// Rows and columns are 1-based. `column` reports where the *next* write
/// will land, including pending indentation after a line break.
pub trait TextOutput {
    /// Write raw text at the current position.
    fn write(&mut self, text: &str);

    /// End the current line.
    fn write_line(&mut self);

    /// Increase the indentation applied after subsequent line breaks.
    fn indent(&mut self);

    /// Decrease the indentation applied after subsequent line breaks.
    fn unindent(&mut self);

    fn row(&self) -> u32;

    fn column(&self) -> u32;

    fn location(&self) -> TextLocation {
        TextLocation::new(self.row(), self.column())
    }

    fn write_keyword(&mut self, keyword: &str) {
        self.write(keyword);
    }

    fn write_operator(&mut self, operator: &str) {
        self.write(operator);
    }

    fn write_delimiter(&mut self, delimiter: &str) {
        self.write(delimiter);
    }

    fn write_literal(&mut self, literal: &str) {
        self.write(literal);
    }

    /// A string or character literal, already escaped and quoted.
    fn write_text_literal(&mut self, literal: &str) {
        self.write(literal);
    }

    /// A complete comment token, delimiters included.
    fn write_comment(&mut self, comment: &str) {
        self.write(comment);
    }

    /// An identifier at its declaration site. The handle is the opaque
    /// symbol annotation carried by the tree.
    fn write_definition(&mut self, name: &str, handle: u64) {
        let _ = handle;
        self.write(name);
    }

    /// An identifier at a use site.
    fn write_reference(&mut self, name: &str, handle: u64) {
        let _ = handle;
        self.write(name);
    }

    /// Hint: a collapsible region begins at the current position.
    fn mark_fold_start(&mut self) {}

    /// Hint: the innermost open collapsible region ends here.
    fn mark_fold_end(&mut self) {}
}

/// String-buffering sink with lazy indentation.
///
/// Indentation is applied when the first text of a line is written, so
/// blank lines stay truly blank and `unindent` before a closing brace takes
/// effect on the brace's own line.
#[derive(Debug)]
pub struct PlainTextOutput {
    buffer: String,
    indent_level: u32,
    indent_token: &'static str,
    needs_indent: bool,
    row: u32,
    column: u32,
}

impl PlainTextOutput {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_token: "    ",
            needs_indent: false,
            row: 1,
            column: 1,
        }
    }

    /// Consume the sink and return the emitted text.
    pub fn into_string(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn pending_indent_column(&self) -> u32 {
        self.indent_level * self.indent_token.len() as u32 + 1
    }
}

impl Default for PlainTextOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextOutput for PlainTextOutput {
    fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.needs_indent {
            for _ in 0..self.indent_level {
                self.buffer.push_str(self.indent_token);
            }
            self.column = self.pending_indent_column();
            self.needs_indent = false;
        }
        self.buffer.push_str(text);
        self.column += text.chars().count() as u32;
    }

    fn write_line(&mut self) {
        self.buffer.push('\n');
        self.row += 1;
        self.column = 1;
        self.needs_indent = true;
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn unindent(&mut self) {
        assert!(self.indent_level > 0, "unbalanced unindent");
        self.indent_level -= 1;
    }

    fn row(&self) -> u32 {
        self.row
    }

    fn column(&self) -> u32 {
        if self.needs_indent {
            self.pending_indent_column()
        } else {
            self.column
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_is_lazy() {
        let mut out = PlainTextOutput::new();
        out.write("a");
        out.indent();
        out.write_line();
        out.write("b");
        out.write_line();
        out.unindent();
        out.write("c");
        assert_eq!(out.as_str(), "a\n    b\nc");
    }

    #[test]
    fn blank_lines_carry_no_indent() {
        let mut out = PlainTextOutput::new();
        out.indent();
        out.write("a");
        out.write_line();
        out.write_line();
        out.write("b");
        assert_eq!(out.as_str(), "a\n\n    b");
    }

    #[test]
    fn position_tracking() {
        let mut out = PlainTextOutput::new();
        assert_eq!((out.row(), out.column()), (1, 1));
        out.write("abc");
        assert_eq!((out.row(), out.column()), (1, 4));
        out.indent();
        out.write_line();
        // Column reports where the next write will land, indent included.
        assert_eq!((out.row(), out.column()), (2, 5));
        out.write("x");
        assert_eq!((out.row(), out.column()), (2, 6));
    }

    #[test]
    fn classified_writes_default_to_plain_text() {
        let mut out = PlainTextOutput::new();
        out.write_keyword("class");
        out.write(" ");
        out.write_definition("Example", 3);
        out.write_comment("/* note */");
        assert_eq!(out.as_str(), "class Example/* note */");
    }
}
