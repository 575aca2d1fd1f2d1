//! The mid-level formatting layer between the visitor and the output sink.
//!
//! [`TextFormatter`] owns everything that is positional rather than
//! syntactic: the bytecode-line correlation watermark, the per-unit fold
//! counter, brace placement, comment rendering, and the start-location side
//! table. The visitor never talks to the sink directly.

use arabica_ast::{CommentKind, NodeId};
use arabica_common::{LineNumberPosition, OffsetToLineConverter, TextLocation};
use rustc_hash::FxHashMap;

use crate::options::BraceStyle;
use crate::output::TextOutput;

/// Brace depth at which member bodies sit; the only depth fold regions are
/// reported for.
const FOLD_DEPTH: u32 = 2;

/// How resolved bytecode lines surface in the emitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineNumberMode {
    /// Correlation entries are recorded in the side table only.
    Plain,
    /// Additionally emit a `/*SL:<line>*/` marker at each recorded entry.
    DebugComments,
}

/// Correlation and side-table artifacts collected during one print run.
#[derive(Debug, Default)]
pub struct PrintArtifacts {
    /// Bytecode-line to emitted-position entries, in emission order. Original
    /// lines are strictly increasing within each method body.
    pub line_positions: Vec<LineNumberPosition>,
    /// Emitted start location of every node that was stamped.
    pub start_locations: FxHashMap<NodeId, TextLocation>,
}

/// Drives a [`TextOutput`] sink on behalf of the visitor.
pub struct TextFormatter<'o> {
    out: &'o mut dyn TextOutput,
    mode: LineNumberMode,
    converter: OffsetToLineConverter,
    /// Highest original line recorded since the last converter reset.
    last_line: Option<u32>,
    brace_level: u32,
    indent_depth: u32,
    artifacts: PrintArtifacts,
}

impl<'o> TextFormatter<'o> {
    pub fn new(out: &'o mut dyn TextOutput, mode: LineNumberMode) -> Self {
        Self {
            out,
            mode,
            converter: OffsetToLineConverter::noop(),
            last_line: None,
            brace_level: 0,
            indent_depth: 0,
            artifacts: PrintArtifacts::default(),
        }
    }

    /// Install a fresh offset-to-line converter and clear the watermark.
    /// Called at every method or constructor boundary.
    pub fn reset_line_number_offsets(&mut self, converter: OffsetToLineConverter) {
        self.converter = converter;
        self.last_line = None;
    }

    /// Record a correlation entry for a node carrying an origin offset.
    ///
    /// An entry is appended only when the resolved line is strictly greater
    /// than the watermark, so each original line maps to its first emitted
    /// position and entries stay strictly increasing per body.
    pub fn node_enter(&mut self, origin_offset: Option<u32>) {
        let Some(offset) = origin_offset else {
            return;
        };
        let Some(line) = self.converter.line_for_offset(offset) else {
            return;
        };
        if self.last_line.map_or(false, |last| line <= last) {
            return;
        }
        self.last_line = Some(line);
        self.artifacts
            .line_positions
            .push(LineNumberPosition::new(line, self.out.location()));
        if self.mode == LineNumberMode::DebugComments {
            self.out.write_comment(&format!("/*SL:{line}*/"));
        }
    }

    /// Record where a node's output begins. First stamp per node wins.
    pub fn stamp(&mut self, node: NodeId) {
        let location = self.out.location();
        self.artifacts.start_locations.entry(node).or_insert(location);
    }

    pub fn into_artifacts(self) -> PrintArtifacts {
        self.artifacts
    }

    pub fn line_positions(&self) -> &[LineNumberPosition] {
        &self.artifacts.line_positions
    }

    // ── Braces ─────────────────────────────────────────────────────────

    /// Open a brace in the given style. `EndOfLine` and `NextLine` break
    /// and indent; `Banner` stays on the current line.
    pub fn open_brace(&mut self, style: BraceStyle) {
        self.brace_level += 1;
        match style {
            BraceStyle::EndOfLine => {
                self.out.write_delimiter("{");
                self.mark_fold_start();
                self.out.write_line();
                self.indent();
            }
            BraceStyle::NextLine => {
                self.out.write_line();
                self.out.write_delimiter("{");
                self.mark_fold_start();
                self.out.write_line();
                self.indent();
            }
            BraceStyle::Banner => {
                self.out.write_delimiter("{");
            }
        }
    }

    /// Close a brace opened with the same style. `Banner` closes as `" }"`
    /// on the current line; the other styles unindent first.
    pub fn close_brace(&mut self, style: BraceStyle) {
        match style {
            BraceStyle::EndOfLine | BraceStyle::NextLine => {
                self.unindent();
                self.out.write_delimiter("}");
                self.mark_fold_end();
            }
            BraceStyle::Banner => {
                self.out.write(" ");
                self.out.write_delimiter("}");
            }
        }
        self.brace_level -= 1;
    }

    fn mark_fold_start(&mut self) {
        if self.brace_level == FOLD_DEPTH {
            self.out.mark_fold_start();
        }
    }

    fn mark_fold_end(&mut self) {
        if self.brace_level == FOLD_DEPTH {
            self.out.mark_fold_end();
        }
    }

    // ── Comments ───────────────────────────────────────────────────────

    /// Render a comment token. Single-line comments end their line;
    /// documentation comments are reflowed one source line per output line.
    pub fn write_comment(&mut self, kind: CommentKind, text: &str) {
        match kind {
            CommentKind::SingleLine => {
                self.out.write_comment(&format!("//{text}"));
                self.out.write_line();
            }
            CommentKind::MultiLine => {
                self.out.write_comment(&format!("/*{text}*/"));
            }
            CommentKind::Documentation => {
                self.out.write_comment("/**");
                self.out.write_line();
                for line in text.lines() {
                    self.out.write_comment(&format!(" *{line}"));
                    self.out.write_line();
                }
                self.out.write_comment(" */");
                self.out.write_line();
            }
        }
    }

    // ── Sink pass-through ──────────────────────────────────────────────

    pub fn write(&mut self, text: &str) {
        self.out.write(text);
    }

    pub fn space(&mut self) {
        self.out.write(" ");
    }

    pub fn new_line(&mut self) {
        self.out.write_line();
    }

    pub fn indent(&mut self) {
        self.indent_depth += 1;
        self.out.indent();
    }

    pub fn unindent(&mut self) {
        self.indent_depth -= 1;
        self.out.unindent();
    }

    /// Indentation levels currently active on the sink. Outdent-then-reindent
    /// callers check this before giving a level back.
    pub fn indent_depth(&self) -> u32 {
        self.indent_depth
    }

    pub fn write_keyword(&mut self, keyword: &str) {
        self.out.write_keyword(keyword);
    }

    pub fn write_operator(&mut self, operator: &str) {
        self.out.write_operator(operator);
    }

    pub fn write_delimiter(&mut self, delimiter: &str) {
        self.out.write_delimiter(delimiter);
    }

    pub fn write_literal(&mut self, literal: &str) {
        self.out.write_literal(literal);
    }

    pub fn write_text_literal(&mut self, literal: &str) {
        self.out.write_text_literal(literal);
    }

    pub fn write_identifier(&mut self, name: &str) {
        self.out.write(name);
    }

    pub fn write_definition(&mut self, name: &str, handle: u64) {
        self.out.write_definition(name, handle);
    }

    pub fn write_reference(&mut self, name: &str, handle: u64) {
        self.out.write_reference(name, handle);
    }

    pub fn row(&self) -> u32 {
        self.out.row()
    }

    pub fn column(&self) -> u32 {
        self.out.column()
    }

    pub fn location(&self) -> TextLocation {
        self.out.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PlainTextOutput;
    use arabica_common::LineNumberTable;

    fn converter(entries: Vec<(u32, u32)>, max_offset: u32) -> OffsetToLineConverter {
        OffsetToLineConverter::from_table(&LineNumberTable::new(entries, max_offset))
    }

    #[test]
    fn watermark_records_each_line_once() {
        let mut out = PlainTextOutput::new();
        let mut formatter = TextFormatter::new(&mut out, LineNumberMode::Plain);
        formatter.reset_line_number_offsets(converter(vec![(0, 3), (8, 7)], 16));

        formatter.node_enter(Some(0));
        formatter.write("a");
        formatter.node_enter(Some(4)); // still line 3, below or at watermark
        formatter.node_enter(Some(8));
        formatter.write("b");

        let lines: Vec<_> = formatter
            .line_positions()
            .iter()
            .map(|p| (p.original_line, p.column))
            .collect();
        assert_eq!(lines, vec![(3, 1), (7, 2)]);
    }

    #[test]
    fn reset_clears_the_watermark() {
        let mut out = PlainTextOutput::new();
        let mut formatter = TextFormatter::new(&mut out, LineNumberMode::Plain);
        formatter.reset_line_number_offsets(converter(vec![(0, 9)], 4));
        formatter.node_enter(Some(0));
        formatter.reset_line_number_offsets(converter(vec![(0, 2)], 4));
        formatter.node_enter(Some(0)); // line 2 < 9, but the watermark is gone
        assert_eq!(formatter.line_positions().len(), 2);
        assert_eq!(formatter.line_positions()[1].original_line, 2);
    }

    #[test]
    fn debug_mode_emits_markers() {
        let mut out = PlainTextOutput::new();
        {
            let mut formatter = TextFormatter::new(&mut out, LineNumberMode::DebugComments);
            formatter.reset_line_number_offsets(converter(vec![(0, 12)], 4));
            formatter.node_enter(Some(0));
            formatter.write("x");
        }
        assert_eq!(out.as_str(), "/*SL:12*/x");
    }

    #[test]
    fn brace_styles() {
        let mut out = PlainTextOutput::new();
        {
            let mut formatter = TextFormatter::new(&mut out, LineNumberMode::Plain);
            formatter.write("header");
            formatter.open_brace(BraceStyle::NextLine);
            formatter.write("body");
            formatter.new_line();
            formatter.close_brace(BraceStyle::NextLine);
        }
        assert_eq!(out.into_string(), "header\n{\n    body\n}");

        let mut out = PlainTextOutput::new();
        {
            let mut formatter = TextFormatter::new(&mut out, LineNumberMode::Plain);
            formatter.open_brace(BraceStyle::Banner);
            formatter.close_brace(BraceStyle::Banner);
        }
        assert_eq!(out.into_string(), "{ }");
    }

    #[test]
    fn comment_rendering() {
        let mut out = PlainTextOutput::new();
        {
            let mut formatter = TextFormatter::new(&mut out, LineNumberMode::Plain);
            formatter.write_comment(CommentKind::SingleLine, " note");
            formatter.write_comment(CommentKind::MultiLine, " inline ");
            formatter.new_line();
            formatter.write_comment(CommentKind::Documentation, " First.\n Second.");
        }
        assert_eq!(
            out.into_string(),
            "// note\n/* inline */\n/**\n * First.\n * Second.\n */\n"
        );
    }

    #[test]
    fn stamp_keeps_first_location() {
        let mut tree = arabica_ast::Ast::new();
        let root = tree.add_root(arabica_ast::NodeKind::CompilationUnit);

        let mut out = PlainTextOutput::new();
        let mut formatter = TextFormatter::new(&mut out, LineNumberMode::Plain);
        formatter.stamp(root);
        formatter.write("abc");
        formatter.stamp(root);
        let artifacts = formatter.into_artifacts();
        assert_eq!(
            artifacts.start_locations.get(&root),
            Some(&TextLocation::new(1, 1))
        );
    }
}
