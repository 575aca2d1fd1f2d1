//! Pretty-printer for decompiled compilation units.
//!
//! Turns an [`Ast`](arabica_ast::Ast) into formatted source text while
//! collecting two artifacts along the way: a table correlating original
//! bytecode lines with emitted text positions, and the emitted start
//! location of every printed node. Output goes through the [`TextOutput`]
//! sink abstraction; [`PlainTextOutput`] is the buffering reference sink.
//!
//! ```
//! use arabica_ast::{Ast, NodeKind, Role};
//! use arabica_fmt::{print_tree, FormattingOptions};
//!
//! let mut tree = Ast::new();
//! let unit = tree.add_root(NodeKind::CompilationUnit);
//! let class = tree.add_child(
//!     unit,
//!     Role::Member,
//!     NodeKind::TypeDeclaration(arabica_ast::ClassType::Class),
//! );
//! tree.add_child(class, Role::Name, NodeKind::Identifier("Example".into()));
//!
//! let result = print_tree(&tree, &FormattingOptions::default()).unwrap();
//! assert!(result.text.starts_with("class Example"));
//! ```

use std::fmt;

use arabica_ast::{Ast, NodeId};
use arabica_common::{LineNumberPosition, TextLocation};
use rustc_hash::FxHashMap;

mod escape;
pub mod formatter;
pub mod options;
pub mod output;
mod visitor;

pub use formatter::{LineNumberMode, PrintArtifacts, TextFormatter};
pub use options::{BraceEnforcement, BraceStyle, FormattingOptions, Wrapping};
pub use output::{PlainTextOutput, TextOutput};

/// A tree shape the printer has no rendering for.
///
/// Structural invariant violations (out-of-order visits, unbalanced stacks)
/// are bugs and panic instead; this error is reserved for trees that are
/// well-formed as data but meaningless to print, such as a bare separator
/// token in statement position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    UnsupportedNode {
        kind: &'static str,
        context: &'static str,
    },
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::UnsupportedNode { kind, context } => {
                write!(f, "cannot print {kind} node under {context}")
            }
        }
    }
}

impl std::error::Error for EmitError {}

/// Everything one print run produces.
#[derive(Debug)]
pub struct PrintResult {
    /// The formatted source text.
    pub text: String,
    /// Bytecode-line correlation entries in emission order.
    pub line_positions: Vec<LineNumberPosition>,
    /// Where each printed node's output begins.
    pub start_locations: FxHashMap<NodeId, TextLocation>,
}

/// Print a tree to a string with the default plain-text sink.
pub fn print_tree(tree: &Ast, options: &FormattingOptions) -> Result<PrintResult, EmitError> {
    print_tree_with(tree, options, LineNumberMode::Plain)
}

/// Like [`print_tree`], with an explicit line-number surfacing mode.
pub fn print_tree_with(
    tree: &Ast,
    options: &FormattingOptions,
    mode: LineNumberMode,
) -> Result<PrintResult, EmitError> {
    let mut out = PlainTextOutput::new();
    let artifacts = print_to(tree, options, mode, &mut out)?;
    Ok(PrintResult {
        text: out.into_string(),
        line_positions: artifacts.line_positions,
        start_locations: artifacts.start_locations,
    })
}

/// Print a tree into a caller-supplied sink and return the collected
/// artifacts. Rich sinks receive classified token writes and fold hints.
pub fn print_to(
    tree: &Ast,
    options: &FormattingOptions,
    mode: LineNumberMode,
    out: &mut dyn TextOutput,
) -> Result<PrintArtifacts, EmitError> {
    let mut formatter = TextFormatter::new(out, mode);
    let mut printer = visitor::OutputVisitor::new(tree, options, &mut formatter);
    printer.visit(tree.root())?;
    printer.finish();
    Ok(formatter.into_artifacts())
}
