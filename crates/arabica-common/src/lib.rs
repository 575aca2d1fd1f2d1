//! Shared leaf types for the Arabica decompiler.
//!
//! This crate holds the types that both the AST layer and the pretty-printer
//! consume: emitted-text coordinates, the line-number correlation record the
//! printer produces for debuggers, and the bytecode offset to source line
//! converter built from a class file's debug attribute.

pub mod line_table;
pub mod location;

pub use line_table::{LineNumberTable, OffsetToLineConverter};
pub use location::{LineNumberPosition, TextLocation};
