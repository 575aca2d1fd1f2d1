//! Decompiled abstract syntax tree for the Arabica decompiler.
//!
//! The tree is produced programmatically by the bytecode front end (not by a
//! parser), stored in an append-only arena, and consumed read-only by the
//! pretty-printer. Every node has a closed [`NodeKind`], occupies exactly one
//! [`Role`] in its parent's ordered child list, and may carry a bytecode
//! origin offset (for debug line correlation) and a definition/reference
//! annotation (for identifier classification in rich output sinks).
//!
//! Node kinds form a single exhaustive enum rather than an open visitor
//! interface: adding or removing a kind is a compile-time-checked change
//! everywhere the printer branches on it.

pub mod kind;
pub mod role;
pub mod tree;

pub use kind::{
    AssignOp, BinaryOp, ClassType, CommentKind, LiteralValue, MethodData, Modifier, NodeKind,
    TokenKind, UnaryOp,
};
pub use role::Role;
pub use tree::{Ast, NodeId, RefAnnotation, RefKind};
