//! Child roles.
//!
//! Every non-root node occupies exactly one named role in its parent's
//! ordered child list. The printer uses roles both to find specific children
//! (`child_by_role`) and to replay trivia siblings in position during
//! emission.

/// The role a node plays within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The tree root (compilation unit); no parent.
    Root,

    // ── Declaration structure ──────────────────────────────────────────
    Member,
    Modifier,
    Annotation,
    Name,
    Parameter,
    TypeParameter,
    ThrownType,
    DefaultValue,
    /// Local type declarations hoisted into a method body.
    DeclaredType,
    Package,
    Import,

    // ── Types ──────────────────────────────────────────────────────────
    Type,
    ReturnType,
    BaseType,
    Interface,
    TypeArgument,
    ExtendsBound,
    SuperBound,
    ArraySpecifier,
    ExceptionType,

    // ── Statements and clauses ─────────────────────────────────────────
    Body,
    Statement,
    Condition,
    TrueBranch,
    FalseBranch,
    EmbeddedStatement,
    Initializer,
    Iterator,
    Variable,
    TryBlock,
    CatchClause,
    FinallyBlock,
    Resource,
    CaseLabel,
    SwitchSection,
    InExpression,

    // ── Expressions ────────────────────────────────────────────────────
    Target,
    Argument,
    Left,
    Right,
    Expression,
    Message,
    Dimension,
    Element,
    /// Parts of a dotted qualified name.
    Identifier,

    // ── Trivia and tokens ──────────────────────────────────────────────
    Comment,
    BlankLine,
    Comma,
    Semicolon,

    // ── Patterns ───────────────────────────────────────────────────────
    Pattern,
    Alternative,
}

impl Role {
    /// Trivia roles are replayed in position by the printer rather than
    /// visited structurally.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Comment | Self::BlankLine)
    }
}
