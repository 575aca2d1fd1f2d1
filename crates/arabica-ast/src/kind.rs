//! The closed set of node kinds and their payloads.

use arabica_common::LineNumberTable;

/// Every kind of node the decompiler front end can build.
///
/// The printer matches on this enum exhaustively; a kind with no sensible
/// rendering in some context surfaces as an unsupported-node error rather
/// than being silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // ── Root and declarations ──────────────────────────────────────────
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    TypeDeclaration(ClassType),
    MethodDeclaration(MethodData),
    ConstructorDeclaration(MethodData),
    InitializerBlock,
    FieldDeclaration,
    ParameterDeclaration,
    TypeParameterDeclaration,
    EnumConstant,
    AnnotationUse,
    Modifier(Modifier),

    // ── Expressions ────────────────────────────────────────────────────
    Literal(LiteralValue),
    Identifier(String),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Assignment(AssignOp),
    Conditional,
    Lambda,
    ArrayInitializer,
    ArrayCreation,
    Invocation,
    MemberReference(String),
    Indexer,
    Cast,
    Parenthesized,
    ObjectCreation,
    AnonymousObjectCreation,
    InstanceOf,
    MethodGroup(String),
    NullReference,
    ThisReference,
    SuperReference,
    ClassOf,

    // ── Statements ─────────────────────────────────────────────────────
    Block,
    ExpressionStatement,
    If,
    While,
    DoWhile,
    For,
    ForEach,
    Try,
    CatchClause,
    Switch,
    SwitchSection,
    CaseLabel,
    /// A free-standing jump-target label produced by goto recovery.
    LabelStatement(String),
    /// A label attached to the statement that follows it (`outer: while …`).
    LabeledStatement(String),
    Goto(String),
    Break(Option<String>),
    Continue(Option<String>),
    Return,
    Throw,
    Synchronized,
    Assert,
    EmptyStatement,
    VariableDeclaration,
    VariableInitializer,
    LocalTypeDeclaration,

    // ── Types ──────────────────────────────────────────────────────────
    SimpleType { name: String, primitive: bool },
    WildcardType,
    ComposedType,
    ArraySpecifier,

    // ── Trivia and explicit tokens ─────────────────────────────────────
    Comment { kind: CommentKind, text: String },
    BlankLine,
    /// Explicit punctuation carried by the tree, e.g. a trailing comma in an
    /// array initializer. The printer reproduces these, never invents them.
    Token(TokenKind),

    // ── Structural-matching placeholders ───────────────────────────────
    PatternPlaceholder,
    AnyPattern(Option<String>),
    NamedPattern(String),
    OptionalPattern,
    RepeatPattern { min: u32, max: u32 },
    ChoicePattern,
    PatternBackReference(String),
}

impl NodeKind {
    /// Whether the kind is a structural-matching placeholder. Jump-visits
    /// into foreign subtrees are legal only under a pattern container.
    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            Self::PatternPlaceholder
                | Self::AnyPattern(_)
                | Self::NamedPattern(_)
                | Self::OptionalPattern
                | Self::RepeatPattern { .. }
                | Self::ChoicePattern
                | Self::PatternBackReference(_)
        )
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::ExpressionStatement
                | Self::If
                | Self::While
                | Self::DoWhile
                | Self::For
                | Self::ForEach
                | Self::Try
                | Self::Switch
                | Self::LabelStatement(_)
                | Self::LabeledStatement(_)
                | Self::Goto(_)
                | Self::Break(_)
                | Self::Continue(_)
                | Self::Return
                | Self::Throw
                | Self::Synchronized
                | Self::Assert
                | Self::EmptyStatement
                | Self::VariableDeclaration
                | Self::LocalTypeDeclaration
        )
    }

    /// Whether nodes of this kind end their own output with a line break.
    /// Used when a braceless body decides if a trailing break is needed.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::Literal(_)
                | Self::Identifier(_)
                | Self::Unary(_)
                | Self::Binary(_)
                | Self::Assignment(_)
                | Self::Conditional
                | Self::Lambda
                | Self::ArrayInitializer
                | Self::ArrayCreation
                | Self::Invocation
                | Self::MemberReference(_)
                | Self::Indexer
                | Self::Cast
                | Self::Parenthesized
                | Self::ObjectCreation
                | Self::AnonymousObjectCreation
                | Self::InstanceOf
                | Self::MethodGroup(_)
                | Self::NullReference
                | Self::ThisReference
                | Self::SuperReference
                | Self::ClassOf
        )
    }

    /// Short name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CompilationUnit => "compilation unit",
            Self::PackageDeclaration => "package declaration",
            Self::ImportDeclaration => "import declaration",
            Self::TypeDeclaration(_) => "type declaration",
            Self::MethodDeclaration(_) => "method declaration",
            Self::ConstructorDeclaration(_) => "constructor declaration",
            Self::InitializerBlock => "initializer block",
            Self::FieldDeclaration => "field declaration",
            Self::ParameterDeclaration => "parameter declaration",
            Self::TypeParameterDeclaration => "type parameter declaration",
            Self::EnumConstant => "enum constant",
            Self::AnnotationUse => "annotation",
            Self::Modifier(_) => "modifier",
            Self::Literal(_) => "literal",
            Self::Identifier(_) => "identifier",
            Self::Unary(_) => "unary expression",
            Self::Binary(_) => "binary expression",
            Self::Assignment(_) => "assignment",
            Self::Conditional => "conditional expression",
            Self::Lambda => "lambda",
            Self::ArrayInitializer => "array initializer",
            Self::ArrayCreation => "array creation",
            Self::Invocation => "invocation",
            Self::MemberReference(_) => "member reference",
            Self::Indexer => "indexer",
            Self::Cast => "cast",
            Self::Parenthesized => "parenthesized expression",
            Self::ObjectCreation => "object creation",
            Self::AnonymousObjectCreation => "anonymous object creation",
            Self::InstanceOf => "instanceof expression",
            Self::MethodGroup(_) => "method group",
            Self::NullReference => "null reference",
            Self::ThisReference => "this reference",
            Self::SuperReference => "super reference",
            Self::ClassOf => "class-of expression",
            Self::Block => "block",
            Self::ExpressionStatement => "expression statement",
            Self::If => "if statement",
            Self::While => "while statement",
            Self::DoWhile => "do-while statement",
            Self::For => "for statement",
            Self::ForEach => "for-each statement",
            Self::Try => "try statement",
            Self::CatchClause => "catch clause",
            Self::Switch => "switch statement",
            Self::SwitchSection => "switch section",
            Self::CaseLabel => "case label",
            Self::LabelStatement(_) => "label statement",
            Self::LabeledStatement(_) => "labeled statement",
            Self::Goto(_) => "goto statement",
            Self::Break(_) => "break statement",
            Self::Continue(_) => "continue statement",
            Self::Return => "return statement",
            Self::Throw => "throw statement",
            Self::Synchronized => "synchronized statement",
            Self::Assert => "assert statement",
            Self::EmptyStatement => "empty statement",
            Self::VariableDeclaration => "variable declaration",
            Self::VariableInitializer => "variable initializer",
            Self::LocalTypeDeclaration => "local type declaration",
            Self::SimpleType { .. } => "simple type",
            Self::WildcardType => "wildcard type",
            Self::ComposedType => "composed type",
            Self::ArraySpecifier => "array specifier",
            Self::Comment { .. } => "comment",
            Self::BlankLine => "blank line",
            Self::Token(_) => "token",
            Self::PatternPlaceholder => "pattern placeholder",
            Self::AnyPattern(_) => "any pattern",
            Self::NamedPattern(_) => "named pattern",
            Self::OptionalPattern => "optional pattern",
            Self::RepeatPattern { .. } => "repeat pattern",
            Self::ChoicePattern => "choice pattern",
            Self::PatternBackReference(_) => "pattern back-reference",
        }
    }
}

/// Flavor of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassType {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// Per-method metadata carried by method and constructor declarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodData {
    /// Debug line table, when the class file recorded one for this body.
    pub line_table: Option<LineNumberTable>,
    /// Compiler-generated member; printed with a `/* synthetic */` marker.
    pub synthetic: bool,
    /// Bridge method; printed with a `/* bridge */` marker.
    pub bridge: bool,
    /// Interface default method (`default` keyword before modifiers).
    pub default_method: bool,
}

/// Declaration modifiers, printed in the order they appear as children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Static => "static",
            Self::Final => "final",
            Self::Abstract => "abstract",
            Self::Native => "native",
            Self::Synchronized => "synchronized",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Strictfp => "strictfp",
        }
    }
}

/// Constant values a literal expression can carry.
///
/// `Verbatim` is pre-rendered text the front end wants emitted as-is (used
/// for literals it has already formatted); all other variants are rendered
/// by the printer's literal policy.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Char(char),
    Str(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Verbatim(String),
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    BitNot,
    Minus,
    Plus,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOp {
    pub fn token(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Minus => "-",
            Self::Plus => "+",
            Self::PreIncrement | Self::PostIncrement => "++",
            Self::PreDecrement | Self::PostDecrement => "--",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(self, Self::PostIncrement | Self::PostDecrement)
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    BitAnd,
    BitOr,
    BitXor,
    LogicalAnd,
    LogicalOr,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Equality,
    Inequality,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
}

impl BinaryOp {
    pub fn token(self) -> &'static str {
        match self {
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Equality => "==",
            Self::Inequality => "!=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::UnsignedShiftRight => ">>>",
        }
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    BitAnd,
    BitOr,
    BitXor,
}

impl AssignOp {
    pub fn token(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Subtract => "-=",
            Self::Multiply => "*=",
            Self::Divide => "/=",
            Self::Modulus => "%=",
            Self::ShiftLeft => "<<=",
            Self::ShiftRight => ">>=",
            Self::UnsignedShiftRight => ">>>=",
            Self::BitAnd => "&=",
            Self::BitOr => "|=",
            Self::BitXor => "^=",
        }
    }

    /// The binary operator a compound assignment corresponds to, if any.
    pub fn corresponding_binary(self) -> Option<BinaryOp> {
        match self {
            Self::Assign => None,
            Self::Add => Some(BinaryOp::Add),
            Self::Subtract => Some(BinaryOp::Subtract),
            Self::Multiply => Some(BinaryOp::Multiply),
            Self::Divide => Some(BinaryOp::Divide),
            Self::Modulus => Some(BinaryOp::Modulus),
            Self::ShiftLeft => Some(BinaryOp::ShiftLeft),
            Self::ShiftRight => Some(BinaryOp::ShiftRight),
            Self::UnsignedShiftRight => Some(BinaryOp::UnsignedShiftRight),
            Self::BitAnd => Some(BinaryOp::BitAnd),
            Self::BitOr => Some(BinaryOp::BitOr),
            Self::BitXor => Some(BinaryOp::BitXor),
        }
    }
}

/// Kinds of comments the tree can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    SingleLine,
    MultiLine,
    Documentation,
}

/// Explicit punctuation tokens the front end can place in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comma,
    Semicolon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_classification() {
        assert!(NodeKind::AnyPattern(None).is_pattern());
        assert!(NodeKind::ChoicePattern.is_pattern());
        assert!(!NodeKind::Block.is_pattern());
    }

    #[test]
    fn compound_assignment_maps_to_binary() {
        assert_eq!(
            AssignOp::BitAnd.corresponding_binary(),
            Some(BinaryOp::BitAnd)
        );
        assert_eq!(AssignOp::Assign.corresponding_binary(), None);
    }

    #[test]
    fn operator_tokens() {
        assert_eq!(BinaryOp::UnsignedShiftRight.token(), ">>>");
        assert_eq!(UnaryOp::PostIncrement.token(), "++");
        assert!(UnaryOp::PostIncrement.is_postfix());
        assert!(!UnaryOp::PreIncrement.is_postfix());
    }
}
