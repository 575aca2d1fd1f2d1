//! Depth-first tree visitor that renders a decompiled compilation unit.
//!
//! The visitor owns the traversal discipline: container/position stacks for
//! replaying trivia siblings in position, and the token-spacing state machine
//! that keeps adjacent tokens from gluing into different tokens (`a+ +b`
//! never becomes `a++b`). Everything positional goes through the
//! [`TextFormatter`]; the visitor never touches the sink directly.

use arabica_ast::{
    AssignOp, Ast, BinaryOp, ClassType, CommentKind, LiteralValue, MethodData, Modifier, NodeId,
    NodeKind, RefAnnotation, RefKind, Role, UnaryOp,
};
use arabica_common::OffsetToLineConverter;

use crate::escape::{escape_char_literal, escape_string_literal};
use crate::formatter::TextFormatter;
use crate::options::{BraceEnforcement, BraceStyle, FormattingOptions, Wrapping};
use crate::EmitError;

type Result<T = ()> = std::result::Result<T, EmitError>;

/// What the previous write left at the end of the output. Drives the
/// forced-space rules for ambiguous adjacent tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastWritten {
    Whitespace,
    Other,
    KeywordOrIdentifier,
    Plus,
    Minus,
    Ampersand,
    QuestionMark,
    Division,
    Operator,
    Delimiter,
    LeftParenthesis,
}

/// Token class of a non-keyword, non-identifier write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Operator,
    Delimiter,
    Plain,
}

/// Sentinel fill values historically used by compilers and loaders; integer
/// literals matching one of these render in hexadecimal. An explicit
/// allow-list, not a general rule.
const MAGIC_VALUES_32: [u32; 16] = [
    0x1BADB002, 0xABABABAB, 0xABADBABE, 0xABADCAFE, 0xBADDCAFE, 0xBBADBEEF, 0xBEEFCACE,
    0xCAFEBABE, 0xCAFED00D, 0xCAFEEFAC, 0xDEADBABE, 0xDEADBEEF, 0xDEADC0DE, 0xDEADF00D,
    0xDEFEC8ED, 0xFADEDEAD,
];

const MAGIC_VALUES_64: [u64; 2] = [0x0000BADBADBADBAD, 0xBADC0FFEE0DDF00D];

/// Reserved words of the target language, sorted for binary search.
const KEYWORDS: [&str; 50] = [
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
];

fn is_keyword(identifier: &str) -> bool {
    KEYWORDS.binary_search(&identifier).is_ok()
}

/// One printing pass over one tree. State is instance-owned; independent
/// visitors over separate trees may run on separate threads.
pub(crate) struct OutputVisitor<'a, 'o> {
    tree: &'a Ast,
    policy: &'a FormattingOptions,
    formatter: &'a mut TextFormatter<'o>,
    container_stack: Vec<NodeId>,
    position_stack: Vec<Option<NodeId>>,
    last_written: LastWritten,
}

impl<'a, 'o> OutputVisitor<'a, 'o> {
    pub(crate) fn new(
        tree: &'a Ast,
        policy: &'a FormattingOptions,
        formatter: &'a mut TextFormatter<'o>,
    ) -> Self {
        Self {
            tree,
            policy,
            formatter,
            container_stack: Vec::new(),
            position_stack: Vec::new(),
            last_written: LastWritten::Whitespace,
        }
    }

    /// Both stacks must be empty once the print is over.
    pub(crate) fn finish(self) {
        assert!(
            self.container_stack.is_empty() && self.position_stack.is_empty(),
            "print ended with unbalanced node stacks"
        );
    }

    // ── Start/end node ─────────────────────────────────────────────────

    fn start_node(&mut self, node: NodeId) -> Result {
        // Nodes must be visited in nesting order; jumps into foreign
        // subtrees are legal only under a pattern container.
        if let Some(&top) = self.container_stack.last() {
            assert!(
                self.tree.parent(node) == Some(top) || self.tree.kind(top).is_pattern(),
                "node visited out of nesting order"
            );
        }
        if !self.position_stack.is_empty() {
            self.write_specials_up_to_node(node)?;
        }
        self.container_stack.push(node);
        self.position_stack.push(self.tree.first_child(node));
        self.formatter.stamp(node);
        self.formatter.node_enter(self.tree.origin_offset(node));
        Ok(())
    }

    fn end_node(&mut self, node: NodeId) -> Result {
        assert_eq!(
            self.container_stack.last().copied(),
            Some(node),
            "unbalanced end of node"
        );
        let position = self.position_stack.pop().flatten();
        debug_assert!(position.map_or(true, |p| self.tree.parent(p) == Some(node)));
        self.write_specials(position, None)?;
        self.container_stack.pop();
        Ok(())
    }

    // ── Trivia replay ──────────────────────────────────────────────────

    /// Emit every comment/blank-line sibling in `[start, end)`.
    fn write_specials(&mut self, start: Option<NodeId>, end: Option<NodeId>) -> Result {
        let mut current = start;
        while let Some(node) = current {
            if Some(node) == end {
                break;
            }
            if self.tree.role(node).is_trivia() {
                self.visit(node)?;
            }
            current = self.tree.next_sibling(node);
        }
        Ok(())
    }

    /// Scan from the stored cursor to the first sibling with `role`
    /// (bounded by `next_node`), replaying trivia before it and advancing
    /// the cursor past it.
    fn write_specials_up_to_role(&mut self, role: Role, next_node: Option<NodeId>) -> Result {
        let Some(start) = self.position_stack.last().copied() else {
            return Ok(());
        };
        let mut current = start;
        while let Some(node) = current {
            if Some(node) == next_node {
                break;
            }
            if self.tree.role(node) == role {
                let from = self.position_stack.pop().flatten();
                self.write_specials(from, Some(node))?;
                // The matched node itself counts as handled; the cursor
                // moves past it so optional_comma keeps working.
                self.position_stack.push(self.tree.next_sibling(node));
                break;
            }
            current = self.tree.next_sibling(node);
        }
        Ok(())
    }

    fn write_specials_up_to_node(&mut self, target: NodeId) -> Result {
        let Some(start) = self.position_stack.last().copied() else {
            return Ok(());
        };
        let mut current = start;
        while let Some(node) = current {
            if node == target {
                let from = self.position_stack.pop().flatten();
                self.write_specials(from, Some(node))?;
                self.position_stack.push(self.tree.next_sibling(node));
                break;
            }
            current = self.tree.next_sibling(node);
        }
        Ok(())
    }

    // ── Token primitives ───────────────────────────────────────────────

    fn space(&mut self) {
        self.formatter.space();
        self.last_written = LastWritten::Whitespace;
    }

    fn space_if(&mut self, add_space: bool) {
        if add_space {
            self.space();
        }
    }

    fn new_line(&mut self) {
        self.formatter.new_line();
        self.last_written = LastWritten::Whitespace;
    }

    fn write_keyword(&mut self, keyword: &str) {
        if self.last_written == LastWritten::KeywordOrIdentifier {
            self.formatter.space();
        }
        self.formatter.write_keyword(keyword);
        self.last_written = LastWritten::KeywordOrIdentifier;
    }

    fn write_identifier(&mut self, name: &str, annotation: Option<RefAnnotation>) {
        if self.last_written == LastWritten::KeywordOrIdentifier {
            // Strictly required: also covers identifiers that collide with
            // a keyword after an actual keyword.
            self.formatter.space();
        }
        match annotation {
            Some(RefAnnotation {
                handle,
                kind: RefKind::Definition,
            }) => self.formatter.write_definition(name, handle),
            Some(RefAnnotation {
                handle,
                kind: RefKind::Reference,
            }) => self.formatter.write_reference(name, handle),
            None => self.formatter.write_identifier(name),
        }
        self.last_written = LastWritten::KeywordOrIdentifier;
    }

    fn write_token(&mut self, token: &str, role: Option<Role>, class: TokenClass) -> Result {
        if let Some(role) = role {
            self.write_specials_up_to_role(role, None)?;
        }
        let first = token.as_bytes().first().copied();
        let forced_space = matches!(
            (self.last_written, first),
            (LastWritten::Plus, Some(b'+'))
                | (LastWritten::Minus, Some(b'-'))
                | (LastWritten::Ampersand, Some(b'&'))
                | (LastWritten::QuestionMark, Some(b'?'))
                | (LastWritten::Division, Some(b'*'))
        );
        if forced_space {
            self.formatter.space();
        }
        match class {
            TokenClass::Operator => self.formatter.write_operator(token),
            TokenClass::Delimiter => self.formatter.write_delimiter(token),
            TokenClass::Plain => self.formatter.write(token),
        }
        // The five ambiguous single characters track their own states no
        // matter which class wrote them.
        self.last_written = match token {
            "+" => LastWritten::Plus,
            "-" => LastWritten::Minus,
            "&" => LastWritten::Ampersand,
            "?" => LastWritten::QuestionMark,
            "/" => LastWritten::Division,
            "(" => LastWritten::LeftParenthesis,
            _ => match class {
                TokenClass::Operator => LastWritten::Operator,
                TokenClass::Delimiter => LastWritten::Delimiter,
                TokenClass::Plain => LastWritten::Other,
            },
        };
        Ok(())
    }

    fn left_paren(&mut self) -> Result {
        self.write_token("(", None, TokenClass::Delimiter)
    }

    fn right_paren(&mut self) -> Result {
        self.write_token(")", None, TokenClass::Delimiter)
    }

    fn open_brace(&mut self, style: BraceStyle) {
        let need_space = matches!(style, BraceStyle::EndOfLine | BraceStyle::Banner)
            && self.last_written != LastWritten::Whitespace
            && self.last_written != LastWritten::LeftParenthesis;
        self.space_if(need_space);
        self.formatter.open_brace(style);
        self.last_written = if style == BraceStyle::Banner {
            LastWritten::Other
        } else {
            LastWritten::Whitespace
        };
    }

    fn close_brace(&mut self, style: BraceStyle) {
        self.formatter.close_brace(style);
        self.last_written = LastWritten::Other;
    }

    // ── Commas and semicolons ──────────────────────────────────────────

    fn comma(&mut self, next_node: Option<NodeId>, no_space_after: bool) -> Result {
        self.write_specials_up_to_role(Role::Comma, next_node)?;
        self.space_if(self.policy.space_before_comma);
        self.formatter.write_delimiter(",");
        self.last_written = LastWritten::Other;
        self.space_if(!no_space_after && self.policy.space_after_comma);
        Ok(())
    }

    /// Reproduce a trailing comma only when the tree carries one.
    fn optional_comma(&mut self) -> Result {
        if self.pending_token_role() == Some(Role::Comma) {
            self.comma(None, true)?;
        }
        Ok(())
    }

    fn semicolon(&mut self) -> Result {
        let suppress = self.container_stack.last().map_or(false, |&top| {
            matches!(self.tree.role(top), Role::Initializer | Role::Iterator)
        });
        if !suppress {
            self.write_token(";", Some(Role::Semicolon), TokenClass::Delimiter)?;
            self.new_line();
        }
        Ok(())
    }

    fn optional_semicolon(&mut self) -> Result {
        if self.pending_token_role() == Some(Role::Semicolon) {
            self.semicolon()?;
        }
        Ok(())
    }

    /// Role of the next non-trivia sibling at the cursor, if any.
    fn pending_token_role(&self) -> Option<Role> {
        let mut position = self.position_stack.last().copied().flatten();
        while let Some(node) = position {
            if !self.tree.role(node).is_trivia() {
                return Some(self.tree.role(node));
            }
            position = self.tree.next_sibling(node);
        }
        None
    }

    // ── Lists ──────────────────────────────────────────────────────────

    fn write_comma_separated_list(&mut self, items: &[NodeId]) -> Result {
        for (index, &item) in items.iter().enumerate() {
            if index > 0 {
                self.comma(Some(item), false)?;
            }
            self.visit(item)?;
        }
        Ok(())
    }

    fn write_comma_separated_list_in_parens(
        &mut self,
        items: &[NodeId],
        space_within: bool,
    ) -> Result {
        self.left_paren()?;
        if !items.is_empty() {
            self.space_if(space_within);
            self.write_comma_separated_list(items)?;
            self.space_if(space_within);
        }
        self.right_paren()
    }

    fn write_pipe_separated_list(&mut self, items: &[NodeId]) -> Result {
        for (index, &item) in items.iter().enumerate() {
            if index > 0 {
                self.space();
                self.write_token("|", None, TokenClass::Operator)?;
                self.space();
            }
            self.visit(item)?;
        }
        Ok(())
    }

    // ── Shared constructs ──────────────────────────────────────────────

    fn write_modifiers(&mut self, node: NodeId) -> Result {
        let tree = self.tree;
        for modifier in tree.children_by_role(node, Role::Modifier) {
            self.visit(modifier)?;
        }
        Ok(())
    }

    fn write_annotations(&mut self, node: NodeId, new_line_after: bool) -> Result {
        let tree = self.tree;
        for annotation in tree.children_by_role(node, Role::Annotation) {
            self.visit(annotation)?;
            if new_line_after {
                self.new_line();
            } else {
                self.space();
            }
        }
        Ok(())
    }

    fn write_type_parameters(&mut self, node: NodeId) -> Result {
        let params: Vec<_> = self.tree.children_by_role(node, Role::TypeParameter).collect();
        if params.is_empty() {
            return Ok(());
        }
        self.write_token("<", None, TokenClass::Delimiter)?;
        self.write_comma_separated_list(&params)?;
        self.write_token(">", None, TokenClass::Delimiter)
    }

    fn write_type_arguments(&mut self, node: NodeId) -> Result {
        let args: Vec<_> = self.tree.children_by_role(node, Role::TypeArgument).collect();
        if args.is_empty() {
            return Ok(());
        }
        self.write_token("<", None, TokenClass::Delimiter)?;
        self.write_comma_separated_list(&args)?;
        self.write_token(">", None, TokenClass::Delimiter)
    }

    fn write_qualified_identifier(&mut self, node: NodeId) -> Result {
        let tree = self.tree;
        let parts: Vec<_> = tree.children_by_role(node, Role::Identifier).collect();
        for (index, &part) in parts.iter().enumerate() {
            if index == 0 {
                if self.last_written == LastWritten::KeywordOrIdentifier {
                    self.formatter.space();
                }
            } else {
                self.formatter.write(".");
                self.last_written = LastWritten::Other;
            }
            self.write_specials_up_to_node(part)?;
            match tree.kind(part) {
                NodeKind::Identifier(name) => self.formatter.write_identifier(name),
                _ => return Err(self.unsupported(part)),
            }
            self.last_written = LastWritten::KeywordOrIdentifier;
        }
        Ok(())
    }

    /// Optional-brace bodies: blocks handle themselves, bare statements are
    /// wrapped under `AddBraces` or indented on their own line otherwise.
    fn write_embedded_statement(
        &mut self,
        statement: Option<NodeId>,
        enforcement: BraceEnforcement,
    ) -> Result {
        let Some(statement) = statement else {
            self.new_line();
            return Ok(());
        };
        if matches!(self.tree.kind(statement), NodeKind::Block) {
            return self.visit(statement);
        }
        if enforcement == BraceEnforcement::AddBraces {
            let style = self.policy.statement_brace_style;
            self.open_brace(style);
            self.visit(statement)?;
            self.close_brace(style);
            let in_do_while = self
                .tree
                .parent(statement)
                .map_or(false, |p| matches!(self.tree.kind(p), NodeKind::DoWhile));
            if !in_do_while {
                self.new_line();
            }
            return Ok(());
        }
        self.new_line();
        self.formatter.indent();
        self.visit(statement)?;
        self.formatter.unindent();
        Ok(())
    }

    fn write_method_body(&mut self, body: Option<NodeId>) -> Result {
        let Some(body) = body else {
            return self.semicolon();
        };
        self.start_node(body)?;

        let tree = self.tree;
        let declaration = tree.parent(body);
        let style = match declaration.map(|p| tree.kind(p)) {
            Some(NodeKind::ConstructorDeclaration(_)) => self.policy.constructor_brace_style,
            Some(NodeKind::MethodDeclaration(_)) => self.policy.method_brace_style,
            Some(NodeKind::InitializerBlock) => self.policy.initializer_block_brace_style,
            _ => self.policy.statement_brace_style,
        };

        self.open_brace(style);

        // Local types hoisted out of the body print first, each through a
        // fresh visitor over the same formatter.
        let declared: Vec<_> = declaration
            .map(|p| tree.children_by_role(p, Role::DeclaredType).collect())
            .unwrap_or_default();
        for (index, &declared_type) in declared.iter().enumerate() {
            if index > 0 {
                self.new_line();
            }
            self.print_nested(declared_type)?;
        }
        if !declared.is_empty() {
            self.new_line();
        }

        let statements: Vec<_> = tree.children_by_role(body, Role::Statement).collect();
        for &statement in &statements {
            self.visit(statement)?;
        }

        self.close_brace(style);
        self.new_line();
        self.end_node(body)
    }

    /// Print a subtree through a fresh visitor sharing this formatter.
    /// Used for nested, local and anonymous type declarations.
    fn print_nested(&mut self, node: NodeId) -> Result {
        let mut nested = OutputVisitor::new(self.tree, self.policy, &mut *self.formatter);
        nested.visit(node)?;
        nested.finish();
        Ok(())
    }

    fn unsupported(&self, node: NodeId) -> EmitError {
        EmitError::UnsupportedNode {
            kind: self.tree.kind(node).name(),
            context: self
                .tree
                .parent(node)
                .map_or("tree root", |p| self.tree.kind(p).name()),
        }
    }

    // ── Dispatch ───────────────────────────────────────────────────────

    pub(crate) fn visit(&mut self, node: NodeId) -> Result {
        let tree = self.tree;
        match tree.kind(node) {
            NodeKind::CompilationUnit => {
                for &child in tree.children(node) {
                    self.visit(child)?;
                }
                Ok(())
            }
            NodeKind::PackageDeclaration => self.visit_package(node),
            NodeKind::ImportDeclaration => self.visit_import(node),
            NodeKind::TypeDeclaration(class_type) => self.visit_type_declaration(node, *class_type),
            NodeKind::MethodDeclaration(data) => self.visit_method(node, data),
            NodeKind::ConstructorDeclaration(data) => self.visit_constructor(node, data),
            NodeKind::InitializerBlock => self.visit_initializer_block(node),
            NodeKind::FieldDeclaration => self.visit_field(node),
            NodeKind::ParameterDeclaration => self.visit_parameter(node),
            NodeKind::TypeParameterDeclaration => self.visit_type_parameter(node),
            NodeKind::EnumConstant => {
                // Reached only through the member loop of an enum body,
                // which supplies the terminator; a stray constant elsewhere
                // has no terminator context.
                Err(self.unsupported(node))
            }
            NodeKind::AnnotationUse => self.visit_annotation_use(node),
            NodeKind::Modifier(modifier) => self.visit_modifier(node, *modifier),

            NodeKind::Literal(value) => self.visit_literal(node, value),
            NodeKind::Identifier(name) => self.visit_identifier(node, name),
            NodeKind::Unary(op) => self.visit_unary(node, *op),
            NodeKind::Binary(op) => self.visit_binary(node, *op),
            NodeKind::Assignment(op) => self.visit_assignment(node, *op),
            NodeKind::Conditional => self.visit_conditional(node),
            NodeKind::Lambda => self.visit_lambda(node),
            NodeKind::ArrayInitializer => {
                self.start_node(node)?;
                let elements: Vec<_> = tree.children_by_role(node, Role::Element).collect();
                self.write_initializer_elements(&elements)?;
                self.end_node(node)
            }
            NodeKind::ArrayCreation => self.visit_array_creation(node),
            NodeKind::Invocation => self.visit_invocation(node),
            NodeKind::MemberReference(name) => self.visit_member_reference(node, name),
            NodeKind::Indexer => self.visit_indexer(node),
            NodeKind::Cast => self.visit_cast(node),
            NodeKind::Parenthesized => self.visit_parenthesized(node),
            NodeKind::ObjectCreation => self.visit_object_creation(node, false),
            NodeKind::AnonymousObjectCreation => self.visit_object_creation(node, true),
            NodeKind::InstanceOf => self.visit_instance_of(node),
            NodeKind::MethodGroup(name) => self.visit_method_group(node, name),
            NodeKind::NullReference => {
                self.start_node(node)?;
                self.write_keyword("null");
                self.end_node(node)
            }
            NodeKind::ThisReference => self.visit_self_reference(node, "this"),
            NodeKind::SuperReference => self.visit_self_reference(node, "super"),
            NodeKind::ClassOf => self.visit_class_of(node),

            NodeKind::Block => self.visit_block(node),
            NodeKind::ExpressionStatement => {
                self.start_node(node)?;
                if let Some(expression) = tree.child_by_role(node, Role::Expression) {
                    self.visit(expression)?;
                }
                self.semicolon()?;
                self.end_node(node)
            }
            NodeKind::If => self.visit_if(node),
            NodeKind::While => self.visit_while(node),
            NodeKind::DoWhile => self.visit_do_while(node),
            NodeKind::For => self.visit_for(node),
            NodeKind::ForEach => self.visit_for_each(node),
            NodeKind::Try => self.visit_try(node),
            NodeKind::CatchClause => self.visit_catch_clause(node),
            NodeKind::Switch => self.visit_switch(node),
            NodeKind::SwitchSection => self.visit_switch_section(node),
            NodeKind::CaseLabel => self.visit_case_label(node),
            NodeKind::LabelStatement(label) => self.visit_label_statement(node, label),
            NodeKind::LabeledStatement(label) => self.visit_labeled_statement(node, label),
            NodeKind::Goto(label) => {
                self.start_node(node)?;
                self.write_keyword("goto");
                self.write_identifier(label, None);
                self.semicolon()?;
                self.end_node(node)
            }
            NodeKind::Break(label) => self.visit_jump(node, "break", label.as_deref()),
            NodeKind::Continue(label) => self.visit_jump(node, "continue", label.as_deref()),
            NodeKind::Return => self.visit_value_statement(node, "return"),
            NodeKind::Throw => self.visit_value_statement(node, "throw"),
            NodeKind::Synchronized => self.visit_synchronized(node),
            NodeKind::Assert => self.visit_assert(node),
            NodeKind::EmptyStatement => {
                self.start_node(node)?;
                self.semicolon()?;
                self.end_node(node)
            }
            NodeKind::VariableDeclaration => self.write_variable_declaration(node, true),
            NodeKind::VariableInitializer => self.visit_variable_initializer(node),
            NodeKind::LocalTypeDeclaration => {
                self.start_node(node)?;
                if let Some(declaration) = tree.child_by_role(node, Role::Body) {
                    self.print_nested(declaration)?;
                }
                self.end_node(node)
            }

            NodeKind::SimpleType { name, primitive } => {
                self.start_node(node)?;
                if *primitive {
                    self.write_keyword(name);
                } else {
                    self.write_identifier(name, tree.annotation(node));
                }
                self.write_type_arguments(node)?;
                self.end_node(node)
            }
            NodeKind::WildcardType => self.visit_wildcard_type(node),
            NodeKind::ComposedType => {
                self.start_node(node)?;
                if let Some(base) = tree.child_by_role(node, Role::BaseType) {
                    self.visit(base)?;
                }
                let specifiers: Vec<_> =
                    tree.children_by_role(node, Role::ArraySpecifier).collect();
                for &specifier in &specifiers {
                    self.visit(specifier)?;
                }
                self.end_node(node)
            }
            NodeKind::ArraySpecifier => self.visit_array_specifier(node),

            NodeKind::Comment { kind, text } => {
                if self.last_written == LastWritten::Division {
                    // Keep `a / /*c*/ b` from producing the opener of a
                    // different comment.
                    self.formatter.space();
                }
                self.formatter.write_comment(*kind, text);
                self.last_written = LastWritten::Whitespace;
                Ok(())
            }
            NodeKind::BlankLine => {
                self.new_line();
                Ok(())
            }
            NodeKind::Token(_) => Err(self.unsupported(node)),

            NodeKind::PatternPlaceholder => {
                self.start_node(node)?;
                if let Some(pattern) = tree.child_by_role(node, Role::Pattern) {
                    self.visit(pattern)?;
                }
                self.end_node(node)
            }
            NodeKind::AnyPattern(group) => self.visit_any_pattern(node, group.as_deref()),
            NodeKind::NamedPattern(group) => self.visit_named_pattern(node, group),
            NodeKind::OptionalPattern => self.visit_wrapped_pattern(node, "optional"),
            NodeKind::RepeatPattern { min, max } => self.visit_repeat_pattern(node, *min, *max),
            NodeKind::ChoicePattern => self.visit_choice_pattern(node),
            NodeKind::PatternBackReference(group) => {
                self.start_node(node)?;
                self.write_keyword("backReference");
                self.left_paren()?;
                self.write_identifier(group, None);
                self.right_paren()?;
                self.end_node(node)
            }
        }
    }

    // ── Declarations ───────────────────────────────────────────────────

    fn visit_package(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.write_keyword("package");
        self.write_qualified_identifier(node)?;
        self.semicolon()?;
        for _ in 0..self.policy.blank_lines_after_package_declaration {
            self.new_line();
        }
        self.end_node(node)
    }

    fn visit_import(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.write_keyword("import");
        self.write_qualified_identifier(node)?;
        self.semicolon()?;
        self.end_node(node)?;

        // A blank line after the last import of a run.
        let run_continues = self
            .tree
            .next_sibling(node)
            .map_or(false, |next| {
                matches!(self.tree.kind(next), NodeKind::ImportDeclaration)
            });
        if !run_continues {
            self.new_line();
        }
        Ok(())
    }

    fn visit_type_declaration(&mut self, node: NodeId, class_type: ClassType) -> Result {
        self.start_node(node)?;
        let tree = self.tree;

        let is_anonymous = tree
            .parent(node)
            .map_or(false, |p| matches!(tree.kind(p), NodeKind::AnonymousObjectCreation));

        if !is_anonymous {
            self.write_annotations(node, true)?;
            self.write_modifiers(node)?;
            self.write_keyword(match class_type {
                ClassType::Enum => "enum",
                ClassType::Interface => "interface",
                ClassType::Annotation => "@interface",
                ClassType::Class => "class",
            });
            if let Some(name) = tree.child_by_role(node, Role::Name) {
                self.visit(name)?;
            }
            self.write_type_parameters(node)?;

            if let Some(base) = tree.child_by_role(node, Role::BaseType) {
                self.space();
                self.write_keyword("extends");
                self.space();
                self.visit(base)?;
            }

            let interfaces: Vec<_> = tree.children_by_role(node, Role::Interface).collect();
            if !interfaces.is_empty() {
                self.space();
                self.write_keyword(
                    if matches!(class_type, ClassType::Interface | ClassType::Annotation) {
                        "extends"
                    } else {
                        "implements"
                    },
                );
                self.space();
                self.write_comma_separated_list(&interfaces)?;
            }
        }

        let members: Vec<_> = tree.children_by_role(node, Role::Member).collect();
        let style = match class_type {
            ClassType::Enum => self.policy.enum_brace_style,
            ClassType::Interface => self.policy.interface_brace_style,
            ClassType::Annotation => self.policy.annotation_brace_style,
            ClassType::Class => {
                if is_anonymous {
                    if members.is_empty() {
                        BraceStyle::Banner
                    } else {
                        self.policy.anonymous_class_brace_style
                    }
                } else {
                    self.policy.class_brace_style
                }
            }
        };

        self.open_brace(style);
        self.write_member_list(&members, is_anonymous)?;
        self.close_brace(style);

        if !is_anonymous {
            self.optional_semicolon()?;
            self.new_line();
        }
        self.end_node(node)
    }

    /// Member loop shared by type declarations and enum constant bodies.
    /// The enum comma/semicolon terminator is decided here in one pass:
    /// a constant is last when the member after it is not a constant.
    fn write_member_list(&mut self, members: &[NodeId], skip_constructors: bool) -> Result {
        let tree = self.tree;
        let mut previous: Option<NodeId> = None;
        for (index, &member) in members.iter().enumerate() {
            if skip_constructors && matches!(tree.kind(member), NodeKind::ConstructorDeclaration(_))
            {
                continue;
            }
            if let Some(previous) = previous {
                let blank_lines = if matches!(tree.kind(member), NodeKind::FieldDeclaration)
                    && matches!(tree.kind(previous), NodeKind::FieldDeclaration)
                {
                    self.policy.blank_lines_between_fields
                } else {
                    self.policy.blank_lines_between_members
                };
                for _ in 0..blank_lines {
                    self.new_line();
                }
            }
            previous = Some(member);

            if matches!(tree.kind(member), NodeKind::EnumConstant) {
                let is_last = members.get(index + 1).map_or(true, |&next| {
                    !matches!(tree.kind(next), NodeKind::EnumConstant)
                });
                self.visit_enum_constant(member, is_last)?;
            } else {
                self.visit(member)?;
            }
        }
        Ok(())
    }

    fn visit_enum_constant(&mut self, node: NodeId, is_last: bool) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_annotations(node, true)?;
        if let Some(name) = tree.child_by_role(node, Role::Name) {
            self.visit(name)?;
        }

        let arguments: Vec<_> = tree.children_by_role(node, Role::Argument).collect();
        if !arguments.is_empty() {
            self.write_comma_separated_list_in_parens(
                &arguments,
                self.policy.space_within_enum_declaration_parentheses,
            )?;
        }

        let members: Vec<_> = tree.children_by_role(node, Role::Member).collect();
        if !members.is_empty() {
            let style = self.policy.anonymous_class_brace_style;
            self.open_brace(style);
            self.write_member_list(&members, false)?;
            self.close_brace(style);
        }

        if is_last {
            self.semicolon()?;
        } else {
            self.comma(tree.next_sibling(node), false)?;
        }
        self.end_node(node)
    }

    fn visit_method(&mut self, node: NodeId, data: &MethodData) -> Result {
        self.start_node(node)?;
        self.formatter
            .reset_line_number_offsets(OffsetToLineConverter::noop());
        self.write_annotations(node, true)?;

        if data.default_method {
            self.write_keyword("default");
        }
        self.write_modifiers(node)?;
        self.write_generated_marker(data)?;

        if let Some(table) = &data.line_table {
            self.formatter
                .reset_line_number_offsets(OffsetToLineConverter::from_table(table));
        }

        let tree = self.tree;
        if tree.child_by_role(node, Role::TypeParameter).is_some() {
            self.space();
            self.write_type_parameters(node)?;
            self.space();
        }
        if let Some(return_type) = tree.child_by_role(node, Role::ReturnType) {
            self.visit(return_type)?;
            self.space();
        }
        if let Some(name) = tree.child_by_role(node, Role::Name) {
            self.visit(name)?;
        }
        self.space_if(self.policy.space_before_method_declaration_parentheses);
        let parameters: Vec<_> = tree.children_by_role(node, Role::Parameter).collect();
        self.write_comma_separated_list_in_parens(
            &parameters,
            self.policy.space_within_method_declaration_parentheses,
        )?;

        self.write_throws_clause(node)?;

        if let Some(default_value) = tree.child_by_role(node, Role::DefaultValue) {
            self.space();
            self.write_keyword("default");
            self.space();
            self.visit(default_value)?;
        }

        self.write_method_body(tree.child_by_role(node, Role::Body))?;
        self.end_node(node)
    }

    fn visit_constructor(&mut self, node: NodeId, data: &MethodData) -> Result {
        self.start_node(node)?;
        self.formatter
            .reset_line_number_offsets(OffsetToLineConverter::noop());
        self.write_annotations(node, true)?;
        self.write_modifiers(node)?;
        self.write_generated_marker(data)?;

        let tree = self.tree;
        if tree.child_by_role(node, Role::TypeParameter).is_some() {
            self.space();
            self.write_type_parameters(node)?;
            self.space();
        }

        if let Some(table) = &data.line_table {
            self.formatter
                .reset_line_number_offsets(OffsetToLineConverter::from_table(table));
        }

        // The printed name is the enclosing type's, which may differ from
        // the raw constructor name after renaming.
        let name_token = tree.child_by_role(node, Role::Name);
        let display_name = tree
            .parent(node)
            .filter(|&p| matches!(tree.kind(p), NodeKind::TypeDeclaration(_)))
            .and_then(|p| tree.child_by_role(p, Role::Name))
            .or(name_token)
            .and_then(|n| match tree.kind(n) {
                NodeKind::Identifier(name) => Some(name.clone()),
                _ => None,
            });
        if let (Some(token), Some(name)) = (name_token, display_name) {
            let annotation = tree.annotation(token);
            self.start_node(token)?;
            self.write_identifier(&name, annotation);
            self.end_node(token)?;
        }

        self.space_if(self.policy.space_before_constructor_declaration_parentheses);
        let parameters: Vec<_> = tree.children_by_role(node, Role::Parameter).collect();
        self.write_comma_separated_list_in_parens(
            &parameters,
            self.policy.space_within_method_declaration_parentheses,
        )?;

        self.write_throws_clause(node)?;
        self.write_method_body(tree.child_by_role(node, Role::Body))?;
        self.end_node(node)
    }

    fn write_throws_clause(&mut self, node: NodeId) -> Result {
        let thrown: Vec<_> = self.tree.children_by_role(node, Role::ThrownType).collect();
        if thrown.is_empty() {
            return Ok(());
        }
        self.space();
        self.write_keyword("throws");
        self.write_comma_separated_list(&thrown)
    }

    fn write_generated_marker(&mut self, data: &MethodData) -> Result {
        if !data.synthetic && !data.bridge {
            return Ok(());
        }
        self.space_if(self.last_written != LastWritten::Whitespace);
        self.formatter.write_comment(
            CommentKind::MultiLine,
            if data.bridge { " bridge " } else { " synthetic " },
        );
        self.space();
        Ok(())
    }

    fn visit_initializer_block(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.write_modifiers(node)?;
        self.write_method_body(self.tree.child_by_role(node, Role::Body))?;
        self.end_node(node)
    }

    fn visit_field(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.write_annotations(node, true)?;
        self.write_modifiers(node)?;
        let tree = self.tree;
        if let Some(field_type) = tree.child_by_role(node, Role::Type) {
            self.visit(field_type)?;
        }
        self.space();
        let variables: Vec<_> = tree.children_by_role(node, Role::Variable).collect();
        self.write_comma_separated_list(&variables)?;
        self.semicolon()?;
        self.end_node(node)
    }

    fn visit_parameter(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.write_annotations(node, false)?;
        let tree = self.tree;
        let parameter_type = tree.child_by_role(node, Role::Type);
        let name = tree.child_by_role(node, Role::Name);
        if let Some(parameter_type) = parameter_type {
            self.write_modifiers(node)?;
            self.visit(parameter_type)?;
            if name.is_some() {
                self.space();
            }
        }
        if let Some(name) = name {
            self.visit(name)?;
        }
        self.end_node(node)
    }

    fn visit_type_parameter(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.write_annotations(node, false)?;
        let tree = self.tree;
        if let Some(name) = tree.child_by_role(node, Role::Name) {
            self.visit(name)?;
        }
        if let Some(bound) = tree.child_by_role(node, Role::ExtendsBound) {
            self.write_keyword("extends");
            self.visit(bound)?;
        }
        self.end_node(node)
    }

    fn visit_annotation_use(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.space_if(self.last_written == LastWritten::KeywordOrIdentifier);
        self.formatter.write_identifier("@");
        self.last_written = LastWritten::Other;
        if let Some(annotation_type) = self.tree.child_by_role(node, Role::Type) {
            self.visit(annotation_type)?;
        }
        let arguments: Vec<_> = self.tree.children_by_role(node, Role::Argument).collect();
        if !arguments.is_empty() {
            self.write_comma_separated_list_in_parens(&arguments, false)?;
        }
        self.end_node(node)
    }

    fn visit_modifier(&mut self, node: NodeId, modifier: Modifier) -> Result {
        self.start_node(node)?;
        self.write_keyword(modifier.keyword());
        self.end_node(node)
    }

    // ── Statements ─────────────────────────────────────────────────────

    fn visit_block(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        let parent_kind = tree.parent(node).map(|p| tree.kind(p));

        let (style, enforcement) = match parent_kind {
            Some(NodeKind::ConstructorDeclaration(_)) => {
                (self.policy.constructor_brace_style, BraceEnforcement::AddBraces)
            }
            Some(NodeKind::MethodDeclaration(_)) => {
                (self.policy.method_brace_style, BraceEnforcement::AddBraces)
            }
            Some(NodeKind::InitializerBlock) => (
                self.policy.initializer_block_brace_style,
                BraceEnforcement::AddBraces,
            ),
            _ => {
                if tree.children(node).is_empty() {
                    // An empty free-standing block always collapses.
                    (BraceStyle::Banner, BraceEnforcement::AddBraces)
                } else {
                    let enforcement = match parent_kind {
                        Some(NodeKind::If) => self.policy.if_else_brace_enforcement,
                        Some(NodeKind::While) => self.policy.while_brace_enforcement,
                        _ => BraceEnforcement::AddBraces,
                    };
                    (self.policy.statement_brace_style, enforcement)
                }
            }
        };

        let printable: Vec<_> = tree
            .children(node)
            .iter()
            .copied()
            .filter(|&child| {
                tree.kind(child).is_statement()
                    || matches!(tree.kind(child), NodeKind::TypeDeclaration(_))
            })
            .collect();
        // Unwrapping is safe only for a lone statement with no trivia to
        // lose; otherwise braces stay.
        let trivia_free = tree
            .children(node)
            .iter()
            .all(|&child| !tree.role(child).is_trivia());
        let add_braces = !(enforcement == BraceEnforcement::RemoveBraces
            && printable.len() == 1
            && trivia_free);

        if add_braces {
            self.open_brace(style);
        } else {
            self.new_line();
            self.formatter.indent();
        }

        for &child in &printable {
            self.visit(child)?;
        }

        if add_braces {
            self.close_brace(style);
        } else {
            self.formatter.unindent();
        }

        let suppress_new_line = !add_braces
            || tree.parent(node).map_or(false, |p| {
                self.tree.kind(p).is_expression() || matches!(self.tree.kind(p), NodeKind::DoWhile)
            });
        if !suppress_new_line {
            self.new_line();
        }
        self.end_node(node)
    }

    fn visit_if(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("if");
        self.space_if(self.policy.space_before_if_parentheses);
        self.left_paren()?;
        self.space_if(self.policy.space_within_if_parentheses);
        if let Some(condition) = tree.child_by_role(node, Role::Condition) {
            self.visit(condition)?;
        }
        self.space_if(self.policy.space_within_if_parentheses);
        self.right_paren()?;
        self.write_embedded_statement(
            tree.child_by_role(node, Role::TrueBranch),
            self.policy.if_else_brace_enforcement,
        )?;

        if let Some(false_branch) = tree.child_by_role(node, Role::FalseBranch) {
            self.write_keyword("else");
            if matches!(tree.kind(false_branch), NodeKind::If) {
                self.visit(false_branch)?;
            } else {
                self.write_embedded_statement(
                    Some(false_branch),
                    self.policy.if_else_brace_enforcement,
                )?;
            }
        }
        self.end_node(node)
    }

    fn visit_while(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("while");
        self.space_if(self.policy.space_before_while_parentheses);
        self.left_paren()?;
        self.space_if(self.policy.space_within_while_parentheses);
        if let Some(condition) = tree.child_by_role(node, Role::Condition) {
            self.visit(condition)?;
        }
        self.space_if(self.policy.space_within_while_parentheses);
        self.right_paren()?;
        self.write_embedded_statement(
            tree.child_by_role(node, Role::EmbeddedStatement),
            self.policy.while_brace_enforcement,
        )?;
        self.end_node(node)
    }

    fn visit_do_while(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("do");
        self.write_embedded_statement(
            tree.child_by_role(node, Role::EmbeddedStatement),
            BraceEnforcement::AddBraces,
        )?;
        self.space_if(self.last_written != LastWritten::Whitespace);
        self.write_keyword("while");
        self.space_if(self.policy.space_before_while_parentheses);
        self.left_paren()?;
        self.space_if(self.policy.space_within_while_parentheses);
        if let Some(condition) = tree.child_by_role(node, Role::Condition) {
            self.visit(condition)?;
        }
        self.space_if(self.policy.space_within_while_parentheses);
        self.right_paren()?;
        self.semicolon()?;
        self.end_node(node)
    }

    fn visit_for(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("for");
        self.space_if(self.policy.space_before_for_parentheses);
        self.left_paren()?;
        self.space_if(self.policy.space_within_for_parentheses);

        let initializers: Vec<_> = tree.children_by_role(node, Role::Initializer).collect();
        self.write_comma_separated_list(&initializers)?;
        self.space_if(self.policy.space_before_for_semicolon);
        self.write_token(";", None, TokenClass::Delimiter)?;
        self.space_if(self.policy.space_after_for_semicolon);

        if let Some(condition) = tree.child_by_role(node, Role::Condition) {
            self.visit(condition)?;
        }
        self.space_if(self.policy.space_before_for_semicolon);
        self.write_token(";", None, TokenClass::Delimiter)?;

        let iterators: Vec<_> = tree.children_by_role(node, Role::Iterator).collect();
        if !iterators.is_empty() {
            self.space_if(self.policy.space_after_for_semicolon);
            self.write_comma_separated_list(&iterators)?;
        }

        self.space_if(self.policy.space_within_for_parentheses);
        self.right_paren()?;
        self.write_embedded_statement(
            tree.child_by_role(node, Role::EmbeddedStatement),
            BraceEnforcement::AddBraces,
        )?;
        self.end_node(node)
    }

    fn visit_for_each(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("for");
        self.space_if(self.policy.space_before_foreach_parentheses);
        self.left_paren()?;
        self.space_if(self.policy.space_within_foreach_parentheses);
        self.write_modifiers(node)?;
        if let Some(variable_type) = tree.child_by_role(node, Role::Type) {
            self.visit(variable_type)?;
        }
        self.space();
        if let Some(name) = tree.child_by_role(node, Role::Name) {
            self.visit(name)?;
        }
        self.space();
        self.write_token(":", None, TokenClass::Delimiter)?;
        self.space();
        if let Some(in_expression) = tree.child_by_role(node, Role::InExpression) {
            self.visit(in_expression)?;
        }
        self.space_if(self.policy.space_within_foreach_parentheses);
        self.right_paren()?;
        self.write_embedded_statement(
            tree.child_by_role(node, Role::EmbeddedStatement),
            BraceEnforcement::AddBraces,
        )?;
        self.end_node(node)
    }

    fn visit_try(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("try");

        let resources: Vec<_> = tree.children_by_role(node, Role::Resource).collect();
        if !resources.is_empty() {
            self.space();
            self.left_paren()?;
            for (index, &resource) in resources.iter().enumerate() {
                if index > 0 {
                    self.semicolon()?;
                    // Align continuation resources under the first, past
                    // the width of `try (`.
                    for _ in 0..5 {
                        self.space();
                    }
                }
                self.write_variable_declaration(resource, false)?;
            }
            self.right_paren()?;
        }

        if let Some(try_block) = tree.child_by_role(node, Role::TryBlock) {
            self.visit(try_block)?;
        }
        let catch_clauses: Vec<_> = tree.children_by_role(node, Role::CatchClause).collect();
        for &clause in &catch_clauses {
            self.visit(clause)?;
        }
        if let Some(finally_block) = tree.child_by_role(node, Role::FinallyBlock) {
            self.write_keyword("finally");
            self.visit(finally_block)?;
        }
        self.end_node(node)
    }

    fn visit_catch_clause(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("catch");

        let exception_types: Vec<_> = tree.children_by_role(node, Role::ExceptionType).collect();
        if !exception_types.is_empty() {
            self.space_if(self.policy.space_before_catch_parentheses);
            self.left_paren()?;
            self.space_if(self.policy.space_within_catch_parentheses);
            self.write_pipe_separated_list(&exception_types)?;
            if let Some(name) = tree.child_by_role(node, Role::Name) {
                self.space();
                self.visit(name)?;
            }
            self.space_if(self.policy.space_within_catch_parentheses);
            self.right_paren()?;
        }

        if let Some(body) = tree.child_by_role(node, Role::Body) {
            self.visit(body)?;
        }
        self.end_node(node)
    }

    fn visit_switch(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("switch");
        self.space_if(self.policy.space_before_switch_parentheses);
        self.left_paren()?;
        self.space_if(self.policy.space_within_switch_parentheses);
        if let Some(expression) = tree.child_by_role(node, Role::Expression) {
            self.visit(expression)?;
        }
        self.space_if(self.policy.space_within_switch_parentheses);
        self.right_paren()?;

        let style = self.policy.statement_brace_style;
        self.open_brace(style);
        if self.policy.indent_switch_body {
            self.formatter.indent();
        }
        let sections: Vec<_> = tree.children_by_role(node, Role::SwitchSection).collect();
        for &section in &sections {
            self.visit(section)?;
        }
        if self.policy.indent_switch_body {
            self.formatter.unindent();
        }
        self.close_brace(style);
        self.new_line();
        self.end_node(node)
    }

    fn visit_switch_section(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;

        let labels: Vec<_> = tree.children_by_role(node, Role::CaseLabel).collect();
        for (index, &label) in labels.iter().enumerate() {
            if index > 0 {
                self.new_line();
            }
            self.visit(label)?;
        }

        let statements: Vec<_> = tree.children_by_role(node, Role::Statement).collect();
        let is_block =
            statements.len() == 1 && matches!(tree.kind(statements[0]), NodeKind::Block);

        if self.policy.indent_case_body && !is_block {
            self.formatter.indent();
        }
        if !is_block {
            self.new_line();
        }
        for &statement in &statements {
            self.visit(statement)?;
        }
        if self.policy.indent_case_body && !is_block {
            self.formatter.unindent();
        }
        self.end_node(node)
    }

    fn visit_case_label(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        match self.tree.child_by_role(node, Role::Expression) {
            Some(expression) => {
                self.write_keyword("case");
                self.space();
                self.visit(expression)?;
            }
            None => self.write_keyword("default"),
        }
        self.write_token(":", None, TokenClass::Delimiter)?;
        self.end_node(node)
    }

    fn visit_label_statement(&mut self, node: NodeId, label: &str) -> Result {
        self.start_node(node)?;
        self.write_identifier(label, None);
        self.write_token(":", None, TokenClass::Delimiter)?;

        // With no statement following in the same container, a trailing
        // semicolon keeps the output syntactically valid.
        let has_following_statement = self
            .tree
            .next_sibling_by_role(node, self.tree.role(node))
            .is_some();
        if !has_following_statement {
            self.write_token(";", Some(Role::Semicolon), TokenClass::Delimiter)?;
        }
        self.new_line();
        self.end_node(node)
    }

    fn visit_labeled_statement(&mut self, node: NodeId, label: &str) -> Result {
        let tree = self.tree;
        let statement = tree.child_by_role(node, Role::Statement);
        let is_loop = statement.map_or(false, |s| {
            matches!(
                tree.kind(s),
                NodeKind::While | NodeKind::DoWhile | NodeKind::For | NodeKind::ForEach
            )
        });

        self.start_node(node)?;
        // Loop labels sit one level out from the loop they name, when
        // there is a level to give back. At the margin the label stays put.
        let outdent = is_loop && self.formatter.indent_depth() > 0;
        if outdent {
            self.formatter.unindent();
        }
        self.write_identifier(label, None);
        self.write_token(":", None, TokenClass::Delimiter)?;
        if outdent {
            self.formatter.indent();
        }
        if is_loop {
            self.new_line();
        }
        if let Some(statement) = statement {
            self.visit(statement)?;
        }
        self.end_node(node)
    }

    fn visit_jump(&mut self, node: NodeId, keyword: &str, label: Option<&str>) -> Result {
        self.start_node(node)?;
        self.write_keyword(keyword);
        if let Some(label) = label {
            self.write_identifier(label, None);
        }
        self.semicolon()?;
        self.end_node(node)
    }

    fn visit_value_statement(&mut self, node: NodeId, keyword: &str) -> Result {
        self.start_node(node)?;
        self.write_keyword(keyword);
        if let Some(expression) = self.tree.child_by_role(node, Role::Expression) {
            self.space();
            self.visit(expression)?;
        }
        self.semicolon()?;
        self.end_node(node)
    }

    fn visit_synchronized(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("synchronized");
        self.space_if(self.policy.space_before_synchronized_parentheses);
        self.left_paren()?;
        self.space_if(self.policy.space_within_synchronized_parentheses);
        if let Some(expression) = tree.child_by_role(node, Role::Expression) {
            self.visit(expression)?;
        }
        self.space_if(self.policy.space_within_synchronized_parentheses);
        self.right_paren()?;
        self.write_embedded_statement(
            tree.child_by_role(node, Role::EmbeddedStatement),
            BraceEnforcement::AddBraces,
        )?;
        self.end_node(node)
    }

    fn visit_assert(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_keyword("assert");
        self.space();
        if let Some(condition) = tree.child_by_role(node, Role::Condition) {
            self.visit(condition)?;
        }
        if let Some(message) = tree.child_by_role(node, Role::Message) {
            self.space();
            self.write_token(":", None, TokenClass::Delimiter)?;
            self.space();
            self.visit(message)?;
        }
        self.semicolon()?;
        self.end_node(node)
    }

    fn write_variable_declaration(&mut self, node: NodeId, with_semicolon: bool) -> Result {
        self.start_node(node)?;
        self.write_modifiers(node)?;
        let tree = self.tree;
        if let Some(declared_type) = tree.child_by_role(node, Role::Type) {
            self.visit(declared_type)?;
        }
        self.space();
        let variables: Vec<_> = tree.children_by_role(node, Role::Variable).collect();
        self.write_comma_separated_list(&variables)?;
        if with_semicolon {
            self.semicolon()?;
        }
        self.end_node(node)
    }

    fn visit_variable_initializer(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(name) = tree.child_by_role(node, Role::Name) {
            self.visit(name)?;
        }
        if let Some(initializer) = tree.child_by_role(node, Role::Initializer) {
            self.space_if(self.policy.space_around_assignment);
            self.write_token("=", None, TokenClass::Operator)?;
            self.space_if(self.policy.space_around_assignment);
            self.visit(initializer)?;
        }
        self.end_node(node)
    }

    // ── Expressions ────────────────────────────────────────────────────

    fn visit_identifier(&mut self, node: NodeId, name: &str) -> Result {
        self.start_node(node)?;
        self.write_identifier(name, self.tree.annotation(node));
        self.write_type_arguments(node)?;
        self.end_node(node)
    }

    fn visit_literal(&mut self, node: NodeId, value: &LiteralValue) -> Result {
        self.start_node(node)?;
        match value {
            LiteralValue::Verbatim(text) => {
                self.formatter.write_literal(text);
                self.last_written = LastWritten::Other;
            }
            LiteralValue::Int(i) => {
                let long_value = i64::from(*i);
                if long_value != -1 && self.in_bitwise_context(node) {
                    let text = format!("0x{:X}", *i as u32);
                    self.formatter.write_literal(&text);
                    self.last_written = LastWritten::Other;
                } else {
                    self.write_integer(long_value, i.to_string(), false);
                }
            }
            LiteralValue::Long(l) => {
                if *l != -1 && self.in_bitwise_context(node) {
                    let text = format!("0x{:X}L", *l as u64);
                    self.formatter.write_literal(&text);
                    self.last_written = LastWritten::KeywordOrIdentifier;
                } else {
                    self.write_integer(*l, l.to_string(), true);
                }
            }
            _ => self.write_primitive_value(value)?,
        }
        self.end_node(node)
    }

    fn write_primitive_value(&mut self, value: &LiteralValue) -> Result {
        match value {
            LiteralValue::Bool(true) => self.write_keyword("true"),
            LiteralValue::Bool(false) => self.write_keyword("false"),
            LiteralValue::Str(text) => {
                self.formatter
                    .write_text_literal(&escape_string_literal(text));
                self.last_written = LastWritten::Other;
            }
            LiteralValue::Char(ch) => {
                self.formatter.write_text_literal(&escape_char_literal(*ch));
                self.last_written = LastWritten::Other;
            }
            LiteralValue::Float(f) => {
                if f.is_infinite() || f.is_nan() {
                    return self.write_special_float("Float", f64::from(*f));
                }
                // The `f` suffix can glue onto a following word just like
                // the `d` below.
                self.formatter.write_literal(&format!("{f}f"));
                self.last_written = LastWritten::KeywordOrIdentifier;
            }
            LiteralValue::Double(d) => {
                if d.is_infinite() || d.is_nan() {
                    return self.write_special_float("Double", *d);
                }
                let mut text = format!("{d}");
                if !text.contains('.') && !text.contains('e') && !text.contains('E') {
                    text.push('d');
                }
                self.formatter.write_literal(&text);
                self.last_written = LastWritten::KeywordOrIdentifier;
            }
            LiteralValue::Int(i) => self.write_integer(i64::from(*i), i.to_string(), false),
            LiteralValue::Long(l) => self.write_integer(*l, l.to_string(), true),
            LiteralValue::Verbatim(text) => {
                self.formatter.write_literal(text);
                self.last_written = LastWritten::Other;
            }
        }
        Ok(())
    }

    /// Infinities and NaN have no literal form; they print as reads of the
    /// wrapper-class constants.
    fn write_special_float(&mut self, wrapper: &str, value: f64) -> Result {
        self.write_keyword(wrapper);
        self.write_token(".", None, TokenClass::Delimiter)?;
        let constant = if value == f64::INFINITY {
            "POSITIVE_INFINITY"
        } else if value == f64::NEG_INFINITY {
            "NEGATIVE_INFINITY"
        } else {
            "NaN"
        };
        self.write_identifier(constant, None);
        Ok(())
    }

    fn write_integer(&mut self, long_value: i64, decimal: String, is_long: bool) {
        let bits = long_value as u64;
        let mut write_hex = MAGIC_VALUES_64.contains(&bits);
        if !write_hex && bits & 0xFFFF_FFFF_0000_0000 == 0 {
            write_hex = MAGIC_VALUES_32.contains(&(bits as u32));
        }
        let mut text = if write_hex {
            format!("0x{bits:X}")
        } else {
            decimal
        };
        if is_long {
            text.push('L');
        }
        self.formatter.write_literal(&text);
        self.last_written = if is_long {
            LastWritten::KeywordOrIdentifier
        } else {
            LastWritten::Other
        };
    }

    fn in_bitwise_context(&self, node: NodeId) -> bool {
        self.is_bitwise_context(self.tree.parent(node), Some(node))
    }

    fn is_bitwise_context(&self, parent: Option<NodeId>, node: Option<NodeId>) -> bool {
        let tree = self.tree;
        let Some(parent) = parent.map(|p| self.skip_parentheses_up(p)) else {
            return false;
        };
        let node = node.map(|n| self.skip_parentheses_up(n));

        let operator = match tree.kind(parent) {
            NodeKind::Binary(op) => Some(*op),
            NodeKind::Assignment(op) => op.corresponding_binary(),
            NodeKind::Unary(UnaryOp::BitNot) => return true,
            _ => None,
        };
        let Some(operator) = operator else {
            return false;
        };

        match operator {
            BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => true,
            BinaryOp::Equality | BinaryOp::Inequality => {
                // A literal compared against a bitwise expression inherits
                // the comparand's context.
                let (Some(node), NodeKind::Binary(_)) = (node, tree.kind(parent)) else {
                    return false;
                };
                let left = tree.child_by_role(parent, Role::Left);
                let right = tree.child_by_role(parent, Role::Right);
                let comparand = if left == Some(node) { right } else { left };
                comparand.map_or(false, |c| {
                    self.is_bitwise_context(Some(self.skip_parentheses_down(c)), None)
                })
            }
            _ => false,
        }
    }

    fn skip_parentheses_up(&self, mut id: NodeId) -> NodeId {
        while matches!(self.tree.kind(id), NodeKind::Parenthesized) {
            match self.tree.parent(id) {
                Some(parent) => id = parent,
                None => break,
            }
        }
        id
    }

    fn skip_parentheses_down(&self, mut id: NodeId) -> NodeId {
        while matches!(self.tree.kind(id), NodeKind::Parenthesized) {
            match self.tree.child_by_role(id, Role::Expression) {
                Some(inner) => id = inner,
                None => break,
            }
        }
        id
    }

    fn visit_unary(&mut self, node: NodeId, op: UnaryOp) -> Result {
        self.start_node(node)?;
        if !op.is_postfix() {
            self.write_token(op.token(), None, TokenClass::Operator)?;
        }
        if let Some(expression) = self.tree.child_by_role(node, Role::Expression) {
            self.visit(expression)?;
        }
        if op.is_postfix() {
            self.write_token(op.token(), None, TokenClass::Operator)?;
        }
        self.end_node(node)
    }

    fn binary_space_policy(&self, op: BinaryOp) -> bool {
        match op {
            BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
                self.policy.space_around_bitwise_operator
            }
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr => self.policy.space_around_logical_operator,
            BinaryOp::GreaterThan
            | BinaryOp::GreaterThanOrEqual
            | BinaryOp::LessThan
            | BinaryOp::LessThanOrEqual => self.policy.space_around_relational_operator,
            BinaryOp::Equality | BinaryOp::Inequality => self.policy.space_around_equality_operator,
            BinaryOp::Add | BinaryOp::Subtract => self.policy.space_around_additive_operator,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulus => {
                self.policy.space_around_multiplicative_operator
            }
            BinaryOp::ShiftLeft | BinaryOp::ShiftRight | BinaryOp::UnsignedShiftRight => {
                self.policy.space_around_shift_operator
            }
        }
    }

    fn visit_binary(&mut self, node: NodeId, op: BinaryOp) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(left) = tree.child_by_role(node, Role::Left) {
            self.visit(left)?;
        }
        let spaced = self.binary_space_policy(op);
        self.space_if(spaced);
        self.write_token(op.token(), None, TokenClass::Operator)?;
        self.space_if(spaced);
        if let Some(right) = tree.child_by_role(node, Role::Right) {
            self.visit(right)?;
        }
        self.end_node(node)
    }

    fn visit_assignment(&mut self, node: NodeId, op: AssignOp) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(left) = tree.child_by_role(node, Role::Left) {
            self.visit(left)?;
        }
        self.space_if(self.policy.space_around_assignment);
        self.write_token(op.token(), None, TokenClass::Operator)?;
        self.space_if(self.policy.space_around_assignment);
        if let Some(right) = tree.child_by_role(node, Role::Right) {
            self.visit(right)?;
        }
        self.end_node(node)
    }

    fn visit_conditional(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(condition) = tree.child_by_role(node, Role::Condition) {
            self.visit(condition)?;
        }
        self.space_if(self.policy.space_before_conditional_question_mark);
        self.write_token("?", None, TokenClass::Operator)?;
        self.space_if(self.policy.space_after_conditional_question_mark);
        if let Some(true_branch) = tree.child_by_role(node, Role::TrueBranch) {
            self.visit(true_branch)?;
        }
        self.space_if(self.policy.space_before_conditional_colon);
        self.write_token(":", None, TokenClass::Operator)?;
        self.space_if(self.policy.space_after_conditional_colon);
        if let Some(false_branch) = tree.child_by_role(node, Role::FalseBranch) {
            self.visit(false_branch)?;
        }
        self.end_node(node)
    }

    fn visit_lambda(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        let parameters: Vec<_> = tree.children_by_role(node, Role::Parameter).collect();
        let needs_parens = parameters.len() != 1
            || tree.child_by_role(parameters[0], Role::Type).is_some();
        if needs_parens {
            self.write_comma_separated_list_in_parens(
                &parameters,
                self.policy.space_within_method_declaration_parentheses,
            )?;
        } else {
            self.visit(parameters[0])?;
        }
        self.space();
        self.write_token("->", None, TokenClass::Operator)?;
        if let Some(body) = tree.child_by_role(node, Role::Body) {
            if !matches!(tree.kind(body), NodeKind::Block) {
                self.space();
            }
            self.visit(body)?;
        }
        self.end_node(node)
    }

    fn write_initializer_elements(&mut self, elements: &[NodeId]) -> Result {
        if elements.is_empty() {
            self.write_token("{", None, TokenClass::Delimiter)?;
            return self.write_token("}", None, TokenClass::Delimiter);
        }

        let wrap = self.policy.array_initializer_wrapping == Wrapping::WrapAlways;
        let style = if wrap {
            BraceStyle::NextLine
        } else {
            BraceStyle::Banner
        };
        self.open_brace(style);

        for (index, &element) in elements.iter().enumerate() {
            if index == 0 {
                if style == BraceStyle::Banner {
                    self.space();
                }
            } else {
                self.comma(Some(element), wrap)?;
                if wrap {
                    self.new_line();
                }
            }
            self.visit(element)?;
        }

        self.optional_comma()?;
        if wrap {
            self.new_line();
        }
        self.close_brace(style);
        Ok(())
    }

    fn visit_array_creation(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        let dimensions: Vec<_> = tree.children_by_role(node, Role::Dimension).collect();
        let initializer = tree.child_by_role(node, Role::Initializer);

        // Inside an initializer the element type is implied by context.
        let need_type = !(dimensions.is_empty()
            && tree.parent(node).map_or(false, |p| {
                matches!(
                    tree.kind(p),
                    NodeKind::ArrayInitializer | NodeKind::VariableInitializer
                )
            }));

        if need_type {
            self.write_keyword("new");
            if let Some(element_type) = tree.child_by_role(node, Role::Type) {
                self.visit(element_type)?;
            }
            for &dimension in &dimensions {
                self.write_token("[", None, TokenClass::Delimiter)?;
                self.visit(dimension)?;
                self.write_token("]", None, TokenClass::Delimiter)?;
            }
            let specifiers: Vec<_> = tree.children_by_role(node, Role::ArraySpecifier).collect();
            for &specifier in &specifiers {
                self.visit(specifier)?;
            }
            if initializer.is_some() {
                self.space();
            }
        }

        if let Some(initializer) = initializer {
            self.visit(initializer)?;
        }
        self.end_node(node)
    }

    fn visit_invocation(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(target) = tree.child_by_role(node, Role::Target) {
            self.visit(target)?;
        }
        self.space_if(self.policy.space_before_method_call_parentheses);
        let arguments: Vec<_> = tree.children_by_role(node, Role::Argument).collect();
        self.write_comma_separated_list_in_parens(
            &arguments,
            self.policy.space_within_method_call_parentheses,
        )?;
        self.end_node(node)
    }

    fn visit_member_reference(&mut self, node: NodeId, name: &str) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(target) = tree.child_by_role(node, Role::Target) {
            self.visit(target)?;
        }
        self.write_token(".", None, TokenClass::Delimiter)?;
        self.write_type_arguments(node)?;
        self.write_identifier(name, tree.annotation(node));
        self.end_node(node)
    }

    fn visit_indexer(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(target) = tree.child_by_role(node, Role::Target) {
            self.visit(target)?;
        }
        self.space_if(self.policy.space_before_method_call_parentheses);
        self.write_token("[", None, TokenClass::Delimiter)?;
        if let Some(argument) = tree.child_by_role(node, Role::Argument) {
            self.visit(argument)?;
        }
        self.write_token("]", None, TokenClass::Delimiter)?;
        self.end_node(node)
    }

    fn visit_cast(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.left_paren()?;
        self.space_if(self.policy.space_within_cast_parentheses);
        if let Some(target_type) = tree.child_by_role(node, Role::Type) {
            self.visit(target_type)?;
        }
        self.space_if(self.policy.space_within_cast_parentheses);
        self.right_paren()?;
        self.space_if(self.policy.space_after_typecast);
        if let Some(expression) = tree.child_by_role(node, Role::Expression) {
            self.visit(expression)?;
        }
        self.end_node(node)
    }

    fn visit_parenthesized(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.left_paren()?;
        self.space_if(self.policy.space_within_parentheses);
        if let Some(expression) = self.tree.child_by_role(node, Role::Expression) {
            self.visit(expression)?;
        }
        self.space_if(self.policy.space_within_parentheses);
        self.right_paren()?;
        self.end_node(node)
    }

    fn visit_object_creation(&mut self, node: NodeId, anonymous: bool) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(target) = tree.child_by_role(node, Role::Target) {
            self.visit(target)?;
            self.write_token(".", None, TokenClass::Delimiter)?;
        }
        self.write_keyword("new");
        if let Some(created_type) = tree.child_by_role(node, Role::Type) {
            self.visit(created_type)?;
        }
        self.space_if(self.policy.space_before_method_call_parentheses);
        let arguments: Vec<_> = tree.children_by_role(node, Role::Argument).collect();
        self.write_comma_separated_list_in_parens(
            &arguments,
            self.policy.space_within_method_call_parentheses,
        )?;
        if anonymous {
            if let Some(declaration) = tree.child_by_role(node, Role::Body) {
                self.print_nested(declaration)?;
            }
        }
        self.end_node(node)
    }

    fn visit_instance_of(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(expression) = tree.child_by_role(node, Role::Expression) {
            self.visit(expression)?;
        }
        self.space();
        self.write_keyword("instanceof");
        if let Some(tested_type) = tree.child_by_role(node, Role::Type) {
            self.visit(tested_type)?;
        }
        self.end_node(node)
    }

    fn visit_method_group(&mut self, node: NodeId, name: &str) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        if let Some(target) = tree.child_by_role(node, Role::Target) {
            self.visit(target)?;
        }
        self.write_token("::", None, TokenClass::Delimiter)?;
        if is_keyword(name) {
            self.write_keyword(name);
        } else {
            self.write_identifier(name, tree.annotation(node));
        }
        self.end_node(node)
    }

    fn visit_self_reference(&mut self, node: NodeId, keyword: &str) -> Result {
        self.start_node(node)?;
        if let Some(target) = self.tree.child_by_role(node, Role::Target) {
            self.visit(target)?;
            self.write_token(".", None, TokenClass::Delimiter)?;
        }
        self.write_keyword(keyword);
        self.end_node(node)
    }

    fn visit_class_of(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        if let Some(subject_type) = self.tree.child_by_role(node, Role::Type) {
            self.visit(subject_type)?;
        }
        self.write_token(".", None, TokenClass::Delimiter)?;
        self.write_keyword("class");
        self.end_node(node)
    }

    // ── Types ──────────────────────────────────────────────────────────

    fn visit_wildcard_type(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        let tree = self.tree;
        self.write_token("?", None, TokenClass::Delimiter)?;

        let extends_bounds: Vec<_> = tree.children_by_role(node, Role::ExtendsBound).collect();
        if !extends_bounds.is_empty() {
            self.space();
            self.write_keyword("extends");
            self.write_pipe_separated_list(&extends_bounds)?;
        } else {
            let super_bounds: Vec<_> = tree.children_by_role(node, Role::SuperBound).collect();
            if !super_bounds.is_empty() {
                self.space();
                self.write_keyword("super");
                self.write_pipe_separated_list(&super_bounds)?;
            }
        }
        self.end_node(node)
    }

    fn visit_array_specifier(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.write_token("[", None, TokenClass::Delimiter)?;
        let commas: Vec<_> = self.tree.children_by_role(node, Role::Comma).collect();
        for &comma in &commas {
            self.write_specials_up_to_node(comma)?;
            self.formatter.write(",");
            self.last_written = LastWritten::Other;
        }
        self.write_token("]", None, TokenClass::Delimiter)?;
        self.end_node(node)
    }

    // ── Patterns ───────────────────────────────────────────────────────

    fn visit_any_pattern(&mut self, node: NodeId, group: Option<&str>) -> Result {
        self.start_node(node)?;
        if let Some(group) = group {
            self.write_identifier(group, None);
            self.write_token(":", None, TokenClass::Delimiter)?;
            self.write_identifier("*", None);
        }
        self.end_node(node)
    }

    fn visit_named_pattern(&mut self, node: NodeId, group: &str) -> Result {
        self.start_node(node)?;
        if !group.is_empty() {
            self.write_identifier(group, None);
            self.write_token(":", None, TokenClass::Delimiter)?;
        }
        if let Some(pattern) = self.tree.child_by_role(node, Role::Pattern) {
            self.visit(pattern)?;
        }
        self.end_node(node)
    }

    fn visit_wrapped_pattern(&mut self, node: NodeId, keyword: &str) -> Result {
        self.start_node(node)?;
        self.write_keyword(keyword);
        self.left_paren()?;
        if let Some(pattern) = self.tree.child_by_role(node, Role::Pattern) {
            self.visit(pattern)?;
        }
        self.right_paren()?;
        self.end_node(node)
    }

    fn visit_repeat_pattern(&mut self, node: NodeId, min: u32, max: u32) -> Result {
        self.start_node(node)?;
        self.write_keyword("repeat");
        self.left_paren()?;
        if min != 0 || max != u32::MAX {
            self.write_identifier(&min.to_string(), None);
            self.write_token(",", None, TokenClass::Delimiter)?;
            self.write_identifier(&max.to_string(), None);
            self.write_token(",", None, TokenClass::Delimiter)?;
        }
        if let Some(pattern) = self.tree.child_by_role(node, Role::Pattern) {
            self.visit(pattern)?;
        }
        self.right_paren()?;
        self.end_node(node)
    }

    fn visit_choice_pattern(&mut self, node: NodeId) -> Result {
        self.start_node(node)?;
        self.write_keyword("choice");
        self.space();
        self.left_paren()?;
        self.new_line();
        self.formatter.indent();

        let alternatives: Vec<_> = self.tree.children_by_role(node, Role::Alternative).collect();
        for (index, &alternative) in alternatives.iter().enumerate() {
            self.visit(alternative)?;
            if index + 1 < alternatives.len() {
                self.write_token(",", None, TokenClass::Delimiter)?;
            }
            self.new_line();
        }

        self.formatter.unindent();
        self.right_paren()?;
        self.end_node(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_is_sorted() {
        let mut sorted = KEYWORDS;
        sorted.sort_unstable();
        assert_eq!(sorted, KEYWORDS);
    }

    #[test]
    fn keyword_lookup() {
        assert!(is_keyword("while"));
        assert!(is_keyword("instanceof"));
        assert!(!is_keyword("value"));
        assert!(!is_keyword(""));
    }

    #[test]
    fn magic_value_membership() {
        assert!(MAGIC_VALUES_32.contains(&0xCAFEBABE));
        assert!(MAGIC_VALUES_64.contains(&0xBADC0FFEE0DDF00D));
        assert!(!MAGIC_VALUES_32.contains(&0x12345678));
    }

    #[test]
    fn letter_suffixed_literals_space_off_a_following_word() {
        use crate::formatter::{LineNumberMode, TextFormatter};
        use crate::output::PlainTextOutput;

        let tree = Ast::new();
        let policy = FormattingOptions::default();
        let mut out = PlainTextOutput::new();
        {
            let mut formatter = TextFormatter::new(&mut out, LineNumberMode::Plain);
            let mut visitor = OutputVisitor::new(&tree, &policy, &mut formatter);
            visitor
                .write_primitive_value(&LiteralValue::Float(1.5))
                .unwrap();
            visitor.write_identifier("mask", None);
            visitor.space();
            visitor.write_integer(7, "7".to_string(), true);
            visitor.write_keyword("instanceof");
            visitor.space();
            visitor
                .write_primitive_value(&LiteralValue::Double(5.0))
                .unwrap();
            visitor.write_identifier("scale", None);
        }
        assert_eq!(out.as_str(), "1.5f mask 7L instanceof 5d scale");
    }
}
