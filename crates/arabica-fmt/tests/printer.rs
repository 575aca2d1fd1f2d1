//! Integration tests driving the printer over hand-built trees.
//!
//! Each test constructs a small arena tree the way the bytecode front end
//! would and checks the emitted text or the collected artifacts.

use arabica_ast::{
    Ast, BinaryOp, ClassType, CommentKind, LiteralValue, MethodData, Modifier, NodeId, NodeKind,
    Role, TokenKind, UnaryOp,
};
use arabica_common::{LineNumberTable, TextLocation};
use arabica_fmt::{
    print_tree, print_tree_with, BraceEnforcement, BraceStyle, EmitError, FormattingOptions,
    LineNumberMode, Wrapping,
};
use insta::assert_snapshot;

fn text(tree: &Ast) -> String {
    print_tree(tree, &FormattingOptions::default()).unwrap().text
}

fn text_with(tree: &Ast, options: &FormattingOptions) -> String {
    print_tree(tree, options).unwrap().text
}

fn ident(tree: &mut Ast, parent: NodeId, role: Role, name: &str) -> NodeId {
    tree.add_child(parent, role, NodeKind::Identifier(name.to_string()))
}

fn simple_type(tree: &mut Ast, parent: NodeId, role: Role, name: &str, primitive: bool) -> NodeId {
    tree.add_child(
        parent,
        role,
        NodeKind::SimpleType {
            name: name.to_string(),
            primitive,
        },
    )
}

/// `name();` as a statement child of `parent`.
fn call_statement(tree: &mut Ast, parent: NodeId, role: Role, name: &str) -> NodeId {
    let statement = tree.add_child(parent, role, NodeKind::ExpressionStatement);
    let invocation = tree.add_child(statement, Role::Expression, NodeKind::Invocation);
    ident(tree, invocation, Role::Target, name);
    statement
}

// ── Whole-unit output ──────────────────────────────────────────────────

fn greeter_unit() -> Ast {
    let mut tree = Ast::new();
    let unit = tree.add_root(NodeKind::CompilationUnit);

    let package = tree.add_child(unit, Role::Package, NodeKind::PackageDeclaration);
    ident(&mut tree, package, Role::Identifier, "com");
    ident(&mut tree, package, Role::Identifier, "example");

    let import = tree.add_child(unit, Role::Import, NodeKind::ImportDeclaration);
    ident(&mut tree, import, Role::Identifier, "java");
    ident(&mut tree, import, Role::Identifier, "util");
    ident(&mut tree, import, Role::Identifier, "List");

    let class = tree.add_child(unit, Role::Member, NodeKind::TypeDeclaration(ClassType::Class));
    tree.add_child(class, Role::Modifier, NodeKind::Modifier(Modifier::Public));
    ident(&mut tree, class, Role::Name, "Greeter");

    let field = tree.add_child(class, Role::Member, NodeKind::FieldDeclaration);
    tree.add_child(field, Role::Modifier, NodeKind::Modifier(Modifier::Private));
    simple_type(&mut tree, field, Role::Type, "int", true);
    let variable = tree.add_child(field, Role::Variable, NodeKind::VariableInitializer);
    ident(&mut tree, variable, Role::Name, "count");
    tree.add_child(
        variable,
        Role::Initializer,
        NodeKind::Literal(LiteralValue::Int(0)),
    );

    let method = tree.add_child(
        class,
        Role::Member,
        NodeKind::MethodDeclaration(MethodData::default()),
    );
    tree.add_child(method, Role::Modifier, NodeKind::Modifier(Modifier::Public));
    simple_type(&mut tree, method, Role::ReturnType, "void", true);
    ident(&mut tree, method, Role::Name, "greet");
    tree.add_child(method, Role::Body, NodeKind::Block);

    tree
}

#[test]
fn class_with_field_and_method() {
    let tree = greeter_unit();
    assert_snapshot!(text(&tree), @r"
    package com.example;

    import java.util.List;

    public class Greeter
    {
        private int count = 0;

        public void greet() {
        }
    }
    ");
}

#[test]
fn output_is_deterministic() {
    let tree = greeter_unit();
    let first = print_tree(&tree, &FormattingOptions::default()).unwrap();
    let second = print_tree(&tree, &FormattingOptions::default()).unwrap();
    assert_eq!(first.text, second.text);
    assert_eq!(first.line_positions, second.line_positions);

    let opens = first.text.matches('{').count();
    let closes = first.text.matches('}').count();
    assert_eq!(opens, closes, "unbalanced braces in:\n{}", first.text);
}

#[test]
fn start_locations_point_at_first_output() {
    let mut tree = Ast::new();
    let unit = tree.add_root(NodeKind::CompilationUnit);
    let class = tree.add_child(unit, Role::Member, NodeKind::TypeDeclaration(ClassType::Class));
    let name = ident(&mut tree, class, Role::Name, "Example");

    let result = print_tree(&tree, &FormattingOptions::default()).unwrap();
    assert_eq!(result.start_locations.get(&class), Some(&TextLocation::new(1, 1)));
    // The name is stamped right after `class`, before the separating space.
    assert_eq!(result.start_locations.get(&name), Some(&TextLocation::new(1, 6)));
}

// ── Token adjacency ────────────────────────────────────────────────────

#[test]
fn unary_plus_after_addition_keeps_its_space() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Binary(BinaryOp::Add));
    ident(&mut tree, root, Role::Left, "a");
    let unary = tree.add_child(root, Role::Right, NodeKind::Unary(UnaryOp::Plus));
    ident(&mut tree, unary, Role::Expression, "b");

    assert_eq!(text(&tree), "a + +b");

    // Even with operator spacing off, `+ +` never fuses into `++`.
    let mut options = FormattingOptions::default();
    options.space_around_additive_operator = false;
    assert_eq!(text_with(&tree, &options), "a+ +b");
}

#[test]
fn unary_minus_after_subtraction_keeps_its_space() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Binary(BinaryOp::Subtract));
    ident(&mut tree, root, Role::Left, "a");
    let unary = tree.add_child(root, Role::Right, NodeKind::Unary(UnaryOp::Minus));
    ident(&mut tree, unary, Role::Expression, "b");

    let mut options = FormattingOptions::default();
    options.space_around_additive_operator = false;
    assert_eq!(text_with(&tree, &options), "a- -b");
}

#[test]
fn adjacent_ampersands_keep_their_space() {
    // The inner operand's left side is absent, so its `&` lands right
    // after the outer one.
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Binary(BinaryOp::BitAnd));
    ident(&mut tree, root, Role::Left, "a");
    let inner = tree.add_child(root, Role::Right, NodeKind::Binary(BinaryOp::BitAnd));
    ident(&mut tree, inner, Role::Right, "b");

    let mut options = FormattingOptions::default();
    options.space_around_bitwise_operator = false;
    assert_eq!(text_with(&tree, &options), "a& &b");
}

#[test]
fn adjacent_question_marks_keep_their_space() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Conditional);
    ident(&mut tree, root, Role::Condition, "a");
    let inner = tree.add_child(root, Role::TrueBranch, NodeKind::Conditional);
    ident(&mut tree, inner, Role::TrueBranch, "b");
    ident(&mut tree, inner, Role::FalseBranch, "c");
    ident(&mut tree, root, Role::FalseBranch, "d");

    let mut options = FormattingOptions::default();
    options.space_before_conditional_question_mark = false;
    options.space_after_conditional_question_mark = false;
    options.space_before_conditional_colon = false;
    options.space_after_conditional_colon = false;
    assert_eq!(text_with(&tree, &options), "a? ?b:c:d");
}

#[test]
fn division_followed_by_comment_does_not_open_one() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Block);
    let statement = tree.add_child(root, Role::Statement, NodeKind::ExpressionStatement);
    let binary = tree.add_child(statement, Role::Expression, NodeKind::Binary(BinaryOp::Divide));
    ident(&mut tree, binary, Role::Left, "a");
    tree.add_child(
        binary,
        Role::Comment,
        NodeKind::Comment {
            kind: CommentKind::MultiLine,
            text: "c".to_string(),
        },
    );
    ident(&mut tree, binary, Role::Right, "b");

    let mut options = FormattingOptions::default();
    options.space_around_multiplicative_operator = false;
    let out = text_with(&tree, &options);
    assert!(out.contains("a/ /*c*/"), "got: {out}");
}

// ── Comments and blank lines ───────────────────────────────────────────

#[test]
fn comment_between_statements_stays_between_them() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Block);
    call_statement(&mut tree, root, Role::Statement, "first");
    tree.add_child(
        root,
        Role::Comment,
        NodeKind::Comment {
            kind: CommentKind::SingleLine,
            text: " note".to_string(),
        },
    );
    call_statement(&mut tree, root, Role::Statement, "second");

    assert_eq!(
        text(&tree),
        "{\n    first();\n    // note\n    second();\n}\n"
    );
}

#[test]
fn empty_block_collapses_to_one_line() {
    let mut tree = Ast::new();
    tree.add_root(NodeKind::Block);
    assert_eq!(text(&tree), "{ }\n");
}

// ── Brace enforcement ──────────────────────────────────────────────────

fn if_with_block_body() -> Ast {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::If);
    ident(&mut tree, root, Role::Condition, "flag");
    let body = tree.add_child(root, Role::TrueBranch, NodeKind::Block);
    call_statement(&mut tree, body, Role::Statement, "run");
    tree
}

#[test]
fn add_braces_keeps_single_statement_block() {
    let tree = if_with_block_body();
    assert_eq!(text(&tree), "if (flag) {\n    run();\n}\n");
}

#[test]
fn remove_braces_unwraps_single_statement_block() {
    let tree = if_with_block_body();
    let mut options = FormattingOptions::default();
    options.if_else_brace_enforcement = BraceEnforcement::RemoveBraces;
    assert_eq!(text_with(&tree, &options), "if (flag)\n    run();\n");
}

#[test]
fn remove_braces_keeps_multi_statement_block() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::If);
    ident(&mut tree, root, Role::Condition, "flag");
    let body = tree.add_child(root, Role::TrueBranch, NodeKind::Block);
    call_statement(&mut tree, body, Role::Statement, "first");
    call_statement(&mut tree, body, Role::Statement, "second");

    let mut options = FormattingOptions::default();
    options.if_else_brace_enforcement = BraceEnforcement::RemoveBraces;
    assert_eq!(
        text_with(&tree, &options),
        "if (flag) {\n    first();\n    second();\n}\n"
    );
}

#[test]
fn add_braces_wraps_bare_statement_body() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::If);
    ident(&mut tree, root, Role::Condition, "flag");
    call_statement(&mut tree, root, Role::TrueBranch, "run");

    assert_eq!(text(&tree), "if (flag) {\n    run();\n}\n");
}

#[test]
fn do_while_keeps_while_on_the_closing_line() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::DoWhile);
    call_statement(&mut tree, root, Role::EmbeddedStatement, "run");
    ident(&mut tree, root, Role::Condition, "ready");

    assert_eq!(text(&tree), "do {\n    run();\n} while (ready);\n");
}

// ── Statements ─────────────────────────────────────────────────────────

/// `outer: while (ready) { run(); }` under `parent`.
fn labeled_while(tree: &mut Ast, parent: NodeId, role: Role) -> NodeId {
    let labeled = tree.add_child(parent, role, NodeKind::LabeledStatement("outer".to_string()));
    let while_loop = tree.add_child(labeled, Role::Statement, NodeKind::While);
    ident(tree, while_loop, Role::Condition, "ready");
    let body = tree.add_child(while_loop, Role::EmbeddedStatement, NodeKind::Block);
    call_statement(tree, body, Role::Statement, "run");
    labeled
}

#[test]
fn labeled_loop_at_the_margin_keeps_its_label() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::LabeledStatement("outer".to_string()));
    let while_loop = tree.add_child(root, Role::Statement, NodeKind::While);
    ident(&mut tree, while_loop, Role::Condition, "ready");
    let body = tree.add_child(while_loop, Role::EmbeddedStatement, NodeKind::Block);
    call_statement(&mut tree, body, Role::Statement, "run");

    assert_eq!(text(&tree), "outer:\nwhile (ready) {\n    run();\n}\n");
}

#[test]
fn labeled_loop_in_unindented_banner_bodies_prints() {
    let mut tree = Ast::new();
    let unit = tree.add_root(NodeKind::CompilationUnit);
    let class = tree.add_child(unit, Role::Member, NodeKind::TypeDeclaration(ClassType::Class));
    ident(&mut tree, class, Role::Name, "C");
    let method = tree.add_child(
        class,
        Role::Member,
        NodeKind::MethodDeclaration(MethodData::default()),
    );
    simple_type(&mut tree, method, Role::ReturnType, "void", true);
    ident(&mut tree, method, Role::Name, "m");
    let body = tree.add_child(method, Role::Body, NodeKind::Block);
    labeled_while(&mut tree, body, Role::Statement);

    // Banner braces never indent, so the label has no level to step out of.
    let mut options = FormattingOptions::default();
    options.class_brace_style = BraceStyle::Banner;
    options.method_brace_style = BraceStyle::Banner;
    let out = text_with(&tree, &options);
    assert_eq!(
        out,
        "class C {void m() {outer:\nwhile (ready) {\n    run();\n}\n }\n }\n"
    );
}

#[test]
fn labeled_loop_inside_a_method_outdents_its_label() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Block);
    labeled_while(&mut tree, root, Role::Statement);

    assert_eq!(
        text(&tree),
        "{\nouter:\n    while (ready) {\n        run();\n    }\n}\n"
    );
}

#[test]
fn try_with_resources_aligns_continuations() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Try);
    for name in ["a", "b"] {
        let resource = tree.add_child(root, Role::Resource, NodeKind::VariableDeclaration);
        simple_type(&mut tree, resource, Role::Type, "Reader", false);
        let variable = tree.add_child(resource, Role::Variable, NodeKind::VariableInitializer);
        ident(&mut tree, variable, Role::Name, name);
        tree.add_child(variable, Role::Initializer, NodeKind::NullReference);
    }
    tree.add_child(root, Role::TryBlock, NodeKind::Block);

    assert_eq!(
        text(&tree),
        "try (Reader a = null;\n     Reader b = null) { }\n"
    );
}

#[test]
fn switch_sections_indent_labels_and_bodies() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Switch);
    ident(&mut tree, root, Role::Expression, "value");

    let section = tree.add_child(root, Role::SwitchSection, NodeKind::SwitchSection);
    let label = tree.add_child(section, Role::CaseLabel, NodeKind::CaseLabel);
    tree.add_child(label, Role::Expression, NodeKind::Literal(LiteralValue::Int(0)));
    call_statement(&mut tree, section, Role::Statement, "zero");
    tree.add_child(section, Role::Statement, NodeKind::Break(None));

    let default_section = tree.add_child(root, Role::SwitchSection, NodeKind::SwitchSection);
    tree.add_child(default_section, Role::CaseLabel, NodeKind::CaseLabel);
    call_statement(&mut tree, default_section, Role::Statement, "other");

    assert_snapshot!(text(&tree), @r"
    switch (value) {
            case 0:
                zero();
                break;
            default:
                other();
    }
    ");
}

#[test]
fn enum_constants_share_one_terminator() {
    let mut tree = Ast::new();
    let unit = tree.add_root(NodeKind::CompilationUnit);
    let decl = tree.add_child(unit, Role::Member, NodeKind::TypeDeclaration(ClassType::Enum));
    ident(&mut tree, decl, Role::Name, "Color");
    for name in ["RED", "GREEN", "BLUE"] {
        let constant = tree.add_child(decl, Role::Member, NodeKind::EnumConstant);
        ident(&mut tree, constant, Role::Name, name);
    }

    assert_eq!(
        text(&tree),
        "enum Color\n{\n    RED, \n    GREEN, \n    BLUE;\n}\n"
    );
}

// ── Array initializers ─────────────────────────────────────────────────

fn three_element_initializer() -> Ast {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::ArrayInitializer);
    for value in [1, 2, 3] {
        tree.add_child(root, Role::Element, NodeKind::Literal(LiteralValue::Int(value)));
    }
    tree
}

#[test]
fn array_initializer_single_line() {
    let tree = three_element_initializer();
    let mut options = FormattingOptions::default();
    options.array_initializer_wrapping = Wrapping::DoNotWrap;
    assert_eq!(text_with(&tree, &options), "{ 1, 2, 3 }");
}

#[test]
fn array_initializer_wrapped() {
    let tree = three_element_initializer();
    assert_eq!(text(&tree), "\n{\n    1,\n    2,\n    3\n}");
}

// ── Literal rendering ──────────────────────────────────────────────────

fn literal_text(value: LiteralValue) -> String {
    let mut tree = Ast::new();
    tree.add_root(NodeKind::Literal(value));
    text(&tree)
}

#[test]
fn magic_constants_render_in_hex() {
    assert_eq!(literal_text(LiteralValue::Int(0x1BADB002)), "0x1BADB002");
    assert_eq!(
        literal_text(LiteralValue::Long(0xBADC0FFEE0DDF00Du64 as i64)),
        "0xBADC0FFEE0DDF00DL"
    );
    assert_eq!(literal_text(LiteralValue::Int(42)), "42");
    assert_eq!(literal_text(LiteralValue::Long(7)), "7L");
}

#[test]
fn bitwise_operands_render_in_hex() {
    let mut tree = Ast::new();
    let root = tree.add_root(NodeKind::Binary(BinaryOp::BitAnd));
    ident(&mut tree, root, Role::Left, "x");
    tree.add_child(
        root,
        Role::Right,
        NodeKind::Literal(LiteralValue::Int(0xCAFEBABEu32 as i32)),
    );
    assert_eq!(text(&tree), "x & 0xCAFEBABE");
}

#[test]
fn string_and_char_literals_are_escaped() {
    assert_eq!(
        literal_text(LiteralValue::Str("a\tb".to_string())),
        "\"a\\tb\""
    );
    assert_eq!(literal_text(LiteralValue::Char('\n')), "'\\n'");
}

#[test]
fn special_floats_print_as_constant_reads() {
    assert_eq!(
        literal_text(LiteralValue::Float(f32::NEG_INFINITY)),
        "Float.NEGATIVE_INFINITY"
    );
    assert_eq!(literal_text(LiteralValue::Double(f64::NAN)), "Double.NaN");
    assert_eq!(literal_text(LiteralValue::Float(1.5)), "1.5f");
    assert_eq!(literal_text(LiteralValue::Double(5.0)), "5d");
}

// ── Line correlation ───────────────────────────────────────────────────

fn unit_with_line_table() -> Ast {
    let mut tree = Ast::new();
    let unit = tree.add_root(NodeKind::CompilationUnit);
    let class = tree.add_child(unit, Role::Member, NodeKind::TypeDeclaration(ClassType::Class));
    ident(&mut tree, class, Role::Name, "Traced");

    let data = MethodData {
        line_table: Some(LineNumberTable::new(vec![(0, 1), (10, 5)], 20)),
        ..MethodData::default()
    };
    let method = tree.add_child(class, Role::Member, NodeKind::MethodDeclaration(data));
    simple_type(&mut tree, method, Role::ReturnType, "void", true);
    ident(&mut tree, method, Role::Name, "run");
    let body = tree.add_child(method, Role::Body, NodeKind::Block);

    for offset in [5, 15, 25] {
        let statement = call_statement(&mut tree, body, Role::Statement, "step");
        tree.set_origin_offset(statement, offset);
    }
    tree
}

#[test]
fn correlation_entries_are_strictly_increasing() {
    let tree = unit_with_line_table();
    let result = print_tree(&tree, &FormattingOptions::default()).unwrap();

    let lines: Vec<_> = result.line_positions.iter().map(|p| p.original_line).collect();
    // Offset 5 resolves to line 1, offset 15 to line 5; offset 25 clamps to
    // the last entry and falls at the watermark, so no third entry.
    assert_eq!(lines, vec![1, 5]);

    let rows: Vec<_> = result.line_positions.iter().map(|p| p.row).collect();
    assert!(rows.windows(2).all(|w| w[0] < w[1]), "rows: {rows:?}");
}

#[test]
fn debug_comment_mode_is_purely_additive() {
    let tree = unit_with_line_table();
    let options = FormattingOptions::default();
    let plain = print_tree(&tree, &options).unwrap();
    let debug = print_tree_with(&tree, &options, LineNumberMode::DebugComments).unwrap();

    assert!(debug.text.contains("/*SL:1*/"));
    assert!(debug.text.contains("/*SL:5*/"));
    let stripped = debug.text.replace("/*SL:1*/", "").replace("/*SL:5*/", "");
    assert_eq!(stripped, plain.text);
    assert_eq!(debug.line_positions, plain.line_positions);
}

// ── Artifact serialization ─────────────────────────────────────────────

#[test]
fn line_positions_serialize_flat() {
    let tree = unit_with_line_table();
    let result = print_tree(&tree, &FormattingOptions::default()).unwrap();
    let value = serde_json::to_value(&result.line_positions[0]).unwrap();
    assert_eq!(value["original_line"], 1);
    assert!(value["row"].is_u64());
    assert!(value["column"].is_u64());
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn separator_token_in_statement_position_is_rejected() {
    let mut tree = Ast::new();
    let unit = tree.add_root(NodeKind::CompilationUnit);
    tree.add_child(unit, Role::Comma, NodeKind::Token(TokenKind::Comma));

    let error = print_tree(&tree, &FormattingOptions::default()).unwrap_err();
    assert_eq!(
        error,
        EmitError::UnsupportedNode {
            kind: "token",
            context: "compilation unit",
        }
    );
    assert_eq!(
        error.to_string(),
        "cannot print token node under compilation unit"
    );
}
