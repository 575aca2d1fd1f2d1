//! Formatting configuration.
//!
//! A flat record of independent style knobs. Every field is independently
//! settable with no cross-field constraints; any combination produces valid
//! output, only more or less conventional-looking. `Default` is the preset
//! the decompiler ships with and populates every field, so no knob is ever
//! consulted without a defined value.

use serde::Serialize;

/// Placement of `{`/`}` for a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BraceStyle {
    /// `{` at the end of the current line; body indented on following lines.
    EndOfLine,
    /// `{` alone on the next line at the current indent.
    NextLine,
    /// Single-line form: `{ … }` with no line breaks.
    Banner,
}

/// Policy for constructs whose braces are optional in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BraceEnforcement {
    /// Always wrap the body in a block, even if the input had none.
    AddBraces,
    /// Strip a single-statement block back to a bare statement.
    RemoveBraces,
    /// Preserve whatever shape the input had.
    DoNotChange,
}

/// Element layout for array initializer lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Wrapping {
    /// Comma-joined on one line inside a banner-style brace.
    DoNotWrap,
    /// One element per line inside a next-line brace.
    WrapAlways,
}

/// The full set of style knobs the printer consults.
#[derive(Debug, Clone, Serialize)]
pub struct FormattingOptions {
    // ── Brace styles per construct ─────────────────────────────────────
    pub class_brace_style: BraceStyle,
    pub interface_brace_style: BraceStyle,
    pub enum_brace_style: BraceStyle,
    pub annotation_brace_style: BraceStyle,
    pub anonymous_class_brace_style: BraceStyle,
    pub method_brace_style: BraceStyle,
    pub constructor_brace_style: BraceStyle,
    pub initializer_block_brace_style: BraceStyle,
    pub statement_brace_style: BraceStyle,

    // ── Optional-brace enforcement ─────────────────────────────────────
    pub if_else_brace_enforcement: BraceEnforcement,
    pub while_brace_enforcement: BraceEnforcement,

    // ── Wrapping ───────────────────────────────────────────────────────
    pub array_initializer_wrapping: Wrapping,

    // ── Spaces before opening parentheses ──────────────────────────────
    pub space_before_method_call_parentheses: bool,
    pub space_before_method_declaration_parentheses: bool,
    pub space_before_constructor_declaration_parentheses: bool,
    pub space_before_if_parentheses: bool,
    pub space_before_while_parentheses: bool,
    pub space_before_for_parentheses: bool,
    pub space_before_foreach_parentheses: bool,
    pub space_before_switch_parentheses: bool,
    pub space_before_synchronized_parentheses: bool,
    pub space_before_catch_parentheses: bool,

    // ── Spaces just inside parentheses ─────────────────────────────────
    pub space_within_method_call_parentheses: bool,
    pub space_within_method_declaration_parentheses: bool,
    pub space_within_if_parentheses: bool,
    pub space_within_while_parentheses: bool,
    pub space_within_for_parentheses: bool,
    pub space_within_foreach_parentheses: bool,
    pub space_within_switch_parentheses: bool,
    pub space_within_synchronized_parentheses: bool,
    pub space_within_catch_parentheses: bool,
    pub space_within_cast_parentheses: bool,
    pub space_within_enum_declaration_parentheses: bool,
    pub space_within_parentheses: bool,

    // ── Spaces around operators ────────────────────────────────────────
    pub space_around_assignment: bool,
    pub space_around_bitwise_operator: bool,
    pub space_around_logical_operator: bool,
    pub space_around_relational_operator: bool,
    pub space_around_equality_operator: bool,
    pub space_around_additive_operator: bool,
    pub space_around_multiplicative_operator: bool,
    pub space_around_shift_operator: bool,

    // ── Conditional operator ───────────────────────────────────────────
    pub space_before_conditional_question_mark: bool,
    pub space_after_conditional_question_mark: bool,
    pub space_before_conditional_colon: bool,
    pub space_after_conditional_colon: bool,

    // ── Commas, semicolons, casts ──────────────────────────────────────
    pub space_before_comma: bool,
    pub space_after_comma: bool,
    pub space_before_for_semicolon: bool,
    pub space_after_for_semicolon: bool,
    pub space_after_typecast: bool,

    // ── Indentation ────────────────────────────────────────────────────
    pub indent_switch_body: bool,
    pub indent_case_body: bool,

    // ── Blank lines ────────────────────────────────────────────────────
    pub blank_lines_between_members: u32,
    pub blank_lines_between_fields: u32,
    pub blank_lines_after_package_declaration: u32,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            class_brace_style: BraceStyle::NextLine,
            interface_brace_style: BraceStyle::NextLine,
            enum_brace_style: BraceStyle::NextLine,
            annotation_brace_style: BraceStyle::NextLine,
            anonymous_class_brace_style: BraceStyle::EndOfLine,
            method_brace_style: BraceStyle::EndOfLine,
            constructor_brace_style: BraceStyle::EndOfLine,
            initializer_block_brace_style: BraceStyle::EndOfLine,
            statement_brace_style: BraceStyle::EndOfLine,

            if_else_brace_enforcement: BraceEnforcement::AddBraces,
            while_brace_enforcement: BraceEnforcement::AddBraces,

            array_initializer_wrapping: Wrapping::WrapAlways,

            space_before_method_call_parentheses: false,
            space_before_method_declaration_parentheses: false,
            space_before_constructor_declaration_parentheses: false,
            space_before_if_parentheses: true,
            space_before_while_parentheses: true,
            space_before_for_parentheses: true,
            space_before_foreach_parentheses: true,
            space_before_switch_parentheses: true,
            space_before_synchronized_parentheses: true,
            space_before_catch_parentheses: true,

            space_within_method_call_parentheses: false,
            space_within_method_declaration_parentheses: false,
            space_within_if_parentheses: false,
            space_within_while_parentheses: false,
            space_within_for_parentheses: false,
            space_within_foreach_parentheses: false,
            space_within_switch_parentheses: false,
            space_within_synchronized_parentheses: false,
            space_within_catch_parentheses: false,
            space_within_cast_parentheses: false,
            space_within_enum_declaration_parentheses: false,
            space_within_parentheses: false,

            space_around_assignment: true,
            space_around_bitwise_operator: true,
            space_around_logical_operator: true,
            space_around_relational_operator: true,
            space_around_equality_operator: true,
            space_around_additive_operator: true,
            space_around_multiplicative_operator: true,
            space_around_shift_operator: true,

            space_before_conditional_question_mark: true,
            space_after_conditional_question_mark: true,
            space_before_conditional_colon: true,
            space_after_conditional_colon: true,

            space_before_comma: false,
            space_after_comma: true,
            space_before_for_semicolon: false,
            space_after_for_semicolon: true,
            space_after_typecast: false,

            indent_switch_body: true,
            indent_case_body: true,

            blank_lines_between_members: 1,
            blank_lines_between_fields: 0,
            blank_lines_after_package_declaration: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_is_conventional() {
        let options = FormattingOptions::default();
        assert_eq!(options.class_brace_style, BraceStyle::NextLine);
        assert_eq!(options.method_brace_style, BraceStyle::EndOfLine);
        assert_eq!(
            options.if_else_brace_enforcement,
            BraceEnforcement::AddBraces
        );
        assert!(options.space_after_comma);
        assert!(!options.space_before_comma);
    }

    #[test]
    fn knobs_are_independent() {
        // Any combination is legal; flipping one field never touches another.
        let mut options = FormattingOptions::default();
        options.statement_brace_style = BraceStyle::NextLine;
        options.space_around_assignment = false;
        assert_eq!(options.method_brace_style, BraceStyle::EndOfLine);
        assert!(options.space_around_additive_operator);
    }
}
