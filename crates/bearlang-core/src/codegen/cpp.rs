// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! C++ code generation for BearLang.
//!
//! This module transforms a BearLang [`Program`] into a single complete C++
//! translation unit, which an external host compiler turns into a runnable
//! binary. The output needs only `<cmath>`, `<iostream>`, and `<string>`.
//!
//! # Shape of the output
//!
//! ```cpp
//! #include <cmath>
//! #include <iostream>
//! #include <string>
//!
//! int main() {
//!     std::ios_base::sync_with_stdio(false);
//!     std::cin.tie(nullptr);
//!     std::cout << std::boolalpha;
//!     // ... translated statements, four spaces per level ...
//!     return 0;
//! }
//! ```
//!
//! # Name mangling
//!
//! BearLang identifiers may contain bytes that are illegal in C++
//! identifiers (Cyrillic names are the common case). Every declaration
//! allocates a fresh `vr_<N>` name from a monotonic counter and records the
//! mapping in a stack of scopes; references resolve innermost-first. A name
//! that resolves nowhere is emitted unchanged — the host compiler then
//! reports the undeclared variable in its own diagnostics.
//!
//! # Expression emission
//!
//! Every binary operation except `^` is emitted fully parenthesised, so the
//! printed C++ has exactly the tree shape the parser produced and never
//! leans on C++ precedence. `^` becomes a `std::pow` call (it is
//! exponentiation, not XOR), which also preserves its right-associativity.

use std::collections::HashMap;
use std::fmt::{self, Write};

use ecow::EcoString;
use thiserror::Error;

use crate::ast::{BinaryOp, Expression, Literal, Program, Statement, ValueType};

/// Indentation width in spaces for the generated C++.
const INDENT: usize = 4;

/// Errors that can occur during code generation.
///
/// Generating a well-formed [`Program`] cannot fail logically; this exists
/// to propagate formatter errors from the output buffer.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// Formatting error while writing the output buffer.
    #[error("formatting error: {0}")]
    Format(#[from] fmt::Error),
}

/// Result type alias for code generation.
type Result<T, E = CodeGenError> = std::result::Result<T, E>;

/// Generates a complete C++ translation unit for the given program.
///
/// Output is deterministic: identical input produces byte-identical output
/// (the mangling counter resets per translation).
///
/// # Errors
///
/// Returns [`CodeGenError`] if writing the output buffer fails.
///
/// # Example
///
/// ```
/// use bearlang_core::codegen::cpp::generate;
/// use bearlang_core::source_analysis::{parse, tokenize};
///
/// let tokens = tokenize("вывод 42\n").unwrap();
/// let program = parse(tokens).unwrap();
/// let cpp = generate(&program).unwrap();
/// assert!(cpp.contains("std::cout << 42 << std::endl;"));
/// ```
pub fn generate(program: &Program) -> Result<String> {
    let mut generator = CppGenerator::new();
    generator.generate_program(program)?;
    Ok(generator.output)
}

/// The code generator state.
struct CppGenerator {
    /// The output buffer.
    output: String,
    /// Current indentation level.
    indent: usize,
    /// Counter for allocating `vr_<N>` names, shared across all scopes.
    var_counter: usize,
    /// Stack of variable binding scopes. Each scope maps a BearLang
    /// identifier to its mangled C++ name. Inner scopes shadow outer scopes.
    scopes: Vec<HashMap<EcoString, String>>,
}

impl CppGenerator {
    /// Creates a generator with the outer (`main` body) scope open.
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
            var_counter: 0,
            scopes: vec![HashMap::new()],
        }
    }

    // ========================================================================
    // Scope Management
    // ========================================================================

    /// Pushes a new scope for variable bindings.
    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the current scope, discarding its bindings.
    ///
    /// The outer scope (scope 0) cannot be popped.
    fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Allocates a fresh mangled name for `name` in the current scope.
    fn declare(&mut self, name: &EcoString) -> String {
        self.var_counter += 1;
        let mangled = format!("vr_{}", self.var_counter);
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.clone(), mangled.clone());
        }
        mangled
    }

    /// Resolves a name against the scope stack, innermost first.
    ///
    /// Unresolved names pass through untouched; the generated C++ then fails
    /// in the host compiler with its own undeclared-variable diagnostic.
    fn resolve(&self, name: &str) -> String {
        for scope in self.scopes.iter().rev() {
            if let Some(mangled) = scope.get(name) {
                return mangled.clone();
            }
        }
        name.to_string()
    }

    // ========================================================================
    // Statement Emission
    // ========================================================================

    /// Emits the preamble, all statements, and the closing return.
    fn generate_program(&mut self, program: &Program) -> Result<()> {
        writeln!(self.output, "#include <cmath>")?;
        writeln!(self.output, "#include <iostream>")?;
        writeln!(self.output, "#include <string>")?;
        writeln!(self.output)?;
        writeln!(self.output, "int main() {{")?;
        self.indent = 1;
        self.write_line("std::ios_base::sync_with_stdio(false);")?;
        self.write_line("std::cin.tie(nullptr);")?;
        self.write_line("std::cout << std::boolalpha;")?;
        for statement in &program.statements {
            self.generate_statement(statement)?;
        }
        self.write_line("return 0;")?;
        self.indent = 0;
        writeln!(self.output, "}}")?;
        Ok(())
    }

    /// Emits one statement at the current indentation level.
    fn generate_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::VarDecl {
                ty,
                name,
                initializer,
            } => {
                // Render the initializer before the name is visible, so
                // `целое x = x` refers to an outer `x` (or falls through).
                let initializer = initializer.as_ref().map(|expr| self.render_expression(expr));
                let mangled = self.declare(name);
                match initializer {
                    Some(value) => {
                        self.write_line(&format!("{} {mangled} = {value};", cpp_type(*ty)))?;
                    }
                    None => self.write_line(&format!("{} {mangled}{{}};", cpp_type(*ty)))?,
                }
            }
            Statement::Assign { name, value } => {
                let value = self.render_expression(value);
                let target = self.resolve(name);
                self.write_line(&format!("{target} = {value};"))?;
            }
            Statement::Input { name } => {
                let target = self.resolve(name);
                self.write_line(&format!("std::cin >> {target};"))?;
            }
            Statement::Output { value } => {
                let value = self.render_expression(value);
                self.write_line(&format!("std::cout << {value} << std::endl;"))?;
            }
            Statement::If(if_stmt) => {
                for (i, branch) in if_stmt.branches.iter().enumerate() {
                    let keyword = if i == 0 { "if" } else { "else if" };
                    let condition = self.render_expression(&branch.condition);
                    self.write_line(&format!("{keyword} ({condition}) {{"))?;
                    self.generate_block(&branch.body)?;
                    self.write_line("}")?;
                }
                if let Some(else_body) = &if_stmt.else_branch {
                    self.write_line("else {")?;
                    self.generate_block(else_body)?;
                    self.write_line("}")?;
                }
            }
            Statement::While { condition, body } => {
                let condition = self.render_expression(condition);
                self.write_line(&format!("while ({condition}) {{"))?;
                self.generate_block(body)?;
                self.write_line("}")?;
            }
            Statement::ForRange {
                ty,
                name,
                from,
                to,
                body,
            } => {
                // The counter's scope opens before the header, so the name
                // is visible in the header and body and nowhere after.
                self.push_scope();
                let counter = self.declare(name);
                let from = self.render_expression(from);
                let to = self.render_expression(to);
                self.write_line(&format!(
                    "for ({} {counter} = {from}; {counter} <= {to}; ++{counter}) {{",
                    cpp_type(*ty)
                ))?;
                self.generate_block(body)?;
                self.write_line("}")?;
                self.pop_scope();
            }
        }
        Ok(())
    }

    /// Emits a block body one level deeper, inside a scope of its own.
    fn generate_block(&mut self, body: &[Statement]) -> Result<()> {
        self.push_scope();
        self.indent += 1;
        for statement in body {
            self.generate_statement(statement)?;
        }
        self.indent -= 1;
        self.pop_scope();
        Ok(())
    }

    /// Writes an indented line into the output buffer.
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(
            self.output,
            "{:width$}{line}",
            "",
            width = self.indent * INDENT
        )?;
        Ok(())
    }

    // ========================================================================
    // Expression Emission
    // ========================================================================

    /// Renders an expression to its C++ spelling.
    fn render_expression(&self, expr: &Expression) -> String {
        match expr {
            Expression::Literal(literal) => render_literal(literal),
            Expression::Variable { name } => self.resolve(name),
            Expression::Unary { op, operand } => {
                format!("{}({})", op.symbol(), self.render_expression(operand))
            }
            Expression::Binary {
                op: BinaryOp::Power,
                left,
                right,
            } => {
                format!(
                    "std::pow({}, {})",
                    self.render_expression(left),
                    self.render_expression(right)
                )
            }
            Expression::Binary { op, left, right } => {
                format!(
                    "({} {} {})",
                    self.render_expression(left),
                    op.symbol(),
                    self.render_expression(right)
                )
            }
        }
    }
}

/// Renders a literal to its C++ spelling.
fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Integer(text) | Literal::Double(text) => text.to_string(),
        Literal::String(contents) => format!("\"{}\"", escape_string(contents)),
        Literal::Boolean(true) => "true".to_string(),
        Literal::Boolean(false) => "false".to_string(),
    }
}

/// Maps a BearLang type to its C++ spelling.
///
/// `Unknown` cannot appear in parser output; `auto` keeps the mapping total.
const fn cpp_type(ty: ValueType) -> &'static str {
    match ty {
        ValueType::Integer => "int",
        ValueType::Double => "double",
        ValueType::String => "std::string",
        ValueType::Boolean => "bool",
        ValueType::Unknown => "auto",
    }
}

/// Re-escapes decoded string contents for a C++ string literal.
///
/// Non-ASCII bytes pass through verbatim.
fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{parse, tokenize};

    fn generate_source(source: &str) -> String {
        let tokens = tokenize(source).unwrap();
        let program = parse(tokens).unwrap();
        generate(&program).unwrap()
    }

    const PREAMBLE: &str = "\
#include <cmath>
#include <iostream>
#include <string>

int main() {
    std::ios_base::sync_with_stdio(false);
    std::cin.tie(nullptr);
    std::cout << std::boolalpha;
";

    #[test]
    fn empty_program_is_preamble_and_return() {
        let expected = format!("{PREAMBLE}    return 0;\n}}\n");
        assert_eq!(generate_source(""), expected);
        assert_eq!(generate_source("\n// пусто\n"), expected);
    }

    #[test]
    fn output_string_passes_non_ascii_through() {
        let cpp = generate_source("вывод \"Привет\"\n");
        assert!(cpp.contains("    std::cout << \"Привет\" << std::endl;\n"));
    }

    #[test]
    fn declare_and_assign_mangles_names() {
        let cpp = generate_source("целое n = 5\nn = n + 1\nвывод n\n");
        assert!(cpp.contains("    int vr_1 = 5;\n"));
        assert!(cpp.contains("    vr_1 = (vr_1 + 1);\n"));
        assert!(cpp.contains("    std::cout << vr_1 << std::endl;\n"));
    }

    #[test]
    fn declaration_without_initializer_value_initializes() {
        let cpp = generate_source("строка s\nдробное d\nлогика b\n");
        assert!(cpp.contains("    std::string vr_1{};\n"));
        assert!(cpp.contains("    double vr_2{};\n"));
        assert!(cpp.contains("    bool vr_3{};\n"));
    }

    #[test]
    fn input_reads_into_mangled_name() {
        let cpp = generate_source("целое x\nввод x\n");
        assert!(cpp.contains("    std::cin >> vr_1;\n"));
    }

    #[test]
    fn conditional_chain_structure() {
        let source = "\
целое x = 0
если (x == 0)
    вывод \"zero\"
иначе если (x < 0)
    вывод \"neg\"
иначе
    вывод \"pos\"
";
        let cpp = generate_source(source);
        assert!(cpp.contains("    if ((vr_1 == 0)) {\n"));
        assert!(cpp.contains("        std::cout << \"zero\" << std::endl;\n"));
        assert!(cpp.contains("    else if ((vr_1 < 0)) {\n"));
        assert!(cpp.contains("    else {\n"));
        assert!(cpp.contains("        std::cout << \"pos\" << std::endl;\n"));
    }

    #[test]
    fn while_loop_structure() {
        let cpp = generate_source("целое n = 0\nпока (n < 3)\n    n = n + 1\n");
        assert!(cpp.contains("    while ((vr_1 < 3)) {\n"));
        assert!(cpp.contains("        vr_1 = (vr_1 + 1);\n"));
    }

    #[test]
    fn for_range_is_inclusive() {
        let cpp = generate_source("для (целое i от 1 до 3)\n    вывод i\n");
        assert!(cpp.contains("    for (int vr_1 = 1; vr_1 <= 3; ++vr_1) {\n"));
        assert!(cpp.contains("        std::cout << vr_1 << std::endl;\n"));
    }

    #[test]
    fn for_counter_is_invisible_after_the_loop() {
        let source = "\
для (целое i от 1 до 3)
    вывод i
вывод i
";
        let cpp = generate_source(source);
        // Inside the loop the counter resolves to its mangled name; after
        // the loop the name falls through unresolved.
        assert!(cpp.contains("        std::cout << vr_1 << std::endl;\n"));
        assert!(cpp.contains("    std::cout << i << std::endl;\n"));
    }

    #[test]
    fn inner_declarations_shadow_outer() {
        let source = "\
целое x = 1
если (x == 1)
    целое x = 2
    вывод x
вывод x
";
        let cpp = generate_source(source);
        assert!(cpp.contains("    int vr_1 = 1;\n"));
        assert!(cpp.contains("        int vr_2 = 2;\n"));
        assert!(cpp.contains("        std::cout << vr_2 << std::endl;\n"));
        assert!(cpp.contains("    std::cout << vr_1 << std::endl;\n"));
    }

    #[test]
    fn undeclared_names_pass_through() {
        let cpp = generate_source("вывод загадка\n");
        assert!(cpp.contains("    std::cout << загадка << std::endl;\n"));
    }

    #[test]
    fn power_emits_std_pow_right_associated() {
        let cpp = generate_source("вывод 2^3^2\n");
        assert!(cpp.contains("    std::cout << std::pow(2, std::pow(3, 2)) << std::endl;\n"));
    }

    #[test]
    fn binary_expressions_are_fully_parenthesised() {
        let cpp = generate_source("вывод 1 + 2 * 3\n");
        assert!(cpp.contains("    std::cout << (1 + (2 * 3)) << std::endl;\n"));
    }

    #[test]
    fn logical_operators_map_to_cpp_spellings() {
        let cpp = generate_source("вывод не правда или ложь и правда\n");
        assert!(cpp.contains("    std::cout << (!(true) || (false && true)) << std::endl;\n"));
    }

    #[test]
    fn unary_minus_parenthesises_its_operand() {
        let cpp = generate_source("вывод -(1 + 2)\n");
        assert!(cpp.contains("    std::cout << -((1 + 2)) << std::endl;\n"));
    }

    #[test]
    fn string_contents_are_re_escaped() {
        // Source spelling "a\"b" decodes to a"b and must re-emit escaped.
        let cpp = generate_source("вывод \"a\\\"b\"\n");
        assert!(cpp.contains("    std::cout << \"a\\\"b\" << std::endl;\n"));

        let cpp = generate_source("вывод \"таб\\tи\\nперенос\\\\\"\n");
        assert!(cpp.contains("    std::cout << \"таб\\tи\\nперенос\\\\\" << std::endl;\n"));
    }

    #[test]
    fn numeric_literals_round_trip_verbatim() {
        let cpp = generate_source("вывод 007\nвывод 2.50\n");
        assert!(cpp.contains("std::cout << 007 << std::endl;"));
        assert!(cpp.contains("std::cout << 2.50 << std::endl;"));
    }

    #[test]
    fn boolean_literals_emit_words() {
        let cpp = generate_source("логика t = правда\nлогика f = ложь\n");
        assert!(cpp.contains("    bool vr_1 = true;\n"));
        assert!(cpp.contains("    bool vr_2 = false;\n"));
    }

    #[test]
    fn counter_is_monotonic_across_scopes() {
        let source = "\
целое a = 1
пока (a < 2)
    целое b = 2
целое c = 3
";
        let cpp = generate_source(source);
        assert!(cpp.contains("    int vr_1 = 1;\n"));
        assert!(cpp.contains("        int vr_2 = 2;\n"));
        assert!(cpp.contains("    int vr_3 = 3;\n"));
    }

    #[test]
    fn generation_is_deterministic() {
        let source = "целое n = 1\nпока (n < 5)\n    n = n + 1\nвывод n\n";
        assert_eq!(generate_source(source), generate_source(source));
    }

    #[test]
    fn mangled_identifiers_only() {
        // Every declared identifier in the output is a vr_<N> name; the
        // original Cyrillic spellings never leak into declarations.
        let source = "целое счёт = 0\nсчёт = счёт + 1\nвывод счёт\n";
        let cpp = generate_source(source);
        assert!(!cpp.contains("счёт"));
        assert!(cpp.contains("int vr_1 = 0;"));
    }
}
