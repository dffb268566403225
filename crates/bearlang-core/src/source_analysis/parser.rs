// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for BearLang source code.
//!
//! This parser consumes the token stream produced by the lexer and builds a
//! [`Program`]. It is a one-pass recursive descent with single-token
//! lookahead and no backtracking; the first syntax error is final.
//!
//! # Statements and Blocks
//!
//! The leading token selects the statement production: a type keyword opens
//! a declaration, `ввод`/`вывод`/`если`/`пока`/`для` open their respective
//! forms, and a bare identifier opens an assignment. Every block is exactly
//! one `Newline`, one `Indent`, at least one statement, then a `Dedent`.
//!
//! # Binary Operator Precedence (Pratt Parsing)
//!
//! Binary operator precedence is handled using Pratt parsing (top-down
//! operator precedence parsing) with a declarative binding-power table:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 10 | `или`             | Left |
//! | 20 | `и`               | Left |
//! | 30 | `==`              | Left |
//! | 40 | `<` `<=` `>` `>=` | Left |
//! | 50 | `+` `-`           | Left |
//! | 60 | `*` `/` `%`       | Left |
//! | 70 | `^`               | **Right** |
//!
//! Prefix `-` and `не` bind tighter than any binary operator and chain.
//! Right-associativity of `^` matters: `a^b^c` must parse as `a^(b^c)`.
//!
//! # Usage
//!
//! ```
//! use bearlang_core::source_analysis::{parse, tokenize};
//!
//! let tokens = tokenize("целое n = 5\n").unwrap();
//! let program = parse(tokens).unwrap();
//! assert_eq!(program.statements.len(), 1);
//! ```

use ecow::EcoString;

use crate::ast::{
    BinaryOp, Expression, IfBranch, IfStatement, Literal, Program, Statement, UnaryOp, ValueType,
};

use super::{ParseError, Token, TokenKind};

// ============================================================================
// Pratt Parsing for Binary Operator Precedence
// ============================================================================

/// Binding power for binary operators (Pratt parsing).
///
/// Higher values bind tighter. Left and right binding powers differ for
/// associativity:
/// - Left-associative: `left == right - 1`
/// - Right-associative: `left == right + 1`
#[derive(Debug, Clone, Copy)]
struct BindingPower {
    /// How tightly this operator binds to its left operand.
    left: u8,
    /// How tightly this operator binds to its right operand.
    right: u8,
}

impl BindingPower {
    /// Creates a left-associative binding power.
    const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }

    /// Creates a right-associative binding power.
    const fn right_assoc(precedence: u8) -> Self {
        Self {
            left: precedence + 1,
            right: precedence,
        }
    }
}

/// Maps a token to its binary operator and binding power.
///
/// Returns `None` for tokens that cannot continue a binary expression,
/// which is how expression parsing terminates.
fn binary_operator(kind: &TokenKind) -> Option<(BinaryOp, BindingPower)> {
    let entry = match kind {
        TokenKind::KwOr => (BinaryOp::Or, BindingPower::left_assoc(10)),
        TokenKind::KwAnd => (BinaryOp::And, BindingPower::left_assoc(20)),
        TokenKind::EqualEqual => (BinaryOp::Equal, BindingPower::left_assoc(30)),
        TokenKind::Less => (BinaryOp::Less, BindingPower::left_assoc(40)),
        TokenKind::LessEqual => (BinaryOp::LessEqual, BindingPower::left_assoc(40)),
        TokenKind::Greater => (BinaryOp::Greater, BindingPower::left_assoc(40)),
        TokenKind::GreaterEqual => (BinaryOp::GreaterEqual, BindingPower::left_assoc(40)),
        TokenKind::Plus => (BinaryOp::Add, BindingPower::left_assoc(50)),
        TokenKind::Minus => (BinaryOp::Subtract, BindingPower::left_assoc(50)),
        TokenKind::Star => (BinaryOp::Multiply, BindingPower::left_assoc(60)),
        TokenKind::Slash => (BinaryOp::Divide, BindingPower::left_assoc(60)),
        TokenKind::Percent => (BinaryOp::Modulo, BindingPower::left_assoc(60)),
        // Exponentiation is right-associative: a^b^c == a^(b^c).
        TokenKind::Caret => (BinaryOp::Power, BindingPower::right_assoc(70)),
        _ => return None,
    };
    Some(entry)
}

/// Parses a token stream into a [`Program`].
///
/// # Errors
///
/// Returns a [`ParseError`] on the first syntax error; no recovery is
/// attempted and no partial program is returned.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// The parser state.
struct Parser {
    /// The tokens being parsed.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    fn current_token(&self) -> &Token {
        if self.current < self.tokens.len() {
            &self.tokens[self.current]
        } else {
            // Past the end of the stream; fall back to the last token (EOF in
            // well-formed input) rather than panicking.
            self.tokens
                .last()
                .expect("parser has no tokens; expected at least an EOF token")
        }
    }

    /// Returns the current token kind.
    fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Checks if we're at the end of input.
    fn is_at_end(&self) -> bool {
        self.current_kind().is_eof()
    }

    /// Advances to the next token and returns the previous one.
    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current - 1].clone()
    }

    /// Checks if the current token matches the given kind.
    ///
    /// Comparison is by discriminant, so payload-carrying kinds match any
    /// payload.
    fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consumes the current token if it matches the given kind.
    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to match the given kind, advancing if it
    /// does and failing with `message` otherwise.
    fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    /// Expects an identifier and returns its name.
    fn expect_identifier(&mut self, message: &str) -> Result<EcoString, ParseError> {
        match self.current_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(message)),
        }
    }

    /// Builds a [`ParseError`] at the current token.
    fn error(&self, message: impl Into<EcoString>) -> ParseError {
        let token = self.current_token();
        ParseError::new(message, token.span(), token.line())
    }

    /// Consumes a run of `Newline` tokens.
    fn skip_newlines(&mut self) {
        while self.match_token(&TokenKind::Newline) {}
    }

    /// Consumes the newline that terminates a simple statement.
    ///
    /// A following `Dedent` or end of file is also acceptable, so the last
    /// line of a file (or block) does not need a trailing newline.
    fn expect_newline(&mut self, context: &str) -> Result<(), ParseError> {
        if self.match_token(&TokenKind::Newline) {
            self.skip_newlines();
            return Ok(());
        }
        if self.check(&TokenKind::Dedent) || self.is_at_end() {
            return Ok(());
        }
        Err(self.error(format!("expected newline after {context}")))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Parses the whole token stream.
    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        self.skip_newlines();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
            self.skip_newlines();
        }
        Ok(Program { statements })
    }

    /// Parses one statement, dispatching on the leading token.
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.check(&TokenKind::Indent) {
            return Err(self.error("unexpected indent"));
        }
        if self.current_kind().is_type_keyword() {
            return self.parse_var_decl();
        }
        match self.current_kind() {
            TokenKind::KwInput => self.parse_input(),
            TokenKind::KwOutput => self.parse_output(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwFor => self.parse_for(),
            TokenKind::Identifier(_) => self.parse_assignment(),
            kind => Err(self.error(format!("unexpected token '{kind}'"))),
        }
    }

    /// Parses `TypeKw Identifier ('=' Expression)? Newline`.
    fn parse_var_decl(&mut self) -> Result<Statement, ParseError> {
        let ty = self.parse_type_keyword("variable declaration")?;
        let name = self.expect_identifier("expected variable name after type keyword")?;
        let initializer = if self.match_token(&TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_newline("variable declaration")?;
        Ok(Statement::VarDecl {
            ty,
            name,
            initializer,
        })
    }

    /// Parses `Identifier '=' Expression Newline`.
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let name = self.expect_identifier("expected assignment target")?;
        self.expect(&TokenKind::Assign, "expected `=` in assignment")?;
        let value = self.parse_expression()?;
        self.expect_newline("assignment")?;
        Ok(Statement::Assign { name, value })
    }

    /// Parses `'ввод' Identifier Newline`.
    fn parse_input(&mut self) -> Result<Statement, ParseError> {
        self.advance(); // ввод
        let name = self.expect_identifier("expected a variable name after `ввод`")?;
        self.expect_newline("`ввод` statement")?;
        Ok(Statement::Input { name })
    }

    /// Parses `'вывод' Expression Newline`.
    fn parse_output(&mut self) -> Result<Statement, ParseError> {
        self.advance(); // вывод
        let value = self.parse_expression()?;
        self.expect_newline("`вывод` statement")?;
        Ok(Statement::Output { value })
    }

    /// Parses an `если` chain with optional `иначе если` arms and `иначе`.
    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        self.advance(); // если
        let condition = self.parse_paren_condition("если")?;
        let body = self.parse_block("`если` condition")?;

        let mut branches = vec![IfBranch { condition, body }];
        let mut else_branch = None;

        while self.match_token(&TokenKind::KwElse) {
            if self.match_token(&TokenKind::KwIf) {
                let condition = self.parse_paren_condition("иначе если")?;
                let body = self.parse_block("`иначе если` condition")?;
                branches.push(IfBranch { condition, body });
            } else {
                else_branch = Some(self.parse_block("`иначе` branch")?);
                break;
            }
        }

        Ok(Statement::If(IfStatement {
            branches,
            else_branch,
        }))
    }

    /// Parses `'пока' ParenCond Block`.
    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        self.advance(); // пока
        let condition = self.parse_paren_condition("пока")?;
        let body = self.parse_block("`пока` loop")?;
        Ok(Statement::While { condition, body })
    }

    /// Parses `'для' '(' TypeKw Identifier 'от' Expr 'до' Expr ')' Block`.
    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        self.advance(); // для
        self.expect(&TokenKind::LeftParen, "expected `(` after `для`")?;
        let ty = self.parse_type_keyword("`для` loop counter")?;
        let name = self.expect_identifier("expected a counter name in `для` loop")?;
        self.expect(&TokenKind::KwFrom, "expected `от` after the loop counter")?;
        let from = self.parse_expression()?;
        self.expect(&TokenKind::KwTo, "expected `до` after the loop lower bound")?;
        let to = self.parse_expression()?;
        self.expect(
            &TokenKind::RightParen,
            "expected `)` after the `для` loop header",
        )?;
        let body = self.parse_block("`для` loop")?;
        Ok(Statement::ForRange {
            ty,
            name,
            from,
            to,
            body,
        })
    }

    /// Consumes a type keyword and maps it to a [`ValueType`].
    fn parse_type_keyword(&mut self, context: &str) -> Result<ValueType, ParseError> {
        let ty = match self.current_kind() {
            TokenKind::KwInteger => ValueType::Integer,
            TokenKind::KwDouble => ValueType::Double,
            TokenKind::KwString => ValueType::String,
            TokenKind::KwLogic => ValueType::Boolean,
            _ => return Err(self.error(format!("expected a type keyword in {context}"))),
        };
        self.advance();
        Ok(ty)
    }

    /// Parses `'(' Expression ')'` after a control keyword.
    fn parse_paren_condition(&mut self, keyword: &str) -> Result<Expression, ParseError> {
        self.expect(
            &TokenKind::LeftParen,
            &format!("expected `(` after `{keyword}`"),
        )?;
        let condition = self.parse_expression()?;
        self.expect(
            &TokenKind::RightParen,
            &format!("expected `)` after condition of `{keyword}`"),
        )?;
        Ok(condition)
    }

    /// Parses `Newline Indent Statement+ Dedent`.
    fn parse_block(&mut self, context: &str) -> Result<Vec<Statement>, ParseError> {
        self.expect(
            &TokenKind::Newline,
            &format!("expected newline after {context}"),
        )?;
        self.expect(
            &TokenKind::Indent,
            &format!("expected an indented block after {context}"),
        )?;
        let mut body = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            body.push(self.parse_statement()?);
            self.skip_newlines();
        }
        self.expect(&TokenKind::Dedent, &format!("expected end of {context} block"))?;
        if body.is_empty() {
            return Err(self.error(format!("expected at least one statement in {context} block")));
        }
        Ok(body)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parses any expression.
    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary_expression(0)
    }

    /// Parses a binary expression whose operators bind at least `min_bp`.
    fn parse_binary_expression(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some((op, bp)) = binary_operator(self.current_kind()) {
            if bp.left < min_bp {
                break;
            }
            self.advance();
            let right = self.parse_binary_expression(bp.right)?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parses a chain of prefix operators followed by a primary.
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        if self.match_token(&TokenKind::Minus) {
            let operand = self.parse_unary()?;
            return Ok(Expression::unary(UnaryOp::Negate, operand));
        }
        if self.match_token(&TokenKind::KwNot) {
            let operand = self.parse_unary()?;
            return Ok(Expression::unary(UnaryOp::Not, operand));
        }
        self.parse_primary()
    }

    /// Parses a literal, variable reference, or parenthesised expression.
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let expr = match self.current_kind() {
            TokenKind::Integer(text) => Expression::Literal(Literal::Integer(text.clone())),
            TokenKind::Double(text) => Expression::Literal(Literal::Double(text.clone())),
            TokenKind::String(text) => Expression::Literal(Literal::String(text.clone())),
            TokenKind::KwTrue => Expression::Literal(Literal::Boolean(true)),
            TokenKind::KwFalse => Expression::Literal(Literal::Boolean(false)),
            TokenKind::Identifier(name) => Expression::Variable { name: name.clone() },
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(
                    &TokenKind::RightParen,
                    "expected `)` after parenthesised expression",
                )?;
                return Ok(expr);
            }
            kind => return Err(self.error(format!("unexpected token '{kind}' in expression"))),
        };
        self.advance();
        Ok(expr)
    }
}
