// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the BearLang translator front end.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics and
//! integrate with [`miette`] for rendered error reporting. Both the lexer
//! and the parser are fail-fast: the first error aborts the stage and no
//! partial result is returned.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A lexical error encountered during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at line {line}, column {column}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
    /// 1-based line of the error.
    pub line: u32,
    /// 1-based column of the error.
    pub column: u32,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span, line: u32, column: u32) -> Self {
        Self {
            kind,
            span,
            line,
            column,
        }
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character outside the BearLang surface syntax.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A string literal was not terminated before end of input.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A string literal ran into a line break.
    #[error("string literal may not span lines")]
    NewlineInString,

    /// An escape sequence other than `\\`, `\"`, `\n`, `\t`.
    #[error("unknown escape sequence '\\{0}'")]
    UnknownEscape(char),

    /// A backslash at the very end of input.
    #[error("unterminated escape sequence")]
    UnterminatedEscape,

    /// A dedent to a width that matches no enclosing indentation level.
    #[error("inconsistent indentation")]
    InconsistentIndent,
}

/// A syntax error encountered during parsing.
///
/// The message names what was expected and the surrounding construct, e.g.
/// ``expected `)` after condition of `если` ``.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message} at line {line}")]
#[diagnostic()]
pub struct ParseError {
    /// Human-readable description of the error.
    pub message: EcoString,
    /// The span of the offending token.
    #[label("here")]
    pub span: Span,
    /// 1-based line of the offending token.
    pub line: u32,
}

impl ParseError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<EcoString>, span: Span, line: u32) -> Self {
        Self {
            message: message.into(),
            span,
            line,
        }
    }
}
