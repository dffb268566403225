// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexing and parsing for BearLang source code.
//!
//! This module contains the lexer, the parser, and their shared token and
//! error types.
//!
//! # Lexical Analysis
//!
//! [`tokenize`] converts source text into a stream of [`Token`]s, including
//! the synthetic [`TokenKind::Indent`] / [`TokenKind::Dedent`] markers that
//! carry BearLang's block structure. Each token records a [`Span`] and a
//! 1-based line and column.
//!
//! ```
//! use bearlang_core::source_analysis::{tokenize, TokenKind};
//!
//! let tokens = tokenize("целое n = 5\n").unwrap();
//! assert!(matches!(tokens[0].kind(), TokenKind::KwInteger));
//! ```
//!
//! # Parsing
//!
//! [`parse`] converts tokens into a [`Program`](crate::ast::Program).
//! Binary operator precedence uses Pratt parsing with a declarative
//! binding-power table; `^` is right-associative.
//!
//! # Error Handling
//!
//! Both stages are fail-fast: the first [`LexError`] or [`ParseError`]
//! aborts its stage and nothing partial is returned. Errors carry spans and
//! integrate with [`miette`] for rendered diagnostics.

mod error;
mod lexer;
mod parser;
mod span;
mod token;

// Property-based tests for the lexer
#[cfg(test)]
mod lexer_property_tests;

pub use error::{LexError, LexErrorKind, ParseError};
pub use lexer::{Lexer, tokenize};
pub use parser::parse;
pub use span::Span;
pub use token::{Token, TokenKind};
