// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for BearLang lexical analysis.
//!
//! This module defines the tokens produced by the lexer. BearLang is
//! indentation-sensitive, so alongside the usual atoms and operators the
//! token stream carries structural markers:
//!
//! - [`TokenKind::Newline`] for the end of each logical line
//! - [`TokenKind::Indent`] / [`TokenKind::Dedent`], synthesised whenever the
//!   leading-whitespace width of a line changes relative to the indent stack
//!
//! Each token records a [`Span`] (byte offsets, for diagnostic rendering) and
//! a 1-based line and column (for error messages).

use ecow::EcoString;

use super::Span;

/// The kind of token, not including source location.
///
/// Tokens are designed to be cheap to clone (using [`EcoString`] for string
/// data). The keyword set is closed and matched byte-exactly; there is no
/// case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Structural ===
    /// End of file.
    Eof,

    /// End of a logical line (`\n`).
    Newline,

    /// Synthetic marker: leading-whitespace width increased by one level.
    Indent,

    /// Synthetic marker: leading-whitespace width decreased by one level.
    Dedent,

    // === Atoms ===
    /// An identifier: `x`, `счётчик`, `_tmp`.
    Identifier(EcoString),

    /// An integer literal: `42`.
    Integer(EcoString),

    /// A floating-point literal: `3.14`.
    Double(EcoString),

    /// A string literal. The payload is the *decoded* contents — escape
    /// sequences have already been resolved, so `"a\"b"` is stored as `a"b`.
    String(EcoString),

    // === Keywords ===
    /// `целое` — integer type.
    KwInteger,
    /// `дробное` — double type.
    KwDouble,
    /// `строка` — string type.
    KwString,
    /// `логика` — boolean type.
    KwLogic,
    /// `если` — conditional.
    KwIf,
    /// `иначе` — else / else-if prefix.
    KwElse,
    /// `пока` — while loop.
    KwWhile,
    /// `для` — counted loop.
    KwFor,
    /// `ввод` — read one variable.
    KwInput,
    /// `вывод` — write one expression.
    KwOutput,
    /// `и` — logical and.
    KwAnd,
    /// `или` — logical or.
    KwOr,
    /// `не` — logical not.
    KwNot,
    /// `от` — loop lower bound.
    KwFrom,
    /// `до` — loop upper bound.
    KwTo,
    /// `правда` — boolean true.
    KwTrue,
    /// `ложь` — boolean false.
    KwFalse,

    // === Punctuation and operators ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^` — exponentiation, never XOR.
    Caret,
    /// `=`
    Assign,
    /// `==`
    EqualEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl TokenKind {
    /// Looks up a completed identifier in the keyword table.
    ///
    /// Returns `None` when the text is an ordinary identifier.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "целое" => Self::KwInteger,
            "дробное" => Self::KwDouble,
            "строка" => Self::KwString,
            "логика" => Self::KwLogic,
            "если" => Self::KwIf,
            "иначе" => Self::KwElse,
            "пока" => Self::KwWhile,
            "для" => Self::KwFor,
            "ввод" => Self::KwInput,
            "вывод" => Self::KwOutput,
            "и" => Self::KwAnd,
            "или" => Self::KwOr,
            "не" => Self::KwNot,
            "от" => Self::KwFrom,
            "до" => Self::KwTo,
            "правда" => Self::KwTrue,
            "ложь" => Self::KwFalse,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` if this token is one of the four type keywords.
    #[must_use]
    pub const fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            Self::KwInteger | Self::KwDouble | Self::KwString | Self::KwLogic
        )
    }

    /// Returns `true` if this is the end-of-file marker.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eof => write!(f, "<eof>"),
            Self::Newline => write!(f, "<newline>"),
            Self::Indent => write!(f, "<indent>"),
            Self::Dedent => write!(f, "<dedent>"),
            Self::Identifier(s) | Self::Integer(s) | Self::Double(s) => write!(f, "{s}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::KwInteger => write!(f, "целое"),
            Self::KwDouble => write!(f, "дробное"),
            Self::KwString => write!(f, "строка"),
            Self::KwLogic => write!(f, "логика"),
            Self::KwIf => write!(f, "если"),
            Self::KwElse => write!(f, "иначе"),
            Self::KwWhile => write!(f, "пока"),
            Self::KwFor => write!(f, "для"),
            Self::KwInput => write!(f, "ввод"),
            Self::KwOutput => write!(f, "вывод"),
            Self::KwAnd => write!(f, "и"),
            Self::KwOr => write!(f, "или"),
            Self::KwNot => write!(f, "не"),
            Self::KwFrom => write!(f, "от"),
            Self::KwTo => write!(f, "до"),
            Self::KwTrue => write!(f, "правда"),
            Self::KwFalse => write!(f, "ложь"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Caret => write!(f, "^"),
            Self::Assign => write!(f, "="),
            Self::EqualEqual => write!(f, "=="),
            Self::Less => write!(f, "<"),
            Self::LessEqual => write!(f, "<="),
            Self::Greater => write!(f, ">"),
            Self::GreaterEqual => write!(f, ">="),
        }
    }
}

/// A token with its source location.
///
/// # Examples
///
/// ```
/// use bearlang_core::source_analysis::{Span, Token, TokenKind};
///
/// let token = Token::new(TokenKind::Identifier("x".into()), Span::new(0, 1), 1, 1);
/// assert!(matches!(token.kind(), TokenKind::Identifier(_)));
/// assert_eq!(token.line(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
    line: u32,
    column: u32,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Self {
            kind,
            span,
            line,
            column,
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the 1-based line this token starts on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 1-based column this token starts at.
    ///
    /// Columns count whitespace width, not bytes: a tab advances the column
    /// by four, and multi-byte identifiers count one column per character.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup() {
        assert_eq!(TokenKind::keyword("целое"), Some(TokenKind::KwInteger));
        assert_eq!(TokenKind::keyword("вывод"), Some(TokenKind::KwOutput));
        assert_eq!(TokenKind::keyword("правда"), Some(TokenKind::KwTrue));
        assert_eq!(TokenKind::keyword("x"), None);
        // Keywords are case-sensitive, exact byte matches.
        assert_eq!(TokenKind::keyword("Целое"), None);
    }

    #[test]
    fn type_keyword_predicate() {
        assert!(TokenKind::KwInteger.is_type_keyword());
        assert!(TokenKind::KwDouble.is_type_keyword());
        assert!(TokenKind::KwString.is_type_keyword());
        assert!(TokenKind::KwLogic.is_type_keyword());
        assert!(!TokenKind::KwIf.is_type_keyword());
        assert!(!TokenKind::Identifier("целое".into()).is_type_keyword());
    }

    #[test]
    fn token_kind_display() {
        assert_eq!(TokenKind::Identifier("foo".into()).to_string(), "foo");
        assert_eq!(TokenKind::Integer("42".into()).to_string(), "42");
        assert_eq!(TokenKind::String("hello".into()).to_string(), "\"hello\"");
        assert_eq!(TokenKind::KwIf.to_string(), "если");
        assert_eq!(TokenKind::EqualEqual.to_string(), "==");
        assert_eq!(TokenKind::Indent.to_string(), "<indent>");
        assert_eq!(TokenKind::Eof.to_string(), "<eof>");
    }

    #[test]
    fn token_accessors() {
        let token = Token::new(TokenKind::Integer("7".into()), Span::new(4, 5), 2, 5);
        assert_eq!(token.span().start(), 4);
        assert_eq!(token.line(), 2);
        assert_eq!(token.column(), 5);
        assert!(matches!(token.into_kind(), TokenKind::Integer(s) if s == "7"));
    }
}
