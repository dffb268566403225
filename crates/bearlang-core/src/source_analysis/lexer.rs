// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for BearLang source code.
//!
//! This module converts source text into a flat stream of [`Token`]s. The
//! lexer is hand-written; BearLang's Python-style block structure means the
//! stream carries synthetic [`TokenKind::Indent`] / [`TokenKind::Dedent`]
//! markers in addition to the usual atoms and operators.
//!
//! # Indentation
//!
//! A stack of indent widths (initially `[0]`) tracks open blocks. At the
//! start of every logical line the leading whitespace is measured — a space
//! is one column, a tab is four — and compared against the top of the stack:
//! wider pushes and emits one `Indent`, narrower pops and emits one `Dedent`
//! per level. A narrower width that matches no enclosing level is an error.
//! Blank lines and comment-only lines are invisible to this bookkeeping and
//! produce no tokens at all.
//!
//! # Identifiers
//!
//! Identifiers start with an ASCII letter, `_`, or any non-ASCII character,
//! and continue with alphanumerics, `_`, or non-ASCII. Cyrillic names work
//! without any normalisation; a completed identifier is looked up in the
//! keyword table byte-exactly.
//!
//! # Failure
//!
//! Lexing is fail-fast: the first [`LexError`] aborts the stage and no
//! partial token stream is returned.
//!
//! # Example
//!
//! ```
//! use bearlang_core::source_analysis::{tokenize, TokenKind};
//!
//! let tokens = tokenize("вывод 1 + 2\n").unwrap();
//! assert!(matches!(tokens[0].kind(), TokenKind::KwOutput));
//! assert!(matches!(tokens.last().unwrap().kind(), TokenKind::Eof));
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::{LexError, LexErrorKind, Span, Token, TokenKind};

/// Width of a tab stop in indentation columns.
const TAB_WIDTH: u32 = 4;

/// Tokenizes BearLang source into a vector of tokens.
///
/// The returned vector always ends with [`TokenKind::Eof`], preceded by one
/// [`TokenKind::Dedent`] for every indentation level still open at end of
/// input.
///
/// # Errors
///
/// Returns a [`LexError`] on the first lexically impossible input: an
/// unknown character, a malformed string literal, or inconsistent
/// indentation.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// A lexer that tokenizes BearLang source code.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Current 1-based line.
    line: u32,
    /// Current 1-based column.
    column: u32,
    /// Whether the next token begins a logical line.
    at_line_start: bool,
    /// Stack of open indentation widths. The base entry `0` is never popped.
    indent_stack: Vec<u32>,
    /// Accumulated output tokens.
    tokens: Vec<Token>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("line", &self.line)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
            at_line_start: true,
            indent_stack: vec![0],
            tokens: Vec::new(),
        }
    }

    /// Consumes the lexer and produces the token stream.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] on the first invalid input; see [`tokenize`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.peek_char() {
            if self.at_line_start {
                self.lex_line_start()?;
                continue;
            }
            match c {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => self.lex_newline(),
                '/' if self.peek_char_n(1) == Some('/') => {
                    self.advance_while(|c| c != '\n');
                }
                '"' => self.lex_string()?,
                c if c.is_ascii_digit() => self.lex_number(),
                c if is_identifier_start(c) => self.lex_identifier_or_keyword(),
                c => self.lex_operator(c)?,
            }
        }

        let end = self.current_position();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push(TokenKind::Dedent, Span::new(end, end), self.line, 1);
        }
        self.push(TokenKind::Eof, Span::new(end, end), self.line, 1);
        Ok(self.tokens)
    }

    // ========================================================================
    // Character Management
    // ========================================================================

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Appends a token to the output stream.
    fn push(&mut self, kind: TokenKind, span: Span, line: u32, column: u32) {
        self.tokens.push(Token::new(kind, span, line, column));
    }

    // ========================================================================
    // Indentation
    // ========================================================================

    /// Handles the start of a logical line: measures leading whitespace and
    /// synthesises `Indent`/`Dedent` tokens.
    ///
    /// Blank lines and comment-only lines are consumed whole (including
    /// their terminating newline) without emitting anything.
    fn lex_line_start(&mut self) -> Result<(), LexError> {
        let mut width: u32 = 0;
        loop {
            match self.peek_char() {
                Some(' ') => {
                    width += 1;
                    self.advance();
                }
                Some('\t') => {
                    width += TAB_WIDTH;
                    self.advance();
                }
                Some('\r') => {
                    self.advance();
                }
                _ => break,
            }
        }

        match self.peek_char() {
            // Blank line.
            Some('\n') => {
                self.advance();
            }
            // Comment-only line.
            Some('/') if self.peek_char_n(1) == Some('/') => {
                self.advance_while(|c| c != '\n');
                self.advance();
            }
            // Trailing whitespace at end of input; dedents follow in tokenize().
            None => {}
            Some(_) => {
                self.apply_indentation(width)?;
                self.column = width + 1;
                self.at_line_start = false;
            }
        }
        Ok(())
    }

    /// Compares a measured line width against the indent stack, emitting
    /// `Indent`/`Dedent` tokens as levels open and close.
    fn apply_indentation(&mut self, width: u32) -> Result<(), LexError> {
        let here = self.current_position();
        let span = Span::new(here, here);
        if width > self.indent_top() {
            self.indent_stack.push(width);
            self.push(TokenKind::Indent, span, self.line, 1);
        } else {
            while width < self.indent_top() {
                self.indent_stack.pop();
                self.push(TokenKind::Dedent, span, self.line, 1);
            }
            if width != self.indent_top() {
                return Err(LexError::new(
                    LexErrorKind::InconsistentIndent,
                    span,
                    self.line,
                    1,
                ));
            }
        }
        Ok(())
    }

    /// Returns the width at the top of the indent stack.
    fn indent_top(&self) -> u32 {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    // ========================================================================
    // Token Scanners
    // ========================================================================

    /// Lexes a newline and arms the line-start logic for the next line.
    fn lex_newline(&mut self) {
        let start = self.current_position();
        let (line, column) = (self.line, self.column);
        self.advance();
        self.push(TokenKind::Newline, self.span_from(start), line, column);
        self.at_line_start = true;
    }

    /// Lexes an identifier, consulting the keyword table on completion.
    fn lex_identifier_or_keyword(&mut self) {
        let start = self.current_position();
        let (line, column) = (self.line, self.column);
        self.advance_while(is_identifier_continue);
        let text = self.text_for(self.span_from(start));
        let kind =
            TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Identifier(EcoString::from(text)));
        self.push(kind, self.span_from(start), line, column);
    }

    /// Lexes an integer or double literal.
    ///
    /// A decimal point is only consumed when a digit follows, so `3.` lexes
    /// as the integer `3` followed by a stray `.`.
    fn lex_number(&mut self) {
        let start = self.current_position();
        let (line, column) = (self.line, self.column);
        self.advance_while(|c| c.is_ascii_digit());

        let is_double = if self.peek_char() == Some('.')
            && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // consume '.'
            self.advance_while(|c| c.is_ascii_digit());
            true
        } else {
            false
        };

        let text = EcoString::from(self.text_for(self.span_from(start)));
        let kind = if is_double {
            TokenKind::Double(text)
        } else {
            TokenKind::Integer(text)
        };
        self.push(kind, self.span_from(start), line, column);
    }

    /// Lexes a string literal, decoding escape sequences.
    ///
    /// Recognised escapes: `\\`, `\"`, `\n`, `\t`. The stored lexeme is the
    /// decoded contents, not the raw spelling.
    fn lex_string(&mut self) -> Result<(), LexError> {
        let start = self.current_position();
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.peek_char() {
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedString,
                        self.span_from(start),
                        line,
                        column,
                    ));
                }
                Some('\n') => {
                    return Err(LexError::new(
                        LexErrorKind::NewlineInString,
                        self.span_from(start),
                        line,
                        column,
                    ));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_start = self.current_position();
                    let escape_column = self.column;
                    self.advance(); // backslash
                    match self.advance() {
                        None => {
                            return Err(LexError::new(
                                LexErrorKind::UnterminatedEscape,
                                self.span_from(escape_start),
                                line,
                                escape_column,
                            ));
                        }
                        Some('\\') => value.push('\\'),
                        Some('"') => value.push('"'),
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some(c) => {
                            return Err(LexError::new(
                                LexErrorKind::UnknownEscape(c),
                                self.span_from(escape_start),
                                line,
                                escape_column,
                            ));
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        self.push(
            TokenKind::String(EcoString::from(value)),
            self.span_from(start),
            line,
            column,
        );
        Ok(())
    }

    /// Lexes a punctuation or operator token.
    ///
    /// Two-character operators (`==`, `<=`, `>=`) are recognised greedily
    /// before their one-character forms.
    fn lex_operator(&mut self, c: char) -> Result<(), LexError> {
        let start = self.current_position();
        let (line, column) = (self.line, self.column);

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '=' => {
                if self.peek_char_n(1) == Some('=') {
                    self.advance();
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Assign
                }
            }
            '<' => {
                if self.peek_char_n(1) == Some('=') {
                    self.advance();
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.peek_char_n(1) == Some('=') {
                    self.advance();
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            _ => {
                self.advance();
                return Err(LexError::new(
                    LexErrorKind::UnexpectedCharacter(c),
                    self.span_from(start),
                    line,
                    column,
                ));
            }
        };

        self.advance();
        self.push(kind, self.span_from(start), line, column);
        Ok(())
    }
}

/// Returns `true` if the character can start an identifier.
///
/// Any non-ASCII character counts, which makes Cyrillic names work without
/// UTF-8-aware classification.
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Returns `true` if the character can continue an identifier.
fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}
