// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the BearLang lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated
//! inputs:
//!
//! 1. **Lexer never panics** — arbitrary string input produces `Ok` or a
//!    `LexError`, never a panic
//! 2. **Lexer is deterministic** — same input always produces same tokens
//! 3. **EOF is always last** — every successful lex ends with exactly one EOF
//! 4. **Token spans within input** — all spans satisfy `end <= input.len()`
//! 5. **Indents balance** — every successful lex emits equally many
//!    `Indent` and `Dedent` tokens
//! 6. **Valid fragments produce no errors** — known-valid programs lex cleanly

use proptest::prelude::*;

use super::lexer::tokenize;
use super::token::TokenKind;

// ============================================================================
// Generators
// ============================================================================

/// Known-valid single-line programs that must lex without errors.
const VALID_LINES: &[&str] = &[
    "целое n = 5\n",
    "дробное пи = 3.14\n",
    "строка имя = \"мишка\"\n",
    "логика флаг = правда\n",
    "n = n + 1\n",
    "ввод x\n",
    "вывод x * (2 + y)\n",
    "вывод не правда или ложь\n",
    "вывод 2^3^2\n",
    "вывод \"a\\\"b\\\\c\\n\\t\"\n",
    "// комментарий\n",
];

/// Known-valid block programs that must lex cleanly with balanced indents.
const VALID_BLOCKS: &[&str] = &[
    "если (x == 0)\n    вывод x\n",
    "если (x == 0)\n    вывод 1\nиначе\n    вывод 2\n",
    "пока (n < 10)\n    n = n + 1\n",
    "для (целое i от 1 до 3)\n    вывод i\n",
    "пока (правда)\n    если (x > 0)\n        вывод x\n    вывод 0\n",
];

fn valid_line() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_LINES).prop_map(std::string::ToString::to_string)
}

fn valid_block() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_BLOCKS).prop_map(std::string::ToString::to_string)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Property 1: the lexer never panics on arbitrary string input.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,500}") {
        let _result = tokenize(&input);
    }

    /// Property 2: lexing is deterministic.
    #[test]
    fn lexer_is_deterministic(input in "\\PC{0,200}") {
        prop_assert_eq!(tokenize(&input), tokenize(&input));
    }

    /// Property 3: every successful lex ends with exactly one EOF token.
    #[test]
    fn eof_is_always_last(input in "\\PC{0,200}") {
        if let Ok(tokens) = tokenize(&input) {
            prop_assert!(matches!(tokens.last().map(super::Token::kind), Some(TokenKind::Eof)));
            let eof_count = tokens.iter().filter(|t| t.kind().is_eof()).count();
            prop_assert_eq!(eof_count, 1);
        }
    }

    /// Property 4: token spans stay within the input.
    #[test]
    fn token_spans_within_input(input in "\\PC{0,200}") {
        if let Ok(tokens) = tokenize(&input) {
            for token in &tokens {
                prop_assert!(token.span().end() as usize <= input.len());
                prop_assert!(token.span().start() <= token.span().end());
            }
        }
    }

    /// Property 5: indents and dedents balance on every successful lex,
    /// dedenting fully by end of input.
    #[test]
    fn indents_balance(input in "\\PC{0,300}") {
        if let Ok(tokens) = tokenize(&input) {
            let indents = tokens.iter().filter(|t| matches!(t.kind(), TokenKind::Indent)).count();
            let dedents = tokens.iter().filter(|t| matches!(t.kind(), TokenKind::Dedent)).count();
            prop_assert_eq!(indents, dedents);
        }
    }

    /// Property 6a: known-valid lines lex without errors.
    #[test]
    fn valid_lines_lex_cleanly(line in valid_line()) {
        prop_assert!(tokenize(&line).is_ok());
    }

    /// Property 6b: known-valid block programs lex without errors, with
    /// balanced indentation.
    #[test]
    fn valid_blocks_lex_cleanly(block in valid_block()) {
        let tokens = tokenize(&block).unwrap();
        let indents = tokens.iter().filter(|t| matches!(t.kind(), TokenKind::Indent)).count();
        let dedents = tokens.iter().filter(|t| matches!(t.kind(), TokenKind::Dedent)).count();
        prop_assert_eq!(indents, dedents);
        prop_assert!(indents >= 1);
    }

    /// Concatenating two valid lines at the same indentation level is still
    /// a valid lex.
    #[test]
    fn concatenated_lines_lex_cleanly(a in valid_line(), b in valid_line()) {
        let combined = format!("{a}{b}");
        prop_assert!(tokenize(&combined).is_ok());
    }
}
