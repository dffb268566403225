// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! BearLang translator core.
//!
//! BearLang is a small teaching language with Russian keywords and
//! Python-style significant indentation. This crate contains the
//! source-to-source pipeline that turns BearLang text into a complete C++
//! translation unit:
//!
//! - Lexical analysis (tokenization with synthetic INDENT/DEDENT markers)
//! - Parsing (typed AST construction)
//! - Code generation (C++ output with scoped name mangling)
//!
//! Data flows one direction — text → tokens → AST → text — and the whole
//! pipeline is a pure function of the input string. Compiling and running
//! the generated C++ is the caller's concern.
//!
//! # Example
//!
//! ```
//! let cpp = bearlang_core::translate("вывод \"Привет\"\n").unwrap();
//! assert!(cpp.contains("std::cout << \"Привет\" << std::endl;"));
//! ```

pub mod ast;
pub mod codegen;
pub mod source_analysis;

use miette::Diagnostic;
use thiserror::Error;

use crate::source_analysis::Span;

/// An error from any stage of the translation pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum TranslateError {
    /// The lexer rejected the input.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] source_analysis::LexError),

    /// The parser rejected the token stream.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] source_analysis::ParseError),

    /// The code generator failed to write its output buffer.
    #[error(transparent)]
    CodeGen(#[from] codegen::cpp::CodeGenError),
}

impl TranslateError {
    /// Returns the source span of the error, when the stage tracks one.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(error) => Some(error.span),
            Self::Parse(error) => Some(error.span),
            Self::CodeGen(_) => None,
        }
    }
}

/// Translates BearLang source text into a C++ translation unit.
///
/// Chains [`source_analysis::tokenize`], [`source_analysis::parse`], and
/// [`codegen::cpp::generate`]. Identical input produces byte-identical
/// output.
///
/// # Errors
///
/// Returns a [`TranslateError`] wrapping the first failing stage's error.
pub fn translate(source: &str) -> Result<String, TranslateError> {
    let tokens = source_analysis::tokenize(source)?;
    let program = source_analysis::parse(tokens)?;
    Ok(codegen::cpp::generate(&program)?)
}

/// Re-export of commonly used types.
pub mod prelude {
    pub use crate::ast::{
        BinaryOp, Expression, IfBranch, IfStatement, Literal, Program, Statement, UnaryOp,
        ValueType,
    };
    pub use crate::source_analysis::{
        LexError, ParseError, Span, Token, TokenKind, parse, tokenize,
    };
    pub use crate::{TranslateError, translate};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_chains_all_stages() {
        let cpp = translate("целое n = 5\nвывод n\n").unwrap();
        assert!(cpp.starts_with("#include <cmath>"));
        assert!(cpp.contains("int vr_1 = 5;"));
        assert!(cpp.ends_with("}\n"));
    }

    #[test]
    fn translate_surfaces_lexer_errors() {
        let err = translate("вывод \"незакрытая\n").unwrap_err();
        assert!(matches!(err, TranslateError::Lex(_)));
        assert!(err.span().is_some());
    }

    #[test]
    fn translate_surfaces_parser_errors() {
        let err = translate("целое a = 1\n    целое b = 2\n").unwrap_err();
        let TranslateError::Parse(parse_error) = &err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(parse_error.message, "unexpected indent");
    }
}
