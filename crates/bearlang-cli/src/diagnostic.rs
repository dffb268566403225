// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Rendered error diagnostics using miette.
//!
//! Converts [`TranslateError`]s from the translator core into miette-formatted
//! errors with:
//! - Source code context
//! - Arrows pointing to the error location
//! - The failing file's name in the header

use bearlang_core::TranslateError;
use miette::{Diagnostic, SourceSpan};

/// A translation diagnostic with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(bearlang::translate))]
pub struct CompileDiagnostic {
    /// Human-readable error message.
    pub message: String,
    /// Source code for context.
    #[source_code]
    pub src: miette::NamedSource<String>,
    /// Location of the error.
    #[label("{label}")]
    pub span: SourceSpan,
    /// Label for the error span.
    pub label: String,
}

impl CompileDiagnostic {
    /// Creates a rendered diagnostic from a core translation error.
    pub fn from_translate_error(error: &TranslateError, source_path: &str, source: &str) -> Self {
        let label = match error {
            TranslateError::Lex(_) => "lexical error here",
            TranslateError::Parse(_) => "syntax error here",
            TranslateError::CodeGen(_) => "error",
        };
        let span = error.span().unwrap_or_default();

        Self {
            message: error.to_string(),
            src: miette::NamedSource::new(source_path, source.to_string()),
            span: span.into(),
            label: label.to_string(),
        }
    }
}
