// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Check BearLang sources for errors without writing output.

use camino::Utf8PathBuf;
use miette::{Context, IntoDiagnostic, Result};
use std::fs;
use tracing::info;

use crate::diagnostic::CompileDiagnostic;

use super::build::find_source_files;

/// Translates every `.bear` file at `path` and discards the output,
/// reporting the first failure with full source context.
pub fn check(path: &str) -> Result<()> {
    let source_files = find_source_files(&Utf8PathBuf::from(path))?;
    if source_files.is_empty() {
        miette::bail!("No .bear source files found in '{path}'");
    }

    for file in &source_files {
        let source = fs::read_to_string(file)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read '{file}'"))?;

        bearlang_core::translate(&source).map_err(|error| {
            miette::Report::new(CompileDiagnostic::from_translate_error(
                &error,
                file.as_str(),
                &source,
            ))
        })?;

        println!("{file}: ok");
    }

    info!(count = source_files.len(), "Check completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn check_accepts_valid_program() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("ok.bear");
        fs::write(&file, "для (целое i от 1 до 3)\n    вывод i\n").unwrap();

        assert!(check(file.to_str().unwrap()).is_ok());
    }

    #[test]
    fn check_reports_errors_with_location() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("bad.bear");
        fs::write(&file, "если (x == 0\n    вывод 1\n").unwrap();

        let err = check(file.to_str().unwrap()).unwrap_err();
        let message = format!("{err:?}");
        assert!(message.contains("expected `)` after condition of `если`"));
    }
}
