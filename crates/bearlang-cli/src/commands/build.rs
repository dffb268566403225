// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Translate BearLang sources to C++.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use std::fs;
use tracing::{debug, info, instrument};

use crate::diagnostic::CompileDiagnostic;

/// Translates `.bear` source files to `.cpp` files in the build directory.
///
/// `path` may be a single `.bear` file or a directory containing them.
/// Returns the written `.cpp` paths in a deterministic (sorted) order.
#[instrument(skip_all, fields(path = %path))]
pub fn build(path: &str, out_dir: Option<&str>) -> Result<Vec<Utf8PathBuf>> {
    info!("Starting build");
    let source_path = Utf8PathBuf::from(path);
    let source_files = find_source_files(&source_path)?;

    if source_files.is_empty() {
        miette::bail!("No .bear source files found in '{path}'");
    }
    debug!(count = source_files.len(), "Found source files");

    let build_dir = match out_dir {
        Some(dir) => Utf8PathBuf::from(dir),
        None => default_build_dir(&source_path),
    };
    fs::create_dir_all(&build_dir)
        .into_diagnostic()
        .wrap_err("Failed to create build directory")?;

    let mut written = Vec::new();
    for file in &source_files {
        let cpp_file = translate_file(file, &build_dir)?;
        written.push(cpp_file);
    }

    info!(count = written.len(), "Build completed");
    Ok(written)
}

/// Translates one `.bear` file, writing `<stem>.cpp` into `build_dir`.
pub fn translate_file(path: &Utf8Path, build_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let stem = path
        .file_stem()
        .ok_or_else(|| miette::miette!("File '{path}' has no name"))?;

    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{path}'"))?;

    let cpp_source = bearlang_core::translate(&source).map_err(|error| {
        miette::Report::new(CompileDiagnostic::from_translate_error(
            &error,
            path.as_str(),
            &source,
        ))
    })?;

    let cpp_file = build_dir.join(format!("{stem}.cpp"));
    fs::write(&cpp_file, cpp_source)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write '{cpp_file}'"))?;

    debug!(%cpp_file, "Generated C++");
    Ok(cpp_file)
}

/// Finds all `.bear` source files at the given path.
///
/// A file must have the `.bear` extension; a directory is scanned one level
/// deep and the results are sorted for deterministic ordering.
pub fn find_source_files(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if path.extension() == Some("bear") {
            files.push(path.to_path_buf());
        } else {
            miette::bail!("File '{path}' is not a .bear source file");
        }
    } else if path.is_dir() {
        for entry in fs::read_dir(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read directory '{path}'"))?
        {
            let entry = entry.into_diagnostic()?;
            let entry_path = Utf8PathBuf::from_path_buf(entry.path())
                .map_err(|_| miette::miette!("Non-UTF-8 path"))?;
            if entry_path.is_file() && entry_path.extension() == Some("bear") {
                files.push(entry_path);
            }
        }
        files.sort();
    } else {
        miette::bail!("Path '{path}' does not exist");
    }

    Ok(files)
}

/// Picks the default build directory next to the sources.
fn default_build_dir(source_path: &Utf8Path) -> Utf8PathBuf {
    let root = if source_path.is_dir() {
        source_path.to_path_buf()
    } else {
        source_path
            .parent()
            .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf)
    };
    root.join("build")
}
