// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Translate, compile, and execute a BearLang program.

use camino::Utf8PathBuf;
use miette::Result;
use tracing::info;

use crate::cpp_compiler::CppCompiler;

use super::build;

/// Translates a single `.bear` file, compiles the generated C++ with the
/// host compiler, and runs the binary with inherited stdio.
///
/// Returns the program's exit code so the caller can propagate it.
///
/// # Errors
///
/// Fails when translation fails, or when the host compiler or the binary
/// cannot be invoked. A non-zero exit of the generated program is not an
/// error here — it is returned as the exit code.
pub fn run(path: &str) -> Result<i32> {
    let source_path = Utf8PathBuf::from(path);
    if !source_path.is_file() {
        miette::bail!("'{path}' is not a file; `run` takes a single .bear file");
    }

    let written = build::build(path, None)?;
    let cpp_file = written
        .first()
        .ok_or_else(|| miette::miette!("Build produced no output"))?;

    let build_dir = cpp_file
        .parent()
        .map_or_else(|| Utf8PathBuf::from("."), camino::Utf8Path::to_path_buf);
    let compiler = CppCompiler::new(build_dir);
    let binary = compiler.compile(cpp_file)?;

    info!(%binary, "Running");
    CppCompiler::run(&binary)
}
