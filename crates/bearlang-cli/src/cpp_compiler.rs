// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Host C++ compiler integration.
//!
//! This module handles compilation of generated `.cpp` files to native
//! binaries by invoking the external C++ compiler, and execution of the
//! resulting binary. The translator core never reaches this far: everything
//! here is a thin shell-out, and failures of the host compiler or of the
//! generated program are reported as their own errors, never attributed to
//! the translator.
//!
//! The compiler defaults to `g++` and can be overridden with the
//! `BEARLANG_CXX` environment variable.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use std::process::Command;
use tracing::{debug, info};

/// The C++ language standard the generated code targets.
const CPP_STANDARD: &str = "-std=c++20";

/// Host C++ compiler driver.
#[derive(Debug)]
pub struct CppCompiler {
    /// Output directory for compiled binaries.
    output_dir: Utf8PathBuf,
}

impl CppCompiler {
    /// Creates a new compiler driver with the specified output directory.
    pub fn new(output_dir: Utf8PathBuf) -> Self {
        Self { output_dir }
    }

    /// Compiles a generated `.cpp` file to a native binary.
    ///
    /// Returns the path of the produced binary.
    ///
    /// # Errors
    ///
    /// Fails when the host compiler cannot be spawned or exits non-zero;
    /// the compiler's stderr is included in the error.
    pub fn compile(&self, cpp_file: &Utf8Path) -> Result<Utf8PathBuf> {
        let stem = cpp_file
            .file_stem()
            .ok_or_else(|| miette::miette!("File '{cpp_file}' has no name"))?;
        let binary = self.output_dir.join(stem);

        let compiler = host_compiler();
        info!(%cpp_file, %binary, %compiler, "Compiling generated C++");

        let output = Command::new(&compiler)
            .arg(CPP_STANDARD)
            .arg(cpp_file)
            .arg("-o")
            .arg(&binary)
            .output()
            .into_diagnostic()
            .wrap_err_with(|| {
                format!(
                    "Failed to run '{compiler}'. Is a C++ compiler installed? \
                     (set BEARLANG_CXX to override)"
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            miette::bail!("Host C++ compiler reported errors:\n{stderr}");
        }

        debug!(%binary, "Host compilation succeeded");
        Ok(binary)
    }

    /// Executes a compiled binary, inheriting stdio.
    ///
    /// Returns the child's exit code so the caller can propagate it.
    ///
    /// # Errors
    ///
    /// Fails when the binary cannot be spawned.
    pub fn run(binary: &Utf8Path) -> Result<i32> {
        debug!(%binary, "Running compiled program");
        let status = Command::new(binary)
            .status()
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to execute '{binary}'"))?;
        Ok(status.code().unwrap_or(1))
    }
}

/// Returns the host C++ compiler command.
fn host_compiler() -> String {
    std::env::var("BEARLANG_CXX").unwrap_or_else(|_| "g++".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn compile_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let out_dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let compiler = CppCompiler::new(out_dir.clone());

        let result = compiler.compile(&out_dir.join("no_such_file.cpp"));
        assert!(result.is_err());
    }

    #[test]
    fn compile_rejects_extensionless_dir_like_input() {
        let temp = TempDir::new().unwrap();
        let out_dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let compiler = CppCompiler::new(out_dir);

        let result = compiler.compile(Utf8Path::new("/"));
        assert!(result.is_err());
    }
}
