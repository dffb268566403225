// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! BearLang command-line interface.
//!
//! This is the main entry point for the `bearlang` command.

use clap::{Parser, Subcommand};
use miette::Result;

mod commands;
mod cpp_compiler;
mod diagnostic;

/// BearLang: a small teaching language translated to C++
#[derive(Debug, Parser)]
#[command(name = "bearlang")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate BearLang source files to C++
    Build {
        /// Source file or directory to translate
        #[arg(default_value = ".")]
        path: String,

        /// Directory for the generated .cpp files (default: build/ next to
        /// the sources)
        #[arg(long)]
        out_dir: Option<String>,
    },

    /// Translate, compile, and run a BearLang program
    Run {
        /// The .bear source file to run
        path: String,
    },

    /// Check source files for errors without writing output
    Check {
        /// Source file or directory to check
        #[arg(default_value = ".")]
        path: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber only if RUST_LOG is explicitly set,
    // keeping stderr clean for the translated program's own output.
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    }

    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build { path, out_dir } => {
            commands::build::build(&path, out_dir.as_deref()).map(|_| 0)
        }
        Command::Run { path } => commands::run::run(&path),
        Command::Check { path } => commands::check::check(&path).map(|()| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // miette already provides nice error formatting, just display it
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
