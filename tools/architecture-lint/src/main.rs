//! CLI entry point for the layer-boundary lint.
//!
//! Usage: `architecture-lint [BACKEND_DIR]`. Without an argument the
//! `backend/` directory of this workspace is linted.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn default_backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("backend")
}

fn main() -> ExitCode {
    let backend_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_backend_dir);

    match architecture_lint::lint_backend_sources(&backend_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}
