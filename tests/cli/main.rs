//! CLI integration tests for citedit.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Stdin/stdout handling and in-place edits
//! - Cursor and warning reporting on stderr
//! - Exit codes for user-facing errors
//! - Bibliography and config file loading

mod check;
mod common;
mod edit;
mod parse;
