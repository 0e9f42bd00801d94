//! Platform helpers: home directory and user name lookup.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine home directory")
}

/// Returns the current OS user name.
///
/// Only used to substitute the `username` placeholder in default paths shown
/// by interactive prompts, so an environment-based lookup is sufficient. Falls
/// back to the literal placeholder when neither variable is set.
pub fn current_username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "username".to_string())
}
