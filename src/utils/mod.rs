//! Cross-platform utilities shared by the CLI commands.
//!
//! - [`fs`] - atomic file writes and text/JSON helpers
//! - [`platform`] - home directory and user name resolution

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, read_text_file};
pub use platform::{current_username, home_dir};
