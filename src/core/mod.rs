//! Core types shared across the CLI: the error taxonomy and its
//! user-facing presentation.

pub mod error;

pub use error::{ErrorContext, OpenToolsError, user_friendly_error};
