//! Error handling for the OpenTools CLI.
//!
//! Two layers, following the usual split between typed and contextual errors:
//!
//! - [`OpenToolsError`] - strongly typed failure cases the commands can match
//!   on. Every variant is fatal; nothing is retried automatically.
//! - [`ErrorContext`] - wraps any [`anyhow::Error`] for terminal display,
//!   attaching an actionable suggestion where one exists.
//!
//! Commands return `anyhow::Result` and bubble typed errors through it with
//! `?`; [`user_friendly_error`] recovers the typed variant at the top level to
//! pick a suggestion.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// All failure cases surfaced by the CLI.
///
/// Distinctions that matter and must not be collapsed:
/// - a *missing* config file ([`ConfigNotFound`](Self::ConfigNotFound)) is
///   recoverable on install (a fresh document is created) but fatal on
///   uninstall;
/// - a *malformed* config file ([`MalformedConfig`](Self::MalformedConfig)) is
///   always fatal and never overwritten, since resetting it would destroy the
///   user's configuration.
#[derive(Error, Debug)]
pub enum OpenToolsError {
    /// The requested server id has no entry in the registry.
    #[error("Server \"{name}\" not found in registry")]
    ServerNotFound {
        /// The id that was requested
        name: String,
    },

    /// The server is only distributed as source and cannot be installed
    /// automatically.
    #[error(
        "Server \"{name}\" is a source distribution and cannot be installed automatically. To install it, visit {source_url}"
    )]
    SourceDistribution {
        /// The server id
        name: String,
        /// Where the user can obtain the server manually
        source_url: String,
    },

    /// The client cannot be used with this operation (e.g. uninstalling from
    /// a client that registers servers through an external command).
    #[error("Client \"{client}\" does not support {operation}")]
    UnsupportedClientOperation {
        /// The client id as given on the command line
        client: String,
        /// The operation that was attempted
        operation: String,
    },

    /// The host operating system is not supported at all.
    #[error("This command is only supported on macOS and Windows")]
    HostPlatformUnsupported,

    /// The client's config file does not exist where it should.
    #[error("Config file not found at {path}. Is {client} installed?", path = .path.display())]
    ConfigNotFound {
        /// Display name of the client
        client: String,
        /// The resolved config file path
        path: PathBuf,
    },

    /// The server has no entry in the client's configuration.
    #[error("Server \"{name}\" is not installed")]
    ServerNotInstalled {
        /// The server id
        name: String,
    },

    /// The config file exists but cannot be used as-is.
    ///
    /// Deliberately distinct from [`ConfigNotFound`](Self::ConfigNotFound):
    /// absence creates a fresh document, malformation aborts.
    #[error("Malformed config file {path}: {reason}", path = .path.display())]
    MalformedConfig {
        /// The config file path
        path: PathBuf,
        /// Parse error or shape mismatch description
        reason: String,
    },

    /// An external registration command failed or could not be spawned.
    #[error("'{command}' failed: {detail}")]
    ExternalCommand {
        /// The executable that was invoked
        command: String,
        /// The child's stderr (or stdout when stderr was empty)
        detail: String,
    },
}

/// An error prepared for terminal display: the underlying failure plus an
/// optional suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// An actionable hint, shown below the error
    pub suggestion: Option<String>,
}

impl ErrorContext {
    /// Wraps an error with no suggestion attached.
    pub fn new(error: anyhow::Error) -> Self {
        Self { error, suggestion: None }
    }

    /// Attaches a suggestion shown below the error message.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Prints the error (and its cause chain) to stderr with colors.
    pub fn display(&self) {
        eprintln!("{} {:#}", "Error:".red().bold(), self.error);
        if let Some(suggestion) = &self.suggestion {
            eprintln!();
            eprintln!("{} {}", "Suggestion:".yellow().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.error)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

/// Converts any error into an [`ErrorContext`], attaching a suggestion when
/// the underlying typed error has a well-known remedy.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = error.downcast_ref::<OpenToolsError>().and_then(suggestion_for);
    ErrorContext { error, suggestion }
}

fn suggestion_for(error: &OpenToolsError) -> Option<String> {
    match error {
        OpenToolsError::ServerNotFound { .. } => {
            Some("Browse available servers at https://opentools.computer/registry".to_string())
        }
        OpenToolsError::ServerNotInstalled { .. } => {
            Some("Run 'opentools list' to see which servers are installed".to_string())
        }
        OpenToolsError::MalformedConfig { path, .. } => Some(format!(
            "Fix or remove {} manually; it will not be overwritten while invalid",
            path.display()
        )),
        OpenToolsError::ExternalCommand { command, .. } => {
            Some(format!("Make sure '{command}' is installed and on your PATH"))
        }
        OpenToolsError::UnsupportedClientOperation { .. } => {
            Some("Use --client claude or --client continue for this command".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_error_survives_anyhow_context() {
        let err: anyhow::Error = OpenToolsError::ServerNotFound { name: "foo".to_string() }.into();
        let err = err.context("Failed to install server: foo");

        let ctx = user_friendly_error(err);
        assert!(ctx.suggestion.is_some());
        let rendered = format!("{ctx}");
        assert!(rendered.contains("Failed to install server: foo"));
        assert!(rendered.contains("Server \"foo\" not found in registry"));
    }

    #[test]
    fn malformed_and_missing_are_distinct_variants() {
        let missing = OpenToolsError::ConfigNotFound {
            client: "Claude Desktop".to_string(),
            path: PathBuf::from("/tmp/x.json"),
        };
        let malformed = OpenToolsError::MalformedConfig {
            path: PathBuf::from("/tmp/x.json"),
            reason: "expected value at line 1".to_string(),
        };
        assert!(missing.to_string().contains("not found"));
        assert!(malformed.to_string().contains("Malformed"));
    }
}
