//! Client identities and configuration target resolution.
//!
//! Each supported desktop client stores its MCP server list in exactly one
//! place per platform: either a JSON file under the user's home directory, or
//! behind an external registration command (the VS Code family). The mapping
//! is a static table; no discovery or searching happens here.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// A desktop client that can host MCP servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClientId {
    /// Claude Desktop (`claude_desktop_config.json`)
    Claude,
    /// The Continue IDE extension (`~/.continue/config.json`)
    Continue,
    /// Visual Studio Code (`code --add-mcp`)
    Vscode,
    /// Visual Studio Code Insiders (`code-insiders --add-mcp`)
    VscodeInsiders,
}

impl ClientId {
    /// The flag value as typed on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Continue => "continue",
            Self::Vscode => "vscode",
            Self::VscodeInsiders => "vscode-insiders",
        }
    }

    /// Human-readable name used in messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Claude => "Claude Desktop",
            Self::Continue => "Continue",
            Self::Vscode => "Visual Studio Code",
            Self::VscodeInsiders => "Visual Studio Code Insiders",
        }
    }

    /// Process name used when restarting the client.
    #[must_use]
    pub fn process_name(self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Continue => "Continue",
            Self::Vscode => "Code",
            Self::VscodeInsiders => "Code - Insiders",
        }
    }

    /// Whether the client must be restarted to pick up config changes.
    #[must_use]
    pub fn requires_restart(self) -> bool {
        matches!(self, Self::Claude)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host platforms the tool supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS (`darwin`)
    MacOs,
    /// Windows
    Windows,
}

impl Platform {
    /// Detects the host platform, or `None` when running somewhere the
    /// supported clients don't exist.
    #[must_use]
    pub fn current() -> Option<Self> {
        match std::env::consts::OS {
            "macos" => Some(Self::MacOs),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }

    /// Human-readable name used in messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
        }
    }
}

/// Where a client's configuration lives: a JSON file this tool edits
/// directly, or an external command that owns its own config format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigTarget {
    /// Path to the client's JSON config file
    File(PathBuf),
    /// External registration command invoked with a JSON payload argument
    Command {
        /// Executable name, resolved via PATH at invocation time
        executable: String,
        /// Fixed leading arguments (the payload is appended last)
        args: Vec<String>,
    },
}

impl ConfigTarget {
    /// Returns the config file path for file targets.
    #[must_use]
    pub fn as_file(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Command { .. } => None,
        }
    }
}

/// Resolves the configuration target for a (client, platform) pair.
///
/// The table is static by design and total over both enums: every supported
/// client has a target on every supported platform, and unknown clients never
/// get past argument parsing. Claude Desktop keeps its config under
/// `Library/Application Support` on macOS and under the roaming profile on
/// Windows; Continue uses `~/.continue/config.json` everywhere; the VS Code
/// family exposes a registration command instead of a file.
#[must_use]
pub fn resolve_target(client: ClientId, platform: Platform, home: &Path) -> ConfigTarget {
    match (client, platform) {
        (ClientId::Claude, Platform::MacOs) => ConfigTarget::File(
            home.join("Library")
                .join("Application Support")
                .join("Claude")
                .join("claude_desktop_config.json"),
        ),
        (ClientId::Claude, Platform::Windows) => ConfigTarget::File(
            home.join("AppData").join("Roaming").join("Claude").join("claude_desktop_config.json"),
        ),
        (ClientId::Continue, _) => {
            ConfigTarget::File(home.join(".continue").join("config.json"))
        }
        (ClientId::Vscode, _) => ConfigTarget::Command {
            executable: "code".to_string(),
            args: vec!["--add-mcp".to_string()],
        },
        (ClientId::VscodeInsiders, _) => ConfigTarget::Command {
            executable: "code-insiders".to_string(),
            args: vec!["--add-mcp".to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claude_macos_resolves_to_application_support() {
        let target = resolve_target(ClientId::Claude, Platform::MacOs, Path::new("/Users/alice"));
        assert_eq!(
            target.as_file().unwrap(),
            Path::new("/Users/alice/Library/Application Support/Claude/claude_desktop_config.json")
        );
    }

    #[test]
    fn claude_windows_resolves_to_roaming_profile() {
        let target =
            resolve_target(ClientId::Claude, Platform::Windows, Path::new("C:/Users/alice"));
        assert_eq!(
            target.as_file().unwrap(),
            Path::new("C:/Users/alice/AppData/Roaming/Claude/claude_desktop_config.json")
        );
    }

    #[test]
    fn continue_uses_the_same_path_on_both_platforms() {
        let home = Path::new("/home/alice");
        for platform in [Platform::MacOs, Platform::Windows] {
            let target = resolve_target(ClientId::Continue, platform, home);
            assert_eq!(target.as_file().unwrap(), Path::new("/home/alice/.continue/config.json"));
        }
    }

    #[test]
    fn vscode_clients_resolve_to_registration_commands() {
        let home = Path::new("/home/alice");
        let target = resolve_target(ClientId::Vscode, Platform::MacOs, home);
        assert_eq!(
            target,
            ConfigTarget::Command {
                executable: "code".to_string(),
                args: vec!["--add-mcp".to_string()],
            }
        );

        let insiders = resolve_target(ClientId::VscodeInsiders, Platform::Windows, home);
        assert_eq!(
            insiders,
            ConfigTarget::Command {
                executable: "code-insiders".to_string(),
                args: vec!["--add-mcp".to_string()],
            }
        );
    }

    #[test]
    fn every_client_has_a_target_on_every_platform() {
        let home = Path::new("/home/alice");
        for client in
            [ClientId::Claude, ClientId::Continue, ClientId::Vscode, ClientId::VscodeInsiders]
        {
            for platform in [Platform::MacOs, Platform::Windows] {
                // totality: either a file path or a registration command
                match resolve_target(client, platform, home) {
                    ConfigTarget::File(path) => assert!(path.starts_with(home)),
                    ConfigTarget::Command { executable, .. } => assert!(!executable.is_empty()),
                }
            }
        }
    }

    #[test]
    fn value_enum_accepts_kebab_case_names() {
        assert_eq!(ClientId::from_str("vscode-insiders", false).unwrap(), ClientId::VscodeInsiders);
        assert_eq!(ClientId::from_str("claude", false).unwrap(), ClientId::Claude);
    }
}
