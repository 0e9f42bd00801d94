//! The configuration merge engine.
//!
//! Reconciles MCP server entries into client configuration documents without
//! disturbing anything else those documents contain. Two client schemas
//! exist, unified behind the closed [`ClientSchema`] strategy enum so install,
//! uninstall and list all share one implementation per shape:
//!
//! - **Server map** (Claude Desktop): a top-level `mcpServers` object keyed by
//!   server name.
//! - **Transport list** (Continue): an ordered
//!   `experimental.modelContextProtocolServers` array of stdio transports,
//!   with `experimental.useTools` forced true whenever a server is added.
//!
//! Documents are handled as [`serde_json::Value`] so unknown keys round-trip
//! verbatim, and are written back whole with 2-space indentation. The write is
//! always the last step of an operation; any earlier failure leaves the file
//! untouched. A malformed existing file is a hard error, never silently reset.
//!
//! Matching rules differ deliberately between operations and are kept
//! byte-compatible with configs written by earlier releases: install into the
//! transport list dedupes on *exact* command + args equality, while uninstall
//! and list match on command + static-args *prefix* so trailing
//! runtime-resolved arguments don't hide an entry.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::ClientId;
use crate::core::OpenToolsError;
use crate::registry::{Registry, ServerDescriptor};
use crate::utils::fs::{atomic_write, read_text_file};

/// The value merged into a client document for one server.
#[derive(Debug, Clone, Serialize)]
pub struct ServerPayload {
    /// Executable to launch
    pub command: String,
    /// Static args plus any runtime-resolved values, in order
    pub args: Vec<String>,
    /// Collected environment variables, in prompt order
    pub env: Map<String, Value>,
}

/// Payload sent to command-target clients, which also need the server name.
#[derive(Debug, Serialize)]
struct CommandRegistration<'a> {
    name: &'a str,
    command: &'a str,
    args: &'a [String],
    env: &'a Map<String, Value>,
}

/// The two document shapes the engine knows how to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSchema {
    /// Top-level `mcpServers` object keyed by server name
    ServerMap,
    /// `experimental.modelContextProtocolServers` array of transports
    TransportList,
}

impl ClientSchema {
    /// Schema for a client, or `None` for command-target clients whose config
    /// format is owned by an external program.
    #[must_use]
    pub fn for_client(client: ClientId) -> Option<Self> {
        match client {
            ClientId::Claude => Some(Self::ServerMap),
            ClientId::Continue => Some(Self::TransportList),
            ClientId::Vscode | ClientId::VscodeInsiders => None,
        }
    }

    /// Inserts or updates `name` in the document.
    ///
    /// Server map: full overwrite of the one key, everything else untouched.
    /// Transport list: replace the entry with identical command and args in
    /// place, otherwise append; `experimental.useTools` is forced true.
    pub fn install(
        self,
        doc: &mut Value,
        name: &str,
        payload: &ServerPayload,
        path: &Path,
    ) -> Result<()> {
        match self {
            Self::ServerMap => {
                let servers = object_entry(doc, "mcpServers", path)?;
                servers.insert(name.to_string(), serde_json::to_value(payload)?);
            }
            Self::TransportList => {
                let experimental = object_entry(doc, "experimental", path)?;
                experimental.insert("useTools".to_string(), Value::Bool(true));

                let list = experimental
                    .entry("modelContextProtocolServers")
                    .or_insert_with(|| json!([]));
                let list = list.as_array_mut().ok_or_else(|| {
                    malformed(path, "`experimental.modelContextProtocolServers` is not an array")
                })?;

                let mut transport = serde_json::to_value(payload)?;
                transport["type"] = json!("stdio");

                match list.iter().position(|entry| transport_matches_exact(entry, payload)) {
                    Some(i) => {
                        list[i]["transport"] = transport;
                    }
                    None => list.push(json!({ "transport": transport })),
                }
            }
        }
        Ok(())
    }

    /// Removes the descriptor's entry from the document.
    pub fn uninstall(self, doc: &mut Value, descriptor: &ServerDescriptor) -> Result<()> {
        let not_installed =
            || OpenToolsError::ServerNotInstalled { name: descriptor.id.clone() };
        match self {
            Self::ServerMap => {
                let servers = doc
                    .get_mut("mcpServers")
                    .and_then(Value::as_object_mut)
                    .ok_or_else(not_installed)?;
                servers.shift_remove(&descriptor.id).ok_or_else(not_installed)?;
            }
            Self::TransportList => {
                let list = doc
                    .get_mut("experimental")
                    .and_then(|e| e.get_mut("modelContextProtocolServers"))
                    .and_then(Value::as_array_mut)
                    .filter(|list| !list.is_empty())
                    .ok_or_else(not_installed)?;
                let index = list
                    .iter()
                    .position(|entry| transport_matches_prefix(entry, descriptor))
                    .ok_or_else(not_installed)?;
                // Vec::remove keeps the remaining entries in order
                list.remove(index);
            }
        }
        Ok(())
    }

    /// Registry ids of the servers installed in the document.
    ///
    /// Entries that don't correspond to a registry server are ignored. Server
    /// map ids come back in document order; transport list ids in registry
    /// order (transports carry no name, so they're recovered by matching).
    #[must_use]
    pub fn installed_ids<'r>(self, doc: &Value, registry: &'r Registry) -> Vec<&'r str> {
        match self {
            Self::ServerMap => {
                let Some(servers) = doc.get("mcpServers").and_then(Value::as_object) else {
                    return Vec::new();
                };
                servers
                    .keys()
                    .filter_map(|name| registry.get(name))
                    .map(|descriptor| descriptor.id.as_str())
                    .collect()
            }
            Self::TransportList => {
                let Some(list) = doc
                    .pointer("/experimental/modelContextProtocolServers")
                    .and_then(Value::as_array)
                else {
                    return Vec::new();
                };
                registry
                    .iter()
                    .filter(|descriptor| {
                        list.iter().any(|entry| transport_matches_prefix(entry, descriptor))
                    })
                    .map(|descriptor| descriptor.id.as_str())
                    .collect()
            }
        }
    }
}

/// Exact command + args equality, used to dedupe on install.
fn transport_matches_exact(entry: &Value, payload: &ServerPayload) -> bool {
    let Some(transport) = entry.get("transport") else {
        return false;
    };
    transport.get("command").and_then(Value::as_str) == Some(payload.command.as_str())
        && transport.get("args").is_some_and(|args| *args == json!(payload.args))
}

/// Command + static-args prefix equality, used for uninstall and list.
///
/// Only the registered static args are compared; installed entries may carry
/// trailing runtime-resolved values.
fn transport_matches_prefix(entry: &Value, descriptor: &ServerDescriptor) -> bool {
    let Some(transport) = entry.get("transport") else {
        return false;
    };
    if transport.get("command").and_then(Value::as_str) != Some(descriptor.command.as_str()) {
        return false;
    }
    let Some(args) = transport.get("args").and_then(Value::as_array) else {
        return false;
    };
    args.len() >= descriptor.args.len()
        && descriptor
            .args
            .iter()
            .zip(args)
            .all(|(expected, actual)| actual.as_str() == Some(expected.as_str()))
}

fn malformed(path: &Path, reason: &str) -> anyhow::Error {
    OpenToolsError::MalformedConfig { path: path.to_path_buf(), reason: reason.to_string() }.into()
}

/// Navigates to a top-level object member, creating it if missing.
fn object_entry<'a>(doc: &'a mut Value, key: &str, path: &Path) -> Result<&'a mut Map<String, Value>> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| malformed(path, "expected a JSON object at the top level"))?;
    root.entry(key)
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| malformed(path, &format!("`{key}` is not an object")))
}

/// Reads and parses a config document.
///
/// `Ok(None)` means the file doesn't exist. A file that exists but can't be
/// parsed is a [`OpenToolsError::MalformedConfig`] error; it is never treated
/// as absent, since that would end with the user's configuration overwritten.
pub fn load_document(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = read_text_file(path)?;
    match serde_json::from_str(&content) {
        Ok(doc) => Ok(Some(doc)),
        Err(e) => Err(malformed(path, &e.to_string())),
    }
}

/// Serializes the whole document with 2-space indentation and writes it back.
pub fn persist_document(path: &Path, doc: &Value) -> Result<()> {
    let content = serde_json::to_string_pretty(doc)?;
    atomic_write(path, &content)?;
    debug!(path = %path.display(), "wrote config document");
    Ok(())
}

/// Reads the config document at the start of an install, initializing a fresh
/// empty one when the file doesn't exist yet.
///
/// Runs before any parameter prompting, so a malformed file aborts before the
/// user is asked for anything.
pub fn open_document_for_install(path: &Path) -> Result<Value> {
    match load_document(path)? {
        Some(doc) => Ok(doc),
        None => {
            println!("🆕  Initializing new configuration file...");
            Ok(json!({}))
        }
    }
}

/// Removes the descriptor's entry from the config file at `path`.
///
/// Unlike install, a missing file is a hard error here: there is nothing to
/// uninstall from.
pub fn apply_uninstall_file(
    path: &Path,
    schema: ClientSchema,
    descriptor: &ServerDescriptor,
    client_name: &str,
) -> Result<()> {
    let mut doc = load_document(path)?.ok_or_else(|| OpenToolsError::ConfigNotFound {
        client: client_name.to_string(),
        path: path.to_path_buf(),
    })?;
    schema.uninstall(&mut doc, descriptor)?;
    persist_document(path, &doc)
}

/// Registers a server with a command-target client.
///
/// The configured executable is invoked with its fixed arguments plus the
/// JSON payload (including the server name) as the final argument. The
/// external program owns its own config format; nothing is read or written
/// here. A non-zero exit surfaces the child's stderr, or stdout when stderr
/// is empty.
pub async fn register_with_command(
    executable: &str,
    fixed_args: &[String],
    name: &str,
    payload: &ServerPayload,
) -> Result<()> {
    let registration = CommandRegistration {
        name,
        command: &payload.command,
        args: &payload.args,
        env: &payload.env,
    };
    let json_arg = serde_json::to_string(&registration)?;

    let resolved = which::which(executable).map_err(|_| OpenToolsError::ExternalCommand {
        command: executable.to_string(),
        detail: format!("'{executable}' was not found on PATH"),
    })?;

    debug!(executable, args = ?fixed_args, "invoking registration command");
    let output = tokio::process::Command::new(resolved)
        .args(fixed_args)
        .arg(&json_arg)
        .output()
        .await
        .map_err(|e| OpenToolsError::ExternalCommand {
            command: executable.to_string(),
            detail: e.to_string(),
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let detail = if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    };
    Err(OpenToolsError::ExternalCommand { command: executable.to_string(), detail }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use std::fs;
    use tempfile::TempDir;

    fn payload(command: &str, args: &[&str], env: &[(&str, &str)]) -> ServerPayload {
        ServerPayload {
            command: command.to_string(),
            args: args.iter().map(|s| (*s).to_string()).collect(),
            env: env.iter().map(|(k, v)| ((*k).to_string(), json!(v))).collect(),
        }
    }

    #[test]
    fn server_map_install_into_empty_document() {
        let mut doc = json!({});
        let payload = payload("npx", &["run", "foo"], &[("KEY", "abc")]);

        ClientSchema::ServerMap.install(&mut doc, "foo", &payload, Path::new("x.json")).unwrap();

        assert_eq!(
            doc,
            json!({
                "mcpServers": {
                    "foo": { "command": "npx", "args": ["run", "foo"], "env": { "KEY": "abc" } }
                }
            })
        );
    }

    #[test]
    fn server_map_install_preserves_unrelated_keys() {
        let mut doc = json!({
            "theme": "dark",
            "mcpServers": { "other": { "command": "x", "args": [], "env": {} } },
            "nested": { "a": [1, 2, 3] }
        });
        let payload = payload("npx", &["-y", "pkg"], &[]);

        ClientSchema::ServerMap.install(&mut doc, "foo", &payload, Path::new("x.json")).unwrap();

        assert_eq!(doc["theme"], json!("dark"));
        assert_eq!(doc["nested"], json!({ "a": [1, 2, 3] }));
        assert_eq!(doc["mcpServers"]["other"]["command"], json!("x"));
        assert_eq!(doc["mcpServers"]["foo"]["args"], json!(["-y", "pkg"]));
    }

    #[test]
    fn server_map_install_overwrites_existing_entry_completely() {
        let mut doc = json!({
            "mcpServers": {
                "foo": { "command": "old", "args": ["old"], "env": { "STALE": "1" } }
            }
        });
        let payload = payload("new", &["fresh"], &[]);

        ClientSchema::ServerMap.install(&mut doc, "foo", &payload, Path::new("x.json")).unwrap();

        // full overwrite of the key, not a deep merge
        assert_eq!(
            doc["mcpServers"]["foo"],
            json!({ "command": "new", "args": ["fresh"], "env": {} })
        );
    }

    #[test]
    fn transport_list_install_sets_use_tools_and_appends() {
        let mut doc = json!({});
        let payload = payload("npx", &["-y", "pkg"], &[]);

        ClientSchema::TransportList
            .install(&mut doc, "foo", &payload, Path::new("x.json"))
            .unwrap();

        assert_eq!(doc["experimental"]["useTools"], json!(true));
        let list = doc["experimental"]["modelContextProtocolServers"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(
            list[0]["transport"],
            json!({ "command": "npx", "args": ["-y", "pkg"], "env": {}, "type": "stdio" })
        );
    }

    #[test]
    fn transport_list_install_is_idempotent_for_identical_args() {
        let mut doc = json!({});
        let payload = payload("npx", &["-y", "pkg"], &[("KEY", "v1")]);

        let schema = ClientSchema::TransportList;
        schema.install(&mut doc, "foo", &payload, Path::new("x.json")).unwrap();
        let updated = self::payload("npx", &["-y", "pkg"], &[("KEY", "v2")]);
        schema.install(&mut doc, "foo", &updated, Path::new("x.json")).unwrap();

        let list = doc["experimental"]["modelContextProtocolServers"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        // replaced in place with the new env
        assert_eq!(list[0]["transport"]["env"], json!({ "KEY": "v2" }));
    }

    #[test]
    fn transport_list_install_appends_for_different_args() {
        let mut doc = json!({});
        let schema = ClientSchema::TransportList;

        let first = payload("npx", &["-y", "pkg", "/tmp/a"], &[]);
        let second = payload("npx", &["-y", "pkg", "/tmp/b"], &[]);
        schema.install(&mut doc, "foo", &first, Path::new("x.json")).unwrap();
        schema.install(&mut doc, "foo", &second, Path::new("x.json")).unwrap();

        let list = doc["experimental"]["modelContextProtocolServers"].as_array().unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn transport_list_replace_preserves_position() {
        let mut doc = json!({});
        let schema = ClientSchema::TransportList;
        schema
            .install(&mut doc, "a", &payload("first", &[], &[]), Path::new("x.json"))
            .unwrap();
        schema
            .install(&mut doc, "b", &payload("second", &[], &[]), Path::new("x.json"))
            .unwrap();

        schema
            .install(&mut doc, "a", &payload("first", &[], &[("K", "v")]), Path::new("x.json"))
            .unwrap();

        let list = doc["experimental"]["modelContextProtocolServers"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["transport"]["command"], json!("first"));
        assert_eq!(list[0]["transport"]["env"], json!({ "K": "v" }));
    }

    #[test]
    fn server_map_uninstall_removes_only_the_named_entry() {
        let registry = Registry::builtin();
        let github = registry.get("github-ref").unwrap();
        let mut doc = json!({
            "theme": "dark",
            "mcpServers": {
                "github-ref": { "command": "npx", "args": [], "env": {} },
                "memory-ref": { "command": "npx", "args": [], "env": {} }
            }
        });

        ClientSchema::ServerMap.uninstall(&mut doc, github).unwrap();

        assert!(doc["mcpServers"].get("github-ref").is_none());
        assert!(doc["mcpServers"].get("memory-ref").is_some());
        assert_eq!(doc["theme"], json!("dark"));
    }

    #[test]
    fn server_map_uninstall_missing_entry_is_not_installed() {
        let registry = Registry::builtin();
        let github = registry.get("github-ref").unwrap();

        for mut doc in [json!({}), json!({ "mcpServers": {} })] {
            let err = ClientSchema::ServerMap.uninstall(&mut doc, github).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<OpenToolsError>(),
                Some(OpenToolsError::ServerNotInstalled { .. })
            ));
        }
    }

    #[test]
    fn transport_list_uninstall_matches_static_args_prefix() {
        let registry = Registry::builtin();
        let filesystem = registry.get("filesystem-ref").unwrap();
        // installed entry carries trailing runtime-resolved paths
        let mut doc = json!({
            "experimental": {
                "useTools": true,
                "modelContextProtocolServers": [
                    { "transport": {
                        "command": "npx",
                        "args": ["-y", "@modelcontextprotocol/server-memory"],
                        "env": {}, "type": "stdio"
                    }},
                    { "transport": {
                        "command": "npx",
                        "args": ["-y", "@modelcontextprotocol/server-filesystem", "/tmp/a", "/tmp/b"],
                        "env": {}, "type": "stdio"
                    }}
                ]
            }
        });

        ClientSchema::TransportList.uninstall(&mut doc, filesystem).unwrap();

        let list = doc["experimental"]["modelContextProtocolServers"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(
            list[0]["transport"]["args"],
            json!(["-y", "@modelcontextprotocol/server-memory"])
        );
    }

    #[test]
    fn transport_list_uninstall_empty_list_is_not_installed() {
        let registry = Registry::builtin();
        let github = registry.get("github-ref").unwrap();
        let mut doc = json!({ "experimental": { "modelContextProtocolServers": [] } });

        let err = ClientSchema::TransportList.uninstall(&mut doc, github).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OpenToolsError>(),
            Some(OpenToolsError::ServerNotInstalled { .. })
        ));
    }

    #[test]
    fn installed_ids_filters_unknown_entries() {
        let registry = Registry::builtin();
        let doc = json!({
            "mcpServers": {
                "github-ref": { "command": "npx", "args": [], "env": {} },
                "somebody-elses-server": { "command": "weird", "args": [], "env": {} }
            }
        });

        let ids = ClientSchema::ServerMap.installed_ids(&doc, &registry);
        assert_eq!(ids, vec!["github-ref"]);
    }

    #[test]
    fn installed_ids_recovers_transport_entries_by_prefix() {
        let registry = Registry::builtin();
        let doc = json!({
            "experimental": {
                "modelContextProtocolServers": [
                    { "transport": {
                        "command": "uvx",
                        "args": ["mcp-server-git", "--repository", "/src/repo"],
                        "env": {}, "type": "stdio"
                    }}
                ]
            }
        });

        let ids = ClientSchema::TransportList.installed_ids(&doc, &registry);
        assert_eq!(ids, vec!["git-ref"]);
    }

    #[test]
    fn install_file_round_trip_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claude_desktop_config.json");
        let payload = payload("npx", &["run", "foo"], &[("KEY", "abc")]);

        let mut doc = open_document_for_install(&path).unwrap();
        ClientSchema::ServerMap.install(&mut doc, "foo", &payload, &path).unwrap();
        persist_document(&path, &doc).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"mcpServers\": {\n    \"foo\": {\n      \"command\": \"npx\",\n      \
             \"args\": [\n        \"run\",\n        \"foo\"\n      ],\n      \"env\": {\n        \
             \"KEY\": \"abc\"\n      }\n    }\n  }\n}"
        );
    }

    #[test]
    fn opening_a_malformed_file_fails_and_leaves_it_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = open_document_for_install(&path).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<OpenToolsError>(),
            Some(OpenToolsError::MalformedConfig { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn opening_an_absent_file_yields_an_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let doc = open_document_for_install(&path).unwrap();

        assert_eq!(doc, json!({}));
        // nothing is written until the install persists
        assert!(!path.exists());
    }

    #[test]
    fn uninstall_file_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let registry = Registry::builtin();
        let github = registry.get("github-ref").unwrap();

        let err =
            apply_uninstall_file(&path, ClientSchema::ServerMap, github, "Claude Desktop")
                .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<OpenToolsError>(),
            Some(OpenToolsError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn uninstall_file_failure_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let original = r#"{ "mcpServers": { "other": { "command": "x" } } }"#;
        fs::write(&path, original).unwrap();
        let registry = Registry::builtin();
        let github = registry.get("github-ref").unwrap();

        let err =
            apply_uninstall_file(&path, ClientSchema::ServerMap, github, "Claude Desktop")
                .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<OpenToolsError>(),
            Some(OpenToolsError::ServerNotInstalled { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn persist_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Library").join("Claude").join("config.json");
        let payload = payload("npx", &[], &[]);

        let mut doc = open_document_for_install(&path).unwrap();
        ClientSchema::ServerMap.install(&mut doc, "foo", &payload, &path).unwrap();
        persist_document(&path, &doc).unwrap();

        assert!(path.exists());
    }
}
