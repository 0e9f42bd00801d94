//! The `install` command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::client::{ClientId, ConfigTarget, Platform, resolve_target};
use crate::core::OpenToolsError;
use crate::mcp::{
    ClientSchema, ServerPayload, open_document_for_install, persist_document,
    register_with_command,
};
use crate::prompt::{Prompt, TerminalPrompt, collect_parameters};
use crate::registry::{Distribution, Registry, ServerDescriptor};
use crate::restart;
use crate::utils::home_dir;

/// Install an MCP server into a client's configuration.
#[derive(Args)]
pub struct InstallCommand {
    /// Registry id of the server to install
    pub server: String,

    /// Client to install into
    #[arg(short, long, value_enum, default_value_t = ClientId::Claude)]
    pub client: ClientId,
}

impl InstallCommand {
    /// Executes the install command.
    pub async fn execute(self) -> Result<()> {
        let registry = Registry::builtin();
        // registry admission comes before the platform gate so an unknown or
        // uninstallable server is reported the same way on every host
        let descriptor = validate_installable(&registry, &self.server)?;

        let platform = Platform::current().ok_or(OpenToolsError::HostPlatformUnsupported)?;

        println!("Installing MCP server: {}", self.server.bold());
        println!("Platform: {}", platform.display_name());
        println!("Client: {}", self.client.display_name());

        let home = home_dir()?;
        let target = resolve_target(self.client, platform, &home);
        let mut prompt = TerminalPrompt::default();
        install_into_target(self.client, &target, descriptor, &mut prompt)
            .await
            .with_context(|| format!("Failed to install server: {}", self.server))?;

        println!("{}", format!("🛠️  Successfully installed {}", descriptor.id).green());

        restart::prompt_and_restart(self.client, platform, &mut prompt).await
    }
}

/// Checks that the server exists and can be installed automatically.
pub(crate) fn validate_installable<'r>(
    registry: &'r Registry,
    name: &str,
) -> Result<&'r ServerDescriptor> {
    let descriptor = registry
        .get(name)
        .ok_or_else(|| OpenToolsError::ServerNotFound { name: name.to_string() })?;
    if matches!(descriptor.distribution, Distribution::Source { .. }) {
        return Err(OpenToolsError::SourceDistribution {
            name: descriptor.id.clone(),
            source_url: descriptor.source_url.clone(),
        }
        .into());
    }
    Ok(descriptor)
}

/// Installs the server into an already-resolved target.
///
/// For file targets the document is loaded (or initialized) before any
/// parameter prompting, so a malformed config aborts before the user is asked
/// for anything; the write remains the last step.
pub(crate) async fn install_into_target(
    client: ClientId,
    target: &ConfigTarget,
    descriptor: &ServerDescriptor,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    match target {
        ConfigTarget::File(path) => {
            let schema = ClientSchema::for_client(client).ok_or_else(|| {
                OpenToolsError::UnsupportedClientOperation {
                    client: client.to_string(),
                    operation: "file-based installation".to_string(),
                }
            })?;
            let mut doc = open_document_for_install(path)?;
            let payload = build_payload(descriptor, prompt)?;
            schema.install(&mut doc, &descriptor.id, &payload, path)?;
            persist_document(path, &doc)
        }
        ConfigTarget::Command { executable, args } => {
            let payload = build_payload(descriptor, prompt)?;
            register_with_command(executable, args, &descriptor.id, &payload).await
        }
    }
}

fn build_payload(descriptor: &ServerDescriptor, prompt: &mut dyn Prompt) -> Result<ServerPayload> {
    let resolved = collect_parameters(descriptor, prompt)?;
    Ok(ServerPayload {
        command: descriptor.command.clone(),
        args: resolved.args,
        env: resolved.env,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedPrompt;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unknown_server_is_rejected() {
        let registry = Registry::builtin();
        let err = validate_installable(&registry, "no-such-server").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OpenToolsError>(),
            Some(OpenToolsError::ServerNotFound { .. })
        ));
    }

    #[test]
    fn source_distribution_is_rejected_with_its_url() {
        let registry = Registry::builtin();
        let err = validate_installable(&registry, "axiom").unwrap_err();
        match err.downcast_ref::<OpenToolsError>() {
            Some(OpenToolsError::SourceDistribution { source_url, .. }) => {
                assert!(source_url.starts_with("https://"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn installable_npm_server_passes_validation() {
        let registry = Registry::builtin();
        let descriptor = validate_installable(&registry, "memory-ref").unwrap();
        assert_eq!(descriptor.command, "npx");
    }

    #[tokio::test]
    async fn malformed_config_aborts_before_any_prompt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claude_desktop_config.json");
        fs::write(&path, "{ not json").unwrap();
        let registry = Registry::builtin();
        let github = registry.get("github-ref").unwrap();
        let mut prompt = ScriptedPrompt::with_answers(["ghp_abc123"]);

        let target = ConfigTarget::File(path.clone());
        let err = install_into_target(ClientId::Claude, &target, github, &mut prompt)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<OpenToolsError>(),
            Some(OpenToolsError::MalformedConfig { .. })
        ));
        // the user was never asked for anything
        assert!(prompt.log.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn install_prompts_after_loading_and_writes_the_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claude_desktop_config.json");
        let registry = Registry::builtin();
        let github = registry.get("github-ref").unwrap();
        let mut prompt = ScriptedPrompt::with_answers(["ghp_abc123"]);

        let target = ConfigTarget::File(path.clone());
        install_into_target(ClientId::Claude, &target, github, &mut prompt).await.unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            doc["mcpServers"]["github-ref"]["env"]["GITHUB_PERSONAL_ACCESS_TOKEN"],
            json!("ghp_abc123")
        );
        assert_eq!(prompt.log.len(), 1);
    }
}
