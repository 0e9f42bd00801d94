//! The `uninstall` command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::client::{ClientId, Platform, resolve_target};
use crate::core::OpenToolsError;
use crate::mcp::{ClientSchema, apply_uninstall_file};
use crate::registry::{Registry, ServerDescriptor};
use crate::utils::home_dir;

/// Uninstall one or more MCP servers from a client's configuration.
#[derive(Args)]
pub struct UninstallCommand {
    /// Registry ids of the servers to uninstall
    #[arg(required = true)]
    pub servers: Vec<String>,

    /// Client to uninstall from
    #[arg(short, long, value_enum, default_value_t = ClientId::Claude)]
    pub client: ClientId,
}

impl UninstallCommand {
    /// Executes the uninstall command.
    pub async fn execute(self) -> Result<()> {
        let registry = Registry::builtin();
        // all-or-nothing admission: one unknown name fails the whole batch
        // before anything is removed
        let descriptors = validate_batch(&registry, &self.servers)?;

        let schema = ClientSchema::for_client(self.client).ok_or_else(|| {
            OpenToolsError::UnsupportedClientOperation {
                client: self.client.to_string(),
                operation: "uninstall".to_string(),
            }
        })?;

        let platform = Platform::current().ok_or(OpenToolsError::HostPlatformUnsupported)?;
        let home = home_dir()?;
        let target = resolve_target(self.client, platform, &home);
        let path = target.as_file().ok_or_else(|| OpenToolsError::UnsupportedClientOperation {
            client: self.client.to_string(),
            operation: "uninstall".to_string(),
        })?;

        for descriptor in descriptors {
            apply_uninstall_file(path, schema, descriptor, self.client.display_name())
                .with_context(|| format!("Failed to uninstall server: {}", descriptor.id))?;
            println!("{}", format!("🗑️  Successfully uninstalled {}", descriptor.id).green());
        }
        Ok(())
    }
}

/// Resolves every requested name against the registry, failing on the first
/// unknown one.
pub(crate) fn validate_batch<'r>(
    registry: &'r Registry,
    names: &[String],
) -> Result<Vec<&'r ServerDescriptor>> {
    names
        .iter()
        .map(|name| {
            registry
                .get(name)
                .ok_or_else(|| OpenToolsError::ServerNotFound { name: name.clone() }.into())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_resolves_in_request_order() {
        let registry = Registry::builtin();
        let names = vec!["memory-ref".to_string(), "github-ref".to_string()];
        let descriptors = validate_batch(&registry, &names).unwrap();
        let ids: Vec<&str> = descriptors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["memory-ref", "github-ref"]);
    }

    #[test]
    fn one_unknown_name_fails_the_whole_batch() {
        let registry = Registry::builtin();
        let names = vec!["memory-ref".to_string(), "bogus".to_string()];
        let err = validate_batch(&registry, &names).unwrap_err();
        match err.downcast_ref::<OpenToolsError>() {
            Some(OpenToolsError::ServerNotFound { name }) => assert_eq!(name, "bogus"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
