//! The `list` command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::client::{ClientId, ConfigTarget, Platform, resolve_target};
use crate::core::OpenToolsError;
use crate::mcp::{ClientSchema, load_document};
use crate::registry::Registry;
use crate::utils::home_dir;

/// List the MCP servers installed in each client's configuration.
#[derive(Args)]
pub struct ListCommand {
    /// Restrict the listing to one client
    #[arg(short, long, value_enum)]
    pub client: Option<ClientId>,
}

impl ListCommand {
    /// Executes the list command.
    pub async fn execute(self) -> Result<()> {
        if let Some(client) = self.client {
            if ClientSchema::for_client(client).is_none() {
                return Err(OpenToolsError::UnsupportedClientOperation {
                    client: client.to_string(),
                    operation: "list".to_string(),
                }
                .into());
            }
        }

        let platform = Platform::current().ok_or(OpenToolsError::HostPlatformUnsupported)?;
        let registry = Registry::builtin();
        let home = home_dir()?;

        let clients: Vec<ClientId> = match self.client {
            Some(client) => vec![client],
            None => vec![ClientId::Claude, ClientId::Continue],
        };

        let mut found_any = false;
        for client in &clients {
            match list_client(*client, platform, &registry, &home) {
                Ok(ids) if !ids.is_empty() => {
                    found_any = true;
                    println!("\n{}", client.display_name().bold());
                    let last = ids.len() - 1;
                    for (i, id) in ids.iter().enumerate() {
                        let branch = if i == last { "└── " } else { "├── " };
                        println!("{branch}{}", registry_link(id));
                    }
                }
                Ok(_) => {}
                // unreadable configs only fail a scoped listing; the combined
                // view keeps going so one broken client doesn't hide the rest
                Err(e) if self.client.is_some() => return Err(e),
                Err(_) => {}
            }
        }

        if !found_any {
            match self.client {
                Some(client) => println!(
                    "No MCP servers currently installed on {}.",
                    client.display_name()
                ),
                None => println!("No MCP servers currently installed."),
            }
        }
        Ok(())
    }
}

fn list_client(
    client: ClientId,
    platform: Platform,
    registry: &Registry,
    home: &std::path::Path,
) -> Result<Vec<String>> {
    let Some(schema) = ClientSchema::for_client(client) else {
        return Ok(Vec::new());
    };
    let ConfigTarget::File(path) = resolve_target(client, platform, home) else {
        return Ok(Vec::new());
    };
    let Some(doc) = load_document(&path)? else {
        return Ok(Vec::new());
    };
    Ok(schema.installed_ids(&doc, registry).into_iter().map(str::to_string).collect())
}

/// Renders a server id as an OSC 8 terminal hyperlink to its registry page.
fn registry_link(id: &str) -> String {
    format!("\u{1b}]8;;https://opentools.computer/registry/{id}\u{7}{id}\u{1b}]8;;\u{7}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_link_wraps_the_id_in_an_osc8_sequence() {
        let link = registry_link("github-ref");
        assert!(link.contains("https://opentools.computer/registry/github-ref"));
        assert!(link.starts_with("\u{1b}]8;;"));
        assert!(link.ends_with("\u{1b}]8;;\u{7}"));
    }
}
