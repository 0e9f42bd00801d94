//! The hidden `complete` command.
//!
//! Prints installed server ids matching a prefix, one per line, for shell
//! completion scripts to consume. Best-effort on purpose: completion must
//! never fail noisily, so any problem just produces no candidates.

use anyhow::Result;
use clap::Args;

use crate::client::{ClientId, ConfigTarget, Platform, resolve_target};
use crate::mcp::{ClientSchema, load_document};
use crate::registry::Registry;
use crate::utils::home_dir;

/// Print installed server ids matching a prefix.
#[derive(Args)]
pub struct CompleteCommand {
    /// Prefix to match against installed server ids
    #[arg(default_value = "")]
    pub prefix: String,
}

impl CompleteCommand {
    /// Executes the completion helper.
    pub fn execute(self) -> Result<()> {
        let Some(platform) = Platform::current() else {
            return Ok(());
        };
        let Ok(home) = home_dir() else {
            return Ok(());
        };
        let registry = Registry::builtin();

        let mut ids: Vec<String> = Vec::new();
        for client in [ClientId::Claude, ClientId::Continue] {
            let Some(schema) = ClientSchema::for_client(client) else {
                continue;
            };
            let ConfigTarget::File(path) = resolve_target(client, platform, &home) else {
                continue;
            };
            let Ok(Some(doc)) = load_document(&path) else {
                continue;
            };
            ids.extend(schema.installed_ids(&doc, &registry).into_iter().map(str::to_string));
        }

        ids.sort();
        ids.dedup();
        for id in ids.iter().filter(|id| id.starts_with(&self.prefix)) {
            println!("{id}");
        }
        Ok(())
    }
}
