//! Command-line interface definitions and dispatch.

mod complete;
mod install;
mod list;
mod uninstall;

pub use complete::CompleteCommand;
pub use install::InstallCommand;
pub use list::ListCommand;
pub use uninstall::UninstallCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Install MCP servers for desktop AI clients.
#[derive(Parser)]
#[command(name = "opentools", version, about = "Install MCP servers for desktop AI clients")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install an MCP server
    #[command(alias = "i")]
    Install(InstallCommand),

    /// Uninstall one or more MCP servers
    #[command(alias = "un")]
    Uninstall(UninstallCommand),

    /// List installed MCP servers
    #[command(alias = "ls")]
    List(ListCommand),

    /// Print installed server ids matching a prefix (shell completion helper)
    #[command(hide = true)]
    Complete(CompleteCommand),
}

impl Cli {
    /// Initializes logging to stderr.
    ///
    /// `RUST_LOG` wins when set; otherwise the verbosity flags pick the level.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = if self.verbose {
                "debug"
            } else if self.quiet {
                "off"
            } else {
                "warn"
            };
            EnvFilter::new(level)
        });
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    /// Runs the selected subcommand.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Install(cmd) => cmd.execute().await,
            Commands::Uninstall(cmd) => cmd.execute().await,
            Commands::List(cmd) => cmd.execute().await,
            Commands::Complete(cmd) => cmd.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommand_aliases_parse() {
        let cli = Cli::try_parse_from(["opentools", "i", "github-ref"]).unwrap();
        assert!(matches!(cli.command, Commands::Install(_)));

        let cli = Cli::try_parse_from(["opentools", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List(_)));

        let cli = Cli::try_parse_from(["opentools", "un", "github-ref"]).unwrap();
        assert!(matches!(cli.command, Commands::Uninstall(_)));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["opentools", "-v", "-q", "list"]).is_err());
    }
}
