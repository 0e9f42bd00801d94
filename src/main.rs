use clap::Parser;

use opentools::cli::Cli;
use opentools::core::user_friendly_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    #[cfg(windows)]
    {
        let _ = colored::control::set_virtual_terminal(true);
    }

    if let Err(e) = cli.execute().await {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
