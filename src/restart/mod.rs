//! Optional client restart after an install.
//!
//! Only Claude Desktop reads its config at startup and so benefits from a
//! restart; everything else picks changes up live. The restart is offered, not
//! forced, and a client that isn't running is reported rather than treated as
//! an error.

use anyhow::Result;
use tracing::debug;

use crate::client::{ClientId, Platform};
use crate::core::OpenToolsError;
use crate::prompt::Prompt;

/// Offers to restart the client and does so when the user accepts.
pub async fn prompt_and_restart(
    client: ClientId,
    platform: Platform,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    if !client.requires_restart() {
        return Ok(());
    }

    let display = client.display_name();
    let accepted =
        prompt.confirm(&format!("Would you like to restart {display} to apply changes?"), true)?;
    if !accepted {
        return Ok(());
    }

    println!("Restarting {display}...");
    match platform {
        Platform::MacOs => restart_macos(client).await?,
        Platform::Windows => restart_windows(client).await?,
    }
    println!("✨ {display} has been restarted");
    Ok(())
}

async fn restart_macos(client: ClientId) -> Result<()> {
    let process = client.process_name();

    let kill = run("killall", &[process]).await?;
    if !kill.status.success() {
        let stderr = String::from_utf8_lossy(&kill.stderr);
        if stderr.contains("No matching processes") {
            println!("{} does not appear to be running", client.display_name());
        } else {
            return Err(command_error("killall", &kill));
        }
    }

    // give the process time to exit before relaunching
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let open = run("open", &["-a", process]).await?;
    if !open.status.success() {
        return Err(command_error("open", &open));
    }
    Ok(())
}

async fn restart_windows(client: ClientId) -> Result<()> {
    let image = format!("{}.exe", client.process_name());

    let kill = run("taskkill", &["/F", "/IM", &image]).await?;
    if !kill.status.success() {
        debug!(image, "taskkill reported no process to kill");
        println!("{} does not appear to be running", client.display_name());
    }

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let start = run("cmd", &["/C", "start", "", client.process_name()]).await?;
    if !start.status.success() {
        return Err(command_error("start", &start));
    }
    Ok(())
}

async fn run(executable: &str, args: &[&str]) -> Result<std::process::Output> {
    debug!(executable, ?args, "spawning restart command");
    tokio::process::Command::new(executable).args(args).output().await.map_err(|e| {
        OpenToolsError::ExternalCommand { command: executable.to_string(), detail: e.to_string() }
            .into()
    })
}

fn command_error(executable: &str, output: &std::process::Output) -> anyhow::Error {
    OpenToolsError::ExternalCommand {
        command: executable.to_string(),
        detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
    .into()
}
