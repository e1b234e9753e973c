//! Self-update via the published install script.
//!
//! POSIX-only: the script is fetched over HTTPS and piped through `sh`.
//! Windows users are pointed at a manual download instead.

use crate::tui::renderer::Renderer;
use std::io::Write;
use std::process::{Command, Stdio};

/// Location of the installer maintained alongside releases.
const INSTALL_SCRIPT_URL: &str = "https://raw.githubusercontent.com/aandrew-me/tgpt/main/install";

/// Download and run the install script to replace the current binary.
pub async fn run_update(renderer: &Renderer) {
    if cfg!(windows) {
        renderer.plain("Self-update is not supported on Windows; download the latest release manually.");
        return;
    }

    let script = match fetch_install_script().await {
        Ok(script) => script,
        Err(e) => {
            renderer.error(&format!("could not download install script: {e}"));
            return;
        }
    };

    if let Err(e) = run_script(&script) {
        renderer.error(&format!("update failed: {e}"));
    }
}

async fn fetch_install_script() -> Result<String, reqwest::Error> {
    reqwest::get(INSTALL_SCRIPT_URL)
        .await?
        .error_for_status()?
        .text()
        .await
}

fn run_script(script: &str) -> std::io::Result<()> {
    let mut child = Command::new("sh").stdin(Stdio::piped()).spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(script.as_bytes())?;
    }
    // Close stdin before waiting so the shell sees EOF.
    drop(child.stdin.take());

    let status = child.wait()?;
    if !status.success() {
        return Err(std::io::Error::other(format!(
            "install script exited with {status}"
        )));
    }
    Ok(())
}
