//! Shell-command mode: ask the model for one command, confirm, execute.

use crate::api::CompletionClient;
use crate::textutil::escape_prompt;
use crate::tui::renderer::Renderer;
use crate::tui::settings;
use std::env;
use std::io::{self, BufRead, Write};
use std::process::Command;

/// Build the instruction sent to the model for command generation.
fn command_instruction(task: &str) -> String {
    let os = env::consts::OS;
    let shell = if cfg!(windows) { "cmd" } else { "bash" };
    format!(
        "Return only a single {shell} command for {os} that does the following, \
         with no explanation and no markdown: \"{}\"",
        escape_prompt(task)
    )
}

/// Generate a shell command for `task`, show it, and execute on confirmation.
///
/// The generated command runs stateless: no session identifier is sent or
/// persisted for this mode.
pub async fn run_shell_mode(client: &dyn CompletionClient, renderer: &Renderer, task: &str) {
    let mut progress = Some(renderer.progress(settings::PROGRESS_LABEL));
    let mut generated = String::new();
    let mut on_chunk = |text: &str| {
        if let Some(mut handle) = progress.take() {
            handle.finish();
        }
        generated.push_str(text);
    };

    let instruction = command_instruction(task);
    let result = client.complete(&instruction, None, &mut on_chunk).await;
    if let Some(mut handle) = progress.take() {
        handle.finish();
    }

    if let Err(e) = result {
        renderer.error(&e.to_string());
        return;
    }

    let command = generated.trim();
    if command.is_empty() {
        renderer.error("model returned no command");
        return;
    }

    renderer.command(command);
    if !confirm_execution() {
        return;
    }
    execute(renderer, command);
}

fn confirm_execution() -> bool {
    let mut out = io::stdout();
    let _ = write!(out, "Execute shell command? [y/n]: ");
    let _ = out.flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn execute(renderer: &Renderer, command: &str) {
    let status = if cfg!(windows) {
        Command::new("cmd").args(["/C", command]).status()
    } else {
        Command::new("sh").args(["-c", command]).status()
    };

    match status {
        Ok(status) if !status.success() => {
            renderer.error(&format!("command exited with {status}"));
        }
        Ok(_) => {}
        Err(e) => renderer.error(&format!("could not run command: {e}")),
    }
}
