//! CLI entry point for tgpt.

mod cli;

use clap::Parser;
use tgpt::api::ApiClient;
use tgpt::orchestrator::run_turn;
use tgpt::repl;
use tgpt::session::{ForgetOutcome, SessionStore};
use tgpt::shell;
use tgpt::tui::renderer::Renderer;
use tgpt::update;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    // Diagnostics are opt-in via TGPT_LOG; user-facing output goes through
    // the renderer.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TGPT_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let renderer = Renderer::new(!args.no_color);

    let store = SessionStore::open_default();
    if store.is_none() {
        // Degrade to stateless turns rather than failing the whole command.
        tracing::debug!("no platform config dir; session persistence disabled");
    }

    if args.forget {
        match store.as_ref().map(SessionStore::forget) {
            Some(Ok(ForgetOutcome::Removed)) => renderer.plain("Chat history removed"),
            Some(Ok(ForgetOutcome::NothingToForget)) | None => {
                renderer.plain("There is no history to remove");
            }
            Some(Err(e)) => renderer.error(&format!("could not remove history: {e}")),
        }
        return;
    }

    if args.update {
        update::run_update(&renderer).await;
        return;
    }

    let client = ApiClient::from_env();
    let session = store
        .as_ref()
        .and_then(SessionStore::load)
        .unwrap_or_default();

    if let Some(task) = &args.shell {
        shell::run_shell_mode(&client, &renderer, task).await;
        return;
    }

    if args.interactive {
        repl::run_interactive(&client, &renderer, store.as_ref(), session).await;
        return;
    }

    if args.multiline {
        repl::run_multiline(&client, &renderer, store.as_ref(), session).await;
        return;
    }

    match args.prompt.as_deref().map(str::trim) {
        Some(prompt) if !prompt.is_empty() => {
            // One-shot mode stays stateless: the session is read but never saved.
            run_turn(&client, &renderer, store.as_ref(), prompt, &session, false).await;
        }
        _ => {
            renderer.error("You have to write some text");
            renderer.usage("Example: tgpt \"Explain quantum computing in simple terms\"");
        }
    }
}
