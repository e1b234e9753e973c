//! Interactive loops: the line REPL and the multi-line editor mode.

use crate::api::CompletionClient;
use crate::orchestrator::run_turn;
use crate::session::SessionStore;
use crate::tui::editor::MultilineEditor;
use crate::tui::renderer::Renderer;
use crate::tui::settings;
use std::io::{self, BufRead};

/// Run the line-based interactive REPL until `exit`, EOF, or a read error.
///
/// Each non-empty line is one turn; the session identifier returned by a
/// turn feeds the next one, and every turn persists it.
pub async fn run_interactive(
    client: &dyn CompletionClient,
    renderer: &Renderer,
    store: Option<&SessionStore>,
    initial_session: String,
) {
    renderer.bold(settings::BANNER_INTERACTIVE);
    renderer.plain("");

    let stdin = io::stdin();
    let mut session = initial_session;

    loop {
        renderer.repl_prompt();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // Stdin closed; report once instead of spinning on empty reads.
                renderer.error("stdin closed; leaving interactive mode");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                renderer.error(&format!("could not read input: {e}"));
                return;
            }
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" {
            renderer.bold("Exiting...");
            return;
        }

        session = run_turn(client, renderer, store, input, &session, true).await;
    }
}

/// Run the multi-line editor mode until the cancel gesture.
///
/// Each editor session produces one turn; a cancelled editor ends the loop.
pub async fn run_multiline(
    client: &dyn CompletionClient,
    renderer: &Renderer,
    store: Option<&SessionStore>,
    initial_session: String,
) {
    renderer.plain(settings::BANNER_MULTILINE);

    let mut session = initial_session;

    loop {
        renderer.plain("");
        let mut editor = MultilineEditor::new();
        let outcome = match editor.run() {
            Ok(outcome) => outcome,
            Err(e) => {
                renderer.error(&format!("editor failed: {e}"));
                return;
            }
        };

        if outcome.cancelled {
            return;
        }
        let prompt = outcome.text;
        if prompt.trim().is_empty() {
            continue;
        }

        session = run_turn(client, renderer, store, &prompt, &session, true).await;
    }
}
