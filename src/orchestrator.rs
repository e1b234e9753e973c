//! One request/response turn: spinner lifetime, streaming render, and
//! session threading.

use crate::api::CompletionClient;
use crate::session::SessionStore;
use crate::tui::renderer::Renderer;
use crate::tui::settings;
use std::io::{self, Write};
use tracing::debug;

/// Run one turn against the completion service.
///
/// Starts the spinner before the network call and stops it before the first
/// byte of output (response text or diagnostic) is written. Response chunks
/// are rendered to stdout as they arrive.
///
/// Returns the session identifier for the next turn: the one extracted from
/// the response on success, or `session_id` unchanged on failure. With
/// `persist` set, the new identifier is saved through `store` before this
/// function returns; a save failure downgrades to a warning so the user
/// still sees their answer.
pub async fn run_turn(
    client: &dyn CompletionClient,
    renderer: &Renderer,
    store: Option<&SessionStore>,
    prompt: &str,
    session_id: &str,
    persist: bool,
) -> String {
    debug_assert!(!prompt.trim().is_empty(), "caller must reject empty prompts");

    let mut progress = Some(renderer.progress(settings::PROGRESS_LABEL));
    let mut wrote_output = false;
    let mut on_chunk = |text: &str| {
        // The spinner must be gone before response text reaches the terminal.
        if let Some(mut handle) = progress.take() {
            handle.finish();
        }
        wrote_output = true;
        let mut out = io::stdout();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    };

    let active_session = (!session_id.is_empty()).then_some(session_id);
    let result = client.complete(prompt, active_session, &mut on_chunk).await;

    // Empty stream or failure: the spinner is still running here.
    if let Some(mut handle) = progress.take() {
        handle.finish();
    }
    if wrote_output {
        println!();
    }

    let returned = match result {
        Ok(returned) => returned,
        Err(e) => {
            renderer.error(&e.to_string());
            return session_id.to_string();
        }
    };

    let next_session = returned.unwrap_or_else(|| session_id.to_string());
    debug!(target: "tgpt::turn", session = %next_session, persist, "turn complete");

    if persist && !next_session.is_empty() {
        match store {
            Some(store) => {
                if let Err(e) = store.save(&next_session) {
                    renderer.warn(&format!("could not save chat history: {e}"));
                }
            }
            // No config dir on this platform; continue statelessly.
            None => debug!(target: "tgpt::turn", "no session store; skipping persist"),
        }
    }

    next_session
}
