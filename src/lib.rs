//! tgpt — a terminal client for conversational text generation.
//!
//! This crate talks to an OpenAI-style completion endpoint, streams the
//! answer to the terminal while a spinner runs, and threads an opaque
//! conversation identifier across turns so a REPL can keep context.
//!
//! # Quick start
//!
//! ```no_run
//! use tgpt::api::ApiClient;
//! use tgpt::orchestrator::run_turn;
//! use tgpt::tui::renderer::Renderer;
//!
//! # async fn example() {
//! let client = ApiClient::from_env();
//! let renderer = Renderer::new(true);
//! let session = run_turn(&client, &renderer, None, "Hello!", "", false).await;
//! let _ = session;
//! # }
//! ```

pub mod api;
pub mod build_info;
pub mod error;
pub mod orchestrator;
pub mod repl;
pub mod session;
pub mod shell;
#[cfg(test)]
pub mod testsupport;
pub mod textutil;
pub mod tui;
pub mod types;
pub mod update;
