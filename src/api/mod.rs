//! HTTP client for the streaming completion endpoint.
//!
//! The API layer is split into cohesive modules:
//! - `sse`: server-sent-event framing and payload parsing
//! - `client`: request dispatch and stream consumption

use crate::error::ApiError;
use async_trait::async_trait;

mod client;
pub mod sse;

pub use client::ApiClient;

/// Minimal completion interface used by the turn orchestrator.
///
/// This trait lets tests provide deterministic scripted streams without
/// network calls while the production path uses [`ApiClient`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Stream one completion for `prompt`, delivering content fragments to
    /// `on_chunk` as they arrive.
    ///
    /// `session_id` is the conversation token from a previous turn, when one
    /// is active. Returns the session token implied by this response stream,
    /// if the provider sent one.
    async fn complete(
        &self,
        prompt: &str,
        session_id: Option<&str>,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<Option<String>, ApiError>;
}
