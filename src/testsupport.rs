//! Shared test fixtures for session/orchestrator test modules.
//!
//! Kept std-only so unit tests can use temp dirs and scripted completion
//! streams without extra dependencies.

use crate::api::CompletionClient;
use crate::error::ApiError;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let path = std::env::temp_dir().join(format!(
            "{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("create test temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// One scripted response for [`RecordingClient`].
#[derive(Debug, Clone)]
pub struct ScriptedTurn {
    chunks: Vec<String>,
    session_id: Option<String>,
    error: Option<String>,
}

impl ScriptedTurn {
    /// Script a successful stream of `chunks` ending in `session_id`.
    pub fn succeed(chunks: Vec<&str>, session_id: Option<&str>) -> Self {
        Self {
            chunks: chunks.into_iter().map(str::to_string).collect(),
            session_id: session_id.map(str::to_string),
            error: None,
        }
    }

    /// Script a failed turn with the given diagnostic.
    pub fn fail(message: &str) -> Self {
        Self {
            chunks: Vec::new(),
            session_id: None,
            error: Some(message.to_string()),
        }
    }
}

/// Arguments observed for one `complete` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub session_id: Option<String>,
}

/// Deterministic [`CompletionClient`] that records calls and replays a
/// script, one entry per call.
pub struct RecordingClient {
    script: Mutex<Vec<ScriptedTurn>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingClient {
    pub fn new(script: Vec<ScriptedTurn>) -> Self {
        Self {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn complete(
        &self,
        prompt: &str,
        session_id: Option<&str>,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<Option<String>, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            session_id: session_id.map(str::to_string),
        });

        let turn = {
            let mut script = self.script.lock().unwrap();
            assert!(!script.is_empty(), "unscripted call for prompt: {prompt}");
            script.remove(0)
        };

        if let Some(message) = turn.error {
            return Err(ApiError::Malformed(message));
        }
        for chunk in &turn.chunks {
            on_chunk(chunk);
        }
        Ok(turn.session_id)
    }
}
