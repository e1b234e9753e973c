//! Streaming client for the completion endpoint.

use crate::api::{sse, CompletionClient};
use crate::error::ApiError;
use crate::types::{CompletionRequest, Message};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Default endpoint base; override with `TGPT_BASE_URL`.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default model id; override with `TGPT_MODEL`.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Connection establishment timeout. The stream itself has no deadline;
/// a response may legitimately take minutes to finish.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the streaming completion API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ApiClient {
    /// Build a client for the given endpoint and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        // Fall back to reqwest defaults if builder creation fails for any reason.
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Build a client from `TGPT_BASE_URL` / `TGPT_MODEL` / `TGPT_API_KEY`,
    /// with built-in defaults for the first two.
    pub fn from_env() -> Self {
        let base_url = env::var("TGPT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("TGPT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_key = env::var("TGPT_API_KEY").ok();
        Self::new(base_url, model, api_key)
    }

    fn build_request(&self, prompt: &str, session_id: Option<&str>) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            stream: true,
            chat_id: session_id
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }
}

#[async_trait]
impl CompletionClient for ApiClient {
    async fn complete(
        &self,
        prompt: &str,
        session_id: Option<&str>,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<Option<String>, ApiError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request(prompt, session_id);
        debug!(target: "tgpt::api", url = %url, chat_id = ?body.chat_id, "dispatching completion");

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status(status, sse::error_summary(&text)));
        }

        // Reassemble SSE lines across transport chunk boundaries. Buffer raw
        // bytes and decode per complete line; a multi-byte codepoint may be
        // split across chunks, but never across a newline.
        let mut stream = response.bytes_stream();
        let mut pending: Vec<u8> = Vec::new();
        let mut last_id: Option<String> = None;

        while let Some(bytes) = stream.next().await {
            let bytes = bytes?;
            pending.extend_from_slice(&bytes);

            while let Some(newline) = pending.iter().position(|&b| b == b'\n') {
                let line_bytes: Vec<u8> = pending.drain(..=newline).collect();
                let decoded = String::from_utf8_lossy(&line_bytes);
                let line = decoded.trim_end_matches(['\n', '\r']);

                match sse::data_payload(line) {
                    Some(sse::Payload::Done) => {
                        debug!(target: "tgpt::api", chat_id = ?last_id, "stream complete");
                        return Ok(last_id);
                    }
                    Some(sse::Payload::Data(payload)) => {
                        let chunk = sse::parse_chunk(payload)?;
                        if let Some(id) = chunk.id.as_deref().filter(|id| !id.is_empty()) {
                            last_id = Some(id.to_string());
                        }
                        if let Some(content) = chunk.content() {
                            on_chunk(content);
                        }
                    }
                    None => {}
                }
            }
        }

        // Stream ended without a [DONE] marker; treat what we saw as complete.
        Ok(last_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(response: String) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request_buf = [0u8; 8192];
            let _ = stream.read(&mut request_buf).await;
            let _ = stream.write_all(response.as_bytes()).await;
        });
        addr
    }

    #[tokio::test]
    async fn streams_chunks_and_returns_session_id() {
        let body = concat!(
            "data: {\"id\":\"sess-9\",\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n",
            "data: {\"id\":\"sess-9\",\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n",
            "data: [DONE]\n\n",
        );
        let addr = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n{body}"
        ))
        .await;

        let client = ApiClient::new(format!("http://{addr}"), "test-model", None);
        let mut collected = String::new();
        let mut on_chunk = |text: &str| collected.push_str(text);
        let id = client
            .complete("hi", None, &mut on_chunk)
            .await
            .expect("stream should succeed");
        assert_eq!(collected, "Hello");
        assert_eq!(id.as_deref(), Some("sess-9"));
    }

    #[tokio::test]
    async fn multibyte_content_split_across_transport_chunks_survives() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request_buf = [0u8; 8192];
            let _ = stream.read(&mut request_buf).await;

            let body = "data: {\"id\":\"s1\",\"choices\":[{\"delta\":{\"content\":\"café\"}}]}\n\ndata: [DONE]\n\n"
                .as_bytes();
            // Split inside the two-byte `é` so the second byte arrives in a
            // separate transport chunk.
            let split = body.iter().position(|&b| b == 0xC3).expect("multibyte start") + 1;
            let head = "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n";
            let _ = stream.write_all(head.as_bytes()).await;
            let _ = stream.write_all(&body[..split]).await;
            let _ = stream.flush().await;
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            let _ = stream.write_all(&body[split..]).await;
        });

        let client = ApiClient::new(format!("http://{addr}"), "test-model", None);
        let mut collected = String::new();
        let mut on_chunk = |text: &str| collected.push_str(text);
        let id = client
            .complete("hi", None, &mut on_chunk)
            .await
            .expect("stream should succeed");
        assert_eq!(collected, "café", "split codepoint must decode intact");
        assert_eq!(id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn non_success_status_yields_summarized_error() {
        let body = r#"{"error":{"message":"model not found"}}"#;
        let addr = serve_once(format!(
            "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ))
        .await;

        let client = ApiClient::new(format!("http://{addr}"), "test-model", None);
        let mut on_chunk = |_: &str| panic!("no chunks expected on error");
        let err = client
            .complete("hi", None, &mut on_chunk)
            .await
            .expect_err("status error expected");
        match err {
            ApiError::Status(404, summary) => assert_eq!(summary, "model not found"),
            other => panic!("expected 404 status error, got: {other}"),
        }
    }

    #[test]
    fn request_threads_session_id_as_chat_id() {
        let client = ApiClient::new("https://example.com/", "test-model", None);
        let request = client.build_request("hello", Some("sess-1"));
        assert_eq!(request.chat_id.as_deref(), Some("sess-1"));
        assert_eq!(request.messages, vec![Message::user("hello")]);
        assert!(request.stream);
    }

    #[test]
    fn request_omits_empty_session_id() {
        let client = ApiClient::new("https://example.com", "test-model", None);
        assert_eq!(client.build_request("hello", Some("")).chat_id, None);
        assert_eq!(client.build_request("hello", None).chat_id, None);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("https://example.com/", "m", None);
        assert_eq!(client.base_url, "https://example.com");
    }

    #[test]
    fn blank_api_key_is_treated_as_absent() {
        let client = ApiClient::new("https://example.com", "m", Some("   ".to_string()));
        assert!(client.api_key.is_none());
    }
}
