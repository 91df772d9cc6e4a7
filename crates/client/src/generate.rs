//! The stream consumption loop: request out, fragments back.

use crate::decode::Utf8Decoder;
use crate::error::GenerateError;
use crate::sse::{SseEvent, SseParser};
use futures::StreamExt;
use reqwest::Client;
use shared::api::{FragmentPayload, GenerationRequest, StreamChunk};
use std::env;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

// Connect timeout only: a whole-request timeout would kill a long
// generation stream mid-read. Stream lifetime is bounded by the server
// closing the response, not by the client.
static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Pull the text fragment out of one event's JSON payload.
///
/// A missing `text` field is not an error (the event simply contributes
/// nothing); unparseable JSON is. [`FragmentSink`] treats that as
/// recoverable.
fn extract_text(data: &str) -> Result<String, serde_json::Error> {
    let payload: FragmentPayload = serde_json::from_str(data)?;
    Ok(payload.text.unwrap_or_default())
}

/// Decoder + parser + channel, bundled per request.
///
/// Bytes go in; each completed event's text fragment goes out over the
/// channel as [`StreamChunk::Text`], in chunk-read order. Malformed
/// payloads are logged and skipped so a single bad event cannot abort
/// the stream.
pub struct FragmentSink {
    decoder: Utf8Decoder,
    parser: SseParser<Box<dyn FnMut(SseEvent) + Send>>,
}

impl FragmentSink {
    pub fn new(tx: UnboundedSender<StreamChunk>) -> Self {
        let on_event: Box<dyn FnMut(SseEvent) + Send> = Box::new(move |event| match event {
            SseEvent::Event { data, .. } => match extract_text(&data) {
                Ok(text) => {
                    if !text.is_empty() {
                        let _ = tx.send(StreamChunk::Text(text));
                    }
                }
                Err(e) => warn!("skipping malformed event payload: {e}"),
            },
            SseEvent::ReconnectInterval(ms) => {
                debug!("server suggested a {ms}ms reconnect interval");
            }
        });
        Self {
            decoder: Utf8Decoder::new(),
            parser: SseParser::new(on_event),
        }
    }

    /// Feed one raw transport chunk.
    pub fn push(&mut self, bytes: &[u8]) {
        let text = self.decoder.decode(bytes);
        self.parser.feed(&text);
    }

    /// Flush end-of-stream decoder state. A truncated multi-byte tail
    /// becomes a replacement character instead of vanishing.
    pub fn finish(&mut self) {
        if let Some(ch) = self.decoder.finish() {
            let mut buf = [0u8; 4];
            self.parser.feed(ch.encode_utf8(&mut buf));
        }
    }
}

/// Client for the summary-generation endpoint.
#[derive(Clone)]
pub struct GenerationClient {
    http: Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: SHARED_HTTP.clone(),
            base_url: base_url.into(),
        }
    }

    /// Endpoint from `SUMMARY_API_URL`, falling back to localhost.
    pub fn from_env() -> Self {
        let base_url =
            env::var("SUMMARY_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Send the prompt and drive the SSE response to completion, pushing
    /// every text fragment over `tx` in arrival order, followed by
    /// [`StreamChunk::Done`].
    ///
    /// Returns once the stream ends or the request fails outright. If
    /// the receiving side goes away (the request was superseded), the
    /// loop stops reading and returns without `Done`.
    pub async fn stream_summaries(
        &self,
        prompt: &str,
        tx: UnboundedSender<StreamChunk>,
    ) -> Result<(), GenerateError> {
        let url = format!("{}/api/generate", self.base_url);
        let req = GenerationRequest {
            prompt: prompt.to_string(),
        };
        let resp = self.http.post(&url).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail: String = body.chars().take(800).collect();
            return Err(GenerateError::Status { status, detail });
        }

        let mut sink = FragmentSink::new(tx.clone());
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| GenerateError::Read(e.to_string()))?;
            sink.push(&bytes);
            if tx.is_closed() {
                return Ok(());
            }
        }

        sink.finish();
        let _ = tx.send(StreamChunk::Done);
        Ok(())
    }
}
