use crate::prompt::{build_prompt, Tone};
use client::GenerationClient;
use shared::api::StreamChunk;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::task::JoinHandle;

/// Transient notification shown at the top of the window.
pub struct Toast {
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    const TTL: Duration = Duration::from_secs(2);

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn expired(&self) -> bool {
        self.shown_at.elapsed() > Self::TTL
    }
}

/// Main application state.
pub struct AppState {
    /// Current job-description input.
    pub input_text: String,
    pub tone: Tone,
    /// Accumulated result buffer for the current generation. Reset at
    /// the start of every submission; append-only while streaming.
    pub generated: String,
    pub generating: bool,
    /// Scroll the results heading into view on the next frame.
    pub scroll_to_results: bool,
    pub toast: Option<Toast>,

    /// Monotonic marker distinguishing the current request's chunks
    /// from a superseded one's.
    epoch: u64,
    stream_rx: Option<(u64, UnboundedReceiver<StreamChunk>)>,
    stream_task: Option<JoinHandle<()>>,

    client: GenerationClient,
    runtime: tokio::runtime::Runtime,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            input_text: String::new(),
            tone: Tone::Professional,
            generated: String::new(),
            generating: false,
            scroll_to_results: false,
            toast: None,
            epoch: 0,
            stream_rx: None,
            stream_task: None,
            client: GenerationClient::from_env(),
            runtime,
        })
    }

    /// Kick off a generation request for the current input.
    ///
    /// Any in-flight request is superseded: its task is aborted, its
    /// receiver replaced, and its epoch invalidated, so a slow stale
    /// stream can never append into the fresh buffer.
    pub fn start_generation(&mut self) {
        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
        self.epoch += 1;
        self.generated.clear();
        self.generating = true;
        self.scroll_to_results = false;

        let prompt = build_prompt(self.input_text.trim(), self.tone);
        let (tx, rx) = unbounded_channel();
        self.stream_rx = Some((self.epoch, rx));

        let client = self.client.clone();
        self.stream_task = Some(self.runtime.spawn(async move {
            if let Err(e) = client.stream_summaries(&prompt, tx.clone()).await {
                let _ = tx.send(StreamChunk::Error(e.to_string()));
            }
        }));
    }

    /// Drain pending stream chunks (non-blocking), appending text to the
    /// buffer and leaving the generating state when the stream finishes.
    pub fn poll_stream(&mut self) {
        let Some((epoch, mut rx)) = self.stream_rx.take() else {
            return;
        };
        let current = epoch == self.epoch;
        let mut finished = false;
        while let Ok(chunk) = rx.try_recv() {
            match chunk {
                StreamChunk::Text(text) if current => self.generated.push_str(&text),
                StreamChunk::Text(_) => {}
                StreamChunk::Done => {
                    finished = true;
                    break;
                }
                StreamChunk::Error(message) => {
                    tracing::error!("generation failed: {message}");
                    self.toast = Some(Toast::new(format!("Generation failed: {message}")));
                    finished = true;
                    break;
                }
            }
        }
        if finished {
            self.generating = false;
            self.scroll_to_results = true;
            self.stream_task = None;
        } else {
            self.stream_rx = Some((epoch, rx));
        }
    }
}
