//! Streaming client for the summary-generation endpoint.
//!
//! The endpoint takes a prompt and answers with a server-sent-event
//! stream; each event's `data` field is a JSON object carrying one
//! incremental fragment of generated text. This crate owns the three
//! pieces that make that consumption loop correct under arbitrary
//! chunking: an incremental UTF-8 decoder, an SSE frame parser, and the
//! reqwest-driven loop that pumps fragments back to the UI.

pub mod decode;
pub mod error;
pub mod generate;
pub mod sse;

pub use error::GenerateError;
pub use generate::{FragmentSink, GenerationClient};
pub use sse::{SseEvent, SseParser};
