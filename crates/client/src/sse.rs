//! Incremental SSE (Server-Sent Events) parser.
//!
//! SSE framing is line-based: `data:` lines accumulate until a blank
//! line terminates the event. Chunk boundaries fall anywhere, so the
//! parser buffers the partial last line across calls to [`SseParser::feed`].

/// A single parsed SSE event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A data-carrying event, dispatched on the blank line that ends it.
    Event {
        /// Newline-joined values of the event's `data:` lines.
        data: String,
        /// The most recent `event:` field value, if any.
        event: Option<String>,
    },
    /// A `retry:` directive, dispatched immediately with its value in
    /// milliseconds.
    ReconnectInterval(u64),
}

/// Stateful SSE parser that invokes a callback once per parsed event.
///
/// Parser state is owned by one instance and must not be shared across
/// streams; start a fresh instance per stream (there is no reset).
pub struct SseParser<F: FnMut(SseEvent)> {
    line_buf: String,
    data_lines: Vec<String>,
    event_type: Option<String>,
    on_event: F,
}

impl<F: FnMut(SseEvent)> SseParser<F> {
    pub fn new(on_event: F) -> Self {
        Self {
            line_buf: String::new(),
            data_lines: Vec::new(),
            event_type: None,
            on_event,
        }
    }

    /// Feed decoded text from the stream. Invokes the callback zero or
    /// more times, synchronously, before returning. Text after the last
    /// line break stays buffered for the next call.
    pub fn feed(&mut self, text: &str) {
        self.line_buf.push_str(text);
        while let Some(pos) = self.line_buf.find('\n') {
            let mut line: String = self.line_buf.drain(..=pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            self.handle_line(&line);
        }
    }

    fn handle_line(&mut self, line: &str) {
        if line.is_empty() {
            // Blank line ends the event. Dispatch only if data accumulated.
            if self.data_lines.is_empty() {
                self.event_type = None;
                return;
            }
            let data = self.data_lines.join("\n");
            self.data_lines.clear();
            let event = self.event_type.take();
            (self.on_event)(SseEvent::Event { data, event });
            return;
        }

        if let Some(value) = line.strip_prefix("data:") {
            self.data_lines.push(strip_leading_space(value).to_string());
        } else if let Some(value) = line.strip_prefix("event:") {
            self.event_type = Some(strip_leading_space(value).to_string());
        } else if let Some(value) = line.strip_prefix("retry:") {
            // Dispatched immediately, without waiting for a blank line.
            if let Ok(ms) = value.trim().parse::<u64>() {
                (self.on_event)(SseEvent::ReconnectInterval(ms));
            }
        }
        // Comments and unrecognized fields consume the line, nothing more.
    }
}

/// At most one leading space is stripped from a field value.
fn strip_leading_space(value: &str) -> &str {
    value.strip_prefix(' ').unwrap_or(value)
}
