pub mod summary;

pub mod api {
    use serde::{Deserialize, Serialize};

    /// Body of the `POST /api/generate` request.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GenerationRequest {
        pub prompt: String,
    }

    /// The JSON payload carried by one SSE event's `data` field.
    ///
    /// `text` may be absent or empty; both mean "no contribution from
    /// this event".
    #[derive(Debug, Clone, Deserialize)]
    pub struct FragmentPayload {
        #[serde(default)]
        pub text: Option<String>,
    }

    /// One message from the streaming task back to the UI.
    #[derive(Debug, Clone)]
    pub enum StreamChunk {
        /// One incremental fragment of generated text.
        Text(String),
        /// The stream ended normally.
        Done,
        /// The request failed; carries a displayable message.
        Error(String),
    }
}
