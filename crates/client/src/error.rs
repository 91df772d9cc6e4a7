use thiserror::Error;

/// Fatal failures of one generation request. There is no automatic
/// retry; the caller clears its loading state and gives up.
///
/// A malformed payload on a single event is deliberately not represented
/// here: that case is recoverable and handled inside the consumption
/// loop (logged, skipped, stream continues).
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The endpoint answered with a non-2xx status before any streaming
    /// began. No partial output exists.
    #[error("generation endpoint returned {status}: {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },

    /// Connection-level failure issuing the request.
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body failed while the stream was being read.
    #[error("stream read error: {0}")]
    Read(String),
}
