use thiserror::Error;

/// Failures talking to the reasoning engine.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No credentials were configured. Raised at construction, never retried.
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contained no text")]
    EmptyResponse,
}

/// A structured `{score, reason}` record could not be read from model output.
#[derive(Debug, Error)]
pub enum VerdictError {
    #[error("no JSON object in response")]
    NoObject,

    #[error("malformed JSON object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of a single clause assessment.
#[derive(Debug, Error)]
pub enum AssessError {
    #[error("scoring call failed: {0}")]
    Generation(#[from] LlmError),

    #[error("unreadable scoring response ({source}): {raw}")]
    MalformedVerdict {
        #[source]
        source: VerdictError,
        raw: String,
    },
}
