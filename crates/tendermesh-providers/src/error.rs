use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing credentials: set {0}")]
    MissingCredentials(&'static str),
    #[error("live fetch exceeded {secs}s")]
    Timeout { secs: u64 },
}
