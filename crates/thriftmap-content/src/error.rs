use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON parse error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("fixture I/O error: {0}")]
    Io(#[from] std::io::Error),
}
