use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read local file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Unexpected upload response: {0}")]
    InvalidResponse(String),

    #[error("Media host unavailable: {0}")]
    Unavailable(String),
}
