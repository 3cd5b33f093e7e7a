use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Malformed record {id}: {reason}")]
    Malformed { id: String, reason: String },

    #[error("Custom: {0}")]
    Custom(String),
}
