use crate::errors::{auth::AuthError, store::StoreError, upload::UploadError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("A submission is already in progress")]
    SubmitInProgress,

    #[error("No signed-in session")]
    Unauthenticated,
}

impl ServiceError {
    pub fn alert_title(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "Missing information",
            ServiceError::Upload(_) => "Image upload failed",
            ServiceError::Store(_) => "Error",
            ServiceError::Auth(_) | ServiceError::Unauthenticated => "Authentication",
            ServiceError::SubmitInProgress => "Please wait",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Validation(errors) => errors.join("\n"),
            ServiceError::Upload(_) => {
                "The image could not be uploaded. The product was not saved.".to_string()
            }
            ServiceError::Store(StoreError::NotFound) => "Product not found.".to_string(),
            ServiceError::Store(StoreError::PermissionDenied(_)) => {
                "You do not have permission to do that.".to_string()
            }
            ServiceError::Store(_) => {
                "Could not reach the catalog. Please try again.".to_string()
            }
            ServiceError::Auth(err) => err.user_message().to_string(),
            ServiceError::SubmitInProgress => "The product is still being saved.".to_string(),
            ServiceError::Unauthenticated => AuthError::NotSignedIn.user_message().to_string(),
        }
    }
}
