use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("auth/invalid-email")]
    InvalidEmail,

    #[error("auth/wrong-password")]
    WrongPassword,

    #[error("auth/user-not-found")]
    UserNotFound,

    #[error("auth/network-request-failed")]
    NetworkFailure,

    #[error("auth/email-already-in-use")]
    EmailAlreadyInUse,

    #[error("auth/weak-password")]
    WeakPassword,

    #[error("auth/requires-recent-login")]
    RequiresRecentLogin,

    #[error("auth/no-current-user")]
    NotSignedIn,

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Maps a provider error code onto the known variants.
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/invalid-email" => AuthError::InvalidEmail,
            "auth/wrong-password" | "auth/invalid-credential" => AuthError::WrongPassword,
            "auth/user-not-found" => AuthError::UserNotFound,
            "auth/network-request-failed" | "auth/network-failure" => AuthError::NetworkFailure,
            "auth/email-already-in-use" => AuthError::EmailAlreadyInUse,
            "auth/weak-password" => AuthError::WeakPassword,
            "auth/requires-recent-login" => AuthError::RequiresRecentLogin,
            "auth/no-current-user" => AuthError::NotSignedIn,
            other => AuthError::Other(other.to_string()),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail => "The email address is not valid.",
            AuthError::WrongPassword => "Incorrect password. Please try again.",
            AuthError::UserNotFound => "No account was found with this email.",
            AuthError::NetworkFailure => "Network error. Check your connection and try again.",
            AuthError::EmailAlreadyInUse => "This email is already registered.",
            AuthError::WeakPassword => "The password must be at least 6 characters long.",
            AuthError::RequiresRecentLogin => "Please sign in again before changing your password.",
            AuthError::NotSignedIn => "You need to be signed in to do that.",
            AuthError::Other(_) => "Something went wrong. Please try again later.",
        }
    }
}
