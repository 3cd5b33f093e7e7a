use crate::{domain::Session, errors::AuthError};
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;
use tokio::sync::watch;

pub type DynAuthProvider = Arc<dyn AuthProviderTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait AuthProviderTrait {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;
    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    fn current_session(&self) -> Option<Session>;

    /// Pushes the new session (or `None`) on every sign-in and sign-out.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
