use crate::{abstract_trait::DynAuthProvider, domain::Session, errors::AuthError};
use std::fmt;
use tokio::sync::watch;
use tracing::info;

/// Process-wide view of the signed-in user.
///
/// Created once at start-up from the auth provider's session-changed
/// subscription, updated only by that subscription, and consumed by
/// [`SessionState::sign_out`]. Business logic receives a [`Session`] value
/// from here instead of asking the provider directly.
pub struct SessionState {
    auth: DynAuthProvider,
    receiver: watch::Receiver<Option<Session>>,
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("auth", &"Arc<dyn AuthProviderTrait>")
            .field("current", &*self.receiver.borrow())
            .finish()
    }
}

impl SessionState {
    pub fn init(auth: DynAuthProvider) -> Self {
        let receiver = auth.subscribe();
        info!(
            "Session state initialized (signed in: {})",
            receiver.borrow().is_some()
        );
        Self { auth, receiver }
    }

    pub fn current(&self) -> Option<Session> {
        self.receiver.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.receiver.borrow().is_some()
    }

    /// Waits for the next sign-in or sign-out push. Returns `None` once the
    /// provider has gone away.
    pub async fn changed(&mut self) -> Option<Option<Session>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Signs out through the provider and ends this state's lifecycle.
    pub async fn sign_out(self) -> Result<(), AuthError> {
        self.auth.sign_out().await?;
        info!("Session state torn down");
        Ok(())
    }
}
