use crate::{abstract_trait::AuthProviderTrait, domain::Session, errors::AuthError};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::{Mutex, watch};
use tracing::{info, warn};
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    user_id: String,
    password: String,
}

/// Auth provider backed by an in-memory account table. Pushes every
/// session change through a `watch` channel.
#[derive(Debug)]
pub struct MemoryAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    reset_requests: Mutex<Vec<String>>,
    session: watch::Sender<Option<Session>>,
    offline: AtomicBool,
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            reset_requests: Mutex::new(Vec::new()),
            session,
            offline: AtomicBool::new(false),
        }
    }

    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts.get_mut().insert(
            email.to_lowercase(),
            Account {
                user_id: Uuid::new_v4().simple().to_string(),
                password: password.to_string(),
            },
        );
        self
    }

    /// While offline every call fails with `AuthError::NetworkFailure`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn reset_requests(&self) -> Vec<String> {
        self.reset_requests.lock().await.clone()
    }

    fn ensure_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::NetworkFailure);
        }
        Ok(())
    }

    fn check_email(email: &str) -> Result<String, AuthError> {
        let email = email.trim().to_lowercase();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
            _ => Err(AuthError::InvalidEmail),
        }
    }

    fn publish(&self, session: Option<Session>) {
        self.session.send_replace(session);
    }
}

#[async_trait]
impl AuthProviderTrait for MemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.ensure_online()?;
        let email = Self::check_email(email)?;

        let accounts = self.accounts.lock().await;
        let account = accounts.get(&email).ok_or(AuthError::UserNotFound)?;

        if account.password != password {
            warn!("Rejected sign-in for {email}");
            return Err(AuthError::WrongPassword);
        }

        let session = Session::new(account.user_id.clone(), email.clone());
        drop(accounts);

        self.publish(Some(session.clone()));
        info!("Signed in {email}");

        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.ensure_online()?;
        let email = Self::check_email(email)?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let user_id = Uuid::new_v4().simple().to_string();
        accounts.insert(
            email.clone(),
            Account {
                user_id: user_id.clone(),
                password: password.to_string(),
            },
        );
        drop(accounts);

        let session = Session::new(user_id, email.clone());
        self.publish(Some(session.clone()));
        info!("Registered {email}");

        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.ensure_online()?;
        self.publish(None);
        info!("Signed out");
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.ensure_online()?;
        let email = Self::check_email(email)?;

        if !self.accounts.lock().await.contains_key(&email) {
            return Err(AuthError::UserNotFound);
        }

        self.reset_requests.lock().await.push(email.clone());
        info!("Password reset requested for {email}");
        Ok(())
    }

    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.ensure_online()?;
        let session = self.current_session().ok_or(AuthError::NotSignedIn)?;

        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(&session.email)
            .ok_or(AuthError::UserNotFound)?;

        if account.password != current_password {
            return Err(AuthError::WrongPassword);
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        account.password = new_password.to_string();
        info!("Password changed for {}", session.email);
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}
