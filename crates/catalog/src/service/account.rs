use crate::domain::requests::{
    ChangePasswordRequest, LoginRequest, PasswordResetRequest, RegisterRequest, validation_error,
};
use anyhow::Result;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynAuthProvider,
    domain::Session,
    errors::ServiceError,
    state::SessionState,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tracing::{error, info};
use validator::Validate;

/// Sign-in, registration and password flows over the auth provider.
#[derive(Clone)]
pub struct AccountService {
    auth: DynAuthProvider,
    metrics: Metrics,
}

impl AccountService {
    pub fn new(auth: DynAuthProvider, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();

        registry.register(
            "account_service_request_counter",
            "Total number of requests to the AccountService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "account_service_request_duration",
            "Histogram of request durations for the AccountService",
            metrics.request_duration.clone(),
        );

        Ok(Self { auth, metrics })
    }

    fn complete_tracing(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<(), &ServiceError>,
        message: &str,
    ) {
        let status = match result {
            Ok(()) => {
                tracing_ctx
                    .span
                    .in_scope(|| info!("✅ Operation completed successfully: {message}"));
                StatusUtils::Success
            }
            Err(e) => {
                tracing_ctx
                    .span
                    .in_scope(|| error!("❌ Operation failed: {message}: {e}"));
                StatusUtils::Error
            }
        };

        self.metrics
            .record(method, status, tracing_ctx.elapsed_secs());
    }

    pub async fn sign_in(&self, req: &LoginRequest) -> Result<Session, ServiceError> {
        req.validate()
            .map_err(|e| validation_error(&e, &["email", "password"]))?;

        let tracing_ctx = TracingContext::start("account", "account_sign_in");
        info!("🔐 Signing in {}", req.email);

        let result = self
            .auth
            .sign_in(&req.email, &req.password)
            .await
            .map_err(ServiceError::from);

        self.complete_tracing(
            &tracing_ctx,
            Method::Post,
            result.as_ref().map(|_| ()),
            "sign in",
        );
        result
    }

    pub async fn sign_up(&self, req: &RegisterRequest) -> Result<Session, ServiceError> {
        req.validate().map_err(|e| {
            validation_error(&e, &["email", "password", "confirm_password"])
        })?;

        let tracing_ctx = TracingContext::start("account", "account_sign_up");
        info!("📝 Registering {}", req.email);

        let result = self
            .auth
            .sign_up(&req.email, &req.password)
            .await
            .map_err(ServiceError::from);

        self.complete_tracing(
            &tracing_ctx,
            Method::Post,
            result.as_ref().map(|_| ()),
            "sign up",
        );
        result
    }

    pub async fn send_password_reset(
        &self,
        req: &PasswordResetRequest,
    ) -> Result<(), ServiceError> {
        req.validate()
            .map_err(|e| validation_error(&e, &["email"]))?;

        let tracing_ctx = TracingContext::start("account", "account_password_reset");
        info!("📧 Requesting password reset for {}", req.email);

        let result = self
            .auth
            .send_password_reset(&req.email)
            .await
            .map_err(ServiceError::from);

        self.complete_tracing(
            &tracing_ctx,
            Method::Post,
            result.as_ref().map(|_| ()),
            "password reset",
        );
        result
    }

    pub async fn change_password(&self, req: &ChangePasswordRequest) -> Result<(), ServiceError> {
        req.validate().map_err(|e| {
            validation_error(
                &e,
                &["current_password", "new_password", "confirm_password"],
            )
        })?;

        let tracing_ctx = TracingContext::start("account", "account_change_password");
        info!("🔑 Changing password");

        let result = self
            .auth
            .change_password(&req.current_password, &req.new_password)
            .await
            .map_err(ServiceError::from);

        self.complete_tracing(
            &tracing_ctx,
            Method::Put,
            result.as_ref().map(|_| ()),
            "change password",
        );
        result
    }

    /// Signs out and ends the session state's lifecycle.
    pub async fn sign_out(&self, session: SessionState) -> Result<(), ServiceError> {
        let tracing_ctx = TracingContext::start("account", "account_sign_out");
        info!("👋 Signing out");

        let result = session.sign_out().await.map_err(ServiceError::from);

        self.complete_tracing(
            &tracing_ctx,
            Method::Delete,
            result.as_ref().map(|_| ()),
            "sign out",
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        abstract_trait::{AuthProviderTrait, MockAuthProviderTrait},
        errors::AuthError,
        service::MemoryAuthProvider,
    };
    use std::sync::Arc;
    use testresult::TestResult;

    fn service(auth: DynAuthProvider) -> AccountService {
        let mut registry = Registry::default();
        match AccountService::new(auth, &mut registry) {
            Ok(service) => service,
            Err(e) => panic!("account service: {e}"),
        }
    }

    #[tokio::test]
    async fn invalid_login_never_reaches_the_provider() {
        let mut auth = MockAuthProviderTrait::new();
        auth.expect_sign_in().never();
        let service = service(Arc::new(auth));

        let result = service
            .sign_in(&LoginRequest {
                email: "owner".to_string(),
                password: String::new(),
            })
            .await;

        match result {
            Err(ServiceError::Validation(messages)) => assert_eq!(
                messages,
                vec!["Enter a valid email address", "Password is required"]
            ),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_errors_map_to_fixed_messages() {
        let mut auth = MockAuthProviderTrait::new();
        auth.expect_sign_in()
            .times(1)
            .returning(|_, _| Err(AuthError::from_code("auth/user-not-found")));
        let service = service(Arc::new(auth));

        let result = service
            .sign_in(&LoginRequest {
                email: "ghost@shop.test".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        let err = match result {
            Err(err) => err,
            Ok(session) => panic!("expected failure, got {session:?}"),
        };
        assert_eq!(err.alert_title(), "Authentication");
        assert_eq!(err.user_message(), "No account was found with this email.");
    }

    #[tokio::test]
    async fn sign_up_then_sign_out_ends_the_session() -> TestResult {
        let auth = Arc::new(MemoryAuthProvider::new());
        let service = service(auth.clone());
        let state = SessionState::init(auth.clone());

        service
            .sign_up(&RegisterRequest {
                email: "owner@shop.test".to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
            })
            .await?;
        assert!(state.is_signed_in());

        service.sign_out(state).await?;
        assert_eq!(auth.current_session(), None);

        Ok(())
    }

    #[tokio::test]
    async fn password_reset_is_forwarded_for_valid_emails() -> TestResult {
        let auth = Arc::new(MemoryAuthProvider::new().with_account("owner@shop.test", "secret1"));
        let service = service(auth.clone());

        service
            .send_password_reset(&PasswordResetRequest {
                email: "owner@shop.test".to_string(),
            })
            .await?;

        assert_eq!(auth.reset_requests().await, vec!["owner@shop.test".to_string()]);

        Ok(())
    }
}
