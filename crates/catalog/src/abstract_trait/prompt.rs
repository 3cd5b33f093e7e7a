use crate::domain::Confirmation;
use async_trait::async_trait;
use mockall::automock;

/// Blocking yes/no dialog shown before destructive actions.
#[automock]
#[async_trait]
pub trait ConfirmPromptTrait {
    async fn confirm(&self, request: &Confirmation) -> bool;
}
