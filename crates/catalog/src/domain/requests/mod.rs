mod auth;
mod product;

pub use self::auth::{ChangePasswordRequest, LoginRequest, PasswordResetRequest, RegisterRequest};
pub use self::product::{ProductDraft, ProductForm, ProductFormValues};

use shared::errors::ServiceError;
use validator::ValidationErrors;

/// Flattens validator output into one message per failed rule. Fields named
/// in `order` come first, in that order; anything else follows by name.
pub(crate) fn validation_error(errors: &ValidationErrors, order: &[&str]) -> ServiceError {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let field = field.to_string();
            let messages = field_errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"))
                })
                .collect();
            (field, messages)
        })
        .collect();

    fields.sort_by_key(|(field, _)| {
        let rank = order
            .iter()
            .position(|known| *known == field.as_str())
            .unwrap_or(order.len());
        (rank, field.clone())
    });

    ServiceError::Validation(
        fields
            .into_iter()
            .flat_map(|(_, messages)| messages)
            .collect(),
    )
}
