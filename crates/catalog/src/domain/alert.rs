use shared::errors::ServiceError;

/// One user-facing message raised by a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl From<&ServiceError> for Alert {
    fn from(err: &ServiceError) -> Self {
        Self {
            title: err.alert_title().to_string(),
            message: err.user_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl Confirmation {
    pub fn delete_product(name: Option<&str>) -> Self {
        let message = match name {
            Some(name) => format!("Delete \"{name}\"? This cannot be undone."),
            None => "Delete this product? This cannot be undone.".to_string(),
        };

        Self {
            title: "Delete product".to_string(),
            message,
            confirm_label: "Delete".to_string(),
        }
    }

    pub fn discard_changes() -> Self {
        Self {
            title: "Discard changes?".to_string(),
            message: "You have unsaved changes. Leave without saving?".to_string(),
            confirm_label: "Discard".to_string(),
        }
    }
}
