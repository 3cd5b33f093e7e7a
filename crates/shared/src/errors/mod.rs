mod auth;
mod service;
mod store;
mod upload;

pub use self::auth::AuthError;
pub use self::service::ServiceError;
pub use self::store::StoreError;
pub use self::upload::UploadError;
