mod auth;
mod media;

pub use self::auth::MemoryAuthProvider;
pub use self::media::{HttpMediaUploader, MediaUploadConfig, MemoryMediaHost};
