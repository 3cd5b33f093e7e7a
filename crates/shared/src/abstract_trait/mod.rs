mod auth;
mod media;
mod store;

pub use self::auth::{AuthProviderTrait, DynAuthProvider, MockAuthProviderTrait};
pub use self::media::{DynMediaUpload, MediaUploadTrait, MockMediaUploadTrait};
pub use self::store::{DocumentStoreTrait, DynDocumentStore, MockDocumentStoreTrait};
