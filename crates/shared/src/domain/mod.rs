mod document;
mod media;
mod session;

pub use self::document::{CollectionSnapshot, Document, Fields};
pub use self::media::LocalFile;
pub use self::session::Session;
