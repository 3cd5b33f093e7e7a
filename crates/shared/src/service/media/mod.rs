mod http;
mod memory;

pub use self::http::{HttpMediaUploader, MediaUploadConfig};
pub use self::memory::MemoryMediaHost;
