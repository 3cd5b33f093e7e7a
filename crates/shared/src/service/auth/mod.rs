mod memory;

pub use self::memory::MemoryAuthProvider;
