pub mod prefs;

pub use prefs::{FileKvStore, KvStore, MemoryKvStore};
