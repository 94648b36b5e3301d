pub mod storage;

pub use storage::{Storage, StorageError, TrackDocument, TrackEntry};
