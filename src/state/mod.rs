//! Session State Module
//!
//! Owns the single persisted session record:
//! - Forward transitions (core → secondary → specific emotion)
//! - Back navigation and reset
//! - Durable key-value storage with corrupt-state recovery

mod manager;
mod storage;

pub use manager::{NavigationError, SessionStore};
pub use storage::{
    FileStorage, MemoryStorage, SessionStorage, StorageError, StorageResult, SESSION_STORAGE_KEY,
};
