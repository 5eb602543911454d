//! In-memory storage backend.
//!
//! Implements every `vox-store` trait on top of `Mutex<HashMap>`. Each
//! trait method takes its lock exactly once, which is what makes the
//! conditional code write and the ballot upsert atomic. Thread-safe for
//! use with tokio's multi-threaded runtime.

mod store;

pub use store::MemoryStore;
