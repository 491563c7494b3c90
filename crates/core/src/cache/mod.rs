//! Cycle cache and the scratch stores behind it.
//!
//! The cycle entry lives under one scratch-store key and expires after a
//! short TTL. Stores:
//!
//! - [`MemoryStore`] for tests and ephemeral hosts
//! - [`CacheDb`], SQLite via tokio-rusqlite, with schema migrations

pub mod clock;
pub mod connection;
pub mod cycle;
pub mod migrations;
pub mod scratch;
pub mod store;

pub use crate::Error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use connection::CacheDb;
pub use cycle::{CacheEntry, CycleCache, DEFAULT_CACHE_KEY, DEFAULT_TTL_MS};
pub use store::{MemoryStore, ScratchStore};
