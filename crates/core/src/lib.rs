//! Core types and shared functionality for richlinker.
//!
//! This crate provides:
//! - Link model: page info, candidate formats, fingerprints
//! - Cycle cache over an injected scratch store and clock (SQLite or memory)
//! - Clipboard and notification ports
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod link;
pub mod notify;

pub use cache::{CacheDb, Clock, CycleCache, MemoryStore, ScratchStore, SystemClock};
pub use clipboard::ClipboardWriter;
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use link::{ClipboardPayload, Format, PageInfo, Style};
pub use notify::{Notification, Notifier};
