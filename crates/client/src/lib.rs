//! Client code for richlinker.
//!
//! This crate provides page access over HTML snapshots, the per-site
//! extractors, format resolution and the invocation engine used by the server.

pub mod engine;
pub mod extract;
pub mod page;
pub mod resolve;

pub use engine::{CopyOutcome, LinkEngine};
pub use extract::{ExtractError, Extractor, REGISTRY};
pub use page::{HtmlPage, PageAccessor};
pub use resolve::{Resolution, resolve};
