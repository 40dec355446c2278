//! Core types and trait definitions for the Postwright content assistant.
//!
//! This crate is free of HTTP and database dependencies. Storage backends,
//! the generation client and the API all depend on it.

// Native `async fn` in traits; the futures' `Send` bounds are spelled out on
// the trait methods themselves.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod library;
pub mod memory;
pub mod record;
pub mod store;
pub mod tool;

pub use error::{Error, Result, ValidationError};
pub use library::{KindFilter, Library};
pub use memory::MemoryStore;
pub use record::{ContentKind, ContentRecord, NewRecord, Rating, RecordPatch};
pub use store::ContentStore;
pub use tool::{PostStyle, Tool};
