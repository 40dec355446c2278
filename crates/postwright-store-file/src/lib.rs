//! Single-document backend for the Postwright content library.
//!
//! The whole collection lives in one JSON file. Every mutation reads the full
//! list, changes it, and rewrites the file. This is fine for a personal
//! library of a few thousand records and does not go further.

mod document;
mod store;

pub mod error;

pub use document::FORMAT_VERSION;
pub use error::{Error, Result};
pub use store::JsonFileStore;
