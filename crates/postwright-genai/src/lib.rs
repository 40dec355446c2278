//! The generation-service boundary for Postwright.
//!
//! [`Generator`] is the contract the rest of the workspace depends on;
//! [`GeminiClient`] implements it over the Gemini REST API. Prompt wording for
//! every tool lives in [`prompts`].

pub mod carousel;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod image;
pub mod prompts;

pub use carousel::{CarouselSlide, SLIDE_COUNT};
pub use error::{GenAiError, Result};
pub use gemini::{GeminiClient, GeminiConfig};
pub use generator::Generator;
pub use image::GeneratedImage;
