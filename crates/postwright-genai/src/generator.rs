//! The `Generator` trait.

use std::future::Future;

use crate::{CarouselSlide, GeneratedImage, Result};

/// Abstraction over the external generation service.
///
/// The service may fail at any call. Implementations make a single attempt;
/// there is no retry and no partial result.
pub trait Generator: Send + Sync {
  /// Free-form text for a prompt.
  fn generate_text<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a;

  /// A five-slide carousel plan about `topic`.
  fn generate_carousel_plan<'a>(
    &'a self,
    topic: &'a str,
  ) -> impl Future<Output = Result<Vec<CarouselSlide>>> + Send + 'a;

  /// A square image illustrating a slide's visual suggestion.
  fn generate_slide_image<'a>(
    &'a self,
    visual_suggestion: &'a str,
  ) -> impl Future<Output = Result<GeneratedImage>> + Send + 'a;

  /// A 16:9 profile banner for `theme`.
  fn generate_banner<'a>(
    &'a self,
    theme: &'a str,
  ) -> impl Future<Output = Result<GeneratedImage>> + Send + 'a;

  /// An enhanced version of an uploaded headshot.
  fn enhance_image<'a>(
    &'a self,
    image: &'a GeneratedImage,
  ) -> impl Future<Output = Result<GeneratedImage>> + Send + 'a;
}
