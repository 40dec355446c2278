//! The content tools and their local input validation.
//!
//! Every tool checks its input before anything is sent to the generation
//! service. A rejected input never leaves the process.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ValidationError;

// ─── Tool ────────────────────────────────────────────────────────────────────

/// A form-driven generation tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Tool {
  ContentStrategy,
  PostWriter,
  CarouselCreator,
  SlideImage,
  PostTimeFinder,
  ProfileOptimizer,
  ImageEnhancer,
  BannerGenerator,
}

impl Tool {
  /// Minimum length of the trimmed input, in characters.
  pub const fn min_len(self) -> usize {
    match self {
      Self::ContentStrategy | Self::PostTimeFinder => 5,
      Self::PostWriter | Self::CarouselCreator => 10,
      Self::ProfileOptimizer => 50,
      Self::SlideImage | Self::ImageEnhancer | Self::BannerGenerator => 1,
    }
  }

  /// Shown when the input is blank.
  pub const fn empty_message(self) -> &'static str {
    match self {
      Self::ContentStrategy => "Please enter a topic or theme.",
      Self::PostWriter => "Please enter a post idea or topic.",
      Self::CarouselCreator => "Please enter a topic for the carousel.",
      Self::SlideImage => "Please provide a visual suggestion.",
      Self::PostTimeFinder => "Please enter your industry.",
      Self::ProfileOptimizer => "Please paste your current profile bio.",
      Self::ImageEnhancer => "Please upload a profile image first.",
      Self::BannerGenerator => "Please describe the banner you want to create.",
    }
  }

  /// Shown when the input is non-blank but shorter than [`Self::min_len`].
  pub fn too_short_message(self) -> String {
    let n = self.min_len();
    match self {
      Self::ContentStrategy => {
        format!("Please provide a more descriptive topic (at least {n} characters).")
      }
      Self::PostWriter => format!(
        "Your post idea should be at least {n} characters long to generate a quality post."
      ),
      Self::CarouselCreator => format!(
        "Your carousel topic should be at least {n} characters for a good plan."
      ),
      Self::PostTimeFinder => format!(
        "Please provide a more descriptive industry (at least {n} characters)."
      ),
      Self::ProfileOptimizer => {
        format!("Please enter at least {n} characters for a meaningful analysis.")
      }
      // Minimum of one: a non-blank input is never too short.
      Self::SlideImage | Self::ImageEnhancer | Self::BannerGenerator => {
        self.empty_message().to_owned()
      }
    }
  }

  /// The single static message shown when the generation call fails.
  pub const fn failure_message(self) -> &'static str {
    match self {
      Self::ContentStrategy => {
        "An error occurred while generating the content strategy. Please try again."
      }
      Self::PostWriter => "An error occurred while writing the post. Please try again.",
      Self::CarouselCreator => {
        "An error occurred while generating the carousel plan. Please try again."
      }
      Self::SlideImage => {
        "An error occurred while generating the slide image. Please try again."
      }
      Self::PostTimeFinder => {
        "An error occurred while finding the best posting times. Please try again."
      }
      Self::ProfileOptimizer => {
        "An error occurred while optimizing your profile. Please try again."
      }
      Self::ImageEnhancer => {
        "An error occurred while enhancing the image. Please try again."
      }
      Self::BannerGenerator => {
        "An error occurred while generating the banner. Please try again."
      }
    }
  }

  /// Check `input` and return it trimmed.
  pub fn validate(self, input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Err(self.reject(self.empty_message().to_owned()));
    }
    if trimmed.chars().count() < self.min_len() {
      return Err(self.reject(self.too_short_message()));
    }
    Ok(trimmed)
  }

  fn reject(self, message: String) -> ValidationError {
    ValidationError { tool: self, message }
  }
}

// ─── PostStyle ───────────────────────────────────────────────────────────────

/// The post formats the post writer can imitate.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PostStyle {
  #[default]
  ThoughtLeadership,
  HowTo,
  Newsjacking,
  LessonsLearned,
  ResourceCuration,
}

impl PostStyle {
  pub const ALL: [PostStyle; 5] = [
    Self::ThoughtLeadership,
    Self::HowTo,
    Self::Newsjacking,
    Self::LessonsLearned,
    Self::ResourceCuration,
  ];

  /// The descriptive name used in prompts.
  pub const fn label(self) -> &'static str {
    match self {
      Self::ThoughtLeadership => {
        "Thought Leadership Text Posts (Personal Stories + Insights)"
      }
      Self::HowTo => "How-To Guides & Actionable Tips",
      Self::Newsjacking => "Industry News + Your Commentary (Newsjacking)",
      Self::LessonsLearned => "Lessons Learned / Failure Stories",
      Self::ResourceCuration => "Resource Curation & Lists",
    }
  }
}
