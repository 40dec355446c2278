//! Prompt wording for each tool.
//!
//! Inputs are embedded as given; callers validate them first.

use postwright_core::tool::PostStyle;

use crate::carousel::SLIDE_COUNT;

pub fn content_strategy(topic: &str) -> String {
  format!(
    "Generate a 1-week LinkedIn content strategy for the following topic: \"{topic}\".
The strategy should be based on the provided 2025 LinkedIn strategy document.
Include a mix of 3 post types from the document (e.g., Thought Leadership, How-To Guide, Poll).
For each post, provide:
1. The post type.
2. A compelling hook.
3. A brief outline of the content.
4. Suggested hashtags (max 3).
5. The best day to post (e.g., Monday, Wednesday, Friday)."
  )
}

pub fn post(idea: &str, style: PostStyle) -> String {
  let style = style.label();
  format!(
    "Write a LinkedIn post based on the following idea: \"{idea}\".
The post should be in the style of \"{style}\".
Adhere strictly to the best practices and structure outlined for this post type in the 2025 LinkedIn strategy document.
Ensure it has a strong hook, provides value, and ends with a call-to-action to encourage comments. Use appropriate formatting like line breaks and symbols."
  )
}

pub fn carousel_plan(topic: &str) -> String {
  format!(
    "Create a {SLIDE_COUNT}-slide LinkedIn carousel plan about \"{topic}\".
For each slide, provide a \"slide\" number (1 to {SLIDE_COUNT}), a short \"title\", \"content\" (max 20 words), and a \"visualSuggestion\" for an accompanying image."
  )
}

pub fn slide_image(visual_suggestion: &str) -> String {
  format!(
    "A professional, modern, and clean image for a LinkedIn carousel slide. The image should visually represent: \"{visual_suggestion}\". The style should be abstract or conceptual, suitable for a corporate audience."
  )
}

pub fn posting_times(industry: &str, target_tz: &str, local_tz: &str) -> String {
  format!(
    "Based on the 2025 LinkedIn strategy, what are the optimal posting times for someone in the \"{industry}\" industry?
My target audience is primarily located in the region with the timezone \"{target_tz}\". My local timezone is \"{local_tz}\".

Provide the top 3 best time slots (including days of the week). For each slot, provide the time in BOTH the target timezone ({target_tz}) AND my local timezone ({local_tz}).

Explain the strategic reasoning behind each suggestion, citing principles from the strategy document like engagement windows and audience behavior for professionals in that industry and region."
  )
}

pub fn profile_optimization(bio: &str) -> String {
  format!(
    "Analyze the following LinkedIn profile bio and provide a detailed, optimized version based on the 2025 LinkedIn strategy.
Focus on the \"uniquePositioning\" and \"coreContentPillars\" to craft a compelling headline and 'About' section.
Provide the optimized headline and 'About' section separately. Explain the key changes and why they were made.

Current Bio:
---
{bio}
---"
  )
}

pub fn banner(theme: &str) -> String {
  format!(
    "A professional LinkedIn banner image based on the following theme: \"{theme}\". The style should be modern, clean, and corporate-friendly. Avoid text unless specifically requested."
  )
}

/// Instruction sent alongside an uploaded headshot.
pub const ENHANCE_HEADSHOT: &str = "Enhance this professional headshot. Improve lighting, clarity, and overall quality to make it suitable for a LinkedIn profile picture. Do not add or change any features.";
