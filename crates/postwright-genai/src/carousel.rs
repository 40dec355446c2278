//! Carousel plans: the one structured response the service returns.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use crate::{GenAiError, Result};

/// Number of slides every plan must contain.
pub const SLIDE_COUNT: usize = 5;

/// One slide of a carousel plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSlide {
  /// 1-based position.
  #[serde(deserialize_with = "whole_number")]
  pub slide:             u32,
  pub title:             String,
  /// Body text, at most about twenty words.
  pub content:           String,
  /// Description of an accompanying image; used as the image prompt.
  pub visual_suggestion: String,
}

#[derive(Deserialize)]
struct Plan {
  slides: Vec<CarouselSlide>,
}

/// Parse the service's JSON text into exactly [`SLIDE_COUNT`] slides,
/// ordered by slide number.
///
/// Slide numbers must be `1..=SLIDE_COUNT`, each used once. Any deviation
/// from the expected shape is an error; no partial plan is returned.
pub fn parse_plan(text: &str) -> Result<Vec<CarouselSlide>> {
  let plan: Plan = serde_json::from_str(text.trim())
    .map_err(|e| GenAiError::InvalidPlan(e.to_string()))?;
  let mut slides = plan.slides;
  if slides.len() != SLIDE_COUNT {
    return Err(GenAiError::InvalidPlan(format!(
      "expected {SLIDE_COUNT} slides, got {}",
      slides.len()
    )));
  }

  slides.sort_by_key(|s| s.slide);
  let numbers: Vec<u32> = slides.iter().map(|s| s.slide).collect();
  if !numbers.iter().copied().eq(1..=SLIDE_COUNT as u32) {
    return Err(GenAiError::InvalidPlan(format!(
      "slide numbers must be 1 to {SLIDE_COUNT} once each, got {numbers:?}"
    )));
  }
  Ok(slides)
}

/// The response schema sent with plan requests.
pub fn plan_schema() -> Value {
  json!({
    "type": "OBJECT",
    "properties": {
      "slides": {
        "type": "ARRAY",
        "items": {
          "type": "OBJECT",
          "properties": {
            "slide": { "type": "NUMBER" },
            "title": { "type": "STRING" },
            "content": { "type": "STRING" },
            "visualSuggestion": { "type": "STRING" }
          },
          "required": ["slide", "title", "content", "visualSuggestion"]
        }
      }
    },
    "required": ["slides"]
  })
}

/// Slide numbers arrive as JSON numbers, sometimes with a `.0`.
fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
  D: Deserializer<'de>,
{
  let n = f64::deserialize(deserializer)?;
  if n.fract() != 0.0 || !(1.0..=f64::from(u32::MAX)).contains(&n) {
    return Err(serde::de::Error::custom(format!(
      "slide number must be a positive integer, got {n}"
    )));
  }
  Ok(n as u32)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn plan_json(n: usize) -> String {
    let slides: Vec<_> = (1..=n)
      .map(|i| {
        json!({
          "slide": i,
          "title": format!("Title {i}"),
          "content": "Short body.",
          "visualSuggestion": "A lighthouse at dusk"
        })
      })
      .collect();
    json!({ "slides": slides }).to_string()
  }

  #[test]
  fn parses_five_slides() {
    let slides = parse_plan(&plan_json(5)).unwrap();
    assert_eq!(slides.len(), 5);
    assert_eq!(slides[4].slide, 5);
    assert_eq!(slides[0].visual_suggestion, "A lighthouse at dusk");
  }

  #[test]
  fn accepts_float_slide_numbers() {
    let text = plan_json(5).replace("\"slide\":1,", "\"slide\":1.0,");
    assert_eq!(parse_plan(&text).unwrap()[0].slide, 1);
  }

  #[test]
  fn wrong_count_is_a_hard_failure() {
    assert!(matches!(parse_plan(&plan_json(4)), Err(GenAiError::InvalidPlan(_))));
    assert!(matches!(parse_plan(&plan_json(0)), Err(GenAiError::InvalidPlan(_))));
  }

  #[test]
  fn out_of_order_slides_are_sorted() {
    let mut plan: serde_json::Value = serde_json::from_str(&plan_json(5)).unwrap();
    plan["slides"].as_array_mut().unwrap().reverse();
    let slides = parse_plan(&plan.to_string()).unwrap();
    let numbers: Vec<_> = slides.iter().map(|s| s.slide).collect();
    assert_eq!(numbers, [1, 2, 3, 4, 5]);
    assert_eq!(slides[0].title, "Title 1");
  }

  #[test]
  fn duplicate_or_out_of_range_numbers_are_a_hard_failure() {
    let mut plan: serde_json::Value = serde_json::from_str(&plan_json(5)).unwrap();
    for (slide, n) in plan["slides"].as_array_mut().unwrap().iter_mut().zip([1, 1, 1, 9, 9]) {
      slide["slide"] = json!(n);
    }
    assert!(matches!(parse_plan(&plan.to_string()), Err(GenAiError::InvalidPlan(_))));

    let gap = plan_json(5).replace("\"slide\":5,", "\"slide\":6,");
    assert!(matches!(parse_plan(&gap), Err(GenAiError::InvalidPlan(_))));
  }

  #[test]
  fn missing_field_is_a_hard_failure() {
    let text = plan_json(5).replace("\"visualSuggestion\"", "\"visual\"");
    assert!(matches!(parse_plan(&text), Err(GenAiError::InvalidPlan(_))));
  }

  #[test]
  fn serialises_in_camel_case() {
    let slide = &parse_plan(&plan_json(5)).unwrap()[0];
    let v = serde_json::to_value(slide).unwrap();
    assert!(v.get("visualSuggestion").is_some());
  }
}
