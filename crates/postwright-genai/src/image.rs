//! Generated (or uploaded) images carried as base64 payloads.

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use serde::{Deserialize, Serialize};

use crate::{GenAiError, Result};

/// An image as a MIME type plus base64-encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
  pub mime_type: String,
  /// Standard base64, no line breaks.
  pub data:      String,
}

impl GeneratedImage {
  pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
    Self { mime_type: mime_type.into(), data: B64.encode(bytes) }
  }

  /// Decode the payload.
  pub fn bytes(&self) -> Result<Vec<u8>> {
    B64
      .decode(&self.data)
      .map_err(|e| GenAiError::InvalidImage(e.to_string()))
  }

  /// `data:<mime>;base64,<data>`
  pub fn to_data_url(&self) -> String {
    format!("data:{};base64,{}", self.mime_type, self.data)
  }

  /// Parse a base64 data URL, checking that the payload decodes.
  pub fn from_data_url(url: &str) -> Result<Self> {
    let rest = url
      .strip_prefix("data:")
      .ok_or_else(|| GenAiError::InvalidImage("not a data URL".into()))?;
    let (mime_type, data) = rest
      .split_once(";base64,")
      .ok_or_else(|| GenAiError::InvalidImage("data URL is not base64".into()))?;
    if !mime_type.starts_with("image/") {
      return Err(GenAiError::InvalidImage(format!(
        "unsupported media type {mime_type:?}"
      )));
    }

    let image = Self { mime_type: mime_type.to_owned(), data: data.to_owned() };
    image.bytes()?;
    Ok(image)
  }

  /// A file extension matching the MIME type.
  pub fn extension(&self) -> &'static str {
    match self.mime_type.as_str() {
      "image/jpeg" | "image/jpg" => "jpg",
      "image/webp" => "webp",
      "image/gif" => "gif",
      _ => "png",
    }
  }
}

/// Guess an image MIME type from a file extension.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
  match ext.to_ascii_lowercase().as_str() {
    "jpg" | "jpeg" => Some("image/jpeg"),
    "png" => Some("image/png"),
    "webp" => Some("image/webp"),
    "gif" => Some("image/gif"),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn data_url_roundtrip() {
    let img = GeneratedImage::from_bytes("image/jpeg", b"\xff\xd8\xff");
    let url = img.to_data_url();
    assert!(url.starts_with("data:image/jpeg;base64,"));
    let back = GeneratedImage::from_data_url(&url).unwrap();
    assert_eq!(back.bytes().unwrap(), b"\xff\xd8\xff");
    assert_eq!(back.extension(), "jpg");
  }

  #[test]
  fn rejects_non_image_and_bad_payloads() {
    assert!(GeneratedImage::from_data_url("https://example.com/a.png").is_err());
    assert!(GeneratedImage::from_data_url("data:text/plain;base64,aGk=").is_err());
    assert!(GeneratedImage::from_data_url("data:image/png;base64,@@@").is_err());
  }

  #[test]
  fn mime_from_extension() {
    assert_eq!(mime_for_extension("JPG"), Some("image/jpeg"));
    assert_eq!(mime_for_extension("bmp"), None);
  }
}
