//! On-disk layout of the library file.
//!
//! Current files are an envelope `{"version": 1, "records": [...]}`. Files
//! from before versioning are a bare array of records and are still read.

use postwright_core::record::ContentRecord;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Newest format this crate reads and the one it always writes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
  Versioned {
    version: u32,
    records: Vec<ContentRecord>,
  },
  Legacy(Vec<ContentRecord>),
}

#[derive(Serialize)]
struct Envelope<'a> {
  version: u32,
  records: &'a [ContentRecord],
}

pub fn decode(bytes: &[u8]) -> Result<Vec<ContentRecord>> {
  match serde_json::from_slice(bytes)? {
    Document::Legacy(records) => Ok(records),
    Document::Versioned { version, records } if version <= FORMAT_VERSION => {
      Ok(records)
    }
    Document::Versioned { version, .. } => Err(Error::UnsupportedVersion {
      found:     version,
      supported: FORMAT_VERSION,
    }),
  }
}

pub fn encode(records: &[ContentRecord]) -> Result<Vec<u8>> {
  Ok(serde_json::to_vec(&Envelope { version: FORMAT_VERSION, records })?)
}
