//! Response decoder module
//!
//! Supports: JSON (entity endpoints), TSV (report endpoint)
//!
//! # Overview
//!
//! The decode module provides parsers for the vendor's response formats.
//! Each decoder extracts records from the response body; the JSON decoder
//! uses a configured record path, the TSV decoder uses the header row.

mod decoders;
mod types;

pub use decoders::{JsonDecoder, TsvDecoder};
pub use types::{DecoderFormat, RecordDecoder};
