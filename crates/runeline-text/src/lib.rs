#![forbid(unsafe_code)]

//! Scalar-indexed text primitives for Runeline.
//!
//! This crate is the foundation of the workspace: text addressed by
//! *scalar-value position* (Unicode code point index) instead of byte
//! offset, packed as variable-length UTF-8.
//!
//! - [`scalar`] - the stateless index translator: lead-byte classification,
//!   scalar counting, index-to-offset conversion, per-scalar chunking
//! - [`RuneString`] - the flat buffer variant: one contiguous UTF-8
//!   sequence, no per-scalar metadata
//!
//! The structured variant with per-scalar render caching lives in
//! `runeline-glyph`, built on the same translator.
//!
//! # Example
//! ```
//! use runeline_text::{RuneString, scalar::scalar_count};
//!
//! let mut line = RuneString::from_text("日本語");
//! line.insert(1, "A");
//! assert_eq!(line.as_str(), Some("日A本語"));
//! assert_eq!(line.scalar_len(), scalar_count("日A本語"));
//! ```

pub mod rune_string;
pub mod scalar;

pub use rune_string::RuneString;
pub use scalar::{
    ScalarChunks, is_scalar_start, prefix, scalar_chunks, scalar_count, scalar_len,
    scalar_to_byte_offset,
};
