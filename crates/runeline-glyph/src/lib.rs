#![forbid(unsafe_code)]

//! Scalar-indexed glyph buffer with a lazy render cache.
//!
//! This crate is the structured buffer variant for Runeline: one
//! [`GlyphRecord`] per Unicode scalar value, each carrying the scalar's
//! UTF-8 bytes in fixed 4-byte storage plus an optional cached
//! rasterization (pixel metrics and an externally owned drawable handle).
//!
//! - [`GlyphBuffer`] - append/insert/remove/serialize by scalar index, with
//!   eager drawable release on every eviction path
//! - [`Rasterizer`] - the capability contract with the (external) renderer
//! - [`Composition`] - IME pre-edit text, replaced wholesale per update
//! - [`EditorState`] - caller-owned cursor + buffers, no global state
//!
//! The flat variant without per-scalar metadata lives in `runeline-text`.
//!
//! # Resource discipline
//!
//! A drawable handle crosses the API boundary exactly twice: out of
//! [`Rasterizer::rasterize`] into the record that owns it, and back into
//! [`Rasterizer::release`] when that record is evicted (removal, teardown,
//! or composition replacement). Records are never mutated in place and
//! never cloned, so neither a leak nor a double release is representable on
//! the normal paths; a buffer dropped without teardown logs the leak.
//!
//! # Example
//! ```
//! use runeline_glyph::{EditorState, GlyphBuffer};
//!
//! let mut buf = GlyphBuffer::new();
//! buf.append("日本語");
//! buf.insert(1, "A");
//! assert_eq!(buf.to_text().as_deref(), Some("日A本語"));
//!
//! let mut ed = EditorState::new();
//! ed.insert_str("hello");
//! assert_eq!(ed.cursor(), 5);
//! ```

pub mod buffer;
pub mod composition;
pub mod editor;
pub mod raster;
pub mod record;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use buffer::GlyphBuffer;
pub use composition::Composition;
pub use editor::EditorState;
pub use raster::{DrawableId, RasterGlyph, Rasterizer, Rgba};
pub use record::{ClusterBytes, GlyphMetrics, GlyphRecord};
