#![forbid(unsafe_code)]

//! Flat scalar-indexed text storage.
//!
//! [`RuneString`] is the byte-only buffer variant: a contiguous UTF-8 byte
//! sequence with no per-scalar metadata, addressed entirely by scalar index.
//! It answers the same insert/remove/append questions as the structured
//! glyph buffer, minus the render cache.
//!
//! An empty buffer is a distinguishable "no content" state, not an empty
//! allocation: [`RuneString::as_str`] returns `None` once the last scalar is
//! removed, and the backing storage is dropped at that point.
//!
//! # Example
//! ```
//! use runeline_text::RuneString;
//!
//! let mut s = RuneString::from_text("日本語");
//! s.insert(1, "A");
//! assert_eq!(s.as_str(), Some("日A本語"));
//!
//! s.remove(1, 1);
//! assert_eq!(s.as_str(), Some("日本語"));
//!
//! s.remove(0, 3);
//! assert_eq!(s.as_str(), None);
//! ```

use crate::scalar::{prefix, scalar_count, scalar_to_byte_offset};

/// An owned UTF-8 byte sequence addressed by scalar index.
///
/// All mutation is scalar-aligned: no operation can split a multi-byte
/// encoding, so the content is well-formed UTF-8 after every edit.
///
/// Degenerate inputs follow a no-op/clamp policy rather than an error type:
/// empty input to [`append`](Self::append)/[`insert`](Self::insert) is
/// ignored, an out-of-range insert index degrades to append, and an
/// out-of-range remove index leaves the buffer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuneString {
    text: Option<String>,
}

impl RuneString {
    /// Create an empty buffer (the "no content" state).
    #[must_use]
    pub const fn new() -> Self {
        Self { text: None }
    }

    /// Create a buffer holding `text`. Empty input yields the "no content"
    /// state.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            Self::new()
        } else {
            Self {
                text: Some(text.to_string()),
            }
        }
    }

    /// The content, or `None` when the buffer holds nothing.
    ///
    /// Callers that print distinguish "nothing to print" from "empty string
    /// to print"; this is why the empty state is not `Some("")`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Number of scalar values held.
    #[must_use]
    pub fn scalar_len(&self) -> usize {
        self.text.as_deref().map_or(0, scalar_count)
    }

    /// Whether the buffer holds no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }

    /// The first `scalar_index` scalars, or `None` for an empty buffer.
    #[must_use]
    pub fn prefix(&self, scalar_index: usize) -> Option<&str> {
        self.text.as_deref().map(|s| prefix(s, scalar_index))
    }

    /// Append `text` at the end. Empty input is a silent no-op.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        tracing::trace!(scalars = scalar_count(text), "rune_string append");
        match &mut self.text {
            Some(dest) => dest.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Prepend `text` before the first scalar. Empty input is a silent
    /// no-op.
    pub fn prepend(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        tracing::trace!(scalars = scalar_count(text), "rune_string prepend");
        match &mut self.text {
            Some(dest) => dest.insert_str(0, text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Insert `text` so that its first scalar lands at `scalar_index`.
    ///
    /// An index past the last scalar degrades to [`append`](Self::append);
    /// index `0` is a prepend. Empty input is a silent no-op.
    pub fn insert(&mut self, scalar_index: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(dest) = &mut self.text else {
            self.text = Some(text.to_string());
            return;
        };

        tracing::trace!(
            scalar_index,
            scalars = scalar_count(text),
            "rune_string insert"
        );
        let byte_offset = scalar_to_byte_offset(dest, scalar_index);
        dest.insert_str(byte_offset, text);
    }

    /// Remove `count` scalars starting at `scalar_index`.
    ///
    /// No-op when `count` is zero or `scalar_index` is past the last scalar
    /// (out-of-range remove refuses; it does not clamp the index). A count
    /// that overshoots the end removes through the last scalar. Removing the
    /// final scalar returns the buffer to the "no content" state.
    pub fn remove(&mut self, scalar_index: usize, count: usize) {
        if count < 1 {
            return;
        }
        let Some(dest) = &mut self.text else {
            return;
        };
        if scalar_index >= scalar_count(dest) {
            return;
        }

        tracing::trace!(scalar_index, count, "rune_string remove");
        let start = scalar_to_byte_offset(dest, scalar_index);
        let end = scalar_to_byte_offset(dest, scalar_index.saturating_add(count));
        dest.drain(start..end);

        // A zero-length string is useless; fold it back into "no content".
        if dest.is_empty() {
            self.text = None;
        }
    }
}
