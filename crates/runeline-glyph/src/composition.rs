#![forbid(unsafe_code)]

//! Input-method pre-edit buffer.
//!
//! While an IME session is active the uncommitted pre-edit text lives in a
//! [`Composition`]: a glyph buffer that is replaced wholesale on every
//! composition update, never incrementally edited. Each replacement releases
//! every drawable the previous pre-edit had rasterized and rebuilds the
//! records from the new text.

use crate::buffer::GlyphBuffer;
use crate::raster::Rasterizer;

/// Pre-edit text, replaced in full on every IME update.
#[derive(Debug, Default)]
pub struct Composition {
    buffer: GlyphBuffer,
}

impl Composition {
    /// An empty composition (no IME session in flight).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: GlyphBuffer::new(),
        }
    }

    /// Whether no pre-edit text is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of pre-edit scalars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// The pre-edit text, `None` when empty.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.buffer.to_text()
    }

    /// The underlying buffer, for the draw pass.
    #[must_use]
    pub fn buffer(&self) -> &GlyphBuffer {
        &self.buffer
    }

    /// Mutable access for the draw pass (lazy rasterization needs it).
    pub fn buffer_mut(&mut self) -> &mut GlyphBuffer {
        &mut self.buffer
    }

    /// Replace the pre-edit text in full.
    ///
    /// Releases every drawable the old records held, discards them, and
    /// rebuilds from `text` (an empty `text` just leaves the composition
    /// empty). The new records carry no cached rasterizations.
    pub fn set_text(&mut self, text: &str, raster: &mut impl Rasterizer) {
        tracing::debug!(
            old = self.buffer.len(),
            new = runeline_text::scalar::scalar_count(text),
            "composition replaced"
        );
        self.buffer.clear(raster);
        self.buffer.append(text);
    }

    /// Drop the pre-edit text entirely, releasing its drawables.
    pub fn clear(&mut self, raster: &mut impl Rasterizer) {
        self.buffer.clear(raster);
    }
}
