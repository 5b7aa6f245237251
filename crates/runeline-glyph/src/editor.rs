#![forbid(unsafe_code)]

//! Caller-owned editor state for a single line of text.
//!
//! [`EditorState`] bundles what a text-input event handler needs: the
//! committed [`GlyphBuffer`], the IME [`Composition`], and a cursor in
//! scalar units, always clamped to `[0, len]`. The caller (the event loop)
//! owns the value and threads it - together with its [`Rasterizer`] -
//! through every operation; nothing here is global.
//!
//! Committed and pre-edit text carry distinct colors, so a scalar that
//! moves from the composition into the committed buffer is rasterized once
//! per color context, never re-tinted in place.
//!
//! # Example
//! ```
//! use runeline_glyph::EditorState;
//!
//! let mut ed = EditorState::new();
//! ed.insert_str("日本語");
//! ed.move_left();
//! ed.insert_str("A");
//! assert_eq!(ed.text().as_deref(), Some("日本A語"));
//! ```

use crate::buffer::GlyphBuffer;
use crate::composition::Composition;
use crate::raster::{Rasterizer, Rgba};
use runeline_text::scalar::scalar_count;

/// Editing state for one line: committed text, pre-edit text, cursor.
#[derive(Debug)]
pub struct EditorState {
    buffer: GlyphBuffer,
    composition: Composition,
    /// Cursor in scalar units; an insertion point in `[0, buffer.len()]`.
    cursor: usize,
    text_color: Rgba,
    preedit_color: Rgba,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// An empty editor with white committed text and gray pre-edit text.
    #[must_use]
    pub fn new() -> Self {
        Self::with_colors(Rgba::WHITE, Rgba::GRAY)
    }

    /// An empty editor with explicit color contexts.
    #[must_use]
    pub fn with_colors(text_color: Rgba, preedit_color: Rgba) -> Self {
        Self {
            buffer: GlyphBuffer::new(),
            composition: Composition::new(),
            cursor: 0,
            text_color,
            preedit_color,
        }
    }

    /// The committed buffer.
    #[must_use]
    pub fn buffer(&self) -> &GlyphBuffer {
        &self.buffer
    }

    /// Mutable committed buffer, for the draw pass.
    pub fn buffer_mut(&mut self) -> &mut GlyphBuffer {
        &mut self.buffer
    }

    /// The IME pre-edit buffer.
    #[must_use]
    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Mutable pre-edit buffer, for the draw pass.
    pub fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }

    /// The committed text, `None` when empty.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.buffer.to_text()
    }

    /// Cursor position in scalar units.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Color context for committed text.
    #[must_use]
    pub fn text_color(&self) -> Rgba {
        self.text_color
    }

    /// Color context for pre-edit text.
    #[must_use]
    pub fn preedit_color(&self) -> Rgba {
        self.preedit_color
    }

    /// Place the cursor, clamped to `[0, len]`.
    pub fn set_cursor(&mut self, scalar_index: usize) {
        self.cursor = scalar_index.min(self.buffer.len());
    }

    /// Insert text at the cursor and advance past it.
    ///
    /// Empty input is a silent no-op, matching the buffer's policy. Insert
    /// never evicts a record, so no rasterizer is involved.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buffer.insert(self.cursor, text);
        self.cursor += scalar_count(text);
    }

    /// Remove the scalar before the cursor. Returns `false` at the line
    /// start.
    pub fn backspace(&mut self, raster: &mut impl Rasterizer) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor, 1, raster);
        true
    }

    /// Remove the scalar after the cursor. Returns `false` at the line end.
    pub fn delete_forward(&mut self, raster: &mut impl Rasterizer) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(self.cursor, 1, raster);
        true
    }

    /// Move the cursor one scalar left, stopping at the line start.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one scalar right, stopping at the line end.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.len());
    }

    /// Move the cursor to the line start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the line end.
    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Replace the IME pre-edit text in full (wholesale, never
    /// incremental).
    pub fn set_composition(&mut self, text: &str, raster: &mut impl Rasterizer) {
        self.composition.set_text(text, raster);
    }

    /// Commit the pre-edit text at the cursor.
    ///
    /// The pre-edit records - rasterized, if at all, in the pre-edit color -
    /// are released with the composition; the committed buffer gains fresh
    /// uncached records that the next draw rasterizes in the committed
    /// color. Returns the number of scalars committed.
    pub fn commit_composition(&mut self, raster: &mut impl Rasterizer) -> usize {
        let Some(text) = self.composition.text() else {
            return 0;
        };
        self.composition.clear(raster);
        let committed = scalar_count(&text);
        self.insert_str(&text);
        tracing::debug!(committed, "composition committed");
        committed
    }

    /// Place the cursor at the scalar closest to pixel coordinate `x`,
    /// rasterizing committed glyphs on demand for missing metrics.
    pub fn cursor_from_x(&mut self, x: i32, raster: &mut impl Rasterizer) {
        self.cursor = self.buffer.index_at_x(x, self.text_color, raster);
    }

    /// Tear down both buffers, releasing every cached drawable.
    pub fn clear(&mut self, raster: &mut impl Rasterizer) {
        self.buffer.clear(raster);
        self.composition.clear(raster);
        self.cursor = 0;
    }
}
