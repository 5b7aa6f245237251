#![forbid(unsafe_code)]

//! The structured scalar buffer with per-record render caching.
//!
//! [`GlyphBuffer`] is an ordered sequence of [`GlyphRecord`]s, one per
//! Unicode scalar value. Mutation is addressed by scalar index; the render
//! cache is filled lazily on the draw path and torn down eagerly on every
//! path that discards a record, so each drawable is released exactly once.
//!
//! # Example
//! ```
//! use runeline_glyph::GlyphBuffer;
//!
//! let mut buf = GlyphBuffer::new();
//! buf.append("日本語");
//! buf.insert(1, "A");
//! assert_eq!(buf.len(), 4);
//! assert_eq!(buf.to_text().as_deref(), Some("日A本語"));
//! ```

use crate::raster::{RasterGlyph, Rasterizer, Rgba};
use crate::record::{ClusterBytes, GlyphMetrics, GlyphRecord};
use runeline_text::scalar::scalar_chunks;
use smallvec::SmallVec;

/// Ordered, scalar-indexed sequence of glyph records.
///
/// Invariants held across every operation:
///
/// - the concatenation of all records' bytes is well-formed UTF-8 (no
///   operation can split a multi-byte encoding);
/// - [`len`](Self::len) equals the scalar count of
///   [`to_text`](Self::to_text);
/// - a cached drawable is owned by exactly one record and is released
///   before that record is discarded.
///
/// Degenerate inputs are no-ops, not errors: empty text to
/// [`append`](Self::append)/[`insert`](Self::insert) is ignored, an
/// out-of-range insert index degrades to append, and an out-of-range remove
/// index refuses. The asymmetry (insert clamps, remove refuses) is
/// deliberate and tested in both directions.
#[derive(Debug, Default)]
pub struct GlyphBuffer {
    records: Vec<GlyphRecord>,
}

impl GlyphBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a buffer holding `text`, with no cached rasterizations.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.append(text);
        buf
    }

    /// Number of scalar values held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the buffer holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `index`, if in range.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&GlyphRecord> {
        self.records.get(index)
    }

    /// All records in text order.
    #[must_use]
    pub fn records(&self) -> &[GlyphRecord] {
        &self.records
    }

    /// Cached pixel metrics for the record at `index`.
    ///
    /// `None` when the index is out of range or the record has not been
    /// rasterized since it was created.
    #[must_use]
    pub fn metrics(&self, index: usize) -> Option<GlyphMetrics> {
        self.records.get(index).and_then(|r| r.raster()).map(|r| r.metrics)
    }

    /// Serialize to a UTF-8 string, `None` for an empty buffer.
    ///
    /// Callers that log distinguish "nothing to print" from "empty string
    /// to print", hence `Option` rather than an empty allocation.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        if self.records.is_empty() {
            return None;
        }
        let mut out = String::with_capacity(self.records.iter().map(|r| r.as_str().len()).sum());
        for record in &self.records {
            out.push_str(record.as_str());
        }
        Some(out)
    }

    /// Append `text` at the end, one record per scalar, in input order.
    ///
    /// Empty input is a silent no-op. New records carry no cached
    /// rasterization; the draw pass fills them in lazily.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let before = self.records.len();
        for chunk in scalar_chunks(text) {
            self.records.push(GlyphRecord::new(ClusterBytes::from_chunk(chunk)));
        }
        tracing::debug!(scalars = self.records.len() - before, "glyph append");
    }

    /// Insert `text` so that its first scalar lands at `index`.
    ///
    /// Chunks land at consecutive positions starting at `index`, preserving
    /// input order. An index past the end degrades to
    /// [`append`](Self::append). Empty input is a silent no-op.
    pub fn insert(&mut self, index: usize, text: &str) {
        if index > self.records.len() {
            self.append(text);
            return;
        }
        if text.is_empty() {
            return;
        }

        let staged: SmallVec<[GlyphRecord; 8]> = scalar_chunks(text)
            .map(|chunk| GlyphRecord::new(ClusterBytes::from_chunk(chunk)))
            .collect();
        tracing::debug!(index, scalars = staged.len(), "glyph insert");
        self.records.splice(index..index, staged);
    }

    /// Remove `count` records starting at `index`, releasing each removed
    /// record's drawable through `raster` before the record is dropped.
    ///
    /// No-op when `count` is zero or `index` is past the last valid record
    /// (`index == len` refuses; `index == len - 1` removes the last
    /// record). A count that overshoots the end is clamped to the tail.
    pub fn remove(&mut self, index: usize, count: usize, raster: &mut impl Rasterizer) {
        if count < 1 {
            return;
        }
        if index >= self.records.len() {
            return;
        }

        let end = index.saturating_add(count).min(self.records.len());
        tracing::debug!(index, removed = end - index, "glyph remove");
        for mut record in self.records.drain(index..end) {
            if let Some(cached) = record.take_raster() {
                raster.release(cached.drawable);
            }
        }
    }

    /// Bulk teardown: release every cached drawable, then drop all records.
    ///
    /// This is the explicit free operation; a buffer that is simply dropped
    /// while records still hold drawables cannot reach the collaborator and
    /// only logs the leak.
    pub fn clear(&mut self, raster: &mut impl Rasterizer) {
        tracing::debug!(scalars = self.records.len(), "glyph clear");
        for mut record in self.records.drain(..) {
            if let Some(cached) = record.take_raster() {
                raster.release(cached.drawable);
            }
        }
    }

    /// Cached rasterization for the record at `index`, rasterizing and
    /// caching on a miss.
    ///
    /// This is the lazy draw-path read: a record is rasterized at most once
    /// between the edits that touch it. Returns `None` only for an
    /// out-of-range index.
    pub fn raster_for(
        &mut self,
        index: usize,
        color: Rgba,
        raster: &mut impl Rasterizer,
    ) -> Option<RasterGlyph> {
        let record = self.records.get_mut(index)?;
        if let Some(cached) = record.raster() {
            return Some(cached);
        }

        let rendered = raster.rasterize(record.as_str(), color);
        tracing::trace!(index, cluster = record.as_str(), "rasterized glyph");
        record.set_raster(rendered);
        Some(rendered)
    }

    /// Scalar index closest to pixel coordinate `x`.
    ///
    /// Accumulates each record's half-width forward until the running edge
    /// passes `x`; records without cached metrics are rasterized on demand.
    /// Coordinates left of the first record map to `0`, coordinates past the
    /// last record map to [`len`](Self::len) (the append point).
    pub fn index_at_x(&mut self, x: i32, color: Rgba, raster: &mut impl Rasterizer) -> usize {
        let mut edge = 0i32;
        for index in 0..self.records.len() {
            let Some(rendered) = self.raster_for(index, color, raster) else {
                break;
            };
            let width = rendered.metrics.width as i32;
            // Clicks in the left half of a glyph select its index; the
            // right half selects the next one.
            if x < edge + width / 2 {
                return index;
            }
            edge += width;
        }
        self.records.len()
    }

    /// Count of records currently holding a cached drawable.
    #[must_use]
    pub fn rasterized_len(&self) -> usize {
        self.records.iter().filter(|r| r.is_rasterized()).count()
    }
}

impl Drop for GlyphBuffer {
    fn drop(&mut self) {
        let live = self.rasterized_len();
        if live > 0 {
            tracing::warn!(live, "glyph buffer dropped with unreleased drawables");
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::testing::CountingRasterizer;
    use proptest::prelude::*;
    use runeline_text::scalar::scalar_count;

    proptest! {
        #[test]
        fn append_is_concatenation(a in "\\PC*", b in "\\PC*") {
            let mut buf = GlyphBuffer::from_text(&a);
            buf.append(&b);
            let expected = format!("{a}{b}");
            prop_assert_eq!(
                buf.to_text().unwrap_or_default(),
                expected
            );
        }

        #[test]
        fn len_equals_scalar_count_after_edits(
            a in "\\PC{0,12}",
            b in "\\PC{0,8}",
            i in 0usize..16,
            r in 0usize..16,
            c in 0usize..8,
        ) {
            let mut raster = CountingRasterizer::new();
            let mut buf = GlyphBuffer::from_text(&a);
            buf.insert(i, &b);
            buf.remove(r, c, &mut raster);
            prop_assert_eq!(
                buf.len(),
                buf.to_text().as_deref().map_or(0, scalar_count)
            );
        }

        #[test]
        fn insert_then_remove_round_trips(
            a in "\\PC{0,12}",
            b in "\\PC{1,8}",
            i in 0usize..16,
        ) {
            let mut raster = CountingRasterizer::new();
            let mut buf = GlyphBuffer::from_text(&a);
            let before = buf.to_text();
            let landed = i.min(buf.len());

            buf.insert(i, &b);
            buf.remove(landed, scalar_count(&b), &mut raster);
            prop_assert_eq!(buf.to_text(), before);
        }

        #[test]
        fn every_release_is_exactly_once(
            a in "\\PC{1,12}",
            rasterize_upto in 0usize..12,
            r in 0usize..12,
            c in 0usize..12,
        ) {
            let mut raster = CountingRasterizer::new();
            let mut buf = GlyphBuffer::from_text(&a);

            let upto = rasterize_upto.min(buf.len());
            for i in 0..upto {
                buf.raster_for(i, Rgba::WHITE, &mut raster);
            }

            buf.remove(r, c, &mut raster);
            buf.clear(&mut raster);

            // Everything rasterized was released exactly once (the counting
            // rasterizer panics on double release), nothing is left live.
            prop_assert_eq!(raster.release_calls(), raster.rasterize_calls());
            prop_assert_eq!(raster.live(), 0);
        }
    }
}
