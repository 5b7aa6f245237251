#![forbid(unsafe_code)]

//! Per-scalar glyph records.
//!
//! A [`GlyphRecord`] stores one Unicode scalar value - its UTF-8 encoding
//! packed into fixed 4-byte storage - plus an optional cached rasterization.
//! Records are immutable in place: an edit that would change a record's
//! bytes replaces the record instead, which is what keeps the cached
//! drawable's lifetime simple (it dies with its record, never survives a
//! content change).

use crate::raster::RasterGlyph;
use runeline_text::scalar::{scalar_count, scalar_len};

/// Fixed-capacity storage for one scalar's UTF-8 encoding.
///
/// # Layout
///
/// ```text
/// [lead][cont?][cont?][cont?]   1-4 meaningful bytes, zero padding after
/// ```
///
/// No length field: the encoded length is derived from the lead byte's bit
/// pattern, so the storage is self-describing and the trailing zero bytes
/// are plain sentinel padding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterBytes([u8; 4]);

impl ClusterBytes {
    /// Pack a single scalar. `chunk` must hold exactly one scalar value,
    /// which every chunk produced by `scalar_chunks` does.
    pub(crate) fn from_chunk(chunk: &str) -> Self {
        debug_assert_eq!(scalar_count(chunk), 1, "chunk must be one scalar");
        let mut bytes = [0u8; 4];
        bytes[..chunk.len()].copy_from_slice(chunk.as_bytes());
        Self(bytes)
    }

    /// Pack a `char`.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::from_chunk(c.encode_utf8(&mut buf))
    }

    /// Encoded length in bytes (1-4).
    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        scalar_len(self.0[0])
    }

    /// The scalar's UTF-8 encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0[..self.byte_len()])
            .expect("cluster bytes hold one valid scalar encoding")
    }
}

impl core::fmt::Debug for ClusterBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ClusterBytes({:?})", self.as_str())
    }
}

/// Pixel dimensions of a rasterized cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct GlyphMetrics {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// One scalar value plus its optional cached rasterization.
///
/// Deliberately not `Clone`: cloning would duplicate ownership of the cached
/// drawable and break the release-exactly-once guarantee.
#[derive(Debug)]
pub struct GlyphRecord {
    cluster: ClusterBytes,
    raster: Option<RasterGlyph>,
}

impl GlyphRecord {
    /// A fresh record with no cached rasterization.
    pub(crate) fn new(cluster: ClusterBytes) -> Self {
        Self {
            cluster,
            raster: None,
        }
    }

    /// The scalar's UTF-8 encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.cluster.as_str()
    }

    /// Cached rasterization, if the draw pass has produced one.
    #[must_use]
    pub fn raster(&self) -> Option<RasterGlyph> {
        self.raster
    }

    /// Whether a drawable is currently cached on this record.
    #[must_use]
    pub fn is_rasterized(&self) -> bool {
        self.raster.is_some()
    }

    pub(crate) fn set_raster(&mut self, raster: RasterGlyph) {
        debug_assert!(self.raster.is_none(), "record rasterized twice");
        self.raster = Some(raster);
    }

    /// Give up ownership of the cached rasterization, leaving the record
    /// uncached. The caller becomes responsible for releasing the drawable.
    pub(crate) fn take_raster(&mut self) -> Option<RasterGlyph> {
        self.raster.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::DrawableId;

    #[test]
    fn cluster_round_trips_each_encoded_length() {
        for s in ["a", "é", "日", "🎉"] {
            let cluster = ClusterBytes::from_chunk(s);
            assert_eq!(cluster.as_str(), s);
            assert_eq!(cluster.byte_len(), s.len());
        }
    }

    #[test]
    fn cluster_from_char() {
        assert_eq!(ClusterBytes::from_char('語').as_str(), "語");
        assert_eq!(ClusterBytes::from_char('x').as_str(), "x");
    }

    #[test]
    fn nul_scalar_is_storable() {
        // The padding sentinel is a zero byte, but length comes from the
        // lead byte, so U+0000 itself still round-trips.
        let cluster = ClusterBytes::from_char('\0');
        assert_eq!(cluster.byte_len(), 1);
        assert_eq!(cluster.as_str(), "\0");
    }

    #[test]
    fn new_record_has_no_raster() {
        let rec = GlyphRecord::new(ClusterBytes::from_char('a'));
        assert!(!rec.is_rasterized());
        assert_eq!(rec.raster(), None);
    }

    #[test]
    fn take_raster_transfers_ownership() {
        let mut rec = GlyphRecord::new(ClusterBytes::from_char('a'));
        rec.set_raster(RasterGlyph {
            metrics: GlyphMetrics {
                width: 8,
                height: 16,
            },
            drawable: DrawableId::new(7),
        });
        assert!(rec.is_rasterized());

        let taken = rec.take_raster().expect("raster was set");
        assert_eq!(taken.drawable, DrawableId::new(7));
        assert!(!rec.is_rasterized());
        assert_eq!(rec.take_raster(), None);
    }
}
