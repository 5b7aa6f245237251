#![forbid(unsafe_code)]

//! Test double for the rasterization capability.
//!
//! [`CountingRasterizer`] hands out sequential drawable handles and records
//! every call, so tests can assert the resource contract directly: each
//! drawable released exactly once, none leaked, no rasterization beyond the
//! first per record. A double release panics immediately rather than
//! corrupting counts.

use crate::raster::{DrawableId, RasterGlyph, Rasterizer, Rgba};
use crate::record::GlyphMetrics;
use std::collections::HashSet;

/// A rasterizer that fabricates deterministic metrics and tracks handle
/// lifetimes.
#[derive(Debug)]
pub struct CountingRasterizer {
    next_id: u32,
    advance: u32,
    height: u32,
    rasterized: Vec<(String, Rgba)>,
    released: Vec<DrawableId>,
    live: HashSet<DrawableId>,
}

impl CountingRasterizer {
    /// A rasterizer with an 8x16 pixel cell per glyph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            advance: 8,
            height: 16,
            rasterized: Vec::new(),
            released: Vec::new(),
            live: HashSet::new(),
        }
    }

    /// Override the fabricated per-glyph width.
    #[must_use]
    pub fn with_advance(mut self, advance: u32) -> Self {
        self.advance = advance;
        self
    }

    /// Number of `rasterize` calls observed.
    #[must_use]
    pub fn rasterize_calls(&self) -> usize {
        self.rasterized.len()
    }

    /// Number of `release` calls observed.
    #[must_use]
    pub fn release_calls(&self) -> usize {
        self.released.len()
    }

    /// Drawables created and not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.len()
    }

    /// Every `(cluster, color)` pair rasterized, in call order.
    #[must_use]
    pub fn rasterized(&self) -> &[(String, Rgba)] {
        &self.rasterized
    }
}

impl Default for CountingRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for CountingRasterizer {
    fn rasterize(&mut self, cluster: &str, color: Rgba) -> RasterGlyph {
        let drawable = DrawableId::new(self.next_id);
        self.next_id += 1;
        self.rasterized.push((cluster.to_string(), color));
        self.live.insert(drawable);
        RasterGlyph {
            metrics: GlyphMetrics {
                width: self.advance,
                height: self.height,
            },
            drawable,
        }
    }

    fn release(&mut self, drawable: DrawableId) {
        assert!(
            self.live.remove(&drawable),
            "double release or unknown drawable: {drawable:?}"
        );
        self.released.push(drawable);
    }
}
