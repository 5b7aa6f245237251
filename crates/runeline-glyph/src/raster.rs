#![forbid(unsafe_code)]

//! The rasterization capability contract.
//!
//! The glyph buffer never touches a font or a GPU itself. Everything it
//! needs from the rendering collaborator is the [`Rasterizer`] trait: turn
//! one UTF-8 scalar cluster plus a color into pixel metrics and an opaque
//! [`DrawableId`], and later release that drawable exactly once.
//!
//! Ownership discipline: a drawable returned by
//! [`rasterize`](Rasterizer::rasterize) belongs to the glyph record it is
//! stored on. The buffer calls [`release`](Rasterizer::release) exactly once
//! per drawable - on record removal, on bulk teardown, or on composition
//! replacement - and never twice.

use crate::record::GlyphMetrics;

/// Opaque handle to an externally rasterized glyph.
///
/// Created by the rendering collaborator, owned by exactly one glyph record,
/// and meaningless to this crate beyond identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct DrawableId(u32);

impl DrawableId {
    /// Wrap a raw handle value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw handle value, for the collaborator's own bookkeeping.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl core::fmt::Debug for DrawableId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "DrawableId({})", self.0)
    }
}

/// A compact RGBA color, `0xRRGGBBAA` (straight alpha).
///
/// Passed through to the rasterizer untouched; the buffer never interprets
/// channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Mid gray, the conventional pre-edit color.
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

/// The result of rasterizing one scalar cluster: pixel metrics plus the
/// drawable handle.
///
/// Metrics and drawable are created together and invalidated together, so a
/// record caches them as a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterGlyph {
    /// Pixel dimensions of the rendered cluster.
    pub metrics: GlyphMetrics,
    /// Handle to the rendered representation, owned by the record.
    pub drawable: DrawableId,
}

/// Capability provided by the rendering collaborator.
///
/// The buffer calls `rasterize` at most once per record between edits (lazy,
/// on the draw path) and `release` exactly once per drawable before the
/// owning record is discarded.
pub trait Rasterizer {
    /// Render a single scalar cluster in the given color.
    fn rasterize(&mut self, cluster: &str, color: Rgba) -> RasterGlyph;

    /// Dispose of a drawable this rasterizer previously returned.
    fn release(&mut self, drawable: DrawableId);
}
