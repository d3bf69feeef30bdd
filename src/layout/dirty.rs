//! `DirtyRegion`: Accumulated screen area awaiting repaint.

use super::rect::Rect;

/// The set of rectangles that must be repainted before the next flush.
///
/// Rectangles are kept as a list rather than folded into one bounding box so
/// that two far-apart invalidations do not drag every panel between them into
/// the redraw pass. The list may overlap and is not deduplicated; the filter is
/// coarse on purpose, a false positive only costs an extra redraw.
#[derive(Clone, Debug, Default)]
pub struct DirtyRegion {
    rects: Vec<Rect>,
    /// The entire surface extent is dirty.
    full: bool,
}

impl DirtyRegion {
    /// Create an empty region.
    pub const fn new() -> Self {
        Self {
            rects: Vec::new(),
            full: false,
        }
    }

    /// Add a rectangle. Empty rectangles are ignored.
    pub fn add(&mut self, rect: Rect) {
        if rect.is_empty() || self.full {
            return;
        }
        // Already covered by an existing entry
        if self.rects.iter().any(|r| r.contains_rect(&rect)) {
            return;
        }
        self.rects.retain(|r| !rect.contains_rect(r));
        self.rects.push(rect);
    }

    /// Mark the whole surface as dirty.
    ///
    /// Used when the exact area is unknown, e.g. a blocking panel that has not
    /// been resized yet, or one that just went away.
    pub fn mark_full(&mut self) {
        self.full = true;
        self.rects.clear();
    }

    /// Whether the whole surface is dirty.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.full
    }

    /// Whether nothing is dirty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.full && self.rects.is_empty()
    }

    /// The individual dirty rectangles. Empty when the region is full.
    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Check whether `rect` touches any dirty area.
    pub fn intersects(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        self.full || self.rects.iter().any(|r| r.intersects(rect))
    }

    /// Bounding rectangle of the dirty area, resolving `full` to `extent`.
    pub fn bounds(&self, extent: Rect) -> Option<Rect> {
        if self.full {
            return (!extent.is_empty()).then_some(extent);
        }
        self.rects.iter().copied().reduce(|acc, r| acc.union(&r))
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.rects.clear();
        self.full = false;
    }
}
