//! Buffer: A grid of cells backing the terminal surface.
//!
//! Cells are stored contiguously in row-major order.

use super::cell::{Cell, Rgb};
use crate::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A grid of cells. Access is row-major: `index = y * width + x`.
///
/// Writes outside the grid are silently clipped.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// Create a buffer of empty cells. Zero dimensions are allowed.
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y). Returns `false` if out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// The cells of row `y` between columns `x` and `x + width`, clipped.
    pub fn row(&self, y: u16, x: u16, width: u16) -> &[Cell] {
        if y >= self.height || x >= self.width {
            return &[];
        }
        let start = (y as usize) * (self.width as usize) + (x as usize);
        let len = width.min(self.width - x) as usize;
        &self.cells[start..start + len]
    }

    /// Fill a rectangle with a cell, clipped to the buffer.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        let clipped = rect.intersection(&self.area());
        for y in clipped.y..clipped.bottom() {
            let start = (y as usize) * (self.width as usize) + (clipped.x as usize);
            self.cells[start..start + clipped.width as usize].fill(cell);
        }
    }

    /// Reset a rectangle to empty cells.
    pub fn clear_rect(&mut self, rect: Rect) {
        self.fill_rect(rect, Cell::EMPTY);
    }

    /// Draw text starting at (x, y), stopping at column `limit` (exclusive).
    ///
    /// Text is split into graphemes; wide graphemes take two columns and are
    /// not started if only one column is left. Returns the columns used.
    pub fn draw_text(&mut self, x: u16, y: u16, limit: u16, text: &str, fg: Rgb, bg: Rgb) -> u16 {
        let limit = limit.min(self.width);
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let Some(symbol) = grapheme.chars().next() else {
                continue;
            };
            let width = u16::try_from(grapheme.width()).unwrap_or(1);
            if width == 0 {
                continue;
            }
            if col.saturating_add(width) > limit {
                break;
            }
            self.set(col, y, Cell::new(symbol).with_fg(fg).with_bg(bg));
            if width == 2 {
                self.set(col + 1, y, Cell::wide_continuation(bg));
            }
            col += width;
        }
        col.saturating_sub(x)
    }

    /// Resize the buffer, preserving the overlapping top-left content.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut resized = Self::new(new_width, new_height);
        let copy_width = self.width.min(new_width) as usize;
        for y in 0..self.height.min(new_height) as usize {
            let old_start = y * (self.width as usize);
            let new_start = y * (new_width as usize);
            resized.cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }
        *self = resized;
    }

    /// Row `y` as plain text, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y, 0, self.width)
            .iter()
            .filter(|c| !c.is_wide_continuation())
            .map(Cell::symbol)
            .collect()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_zero_size() {
        let buffer = Buffer::new(0, 0);
        assert!(buffer.get(0, 0).is_none());
        assert!(buffer.row(0, 0, 10).is_empty());
    }

    #[test]
    fn test_buffer_fill_rect_clips() {
        let mut buffer = Buffer::new(10, 4);
        buffer.fill_rect(Rect::new(8, 2, 5, 5), Cell::new('#'));
        assert_eq!(buffer.row_text(1), "          ");
        assert_eq!(buffer.row_text(2), "        ##");
        assert_eq!(buffer.row_text(3), "        ##");
    }

    #[test]
    fn test_buffer_draw_text_limit() {
        let mut buffer = Buffer::new(10, 1);
        let used = buffer.draw_text(2, 0, 6, "hello", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(used, 4);
        assert_eq!(buffer.row_text(0), "  hell    ");
    }

    #[test]
    fn test_buffer_draw_wide_text() {
        let mut buffer = Buffer::new(6, 1);
        let used = buffer.draw_text(0, 0, 6, "日本語", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(used, 6);
        assert!(buffer.get(1, 0).unwrap().is_wide_continuation());
        assert_eq!(buffer.row_text(0), "日本語");

        // A wide grapheme is not split at the limit
        let mut narrow = Buffer::new(3, 1);
        assert_eq!(narrow.draw_text(0, 0, 3, "日本", Rgb::WHITE, Rgb::BLACK), 2);
    }

    #[test]
    fn test_buffer_resize_preserves() {
        let mut buffer = Buffer::new(10, 4);
        buffer.set(3, 2, Cell::new('X'));
        buffer.resize(20, 6);
        assert_eq!(buffer.get(3, 2).unwrap().symbol(), 'X');
        buffer.resize(2, 2);
        assert!(buffer.get(3, 2).is_none());
        assert_eq!(buffer.width(), 2);
    }
}
