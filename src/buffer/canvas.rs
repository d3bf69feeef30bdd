//! Canvas: Shared drawing target for redraw callbacks.

use super::buffer::Buffer;
use super::cell::{Cell, Modifiers, Rgb};
use crate::layout::Rect;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// A cloneable handle to a [`Buffer`].
///
/// The terminal surface keeps one clone and flushes from it; redraw callbacks
/// capture another and paint into it. Every method borrows the buffer only for
/// the duration of the call.
#[derive(Clone, Debug)]
pub struct Canvas {
    buffer: Rc<RefCell<Buffer>>,
}

impl Canvas {
    /// Create a canvas of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(Buffer::new(width, height))),
        }
    }

    /// The whole canvas as a rectangle.
    pub fn area(&self) -> Rect {
        self.buffer.borrow().area()
    }

    /// Read access to the underlying buffer.
    pub fn buffer(&self) -> Ref<'_, Buffer> {
        self.buffer.borrow()
    }

    /// Set a single cell.
    pub fn set(&self, x: u16, y: u16, cell: Cell) -> bool {
        self.buffer.borrow_mut().set(x, y, cell)
    }

    /// Fill a rectangle with a cell.
    pub fn fill_rect(&self, rect: Rect, cell: Cell) {
        self.buffer.borrow_mut().fill_rect(rect, cell);
    }

    /// Reset a rectangle to empty cells.
    pub fn clear_rect(&self, rect: Rect) {
        self.buffer.borrow_mut().clear_rect(rect);
    }

    /// Draw one line of text inside `rect`, on row `line` relative to its top.
    ///
    /// The text is clipped to the rectangle. Returns the columns used.
    pub fn draw_text(&self, rect: Rect, line: u16, text: &str, fg: Rgb, bg: Rgb) -> u16 {
        if line >= rect.height {
            return 0;
        }
        self.buffer
            .borrow_mut()
            .draw_text(rect.x, rect.y.saturating_add(line), rect.right(), text, fg, bg)
    }

    /// Fill `rect` with `bg` and outline it with a single-line box.
    pub fn draw_box(&self, rect: Rect, fg: Rgb, bg: Rgb) {
        if rect.is_empty() {
            return;
        }
        let mut buffer = self.buffer.borrow_mut();
        buffer.fill_rect(rect, Cell::EMPTY.with_bg(bg));

        let cell = |symbol| Cell::new(symbol).with_fg(fg).with_bg(bg);
        let (right, bottom) = (rect.right().saturating_sub(1), rect.bottom().saturating_sub(1));
        for x in rect.x..=right {
            buffer.set(x, rect.y, cell('─'));
            buffer.set(x, bottom, cell('─'));
        }
        for y in rect.y..=bottom {
            buffer.set(rect.x, y, cell('│'));
            buffer.set(right, y, cell('│'));
        }
        buffer.set(rect.x, rect.y, cell('┌'));
        buffer.set(right, rect.y, cell('┐'));
        buffer.set(rect.x, bottom, cell('└'));
        buffer.set(right, bottom, cell('┘'));
    }

    /// Draw a full-width title bar on the first row of `rect`.
    pub fn draw_title(&self, rect: Rect, title: &str, fg: Rgb, bg: Rgb) {
        if rect.is_empty() {
            return;
        }
        let bar = Rect::new(rect.x, rect.y, rect.width, 1);
        self.fill_rect(
            bar,
            Cell::EMPTY.with_bg(bg).with_modifiers(Modifiers::BOLD),
        );
        self.draw_text(bar, 0, title, fg, bg);
    }

    /// Resize the canvas, preserving overlapping content.
    pub fn resize(&self, width: u16, height: u16) {
        self.buffer.borrow_mut().resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_clones_share_buffer() {
        let canvas = Canvas::new(10, 3);
        let other = canvas.clone();
        other.set(1, 1, Cell::new('z'));
        assert_eq!(canvas.buffer().get(1, 1).unwrap().symbol(), 'z');
    }

    #[test]
    fn test_canvas_draw_text_clips_to_rect() {
        let canvas = Canvas::new(20, 3);
        let rect = Rect::new(2, 1, 5, 2);
        assert_eq!(canvas.draw_text(rect, 0, "overflowing", Rgb::WHITE, Rgb::BLACK), 5);
        assert_eq!(canvas.draw_text(rect, 2, "outside", Rgb::WHITE, Rgb::BLACK), 0);
        assert_eq!(canvas.buffer().row_text(1).trim_end(), "  overf");
    }

    #[test]
    fn test_canvas_draw_box() {
        let canvas = Canvas::new(6, 4);
        canvas.draw_box(Rect::new(1, 0, 4, 3), Rgb::WHITE, Rgb::BLACK);
        assert_eq!(canvas.buffer().row_text(0), " ┌──┐ ");
        assert_eq!(canvas.buffer().row_text(1), " │  │ ");
        assert_eq!(canvas.buffer().row_text(2), " └──┘ ");
        assert_eq!(canvas.buffer().row_text(3), "      ");
    }

    #[test]
    fn test_canvas_tolerates_rects_at_grid_limit() {
        let canvas = Canvas::new(4, 4);
        let edge = Rect::new(u16::MAX - 1, u16::MAX - 1, 10, 10);
        canvas.draw_box(edge, Rgb::WHITE, Rgb::BLACK);
        assert_eq!(canvas.draw_text(edge, 5, "far", Rgb::WHITE, Rgb::BLACK), 0);
        assert_eq!(canvas.buffer().row_text(0), "    ");
    }
}
