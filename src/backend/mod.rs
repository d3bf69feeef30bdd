//! Backend module: The narrow interfaces to the rendering backend.
//!
//! The stack only needs two things from a backend:
//! - a [`Surface`] that knows its extent and can push a rectangle to the
//!   physical display
//! - [`Window`] descriptors that panels read their rectangle from
//!
//! [`TerminalSurface`] drives a real terminal through crossterm;
//! [`HeadlessSurface`] records calls for tests and benchmarks.

mod headless;
mod terminal;

pub use headless::HeadlessSurface;
pub use terminal::{TerminalSession, TerminalSurface};

use crate::layout::Rect;
use std::io;

/// The output surface all panels share.
pub trait Surface {
    /// Current size of the surface, anchored at the origin.
    fn extent(&self) -> Rect;

    /// Blank out `rect` before panels repaint it. Called for the dirty area
    /// at the start of a redraw pass.
    fn erase(&mut self, _rect: Rect) {}

    /// Push `rect` to the physical display. Called at most once per pass.
    fn flush(&mut self, rect: Rect) -> io::Result<()>;

    /// Re-read the extent after the display changed size.
    fn refresh_extent(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn extent(&self) -> Rect {
        (**self).extent()
    }

    fn erase(&mut self, rect: Rect) {
        (**self).erase(rect);
    }

    fn flush(&mut self, rect: Rect) -> io::Result<()> {
        (**self).flush(rect)
    }

    fn refresh_extent(&mut self) -> io::Result<()> {
        (**self).refresh_extent()
    }
}

/// An opaque backend window with a queryable position and size.
///
/// `None` stands for a null window.
pub trait Window {
    /// The window's rectangle in grid cells.
    fn rect(&self) -> Option<Rect>;
}

impl Window for Rect {
    fn rect(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl<W: Window> Window for Option<W> {
    fn rect(&self) -> Option<Rect> {
        self.as_ref().and_then(Window::rect)
    }
}

impl<W: Window + ?Sized> Window for &W {
    fn rect(&self) -> Option<Rect> {
        (**self).rect()
    }
}
