//! Buffer module: The cell grid behind the terminal surface.
//!
//! - [`Cell`]: one character plus style
//! - [`Buffer`]: a grid of cells
//! - [`Canvas`]: shared handle redraw callbacks paint into

#[allow(clippy::module_inception)]
mod buffer;
mod canvas;
mod cell;

pub use buffer::Buffer;
pub use canvas::Canvas;
pub use cell::{Cell, CellFlags, Modifiers, Rgb};
