//! Layout module: Grid geometry and dirty-area bookkeeping.
//!
//! Everything here is plain data. Panels publish a [`Rect`] from their resize
//! callback; the stack folds vacated and repainted rectangles into a
//! [`DirtyRegion`] until the next flush.

mod dirty;
mod rect;

pub use dirty::DirtyRegion;
pub use rect::Rect;
