//! Panel module: Owner-side handles and the per-panel record.
//!
//! - [`Panel`]: RAII handle; construction pushes, drop removes
//! - [`PanelView`] / [`PanelResize`]: what the redraw and resize callbacks see
//! - [`BackgroundPane`]: blank blocking panel covering the whole surface

mod background;
mod handle;
mod record;

pub use background::BackgroundPane;
pub use handle::Panel;
pub use record::{PanelFlags, PanelId, PanelResize, PanelView, RedrawFn, ResizeFn};

pub(crate) use record::PanelRecord;
