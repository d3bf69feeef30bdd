//! Per-panel state stored on the stack.

use crate::backend::Window;
use crate::layout::Rect;
use bitflags::bitflags;

slotmap::new_key_type! {
    /// Stable identifier of a live panel.
    ///
    /// Ids are generational: once a panel is removed its id never resolves
    /// again, even if the slot is reused.
    pub struct PanelId;
}

bitflags! {
    /// Scheduling state of a panel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PanelFlags: u8 {
        /// The panel's rectangle must be repainted before the next flush.
        const INVALIDATED = 0b0000_0001;
        /// The resize callback must run before the next redraw.
        const PENDING_RESIZE = 0b0000_0010;
        /// Panels lower in the stack are frozen while this one is alive.
        const BLOCKS_BELOW = 0b0000_0100;
    }
}

/// Redraw callback. Receives a read-only view of the panel.
pub type RedrawFn = Box<dyn FnMut(&PanelView)>;

/// Resize callback. Must publish the panel's rectangle before returning.
pub type ResizeFn = Box<dyn FnMut(&mut PanelResize)>;

/// Everything the stack knows about one panel.
pub(crate) struct PanelRecord {
    pub(crate) rect: Rect,
    pub(crate) flags: PanelFlags,
    pub(crate) redraw: Option<RedrawFn>,
    pub(crate) resize: Option<ResizeFn>,
}

impl PanelRecord {
    pub(crate) const fn new(flags: PanelFlags) -> Self {
        Self {
            rect: Rect::ZERO,
            flags,
            redraw: None,
            resize: None,
        }
    }

    #[inline]
    pub(crate) const fn is_blocking(&self) -> bool {
        self.flags.contains(PanelFlags::BLOCKS_BELOW)
    }
}

impl std::fmt::Debug for PanelRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelRecord")
            .field("rect", &self.rect)
            .field("flags", &self.flags)
            .field("has_redraw", &self.redraw.is_some())
            .field("has_resize", &self.resize.is_some())
            .finish()
    }
}

/// Read-only view of a panel handed to its redraw callback.
#[derive(Debug, Clone, Copy)]
pub struct PanelView {
    id: PanelId,
    rect: Rect,
}

impl PanelView {
    pub(crate) const fn new(id: PanelId, rect: Rect) -> Self {
        Self { id, rect }
    }

    /// The panel being redrawn.
    pub const fn id(&self) -> PanelId {
        self.id
    }

    /// The area the callback is allowed to paint.
    pub const fn rect(&self) -> Rect {
        self.rect
    }
}

/// Mutable view of a panel handed to its resize callback.
///
/// The callback publishes the new rectangle through [`position`] or
/// [`position_from_window`]. If it publishes nothing the previous rectangle
/// is kept; publishing an empty rectangle means the panel occupies no space.
///
/// [`position`]: PanelResize::position
/// [`position_from_window`]: PanelResize::position_from_window
#[derive(Debug)]
pub struct PanelResize {
    id: PanelId,
    rect: Rect,
    extent: Rect,
}

impl PanelResize {
    pub(crate) const fn new(id: PanelId, rect: Rect, extent: Rect) -> Self {
        Self { id, rect, extent }
    }

    /// The panel being resized.
    pub const fn id(&self) -> PanelId {
        self.id
    }

    /// The rectangle published so far (the previous one until replaced).
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Current extent of the output surface.
    pub const fn extent(&self) -> Rect {
        self.extent
    }

    /// Publish the panel's rectangle.
    pub fn position(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Publish the rectangle of a backend window. A null window yields an
    /// empty rectangle.
    pub fn position_from_window<W: Window + ?Sized>(&mut self, window: &W) {
        self.rect = window.rect().unwrap_or(Rect::ZERO);
    }

    pub(crate) const fn into_rect(self) -> Rect {
        self.rect
    }
}
