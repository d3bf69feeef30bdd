//! `Panel`: The owner-held handle that keeps a panel on the stack.

use super::{PanelFlags, PanelId, PanelResize, PanelView};
use crate::backend::Window;
use crate::layout::Rect;
use crate::manager;
use std::marker::PhantomData;
use std::rc::Rc;

/// A panel on the thread's stack, alive for as long as this value is.
///
/// Construction pushes the panel on top of the stack; dropping it removes the
/// panel from wherever it sits and dirties the area it occupied.
///
/// # Callbacks
///
/// The resize callback must publish the panel's rectangle (see
/// [`PanelResize::position`]) and should rebuild anything that depends on the
/// surface size. The redraw callback must only paint inside
/// [`PanelView::rect`]; transparency is not supported.
///
/// Callbacks must not create or drop panels, call the [`manager`] entry points,
/// or replace callbacks while a pass is running. Breaking this is not memory
/// unsafe but leaves the screen in an unspecified state.
///
/// # Example
///
/// ```rust,ignore
/// use panestack::{manager, Panel, Rect};
///
/// let mut panel = Panel::new();
/// panel.on_screen_resize(|ui| {
///     let extent = ui.extent();
///     ui.position(Rect::new(extent.width / 4, extent.height / 4, extent.width / 2, extent.height / 2));
/// });
/// panel.mark_resize();
/// panel.on_redraw(|view| {
///     // paint inside view.rect()
/// });
///
/// loop {
///     manager::redraw()?;
///     // block on input here
/// }
/// ```
#[derive(Debug)]
pub struct Panel {
    id: PanelId,
    blocking: bool,
    /// The stack is thread-local.
    _not_send: PhantomData<Rc<()>>,
}

impl Panel {
    /// Push a new, empty panel on top of the stack.
    pub fn new() -> Self {
        Self::with_flags(PanelFlags::empty())
    }

    /// Push a panel that freezes every panel below it until it is dropped.
    ///
    /// The whole surface is dirtied immediately, since the area the panel will
    /// cover is unknown before its first resize.
    pub fn blocking() -> Self {
        Self::with_flags(PanelFlags::BLOCKS_BELOW)
    }

    fn with_flags(flags: PanelFlags) -> Self {
        let id = manager::with_stack(|stack| stack.push(flags));
        Self {
            id,
            blocking: flags.contains(PanelFlags::BLOCKS_BELOW),
            _not_send: PhantomData,
        }
    }

    /// Stack id of this panel.
    pub const fn id(&self) -> PanelId {
        self.id
    }

    /// Whether this panel freezes the panels below it.
    pub const fn is_blocking(&self) -> bool {
        self.blocking
    }

    /// Current rectangle; empty until the first resize.
    pub fn rect(&self) -> Rect {
        manager::with_stack(|stack| stack.rect(self.id)).unwrap_or(Rect::ZERO)
    }

    /// Set the rectangle directly. Meant for setup code; resize callbacks use
    /// [`PanelResize::position`] instead.
    pub fn position(&mut self, rect: Rect) {
        manager::with_stack(|stack| stack.set_rect(self.id, rect));
    }

    /// Set the rectangle from a backend window. A null window yields an empty
    /// rectangle.
    pub fn position_from_window<W: Window + ?Sized>(&mut self, window: &W) {
        self.position(window.rect().unwrap_or(Rect::ZERO));
    }

    /// Replace the redraw callback.
    pub fn on_redraw<F>(&mut self, redraw: F)
    where
        F: FnMut(&PanelView) + 'static,
    {
        manager::with_stack(|stack| stack.set_redraw(self.id, Some(Box::new(redraw))));
    }

    /// Replace the resize callback. Usually paired with [`mark_resize`] so the
    /// panel is laid out on its first redraw.
    ///
    /// [`mark_resize`]: Panel::mark_resize
    pub fn on_screen_resize<F>(&mut self, resize: F)
    where
        F: FnMut(&mut PanelResize) + 'static,
    {
        manager::with_stack(|stack| stack.set_resize(self.id, Some(Box::new(resize))));
    }

    /// Run the resize callback before the next redraw of this panel.
    pub fn mark_resize(&self) {
        manager::with_stack(|stack| stack.mark_resize(self.id));
    }

    /// Repaint this panel on the next redraw. Panels above that overlap it are
    /// repainted too.
    pub fn invalidate_ui(&self) {
        manager::with_stack(|stack| stack.mark_invalidated(self.id));
    }

    /// Forget both callbacks and the rectangle, dirtying the vacated area.
    pub fn reset(&mut self) {
        manager::with_stack(|stack| stack.reset(self.id));
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        if !manager::try_with_stack(|stack| stack.remove(self.id)) {
            tracing::warn!(id = ?self.id, "panel dropped while the stack was borrowed, record kept");
        }
    }
}
