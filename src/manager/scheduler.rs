//! The three redraw entry points.

use super::{Error, Manager, Result, MANAGER};
use crate::backend::Surface;
use crate::layout::Rect;
use crate::panel::PanelId;
use crate::stack::{redraw_pass, resize_pass};

/// Summary of one entry point call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Panels that went through the resize pass, in order.
    pub resized: Vec<PanelId>,
    /// Panels whose redraw callback ran, in order.
    pub redrawn: Vec<PanelId>,
    /// Rectangle flushed to the surface, if any.
    pub flushed: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassKind {
    Redraw,
    Invalidated,
    ScreenResized,
}

/// Invalidate the top panel, then resize and repaint whatever needs it.
///
/// Call this between blocking input reads.
pub fn redraw() -> Result<Frame> {
    run(PassKind::Redraw)
}

/// Resize and repaint whatever needs it, without touching the top panel.
///
/// Used to re-flush after an interruption, e.g. a backend that lost its
/// contents and called [`invalidate`](super::invalidate).
pub fn redraw_invalidated() -> Result<Frame> {
    run(PassKind::Invalidated)
}

/// The surface changed size: re-read its extent, request a resize of every
/// panel, dirty everything, and redraw.
pub fn screen_resized() -> Result<Frame> {
    run(PassKind::ScreenResized)
}

fn run(kind: PassKind) -> Result<Frame> {
    MANAGER.with(|m| {
        if m.in_pass.replace(true) {
            tracing::error!(?kind, "redraw requested from inside a panel callback");
            return Err(Error::NestedPass);
        }

        let surface = m.surface.borrow_mut().take();
        let Some(mut surface) = surface else {
            m.in_pass.set(false);
            return Err(Error::NoSurface);
        };

        let result = run_with(m, kind, &mut *surface);

        // A surface installed from inside a callback wins
        let mut slot = m.surface.borrow_mut();
        if slot.is_none() {
            *slot = Some(surface);
        }
        m.in_pass.set(false);
        result
    })
}

fn run_with(m: &Manager, kind: PassKind, surface: &mut dyn Surface) -> Result<Frame> {
    let config = m.config.get();

    if kind == PassKind::ScreenResized {
        surface.refresh_extent()?;
        let mut stack = m.stack.borrow_mut();
        stack.mark_all_resize();
        stack.invalidate_all();
    }
    if kind != PassKind::Invalidated {
        m.stack.borrow_mut().invalidate_top();
    }

    let extent = surface.extent();
    let resized = resize_pass(&m.stack, extent);
    let outcome = redraw_pass(
        &m.stack,
        kind == PassKind::Invalidated,
        surface,
        config.erase_dirty,
    )?;

    if config.consistency_checks {
        for issue in m.stack.borrow().check_consistency(extent) {
            tracing::warn!(%issue, "panel stack inconsistency");
        }
    }

    tracing::debug!(
        ?kind,
        resized = resized.len(),
        redrawn = outcome.redrawn.len(),
        flushed = ?outcome.flushed,
        "pass complete"
    );
    Ok(Frame {
        resized,
        redrawn: outcome.redrawn,
        flushed: outcome.flushed,
    })
}
