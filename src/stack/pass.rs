//! Resize and redraw passes.
//!
//! Both passes walk the eligible panels bottom to top. For every panel the
//! callback is taken out of its record, the stack borrow is dropped, the
//! callback runs, and the callback is put back. A panel removed by its owner
//! while the pass is running is skipped.

use super::PanelStack;
use crate::backend::Surface;
use crate::layout::Rect;
use crate::panel::{PanelFlags, PanelId, PanelResize, PanelView};
use std::cell::RefCell;
use std::io;

/// What a redraw pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawOutcome {
    /// Panels whose redraw callback ran, in call order.
    pub redrawn: Vec<PanelId>,
    /// Rectangle handed to [`Surface::flush`], if anything was flushed.
    pub flushed: Option<Rect>,
}

/// Run pending resize callbacks, bottom to top.
///
/// The old and the new rectangle of every resized panel are dirtied. Panels
/// without a resize callback keep their rectangle. Returns the resized panels
/// in order.
pub fn resize_pass(stack: &RefCell<PanelStack>, extent: Rect) -> Vec<PanelId> {
    let pending: Vec<PanelId> = {
        let stack = stack.borrow();
        stack
            .eligible()
            .iter()
            .copied()
            .filter(|&id| {
                stack
                    .flags(id)
                    .is_some_and(|f| f.contains(PanelFlags::PENDING_RESIZE))
            })
            .collect()
    };

    let mut resized = Vec::with_capacity(pending.len());
    for id in pending {
        let (old, callback) = {
            let mut stack = stack.borrow_mut();
            let Some(record) = stack.record_mut(id) else {
                continue;
            };
            record.flags.remove(PanelFlags::PENDING_RESIZE);
            let old = record.rect;
            let callback = record.resize.take();
            stack.dirty_mut().add(old);
            (old, callback)
        };

        let Some(mut callback) = callback else {
            resized.push(id);
            continue;
        };

        let mut ctx = PanelResize::new(id, old, extent);
        tracing::trace!(?id, ?old, "resize callback");
        callback(&mut ctx);
        let rect = ctx.into_rect();

        let mut stack = stack.borrow_mut();
        if let Some(record) = stack.record_mut(id) {
            record.rect = rect;
            if record.resize.is_none() {
                record.resize = Some(callback);
            }
            stack.dirty_mut().add(rect);
        }
        resized.push(id);
    }

    resized
}

/// Repaint every eligible panel that needs it, then flush once.
///
/// A panel is repainted when it is flagged invalidated or its rectangle meets
/// the dirty region. Each repainted rectangle joins the dirty region, so panels
/// above that overlap it are repainted as well. When `only_invalidated` is
/// false the topmost eligible panel is always repainted.
///
/// With `erase` set, the dirty area known before any callback runs is erased on
/// the surface first, so vacated space that no panel covers does not keep
/// stale content. While a blocking panel is on the stack only the parts covered
/// by eligible panels are erased, leaving frozen content visible around it.
///
/// If the flush fails the flushed rectangle stays dirty, so the next pass
/// repaints and flushes it again.
pub fn redraw_pass(
    stack: &RefCell<PanelStack>,
    only_invalidated: bool,
    surface: &mut dyn Surface,
    erase: bool,
) -> io::Result<RedrawOutcome> {
    let extent = surface.extent();
    let (eligible, top) = {
        let stack = stack.borrow();
        let eligible = stack.eligible().to_vec();
        let top = if only_invalidated {
            None
        } else {
            eligible.last().copied()
        };

        if erase {
            let dirty = if stack.dirty().is_full() {
                vec![extent]
            } else {
                stack.dirty().rects().to_vec()
            };
            if stack.topmost_blocking_index().is_some() {
                // Panels below a blocker are frozen; only erase what eligible panels repaint
                let covered: Vec<Rect> = eligible.iter().filter_map(|&id| stack.rect(id)).collect();
                for rect in &dirty {
                    for panel in &covered {
                        let part = rect.intersection(panel);
                        if !part.is_empty() {
                            surface.erase(part);
                        }
                    }
                }
            } else {
                for rect in dirty {
                    surface.erase(rect);
                }
            }
        }
        (eligible, top)
    };

    let mut outcome = RedrawOutcome::default();
    for id in eligible {
        let (rect, callback) = {
            let mut stack = stack.borrow_mut();
            let selected = {
                let Some(record) = stack.record_mut(id) else {
                    continue;
                };
                let rect = record.rect;
                let invalidated = record.flags.contains(PanelFlags::INVALIDATED);
                record.flags.remove(PanelFlags::INVALIDATED);
                if rect.is_empty() {
                    continue;
                }
                (invalidated || Some(id) == top).then_some(rect)
            };
            let Some(rect) = selected.or_else(|| {
                stack
                    .rect(id)
                    .filter(|rect| stack.dirty().intersects(rect))
            }) else {
                continue;
            };

            stack.dirty_mut().add(rect);
            let callback = stack.record_mut(id).and_then(|r| r.redraw.take());
            (rect, callback)
        };

        let Some(mut callback) = callback else {
            continue;
        };

        tracing::trace!(?id, ?rect, "redraw callback");
        callback(&PanelView::new(id, rect));
        outcome.redrawn.push(id);

        if let Some(record) = stack.borrow_mut().record_mut(id) {
            if record.redraw.is_none() {
                record.redraw = Some(callback);
            }
        }
    }

    let flushed = {
        let mut stack = stack.borrow_mut();
        let bounds = stack.dirty().bounds(extent);
        stack.dirty_mut().clear();
        bounds
    };
    if let Some(rect) = flushed {
        if let Err(err) = surface.flush(rect) {
            // Nothing reached the display, keep the area dirty for the next pass
            stack.borrow_mut().dirty_mut().add(rect);
            tracing::warn!(?rect, %err, "flush failed");
            return Err(err);
        }
    }
    outcome.flushed = flushed;

    tracing::debug!(
        redrawn = outcome.redrawn.len(),
        flushed = ?outcome.flushed,
        "redraw pass"
    );
    Ok(outcome)
}
