//! Panel stack: Ordered panel records plus the shared dirty region.
//!
//! The stack never owns a panel's lifetime. Owners hold a [`Panel`] guard and
//! the stack keeps a record keyed by a generational [`PanelId`], so removal can
//! happen from any position and a stale id simply resolves to nothing.
//!
//! The two passes live in [`pass`] and operate on a `RefCell<PanelStack>`:
//! callbacks run with the borrow released, which lets them invalidate other
//! panels without tripping the cell.
//!
//! [`Panel`]: crate::panel::Panel

mod check;
pub mod pass;

pub use check::Inconsistency;
pub use pass::{redraw_pass, resize_pass, RedrawOutcome};

use crate::layout::{DirtyRegion, Rect};
use crate::panel::{PanelFlags, PanelId, PanelRecord, RedrawFn, ResizeFn};
use slotmap::SlotMap;

/// Bottom-to-top collection of live panels.
#[derive(Debug, Default)]
pub struct PanelStack {
    records: SlotMap<PanelId, PanelRecord>,
    /// Stack order, bottom first.
    order: Vec<PanelId>,
    dirty: DirtyRegion,
}

impl PanelStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            records: SlotMap::with_key(),
            order: Vec::new(),
            dirty: DirtyRegion::new(),
        }
    }

    /// Forget every panel and all dirty state.
    ///
    /// Slots are cleared in place so ids handed out before stay dead.
    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
        self.dirty.clear();
    }

    /// Number of live panels.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the stack has no panels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live panels, bottom first.
    #[inline]
    pub fn order(&self) -> &[PanelId] {
        &self.order
    }

    /// Whether `id` refers to a live panel.
    pub fn contains(&self, id: PanelId) -> bool {
        self.records.contains_key(id)
    }

    /// The accumulated dirty region.
    #[inline]
    pub const fn dirty(&self) -> &DirtyRegion {
        &self.dirty
    }

    /// Push a new, empty panel on top.
    ///
    /// A blocking panel dirties the whole surface, since the area it will
    /// cover is unknown until its first resize.
    pub fn push(&mut self, flags: PanelFlags) -> PanelId {
        let id = self.records.insert(PanelRecord::new(flags));
        self.order.push(id);
        if flags.contains(PanelFlags::BLOCKS_BELOW) {
            self.dirty.mark_full();
        }
        tracing::trace!(?id, blocking = flags.contains(PanelFlags::BLOCKS_BELOW), "panel pushed");
        id
    }

    /// Remove a panel from wherever it sits.
    ///
    /// The order of the remaining panels is untouched. Unknown ids are ignored.
    pub fn remove(&mut self, id: PanelId) {
        let Some(record) = self.records.remove(id) else {
            return;
        };
        self.order.retain(|&other| other != id);
        self.invalidate(record.rect, record.is_blocking());
        tracing::trace!(?id, rect = ?record.rect, "panel removed");
    }

    /// Dirty `rect`; with `reenable_below`, dirty the whole surface instead so
    /// panels that were frozen under a blocking panel repaint completely.
    pub fn invalidate(&mut self, rect: Rect, reenable_below: bool) {
        if reenable_below {
            self.dirty.mark_full();
        } else {
            self.dirty.add(rect);
        }
    }

    /// Dirty the entire surface.
    pub fn invalidate_all(&mut self) {
        self.dirty.mark_full();
    }

    /// Current rectangle of a panel.
    pub fn rect(&self, id: PanelId) -> Option<Rect> {
        self.records.get(id).map(|r| r.rect)
    }

    /// Current flags of a panel.
    pub fn flags(&self, id: PanelId) -> Option<PanelFlags> {
        self.records.get(id).map(|r| r.flags)
    }

    /// Replace a panel's rectangle, dirtying both the old and the new area.
    pub fn set_rect(&mut self, id: PanelId, rect: Rect) {
        let Some(record) = self.records.get_mut(id) else {
            return;
        };
        let old = std::mem::replace(&mut record.rect, rect);
        if old != rect {
            self.dirty.add(old);
        }
        self.dirty.add(rect);
    }

    /// Replace a panel's redraw callback.
    pub fn set_redraw(&mut self, id: PanelId, redraw: Option<RedrawFn>) {
        if let Some(record) = self.records.get_mut(id) {
            record.redraw = redraw;
        }
    }

    /// Replace a panel's resize callback.
    pub fn set_resize(&mut self, id: PanelId, resize: Option<ResizeFn>) {
        if let Some(record) = self.records.get_mut(id) {
            record.resize = resize;
        }
    }

    /// Request the resize callback on the next pass.
    pub fn mark_resize(&mut self, id: PanelId) {
        if let Some(record) = self.records.get_mut(id) {
            record.flags.insert(PanelFlags::PENDING_RESIZE);
        }
    }

    /// Request a resize of every live panel, eligible or not.
    pub fn mark_all_resize(&mut self) {
        for record in self.records.values_mut() {
            record.flags.insert(PanelFlags::PENDING_RESIZE);
        }
    }

    /// Flag a panel for repaint and dirty its area so overlapping panels are
    /// re-examined.
    pub fn mark_invalidated(&mut self, id: PanelId) {
        if let Some(record) = self.records.get_mut(id) {
            record.flags.insert(PanelFlags::INVALIDATED);
            self.dirty.add(record.rect);
        }
    }

    /// Flag the topmost eligible panel for repaint.
    pub fn invalidate_top(&mut self) {
        if let Some(&id) = self.order.last() {
            self.mark_invalidated(id);
        }
    }

    /// Drop a panel's callbacks and rectangle, dirtying the vacated area.
    pub fn reset(&mut self, id: PanelId) {
        let Some(record) = self.records.get_mut(id) else {
            return;
        };
        record.redraw = None;
        record.resize = None;
        let old = std::mem::replace(&mut record.rect, Rect::ZERO);
        self.dirty.add(old);
    }

    /// Index of the highest blocking panel, scanning from the top.
    pub fn topmost_blocking_index(&self) -> Option<usize> {
        self.order
            .iter()
            .rposition(|id| self.records.get(*id).is_some_and(PanelRecord::is_blocking))
    }

    /// Panels taking part in passes, bottom first.
    ///
    /// Everything below the topmost blocking panel is excluded.
    pub fn eligible(&self) -> &[PanelId] {
        let start = self.topmost_blocking_index().unwrap_or(0);
        &self.order[start..]
    }

    pub(crate) fn record_mut(&mut self, id: PanelId) -> Option<&mut PanelRecord> {
        self.records.get_mut(id)
    }

    pub(crate) const fn dirty_mut(&mut self) -> &mut DirtyRegion {
        &mut self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_order_survives_middle_removal() {
        let mut stack = PanelStack::new();
        let a = stack.push(PanelFlags::empty());
        let b = stack.push(PanelFlags::empty());
        let c = stack.push(PanelFlags::empty());
        let d = stack.push(PanelFlags::empty());

        stack.remove(b);
        assert_eq!(stack.order(), &[a, c, d]);
        stack.remove(d);
        assert_eq!(stack.order(), &[a, c]);
        let e = stack.push(PanelFlags::empty());
        assert_eq!(stack.order(), &[a, c, e]);
    }

    #[test]
    fn test_stack_clear_keeps_old_ids_dead() {
        let mut stack = PanelStack::new();
        let old = stack.push(PanelFlags::empty());
        stack.clear();
        let new = stack.push(PanelFlags::empty());
        assert_ne!(old, new);
        stack.remove(old);
        assert_eq!(stack.order(), &[new]);
    }

    #[test]
    fn test_stack_remove_stale_id_is_noop() {
        let mut stack = PanelStack::new();
        let a = stack.push(PanelFlags::empty());
        stack.remove(a);
        stack.remove(a);
        assert!(stack.is_empty());
        assert!(!stack.contains(a));
    }

    #[test]
    fn test_stack_remove_dirties_vacated_rect() {
        let mut stack = PanelStack::new();
        let a = stack.push(PanelFlags::empty());
        stack.set_rect(a, Rect::new(0, 0, 10, 5));
        stack.dirty_mut().clear();

        stack.remove(a);
        assert_eq!(stack.dirty().rects(), &[Rect::new(0, 0, 10, 5)]);
        assert!(!stack.dirty().is_full());
    }

    #[test]
    fn test_stack_blocking_push_and_remove_dirty_everything() {
        let mut stack = PanelStack::new();
        stack.push(PanelFlags::empty());
        let blocker = stack.push(PanelFlags::BLOCKS_BELOW);
        assert!(stack.dirty().is_full());

        stack.dirty_mut().clear();
        stack.remove(blocker);
        assert!(stack.dirty().is_full());
    }

    #[test]
    fn test_stack_topmost_blocking_wins() {
        let mut stack = PanelStack::new();
        let a = stack.push(PanelFlags::empty());
        let b = stack.push(PanelFlags::BLOCKS_BELOW);
        let c = stack.push(PanelFlags::empty());
        let d = stack.push(PanelFlags::BLOCKS_BELOW);
        let e = stack.push(PanelFlags::empty());

        assert_eq!(stack.topmost_blocking_index(), Some(3));
        assert_eq!(stack.eligible(), &[d, e]);

        stack.remove(d);
        assert_eq!(stack.eligible(), &[b, c, e]);
        stack.remove(b);
        assert_eq!(stack.eligible(), &[a, c, e]);
        assert_eq!(stack.topmost_blocking_index(), None);
    }

    #[test]
    fn test_stack_set_rect_dirties_old_and_new() {
        let mut stack = PanelStack::new();
        let a = stack.push(PanelFlags::empty());
        stack.set_rect(a, Rect::new(0, 0, 4, 4));
        stack.dirty_mut().clear();

        stack.set_rect(a, Rect::new(10, 10, 4, 4));
        assert_eq!(
            stack.dirty().rects(),
            &[Rect::new(0, 0, 4, 4), Rect::new(10, 10, 4, 4)]
        );
    }

    #[test]
    fn test_stack_reset_forgets_layout() {
        let mut stack = PanelStack::new();
        let a = stack.push(PanelFlags::empty());
        stack.set_rect(a, Rect::new(2, 2, 4, 4));
        stack.set_redraw(a, Some(Box::new(|_| {})));
        stack.dirty_mut().clear();

        stack.reset(a);
        assert_eq!(stack.rect(a), Some(Rect::ZERO));
        assert!(stack.record_mut(a).is_some_and(|r| r.redraw.is_none()));
        assert_eq!(stack.dirty().rects(), &[Rect::new(2, 2, 4, 4)]);
    }

    #[test]
    fn test_stack_mark_invalidated_sets_flag_and_dirty() {
        let mut stack = PanelStack::new();
        let a = stack.push(PanelFlags::empty());
        stack.set_rect(a, Rect::new(1, 1, 3, 3));
        stack.dirty_mut().clear();

        stack.mark_invalidated(a);
        assert!(stack.flags(a).is_some_and(|f| f.contains(PanelFlags::INVALIDATED)));
        assert!(stack.dirty().intersects(&Rect::new(2, 2, 1, 1)));
    }
}
