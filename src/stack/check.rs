//! Debug-time consistency check over the stack.

use super::PanelStack;
use crate::layout::Rect;
use crate::panel::PanelId;
use thiserror::Error;

/// A problem found by [`PanelStack::check_consistency`].
///
/// These are diagnostics, not failures: the stack keeps working, the result
/// may just look wrong on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Inconsistency {
    /// More than one blocking panel is alive.
    #[error("{count} blocking panels are live; only the topmost one suppresses panels below")]
    StackedBlocking {
        /// Number of live blocking panels.
        count: usize,
    },

    /// A panel's rectangle reaches outside the surface.
    #[error("panel {id:?} at {rect:?} lies outside the surface {extent:?}")]
    OutOfBounds {
        /// The offending panel.
        id: PanelId,
        /// Its rectangle.
        rect: Rect,
        /// The surface extent at check time.
        extent: Rect,
    },
}

impl PanelStack {
    /// Check the stack against `extent` and report anything suspicious.
    pub fn check_consistency(&self, extent: Rect) -> Vec<Inconsistency> {
        let mut issues = Vec::new();

        let count = self
            .order
            .iter()
            .filter(|id| self.records.get(**id).is_some_and(|r| r.is_blocking()))
            .count();
        if count > 1 {
            issues.push(Inconsistency::StackedBlocking { count });
        }

        for &id in &self.order {
            let Some(record) = self.records.get(id) else {
                continue;
            };
            if !extent.contains_rect(&record.rect) {
                issues.push(Inconsistency::OutOfBounds {
                    id,
                    rect: record.rect,
                    extent,
                });
            }
        }

        issues
    }
}
