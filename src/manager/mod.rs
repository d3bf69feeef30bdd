//! Manager: The thread's panel stack, its surface, and the redraw entry points.
//!
//! There is one manager per thread. It is created empty on first use, gets a
//! [`Surface`] through [`install`], and is driven by the three entry points:
//!
//! - [`redraw`]: invalidate the top panel and repaint whatever is dirty
//! - [`redraw_invalidated`]: repaint what is dirty, nothing more
//! - [`screen_resized`]: re-run every resize callback, then repaint everything
//!
//! ```text
//!   owner code                 manager                     surface
//!  ─────────────┐          ┌─────────────┐            ┌─────────────┐
//!  Panel::new ──┼─ push ──▶│ PanelStack  │            │             │
//!  mark_resize  │          │  + dirty    │── erase ──▶│             │
//!  redraw() ────┼─────────▶│ resize pass │            │             │
//!               │          │ redraw pass │── flush ──▶│  display    │
//!  drop(panel) ─┼─ remove ▶│             │            │             │
//!  ─────────────┘          └─────────────┘            └─────────────┘
//! ```
//!
//! Tests reset the thread's state with [`clear`].

mod config;
mod error;
mod scheduler;

pub use config::ManagerConfig;
pub use error::{Error, Result};
pub use scheduler::{redraw, redraw_invalidated, screen_resized, Frame};

use crate::backend::Surface;
use crate::layout::Rect;
use crate::panel::PanelId;
use crate::stack::PanelStack;
use std::cell::{Cell, RefCell};

struct Manager {
    stack: RefCell<PanelStack>,
    surface: RefCell<Option<Box<dyn Surface>>>,
    config: Cell<ManagerConfig>,
    /// Set while an entry point is running.
    in_pass: Cell<bool>,
}

impl Manager {
    fn new() -> Self {
        Self {
            stack: RefCell::new(PanelStack::new()),
            surface: RefCell::new(None),
            config: Cell::new(ManagerConfig::default()),
            in_pass: Cell::new(false),
        }
    }
}

thread_local! {
    static MANAGER: Manager = Manager::new();
}

/// Install the surface panels draw onto, with the default configuration.
///
/// Replaces any previous surface and dirties everything.
pub fn install<S: Surface + 'static>(surface: S) {
    install_with_config(surface, ManagerConfig::default());
}

/// Install the surface panels draw onto.
pub fn install_with_config<S: Surface + 'static>(surface: S, config: ManagerConfig) {
    MANAGER.with(|m| {
        *m.surface.borrow_mut() = Some(Box::new(surface));
        m.config.set(config);
        m.stack.borrow_mut().invalidate_all();
    });
    tracing::debug!(?config, "surface installed");
}

/// Take the installed surface back. Panels stay on the stack.
pub fn teardown() -> Option<Box<dyn Surface>> {
    MANAGER.with(|m| m.surface.borrow_mut().take())
}

/// Reset this thread's manager to its initial, empty state.
///
/// Every panel record is forgotten; dropping a `Panel` created before the
/// call is a no-op afterwards.
pub fn clear() {
    MANAGER.with(|m| {
        m.stack.borrow_mut().clear();
        *m.surface.borrow_mut() = None;
        m.config.set(ManagerConfig::default());
        m.in_pass.set(false);
    });
}

/// Current configuration.
pub fn config() -> ManagerConfig {
    MANAGER.with(|m| m.config.get())
}

/// Replace the configuration.
pub fn set_config(config: ManagerConfig) {
    MANAGER.with(|m| m.config.set(config));
}

/// Dirty part of the screen, e.g. after the backend lost its contents.
///
/// With `reenable_panels_below` the whole surface is dirtied, which is what
/// removing a blocking panel does.
pub fn invalidate(rect: Rect, reenable_panels_below: bool) {
    with_stack(|stack| stack.invalidate(rect, reenable_panels_below));
}

/// Live panels, bottom first.
pub fn panel_order() -> Vec<PanelId> {
    inspect(|stack| stack.order().to_vec())
}

/// Read-only access to the thread's stack.
pub fn inspect<R>(f: impl FnOnce(&PanelStack) -> R) -> R {
    MANAGER.with(|m| f(&m.stack.borrow()))
}

pub(crate) fn with_stack<R>(f: impl FnOnce(&mut PanelStack) -> R) -> R {
    MANAGER.with(|m| f(&mut m.stack.borrow_mut()))
}

/// Like [`with_stack`], but never panics.
///
/// Does nothing while the thread is being torn down. Returns `false` when the
/// stack is already borrowed and `f` was skipped.
pub(crate) fn try_with_stack(f: impl FnOnce(&mut PanelStack)) -> bool {
    MANAGER
        .try_with(|m| match m.stack.try_borrow_mut() {
            Ok(mut stack) => {
                f(&mut stack);
                true
            }
            Err(_) => false,
        })
        .unwrap_or(true)
}
