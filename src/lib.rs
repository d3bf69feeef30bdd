//! # Panestack
//!
//! A stack of overlapping terminal panels with minimal, artifact-free redraws.
//!
//! Panels are rectangles with two callbacks: a resize callback that decides
//! where the panel sits, and a redraw callback that paints inside it. Owners
//! keep a [`Panel`] alive for as long as the panel should be on screen; the
//! thread's [`manager`] works out which panels to resize, which to repaint and
//! in which order.
//!
//! ## Core Concepts
//!
//! - **Owner-held handles**: construction pushes onto the stack, drop removes
//!   from wherever the panel sits
//! - **Dirty rectangles**: vacated and repainted areas accumulate until the
//!   next flush; only panels touching them are repainted
//! - **Bottom-to-top painting**: occlusion is handled by draw order alone
//! - **Blocking panels**: freeze every panel below them until dropped
//!
//! ## Example
//!
//! ```rust,ignore
//! use panestack::{manager, HeadlessSurface, Panel, Rect};
//!
//! manager::install(HeadlessSurface::new(80, 24));
//!
//! let mut panel = Panel::new();
//! panel.on_screen_resize(|ui| ui.position(Rect::new(0, 0, 10, 5)));
//! panel.on_redraw(|view| println!("paint {:?}", view.rect()));
//! panel.mark_resize();
//!
//! manager::redraw()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod buffer;
pub mod layout;
pub mod manager;
pub mod panel;
pub mod stack;

// Re-exports for convenience
pub use backend::{HeadlessSurface, Surface, TerminalSession, TerminalSurface, Window};
pub use buffer::{Buffer, Canvas, Cell, Modifiers, Rgb};
pub use layout::{DirtyRegion, Rect};
pub use manager::{Frame, ManagerConfig};
pub use panel::{BackgroundPane, Panel, PanelFlags, PanelId, PanelResize, PanelView};
pub use stack::{Inconsistency, PanelStack};
