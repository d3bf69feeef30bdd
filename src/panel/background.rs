//! `BackgroundPane`: A blank, full-surface panel hiding everything below.

use super::Panel;
use crate::buffer::Canvas;

/// Fills the whole surface with blank cells and freezes every panel below it
/// for as long as it lives.
#[derive(Debug)]
pub struct BackgroundPane {
    panel: Panel,
}

impl BackgroundPane {
    /// Push a background pane that paints into `canvas`.
    pub fn new(canvas: &Canvas) -> Self {
        let mut panel = Panel::blocking();
        panel.on_screen_resize(|ui| {
            let extent = ui.extent();
            ui.position(extent);
        });
        panel.mark_resize();

        let canvas = canvas.clone();
        panel.on_redraw(move |view| canvas.clear_rect(view.rect()));

        Self { panel }
    }

    /// The underlying panel.
    pub const fn panel(&self) -> &Panel {
        &self.panel
    }
}
