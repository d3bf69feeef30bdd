//! Overlay demo: Overlapping panels, a movable popup and a blocking modal.
//!
//! Keys:
//! - `arrows`: move the popup
//! - `m`: toggle a blocking modal over everything
//! - `q`: quit
//!
//! Set `PANESTACK_LOG=trace` to write pass logs to `panestack-demo.log`.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use panestack::{manager, BackgroundPane, Canvas, Panel, Rect, Rgb, TerminalSession, TerminalSurface};
use std::cell::Cell;
use std::fs::File;
use std::rc::Rc;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const TITLE_FG: Rgb = Rgb::WHITE;
const TITLE_BG: Rgb = Rgb::from_u32(0x005f_87af);
const BODY_FG: Rgb = Rgb::DEFAULT_FG;
const BODY_BG: Rgb = Rgb::from_u32(0x0026_2626);
const POPUP_BG: Rgb = Rgb::from_u32(0x0044_2c58);

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(filter) = EnvFilter::try_from_env("PANESTACK_LOG") else {
        return Ok(());
    };
    let file = File::create("panestack-demo.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// A status line pinned to the bottom row.
fn status_bar(canvas: &Canvas) -> Panel {
    let mut panel = Panel::new();
    panel.on_screen_resize(|ui| {
        let extent = ui.extent();
        ui.position(Rect::new(0, extent.height.saturating_sub(1), extent.width, 1));
    });
    let canvas = canvas.clone();
    panel.on_redraw(move |view| {
        canvas.draw_title(view.rect(), " arrows: move  m: modal  q: quit", TITLE_FG, TITLE_BG);
    });
    panel.mark_resize();
    panel
}

/// A framed window covering everything above the status line.
fn main_window(canvas: &Canvas) -> Panel {
    let mut panel = Panel::new();
    panel.on_screen_resize(|ui| {
        let extent = ui.extent();
        ui.position(Rect::new(0, 0, extent.width, extent.height.saturating_sub(1)));
    });
    let canvas = canvas.clone();
    panel.on_redraw(move |view| {
        let rect = view.rect();
        canvas.draw_box(rect, BODY_FG, BODY_BG);
        canvas.draw_text(rect, 0, " panestack ", TITLE_FG, BODY_BG);
        let inner = Rect::new(rect.x + 2, rect.y, rect.width.saturating_sub(4), rect.height);
        for (line, text) in (2u16..).zip(["Panels repaint bottom to top.", "Only dirty areas are flushed."]) {
            canvas.draw_text(inner, line, text, BODY_FG, BODY_BG);
        }
    });
    panel.mark_resize();
    panel
}

/// A small window positioned from a shared offset.
fn popup(canvas: &Canvas, offset: &Rc<Cell<(u16, u16)>>) -> Panel {
    let mut panel = Panel::new();
    let position = Rc::clone(offset);
    panel.on_screen_resize(move |ui| {
        let extent = ui.extent();
        let (x, y) = position.get();
        let rect = Rect::new(x, y, 28, 6).intersection(&extent);
        ui.position(rect);
    });
    let canvas = canvas.clone();
    panel.on_redraw(move |view| {
        canvas.draw_box(view.rect(), TITLE_FG, POPUP_BG);
        canvas.draw_text(view.rect(), 2, "  I float above.", TITLE_FG, POPUP_BG);
    });
    panel.mark_resize();
    panel
}

/// A blocking modal centered on a blank background.
struct Modal {
    _background: BackgroundPane,
    _dialog: Panel,
}

impl Modal {
    fn open(canvas: &Canvas) -> Self {
        let background = BackgroundPane::new(canvas);
        let mut dialog = Panel::new();
        dialog.on_screen_resize(|ui| {
            let extent = ui.extent();
            let (width, height) = (36u16.min(extent.width), 5u16.min(extent.height));
            ui.position(Rect::new(
                (extent.width - width) / 2,
                (extent.height - height) / 2,
                width,
                height,
            ));
        });
        let canvas = canvas.clone();
        dialog.on_redraw(move |view| {
            canvas.draw_box(view.rect(), TITLE_FG, TITLE_BG);
            canvas.draw_text(view.rect(), 2, "   Everything below is frozen.", TITLE_FG, TITLE_BG);
        });
        dialog.mark_resize();
        Self {
            _background: background,
            _dialog: dialog,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let _session = TerminalSession::enter(true)?;
    let surface = TerminalSurface::stdout()?;
    let canvas = surface.canvas();
    manager::install(surface);

    let _window = main_window(&canvas);
    let _status = status_bar(&canvas);
    let offset = Rc::new(Cell::new((6u16, 4u16)));
    let popup = popup(&canvas, &offset);
    let mut modal: Option<Modal> = None;

    manager::redraw()?;
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let (x, y) = offset.get();
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('m') => {
                        modal = match modal.take() {
                            Some(_) => None,
                            None => Some(Modal::open(&canvas)),
                        };
                    }
                    KeyCode::Left => offset.set((x.saturating_sub(1), y)),
                    KeyCode::Right => offset.set((x.saturating_add(1), y)),
                    KeyCode::Up => offset.set((x, y.saturating_sub(1))),
                    KeyCode::Down => offset.set((x, y.saturating_add(1))),
                    _ => continue,
                }
                popup.mark_resize();
                manager::redraw_invalidated()?;
            }
            Event::Resize(..) => {
                manager::screen_resized()?;
            }
            _ => {}
        }
    }

    manager::teardown();
    Ok(())
}
