//! End-to-end behaviour of the thread's panel manager.

use panestack::manager::{self, Error};
use panestack::{HeadlessSurface, ManagerConfig, Panel, PanelFlags, PanelId, Rect};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

type Log = Rc<RefCell<Vec<String>>>;

fn setup(width: u16, height: u16) -> HeadlessSurface {
    manager::clear();
    let probe = HeadlessSurface::new(width, height);
    manager::install_with_config(probe.clone(), ManagerConfig::default().with_consistency_checks(true));
    probe
}

/// A panel that logs its callbacks and lays itself out at `rect`.
fn logged_panel(log: &Log, name: &'static str, rect: Rect, blocking: bool) -> Panel {
    let mut panel = if blocking { Panel::blocking() } else { Panel::new() };
    let resize_log = Rc::clone(log);
    panel.on_screen_resize(move |ui| {
        resize_log.borrow_mut().push(format!("resize {name}"));
        ui.position(rect);
    });
    let redraw_log = Rc::clone(log);
    panel.on_redraw(move |_| redraw_log.borrow_mut().push(format!("redraw {name}")));
    panel.mark_resize();
    panel
}

fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

#[test]
fn test_entry_points_need_a_surface() {
    manager::clear();
    assert!(matches!(manager::redraw(), Err(Error::NoSurface)));
    assert!(matches!(manager::redraw_invalidated(), Err(Error::NoSurface)));
}

#[test]
fn test_first_redraw_resizes_then_redraws() {
    let probe = setup(80, 24);
    let log = Log::default();
    let a = logged_panel(&log, "a", Rect::new(0, 0, 10, 5), false);

    let frame = manager::redraw().unwrap();
    assert_eq!(take(&log), ["resize a", "redraw a"]);
    assert_eq!(frame.resized, vec![a.id()]);
    assert_eq!(frame.redrawn, vec![a.id()]);
    assert_eq!(a.rect(), Rect::new(0, 0, 10, 5));
    // Installing the surface dirtied everything
    assert_eq!(probe.flushes(), vec![Rect::from_size(80, 24)]);
}

#[test]
fn test_stack_order_ignores_removal_order() {
    setup(80, 24);
    let a = Panel::new();
    let b = Panel::new();
    let c = Panel::new();
    let d = Panel::new();
    let ids: Vec<PanelId> = [&a, &b, &c, &d].iter().map(|p| p.id()).collect();

    drop(c);
    assert_eq!(manager::panel_order(), vec![ids[0], ids[1], ids[3]]);
    drop(a);
    assert_eq!(manager::panel_order(), vec![ids[1], ids[3]]);
    let e = Panel::new();
    assert_eq!(manager::panel_order(), vec![ids[1], ids[3], e.id()]);
    drop(b);
    drop(d);
    assert_eq!(manager::panel_order(), vec![e.id()]);
}

#[test]
fn test_screen_resized_resizes_everything_before_any_redraw() {
    let probe = setup(80, 24);
    let log = Log::default();
    let _a = logged_panel(&log, "a", Rect::new(0, 0, 10, 5), false);
    let _b = logged_panel(&log, "b", Rect::new(5, 5, 10, 5), false);
    let _c = logged_panel(&log, "c", Rect::new(60, 0, 10, 5), false);
    manager::redraw().unwrap();
    take(&log);

    probe.set_size(100, 30);
    let frame = manager::screen_resized().unwrap();
    assert_eq!(
        take(&log),
        ["resize a", "resize b", "resize c", "redraw a", "redraw b", "redraw c"]
    );
    assert_eq!(frame.flushed, Some(Rect::from_size(100, 30)));
}

#[test]
fn test_blocking_panel_scenario() {
    setup(80, 24);
    let log = Log::default();
    let a = logged_panel(&log, "a", Rect::new(0, 0, 10, 5), false);
    manager::redraw().unwrap();
    assert_eq!(take(&log), ["resize a", "redraw a"]);

    let b = logged_panel(&log, "b", Rect::new(20, 5, 30, 10), true);
    a.invalidate_ui();
    a.mark_resize();
    let frame = manager::redraw_invalidated().unwrap();
    assert_eq!(take(&log), ["resize b", "redraw b"]);
    assert!(!frame.resized.contains(&a.id()));
    assert!(!frame.redrawn.contains(&a.id()));

    // Frozen, not forgotten
    let flags = manager::inspect(|stack| stack.flags(a.id())).unwrap();
    assert!(flags.contains(PanelFlags::PENDING_RESIZE | PanelFlags::INVALIDATED));

    drop(b);
    assert!(manager::inspect(|stack| stack.dirty().is_full()));
    let frame = manager::redraw_invalidated().unwrap();
    assert_eq!(take(&log), ["resize a", "redraw a"]);
    assert_eq!(frame.flushed, Some(Rect::from_size(80, 24)));
}

#[test]
fn test_disjoint_invalidations_flush_their_union() {
    let probe = setup(80, 24);
    let log = Log::default();
    let left = logged_panel(&log, "left", Rect::new(0, 0, 5, 5), false);
    let _between = logged_panel(&log, "between", Rect::new(8, 0, 5, 5), false);
    let right = logged_panel(&log, "right", Rect::new(20, 0, 5, 5), false);
    let _top = logged_panel(&log, "top", Rect::new(40, 10, 5, 5), false);
    manager::redraw().unwrap();
    take(&log);
    probe.clear_log();

    left.invalidate_ui();
    right.invalidate_ui();
    let frame = manager::redraw_invalidated().unwrap();
    assert_eq!(take(&log), ["redraw left", "redraw right"]);
    assert_eq!(frame.flushed, Some(Rect::new(0, 0, 25, 5)));
    assert_eq!(probe.flushes(), vec![Rect::new(0, 0, 25, 5)]);
    assert_eq!(probe.erases(), vec![Rect::new(0, 0, 5, 5), Rect::new(20, 0, 5, 5)]);
}

#[test]
fn test_redraw_invalidated_is_idempotent() {
    let probe = setup(80, 24);
    let log = Log::default();
    let a = logged_panel(&log, "a", Rect::new(0, 0, 10, 5), false);
    let _b = logged_panel(&log, "b", Rect::new(5, 2, 10, 5), false);
    manager::redraw().unwrap();
    take(&log);

    a.invalidate_ui();
    manager::redraw_invalidated().unwrap();
    assert_eq!(take(&log), ["redraw a", "redraw b"]);

    probe.clear_log();
    let frame = manager::redraw_invalidated().unwrap();
    assert!(take(&log).is_empty());
    assert!(frame.redrawn.is_empty());
    assert!(probe.flushes().is_empty());
}

#[test]
fn test_redraw_always_repaints_the_top_panel() {
    setup(80, 24);
    let log = Log::default();
    let _a = logged_panel(&log, "a", Rect::new(0, 0, 10, 5), false);
    let _b = logged_panel(&log, "b", Rect::new(40, 0, 10, 5), false);
    manager::redraw().unwrap();
    take(&log);

    let frame = manager::redraw().unwrap();
    assert_eq!(take(&log), ["redraw b"]);
    assert_eq!(frame.flushed, Some(Rect::new(40, 0, 10, 5)));
}

#[test]
fn test_dropping_a_panel_repaints_what_it_covered() {
    setup(80, 24);
    let log = Log::default();
    let _under = logged_panel(&log, "under", Rect::new(0, 0, 20, 10), false);
    let _aside = logged_panel(&log, "aside", Rect::new(50, 0, 10, 10), false);
    let over = logged_panel(&log, "over", Rect::new(5, 5, 10, 3), false);
    manager::redraw().unwrap();
    take(&log);

    drop(over);
    let frame = manager::redraw_invalidated().unwrap();
    assert_eq!(take(&log), ["redraw under"]);
    assert_eq!(frame.flushed, Some(Rect::new(0, 0, 20, 10)));
}

#[test]
fn test_reset_forgets_layout_and_callbacks() {
    setup(80, 24);
    let log = Log::default();
    let _under = logged_panel(&log, "under", Rect::new(0, 0, 20, 10), false);
    let mut over = logged_panel(&log, "over", Rect::new(5, 5, 10, 3), false);
    manager::redraw().unwrap();
    take(&log);

    over.reset();
    assert_eq!(over.rect(), Rect::ZERO);
    over.mark_resize();
    manager::redraw_invalidated().unwrap();
    assert_eq!(take(&log), ["redraw under"]);
}

#[test]
fn test_position_from_window_outside_resize() {
    setup(80, 24);
    let log = Log::default();
    let mut panel = Panel::new();
    let redraw_log = Rc::clone(&log);
    panel.on_redraw(move |view| redraw_log.borrow_mut().push(format!("{:?}", view.rect())));

    panel.position_from_window(&Some(Rect::new(2, 2, 4, 4)));
    manager::redraw().unwrap();
    assert_eq!(take(&log), ["Rect(2, 2 4x4)"]);

    panel.position_from_window(&None::<Rect>);
    let frame = manager::redraw().unwrap();
    assert!(frame.redrawn.is_empty());
    assert_eq!(frame.flushed, Some(Rect::new(2, 2, 4, 4)));
}

#[test]
fn test_nested_redraw_is_rejected() {
    setup(80, 24);
    let nested: Rc<RefCell<Option<bool>>> = Rc::default();
    let mut panel = Panel::new();
    panel.position(Rect::new(0, 0, 4, 4));
    let seen = Rc::clone(&nested);
    panel.on_redraw(move |_| {
        let rejected = matches!(manager::redraw(), Err(Error::NestedPass));
        *seen.borrow_mut() = Some(rejected);
    });

    manager::redraw().unwrap();
    assert_eq!(*nested.borrow(), Some(true));
    // The outer pass still finished and the manager is usable
    assert!(manager::redraw().is_ok());
}

#[test]
fn test_resize_callback_sees_surface_extent() {
    let probe = setup(80, 24);
    let mut panel = Panel::new();
    panel.on_screen_resize(|ui| {
        let extent = ui.extent();
        ui.position(Rect::new(0, extent.height - 1, extent.width, 1));
    });
    panel.mark_resize();
    manager::redraw().unwrap();
    assert_eq!(panel.rect(), Rect::new(0, 23, 80, 1));

    probe.set_size(120, 40);
    manager::screen_resized().unwrap();
    assert_eq!(panel.rect(), Rect::new(0, 39, 120, 1));
}

#[test]
fn test_clear_makes_old_handles_inert() {
    setup(80, 24);
    let stale = Panel::new();
    manager::clear();
    let fresh = Panel::new();
    drop(stale);
    assert_eq!(manager::panel_order(), vec![fresh.id()]);
}

/// Log sink shared between a test and its subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_drop_while_stack_borrowed_is_logged() {
    setup(80, 24);
    let logs = Captured::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .finish();

    let panel = Panel::new();
    let id = panel.id();
    tracing::subscriber::with_default(subscriber, || {
        manager::inspect(|_| drop(panel));
    });

    assert_eq!(manager::panel_order(), vec![id]);
    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("panel dropped while the stack was borrowed"));
}
