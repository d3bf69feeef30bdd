//! `HeadlessSurface`: A surface with no display behind it.

use super::Surface;
use crate::layout::Rect;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Record {
    extent: Rect,
    pending_extent: Option<Rect>,
    flushes: Vec<Rect>,
    erases: Vec<Rect>,
}

/// Records every call instead of drawing.
///
/// Clones share the same record, so a test can keep one clone while the
/// manager owns another.
#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
    record: Rc<RefCell<Record>>,
}

impl HeadlessSurface {
    /// Create a surface with a fixed extent.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            record: Rc::new(RefCell::new(Record {
                extent: Rect::from_size(width, height),
                ..Record::default()
            })),
        }
    }

    /// Pretend the display changed size. Takes effect on the next
    /// [`Surface::refresh_extent`].
    pub fn set_size(&self, width: u16, height: u16) {
        self.record.borrow_mut().pending_extent = Some(Rect::from_size(width, height));
    }

    /// Every flushed rectangle, oldest first.
    pub fn flushes(&self) -> Vec<Rect> {
        self.record.borrow().flushes.clone()
    }

    /// Every erased rectangle, oldest first.
    pub fn erases(&self) -> Vec<Rect> {
        self.record.borrow().erases.clone()
    }

    /// Forget recorded flushes and erases.
    pub fn clear_log(&self) {
        let mut record = self.record.borrow_mut();
        record.flushes.clear();
        record.erases.clear();
    }
}

impl Surface for HeadlessSurface {
    fn extent(&self) -> Rect {
        self.record.borrow().extent
    }

    fn erase(&mut self, rect: Rect) {
        self.record.borrow_mut().erases.push(rect);
    }

    fn flush(&mut self, rect: Rect) -> io::Result<()> {
        self.record.borrow_mut().flushes.push(rect);
        Ok(())
    }

    fn refresh_extent(&mut self) -> io::Result<()> {
        let mut record = self.record.borrow_mut();
        if let Some(extent) = record.pending_extent.take() {
            record.extent = extent;
        }
        Ok(())
    }
}
