//! Terminal backend: crossterm output for a [`Canvas`].
//!
//! Flushing a rectangle re-emits exactly the cells inside it. All escape
//! sequences for one flush are queued into a single `Vec<u8>` and written with
//! one `write_all`, which keeps partially drawn frames off the screen.

use super::Surface;
use crate::buffer::{Canvas, Cell, Modifiers, Rgb};
use crate::layout::Rect;
use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

/// A [`Surface`] that writes a [`Canvas`] to a terminal.
pub struct TerminalSurface<W: Write = Stdout> {
    canvas: Canvas,
    writer: W,
    /// Pre-allocated escape sequence buffer.
    output: Vec<u8>,
    /// Query the real terminal size on `refresh_extent`.
    track_terminal: bool,
}

impl TerminalSurface<Stdout> {
    /// Create a surface on stdout sized to the current terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn stdout() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut surface = Self::with_writer(io::stdout(), width, height);
        surface.track_terminal = true;
        Ok(surface)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Create a surface of a fixed size writing to `writer`.
    pub fn with_writer(writer: W, width: u16, height: u16) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            writer,
            output: Vec::with_capacity(16 * 1024),
            track_terminal: false,
        }
    }

    /// A handle to the canvas for redraw callbacks to paint into.
    pub fn canvas(&self) -> Canvas {
        self.canvas.clone()
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Queue the cells inside `rect` into the output buffer.
    fn encode(&mut self, rect: Rect) -> io::Result<()> {
        let buffer = self.canvas.buffer();
        let rect = rect.intersection(&buffer.area());
        let out = &mut self.output;

        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        let mut modifiers = Modifiers::empty();

        for y in rect.y..rect.bottom() {
            let row = buffer.row(y, rect.x, rect.width);
            // Never start a row on the right half of a wide character
            let skip = usize::from(row.first().is_some_and(Cell::is_wide_continuation));
            queue!(out, cursor::MoveTo(rect.x + u16::try_from(skip).unwrap_or(0), y))?;

            for cell in &row[skip..] {
                if cell.is_wide_continuation() {
                    continue;
                }
                if cell.modifiers() != modifiers {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                    fg = None;
                    bg = None;
                    emit_modifiers(out, cell.modifiers())?;
                    modifiers = cell.modifiers();
                }
                if fg != Some(cell.fg()) {
                    queue!(out, SetForegroundColor(cell.fg().into()))?;
                    fg = Some(cell.fg());
                }
                if bg != Some(cell.bg()) {
                    queue!(out, SetBackgroundColor(cell.bg().into()))?;
                    bg = Some(cell.bg());
                }
                queue!(out, Print(cell.symbol()))?;
            }
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }
}

fn emit_modifiers(out: &mut Vec<u8>, modifiers: Modifiers) -> io::Result<()> {
    if modifiers.contains(Modifiers::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if modifiers.contains(Modifiers::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if modifiers.contains(Modifiers::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if modifiers.contains(Modifiers::REVERSED) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn extent(&self) -> Rect {
        self.canvas.area()
    }

    fn erase(&mut self, rect: Rect) {
        self.canvas.clear_rect(rect);
    }

    fn flush(&mut self, rect: Rect) -> io::Result<()> {
        self.output.clear();
        self.encode(rect)?;
        self.writer.write_all(&self.output)?;
        self.writer.flush()
    }

    fn refresh_extent(&mut self) -> io::Result<()> {
        if self.track_terminal {
            let (width, height) = terminal::size()?;
            self.canvas.resize(width, height);
            tracing::debug!(width, height, "terminal extent refreshed");
        }
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for TerminalSurface<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("canvas", &self.canvas)
            .field("track_terminal", &self.track_terminal)
            .finish_non_exhaustive()
    }
}

/// Raw mode plus alternate screen for as long as the value lives.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
}

impl TerminalSession {
    /// Enter raw mode, optionally switch to the alternate screen, and hide
    /// the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter(alternate_screen: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide)?;
        Ok(Self { alternate_screen })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}
