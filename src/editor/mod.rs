//! Editor
//!
//! Cursor-addressable multi-line text editing over the decoded key event
//! stream, with Emacs-style control bindings.

pub mod buffer;

pub use buffer::{CursorPosition, EditBuffer};

use std::io::{self, Stdout, Write};

use crossbeam_channel::select;
use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::error::{Error, Result};
use crate::input::event::{CTRL_A, CTRL_D, CTRL_E, CTRL_J, CTRL_N, CTRL_P};
use crate::input::{capture_events, KeyCapture, KeyEvent, SessionSignal, Special};
use crate::term::{self, RawModeGuard};

/// Interactive editor session: an owned document plus the sink it paints
/// to. The renderer only ever receives line snapshots and the visible
/// cursor position.
pub struct Editor<W: Write = Stdout> {
    buffer: EditBuffer,
    out: W,
}

impl Editor<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Editor<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Editor<W> {
    pub fn with_output(out: W) -> Self {
        Self {
            buffer: EditBuffer::new(),
            out,
        }
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Runs an editing session over standard input until Ctrl+D confirms
    /// (returning the document, lines joined with `\n`) or the session is
    /// interrupted.
    pub fn edit(&mut self) -> Result<String> {
        let _raw = RawModeGuard::acquire()?;
        term::clear_screen(&mut self.out)?;
        let capture = capture_events()?;
        self.run(capture)
    }

    /// The event loop, over any capture session. Separated from [`edit`]
    /// so sessions can be driven from injected byte sources.
    ///
    /// [`edit`]: Editor::edit
    pub fn run(&mut self, capture: KeyCapture) -> Result<String> {
        self.redraw_from(0)?;
        loop {
            select! {
                recv(capture.signals()) -> signal => match signal {
                    Ok(SessionSignal::Interrupt | SessionSignal::Terminate | SessionSignal::Quit) => {
                        return Err(Error::Interrupted);
                    }
                    Ok(_) => {}
                    Err(_) => return Err(Error::StreamClosed),
                },
                recv(capture.events()) -> event => {
                    let event = match event {
                        Ok(event) => event,
                        // The worker raises Interrupt before closing the
                        // stream, so a pending signal decides which exit
                        // this is.
                        Err(_) => match capture.signals().try_recv() {
                            Ok(SessionSignal::Interrupt
                                | SessionSignal::Terminate
                                | SessionSignal::Quit) => return Err(Error::Interrupted),
                            _ => return Err(Error::StreamClosed),
                        },
                    };
                    if let Some(text) = self.apply(&event)? {
                        term::move_to(&mut self.out, 0, 0)?;
                        return Ok(text);
                    }
                }
            }
        }
    }

    /// Applies one event; returns the final document when the session is
    /// confirmed with Ctrl+D.
    fn apply(&mut self, event: &KeyEvent) -> Result<Option<String>> {
        match event.special {
            Special::Enter => {
                self.buffer.split_line();
                let start = self.buffer.cursor().line - 1;
                self.redraw_from(start)?;
            }
            // Terminals send DEL for the Backspace key; both erase
            // backwards here.
            Special::Backspace | Special::Delete => {
                let was_line_head = self.buffer.on_line_head();
                self.buffer.backspace();
                if was_line_head {
                    self.redraw_from(self.buffer.cursor().line)?;
                } else {
                    self.redraw_line()?;
                }
            }
            Special::Up => {
                self.buffer.move_up();
                self.reposition()?;
            }
            Special::Down => {
                self.buffer.move_down();
                self.reposition()?;
            }
            Special::Left => {
                self.buffer.move_left();
                self.reposition()?;
            }
            Special::Right => {
                self.buffer.move_right();
                self.reposition()?;
            }
            Special::Home => {
                self.buffer.cursor_home();
                self.reposition()?;
            }
            Special::End => {
                self.buffer.cursor_end();
                self.reposition()?;
            }
            Special::PageUp | Special::PageDown => {}
            Special::None if event.ctrl => return self.apply_control(event),
            Special::None if event.alt => {}
            Special::None => {
                if let Ok(bytes) = event.utf8_bytes() {
                    if let Ok(text) = std::str::from_utf8(bytes) {
                        self.buffer.insert(text);
                        self.redraw_line()?;
                    }
                }
            }
        }
        Ok(None)
    }

    fn apply_control(&mut self, event: &KeyEvent) -> Result<Option<String>> {
        match event.code as u8 {
            CTRL_D => return Ok(Some(self.buffer.text())),
            CTRL_A => self.buffer.cursor_home(),
            CTRL_E => self.buffer.cursor_end(),
            CTRL_P => self.buffer.move_up(),
            CTRL_N => self.buffer.move_down(),
            CTRL_J => {
                self.buffer.split_line();
                let start = self.buffer.cursor().line - 1;
                self.redraw_from(start)?;
                return Ok(None);
            }
            _ => return Ok(None),
        }
        self.reposition()?;
        Ok(None)
    }

    /// Repaints the current line only (in-line edits).
    fn redraw_line(&mut self) -> Result<()> {
        let line = self.buffer.cursor().line;
        queue!(
            self.out,
            MoveTo(0, line as u16),
            Clear(ClearType::CurrentLine),
            Print(self.buffer.current_line().to_string()),
        )?;
        self.reposition()
    }

    /// Repaints every line from `start` down (structural edits that shift
    /// following lines).
    fn redraw_from(&mut self, start: usize) -> Result<()> {
        queue!(
            self.out,
            MoveTo(0, start as u16),
            Clear(ClearType::FromCursorDown),
        )?;
        for (i, line) in self.buffer.lines().iter().enumerate().skip(start) {
            queue!(self.out, MoveTo(0, i as u16), Print(line.to_string()))?;
        }
        self.reposition()
    }

    /// Moves the terminal cursor to the document cursor's visible position.
    fn reposition(&mut self) -> Result<()> {
        let line = self.buffer.cursor().line;
        let column = self.buffer.visible_column();
        queue!(self.out, MoveTo(column as u16, line as u16))?;
        self.out.flush()?;
        Ok(())
    }
}
