//! Terminal Control
//!
//! Raw-mode lifecycle and the handful of cursor/clear operations the
//! selection and editing loops paint with. Everything here is thin glue
//! over crossterm; the core components never touch the terminal directly.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::tty::IsTty;

/// Scoped raw-mode acquisition. Raw mode is only engaged when stdin is a
/// terminal, and the prior mode is restored on drop no matter which exit
/// path runs.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        if io::stdin().is_tty() {
            enable_raw_mode()?;
            Ok(Self { active: true })
        } else {
            Ok(Self { active: false })
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
        }
    }
}

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Moves the cursor to a zero-based (line, visible column) position.
pub fn move_to<W: Write>(out: &mut W, line: usize, column: usize) -> io::Result<()> {
    execute!(out, MoveTo(column as u16, line as u16))
}

pub fn hide_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Hide)
}

pub fn show_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Show)
}
