//! List Selection
//!
//! Single-selection menu over a flat list of strings, driven by the
//! decoded key event stream.

use std::io::{self, Write};

use crossbeam_channel::select;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::error::{Error, Result};
use crate::input::event::CTRL_C;
use crate::input::{capture_events, KeyCapture, Special, SessionSignal};
use crate::term::{self, RawModeGuard};

/// Presents the items as an interactive menu and returns the chosen one.
///
/// Enter confirms; `q`, Ctrl+C, or a process interrupt quit with `None`.
/// An empty list fails fast before any terminal state is touched, and the
/// event stream closing underneath the menu is an error.
pub fn select_from_list(items: &[String]) -> Result<Option<String>> {
    if items.is_empty() {
        return Err(Error::EmptyInput);
    }

    let _raw = RawModeGuard::acquire()?;
    let mut out = io::stdout();
    term::clear_screen(&mut out)?;
    term::hide_cursor(&mut out)?;

    let capture = capture_events()?;
    let result = run_list(items, capture, &mut out);

    term::clear_screen(&mut out)?;
    term::show_cursor(&mut out)?;
    result
}

/// The selection loop, over any capture session and output sink.
pub(crate) fn run_list<W: Write>(
    items: &[String],
    capture: KeyCapture,
    out: &mut W,
) -> Result<Option<String>> {
    let mut selected = 0;
    let mut prev = 0;
    render_menu(out, items, selected, prev)?;

    loop {
        select! {
            recv(capture.signals()) -> signal => match signal {
                Ok(SessionSignal::Interrupt
                    | SessionSignal::Terminate
                    | SessionSignal::Quit) => return Ok(None),
                Ok(_) => {}
                Err(_) => return Err(Error::StreamClosed),
            },
            recv(capture.events()) -> event => {
                let event = match event {
                    Ok(event) => event,
                    Err(_) => return match capture.signals().try_recv() {
                        Ok(SessionSignal::Interrupt
                            | SessionSignal::Terminate
                            | SessionSignal::Quit) => Ok(None),
                        _ => Err(Error::StreamClosed),
                    },
                };
                match event.special {
                    Special::Up => {
                        prev = selected;
                        selected = (selected + items.len() - 1) % items.len();
                        render_menu(out, items, selected, prev)?;
                    }
                    Special::Down => {
                        prev = selected;
                        selected = (selected + 1) % items.len();
                        render_menu(out, items, selected, prev)?;
                    }
                    Special::Enter => return Ok(Some(items[selected].clone())),
                    Special::None if event.key == 'q' => return Ok(None),
                    Special::None if event.ctrl && event.code == u32::from(CTRL_C) => {
                        return Ok(None);
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Draws the menu with a `>` marker. The initial paint covers every row;
/// after that only the rows that changed are repainted.
fn render_menu<W: Write>(out: &mut W, items: &[String], selected: usize, prev: usize) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        if selected != prev && i != selected && i != prev {
            continue;
        }
        let marker = if i == selected { "> " } else { "  " };
        queue!(
            out,
            MoveTo(0, i as u16),
            Clear(ClearType::CurrentLine),
            Print(format!("{marker}{item}")),
        )?;
    }
    out.flush()?;
    Ok(())
}
