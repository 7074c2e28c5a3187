//! Table Selection
//!
//! Row selection over tabular data. Formatting is delegated to
//! comfy-table; this module only positions a highlighted row cursor over
//! the rendered lines.

use std::io::{self, Write};

use comfy_table::presets::NOTHING;
use comfy_table::Table;
use crossbeam_channel::select;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use crate::error::{Error, Result};
use crate::input::event::CTRL_C;
use crate::input::{capture_events, KeyCapture, Special, SessionSignal};
use crate::term::{self, RawModeGuard};

use super::value::Value;

/// Presents rows of mixed primitive values as a table and returns the
/// chosen row. Same confirm/quit protocol as list selection.
pub fn select_from_table(rows: &[Vec<Value>]) -> Result<Option<Vec<Value>>> {
    select_table_rows(rows, &[])
}

pub(crate) fn select_table_rows(
    rows: &[Vec<Value>],
    header: &[String],
) -> Result<Option<Vec<Value>>> {
    if rows.is_empty() {
        return Err(Error::EmptyInput);
    }

    // Render once up front so unsupported values surface before any
    // terminal state is touched.
    let lines = format_table(rows, header)?;

    let _raw = RawModeGuard::acquire()?;
    let mut out = io::stdout();
    term::clear_screen(&mut out)?;
    term::hide_cursor(&mut out)?;

    let capture = capture_events()?;
    let result = run_table(rows, &lines, header, capture, &mut out);

    term::clear_screen(&mut out)?;
    term::show_cursor(&mut out)?;
    result
}

pub(crate) fn run_table<W: Write>(
    rows: &[Vec<Value>],
    lines: &[String],
    header: &[String],
    capture: KeyCapture,
    out: &mut W,
) -> Result<Option<Vec<Value>>> {
    // With a header, data row i sits on rendered line i + 1.
    let row_offset = usize::from(!header.is_empty());
    let mut selected = 0;
    render_rows(out, lines, selected + row_offset)?;

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
                        selected = (selected + rows.len() - 1) % rows.len();
                        render_rows(out, lines, selected + row_offset)?;
                    }
                    Special::Down => {
                        selected = (selected + 1) % rows.len();
                        render_rows(out, lines, selected + row_offset)?;
                    }
                    Special::Enter => return Ok(Some(rows[selected].clone())),
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

/// Formats the rows through the external table formatter, one string per
/// rendered line.
pub(crate) fn format_table(rows: &[Vec<Value>], header: &[String]) -> Result<Vec<String>> {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !header.is_empty() {
        table.set_header(header.to_vec());
    }
    for row in rows {
        let cells = row.iter().map(Value::render).collect::<Result<Vec<_>>>()?;
        table.add_row(cells);
    }
    Ok(table.to_string().lines().map(String::from).collect())
}

fn render_rows<W: Write>(out: &mut W, lines: &[String], highlighted: usize) -> Result<()> {
    for (i, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(0, i as u16), Clear(ClearType::CurrentLine))?;
        if i == highlighted {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(line.to_string()),
                SetAttribute(Attribute::Reset),
            )?;
        } else {
            queue!(out, Print(line.to_string()))?;
        }
    }
    out.flush()?;
    Ok(())
}
