//! Keyboard Decoder
//!
//! Byte-stream to key-event state machine. Terminal input interleaves
//! single bytes, 3-4 byte CSI sequences, and 1-4 byte UTF-8 runes with no
//! length prefix, and a read call may split any of them, so every decision
//! here is a resumable per-byte transition over an explicit state.

use super::event::{KeyEvent, Special, CR, ESC, LF, RAW_CAPACITY};

/// Decoder state: idle, or accumulating one in-flight unit.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    /// ESC-prefixed sequence, first byte is always ESC.
    Escape(Vec<u8>),
    /// UTF-8 multi-byte sequence, first byte always has the high bit set.
    Rune(Vec<u8>),
}

/// Resumable keyboard decoder. Feed it byte chunks of any size; complete
/// events come out, partial units stay buffered for the next chunk.
#[derive(Debug)]
pub struct Decoder {
    state: State,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Consumes one read-chunk of bytes, returning every event completed by
    /// it, in input order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        let mut out = Vec::new();
        for &b in bytes {
            let state = std::mem::replace(&mut self.state, State::Idle);
            self.state = step(state, b, &mut out);
        }
        out
    }
}

fn step(state: State, b: u8, out: &mut Vec<KeyEvent>) -> State {
    match state {
        State::Idle => match b {
            ESC => State::Escape(vec![b]),
            CR | LF => {
                out.push(KeyEvent::enter(b));
                State::Idle
            }
            _ if b < 0x80 => {
                out.push(KeyEvent::ascii(b));
                State::Idle
            }
            _ => resolve_rune(vec![b], out),
        },
        State::Escape(mut buf) => {
            buf.push(b);
            resolve_escape(buf, out)
        }
        State::Rune(mut buf) => {
            buf.push(b);
            resolve_rune(buf, out)
        }
    }
}

/// Re-scans bytes from the idle state, as if they had just arrived.
fn rescan(bytes: &[u8], out: &mut Vec<KeyEvent>) -> State {
    let mut state = State::Idle;
    for &b in bytes {
        state = step(state, b, out);
    }
    state
}

fn resolve_escape(buf: Vec<u8>, out: &mut Vec<KeyEvent>) -> State {
    if buf.len() >= 3 && buf[1] == b'[' {
        if buf.len() == 3 {
            let special = match buf[2] {
                b'A' => Some(Special::Up),
                b'B' => Some(Special::Down),
                b'C' => Some(Special::Right),
                b'D' => Some(Special::Left),
                b'F' => Some(Special::End),
                b'H' => Some(Special::Home),
                _ => None,
            };
            if let Some(special) = special {
                out.push(KeyEvent::csi(&buf, special));
                return State::Idle;
            }
        }
        if buf.len() == 4 && buf[3] == b'~' {
            let special = match buf[2] {
                b'5' => Some(Special::PageUp),
                b'6' => Some(Special::PageDown),
                _ => None,
            };
            if let Some(special) = special {
                out.push(KeyEvent::csi(&buf, special));
                return State::Idle;
            }
        }
    }
    if buf.len() >= 4 {
        // Unrecognized escape: emit once as an alt-tagged event.
        out.push(KeyEvent::alt_escape(&buf));
        return State::Idle;
    }
    State::Escape(buf)
}

fn resolve_rune(buf: Vec<u8>, out: &mut Vec<KeyEvent>) -> State {
    match std::str::from_utf8(&buf) {
        Ok(s) => {
            // Resolution runs after every byte, so the first success is
            // exactly one complete rune.
            if let Some(ch) = s.chars().next() {
                out.push(KeyEvent::rune(ch, &buf));
            }
            State::Idle
        }
        Err(e) => match e.error_len() {
            // Invalid leading bytes: drop exactly those and re-scan the
            // remainder within the same call.
            Some(bad) => rescan(&buf[e.valid_up_to() + bad..], out),
            // Well-formed but incomplete prefix: wait for more bytes,
            // subject to the overflow guard.
            None if buf.len() <= RAW_CAPACITY => State::Rune(buf),
            // Garbage that never resolved: flush byte-by-byte so the
            // stream always makes forward progress.
            None => {
                for &b in &buf {
                    out.push(KeyEvent::ascii(b));
                }
                State::Idle
            }
        },
    }
}
