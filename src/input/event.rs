//! Key Events
//!
//! Decoded keyboard input units produced by the decoder.

use crate::error::{Error, Result};

/// Fixed capacity of the raw byte record: large enough for any UTF-8 rune
/// (4 bytes) or recognized escape sequence (4 bytes), zero-padded beyond
/// the payload so the size is recoverable without extra bookkeeping.
pub const RAW_CAPACITY: usize = 6;

pub const BS: u8 = 0x08;
pub const LF: u8 = 0x0a;
pub const CR: u8 = 0x0d;
pub const ESC: u8 = 0x1b;
pub const DEL: u8 = 0x7f;

pub const CTRL_A: u8 = 0x01;
pub const CTRL_C: u8 = 0x03;
pub const CTRL_D: u8 = 0x04;
pub const CTRL_E: u8 = 0x05;
pub const CTRL_J: u8 = 0x0a;
pub const CTRL_N: u8 = 0x0e;
pub const CTRL_P: u8 = 0x10;
pub const CTRL_Z: u8 = 0x1a;

/// Composite key codes for recognized escape sequences: the first three
/// sequence bytes packed big-endian, so `ESC [ A` is 0x1b5b41.
pub const UP: u32 = 0x1b5b41;
pub const DOWN: u32 = 0x1b5b42;
pub const RIGHT: u32 = 0x1b5b43;
pub const LEFT: u32 = 0x1b5b44;
pub const END: u32 = 0x1b5b46;
pub const HOME: u32 = 0x1b5b48;
pub const PAGEUP: u32 = 0x1b5b35;
pub const PAGEDOWN: u32 = 0x1b5b36;

/// Special (non-printable) key classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    None,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    Delete,
}

/// One decoded keyboard input unit.
///
/// Exactly one of `special != None`, `is_rune_start`, or plain-ASCII
/// classifies an event; `ctrl` is never set together with `is_rune_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The primary code point: the byte itself for ASCII/control input,
    /// the decoded character for multi-byte UTF-8.
    pub key: char,
    /// Raw numeric key code: the byte value, or a composite of the first
    /// escape sequence bytes.
    pub code: u32,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub special: Special,
    /// True iff this event carries a multi-byte UTF-8 code point.
    pub is_rune_start: bool,
    /// Verbatim bytes that produced the event, zero-padded to capacity.
    pub raw: [u8; RAW_CAPACITY],
}

impl KeyEvent {
    /// Plain ASCII/control byte event.
    pub fn ascii(b: u8) -> Self {
        let special = match b {
            BS => Special::Backspace,
            DEL => Special::Delete,
            _ => Special::None,
        };
        Self {
            key: b as char,
            code: u32::from(b),
            ctrl: special == Special::None && b < 0x20,
            alt: false,
            shift: false,
            special,
            is_rune_start: false,
            raw: pad(&[b]),
        }
    }

    /// Enter event; CR and LF both normalize here and are never
    /// distinguished downstream.
    pub fn enter(b: u8) -> Self {
        Self {
            key: '\n',
            code: u32::from(LF),
            ctrl: false,
            alt: false,
            shift: false,
            special: Special::Enter,
            is_rune_start: false,
            raw: pad(&[b]),
        }
    }

    /// Recognized CSI sequence (arrows, Home/End, paging).
    pub fn csi(bytes: &[u8], special: Special) -> Self {
        Self {
            key: bytes[1] as char,
            code: composite_code(bytes),
            ctrl: false,
            alt: false,
            shift: false,
            special,
            is_rune_start: false,
            raw: pad(bytes),
        }
    }

    /// ESC-prefixed sequence that did not resolve to a recognized CSI.
    pub fn alt_escape(bytes: &[u8]) -> Self {
        Self {
            key: bytes[1] as char,
            code: composite_code(bytes),
            ctrl: false,
            alt: true,
            shift: false,
            special: Special::None,
            is_rune_start: false,
            raw: pad(bytes),
        }
    }

    /// Complete multi-byte UTF-8 rune.
    pub fn rune(ch: char, bytes: &[u8]) -> Self {
        Self {
            key: ch,
            code: u32::from(bytes[0]),
            ctrl: false,
            alt: false,
            shift: false,
            special: Special::None,
            is_rune_start: true,
            raw: pad(bytes),
        }
    }

    /// Size of the raw payload in octets.
    pub fn size(&self) -> usize {
        self.raw
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(RAW_CAPACITY)
            .max(1)
    }

    /// The textual byte representation of this event: the exact rune bytes
    /// for multi-byte input, the single byte otherwise. Control events have
    /// no textual form.
    pub fn utf8_bytes(&self) -> Result<&[u8]> {
        if self.ctrl {
            return Err(Error::ControlKey);
        }
        if self.is_rune_start {
            Ok(&self.raw[..self.size()])
        } else {
            Ok(&self.raw[..1])
        }
    }
}

fn pad(bytes: &[u8]) -> [u8; RAW_CAPACITY] {
    let mut raw = [0u8; RAW_CAPACITY];
    raw[..bytes.len()].copy_from_slice(bytes);
    raw
}

fn composite_code(bytes: &[u8]) -> u32 {
    u32::from(bytes[0]) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_plain() {
        let ev = KeyEvent::ascii(b'a');
        assert_eq!(ev.key, 'a');
        assert_eq!(ev.code, 0x61);
        assert!(!ev.ctrl);
        assert_eq!(ev.special, Special::None);
        assert_eq!(ev.size(), 1);
        assert_eq!(ev.utf8_bytes().unwrap(), b"a");
    }

    #[test]
    fn test_ascii_control() {
        let ev = KeyEvent::ascii(CTRL_C);
        assert!(ev.ctrl);
        assert_eq!(ev.code, 0x03);
        assert!(ev.utf8_bytes().is_err());
    }

    #[test]
    fn test_backspace_and_delete_are_special_not_ctrl() {
        assert_eq!(KeyEvent::ascii(BS).special, Special::Backspace);
        assert!(!KeyEvent::ascii(BS).ctrl);
        assert_eq!(KeyEvent::ascii(DEL).special, Special::Delete);
        assert!(!KeyEvent::ascii(DEL).ctrl);
    }

    #[test]
    fn test_rune_size_and_bytes() {
        let ev = KeyEvent::rune('あ', "あ".as_bytes());
        assert!(ev.is_rune_start);
        assert_eq!(ev.size(), 3);
        assert_eq!(ev.utf8_bytes().unwrap(), "あ".as_bytes());
    }

    #[test]
    fn test_csi_composite_code() {
        let ev = KeyEvent::csi(&[ESC, b'[', b'A'], Special::Up);
        assert_eq!(ev.code, UP);
        assert_eq!(ev.special, Special::Up);
    }
}
