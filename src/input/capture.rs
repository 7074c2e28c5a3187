//! Keyboard Capture
//!
//! Background reader thread that owns the byte source and all decoder
//! state, pushing decoded events onto a bounded channel. Process-level
//! interrupt/suspend requests travel on a separate, low-latency signal
//! channel so consumers can react without draining in-flight events.

use std::io::{self, Read};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use signal_hook::consts::signal::{SIGCONT, SIGINT, SIGQUIT, SIGTERM, SIGTSTP};
use signal_hook::iterator::{Handle, Signals};

use super::decoder::Decoder;
use super::event::{KeyEvent, CTRL_C, CTRL_Z};

const EVENT_QUEUE_DEPTH: usize = 10;
const SIGNAL_QUEUE_DEPTH: usize = 4;

/// Process-level session notification, delivered out of band from key
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    Interrupt,
    Suspend,
    Resume,
    Terminate,
    Quit,
}

impl SessionSignal {
    /// The notification a decoded event raises, if any: Ctrl+C requests an
    /// interrupt, Ctrl+Z a suspend.
    fn from_event(event: &KeyEvent) -> Option<Self> {
        if !event.ctrl {
            return None;
        }
        match event.code {
            c if c == u32::from(CTRL_C) => Some(Self::Interrupt),
            c if c == u32::from(CTRL_Z) => Some(Self::Suspend),
            _ => None,
        }
    }

    fn from_os(signal: i32) -> Option<Self> {
        match signal {
            SIGINT => Some(Self::Interrupt),
            SIGTSTP => Some(Self::Suspend),
            SIGCONT => Some(Self::Resume),
            SIGTERM => Some(Self::Terminate),
            SIGQUIT => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Handle to a running capture session: an event stream plus a signal
/// stream. The event channel disconnecting means the byte source ended and
/// the session cannot be resumed.
pub struct KeyCapture {
    events: Receiver<KeyEvent>,
    signals: Receiver<SessionSignal>,
    // Keeps the signal channel connected for the whole session. Without it
    // a finished reader thread would disconnect the channel while decoded
    // events are still buffered, and a disconnected channel is always
    // ready in `select!`, jumping the queue ahead of those events.
    _signal_keepalive: Sender<SessionSignal>,
    signal_handle: Option<Handle>,
}

impl KeyCapture {
    pub fn events(&self) -> &Receiver<KeyEvent> {
        &self.events
    }

    pub fn signals(&self) -> &Receiver<SessionSignal> {
        &self.signals
    }
}

impl Drop for KeyCapture {
    fn drop(&mut self) {
        if let Some(handle) = self.signal_handle.take() {
            handle.close();
        }
    }
}

/// Starts capturing keyboard events from standard input and OS signal
/// delivery. The caller is responsible for raw-mode handling (see
/// [`crate::term::RawModeGuard`]).
pub fn capture_events() -> io::Result<KeyCapture> {
    let (event_tx, event_rx) = bounded(EVENT_QUEUE_DEPTH);
    let (signal_tx, signal_rx) = bounded(SIGNAL_QUEUE_DEPTH);

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGTSTP, SIGCONT, SIGQUIT])?;
    let signal_handle = signals.handle();
    let os_tx = signal_tx.clone();
    thread::spawn(move || {
        for signal in signals.forever() {
            let Some(mapped) = SessionSignal::from_os(signal) else {
                continue;
            };
            if os_tx.send(mapped).is_err() {
                break;
            }
        }
    });

    let keepalive = signal_tx.clone();
    thread::spawn(move || read_loop(io::stdin(), event_tx, signal_tx));
    Ok(KeyCapture {
        events: event_rx,
        signals: signal_rx,
        _signal_keepalive: keepalive,
        signal_handle: Some(signal_handle),
    })
}

/// Starts a capture session over an arbitrary byte source. Used by tests
/// and by callers that feed input from somewhere other than stdin; OS
/// signals are not hooked.
pub fn capture_from<R: Read + Send + 'static>(source: R) -> KeyCapture {
    let (event_tx, event_rx) = bounded(EVENT_QUEUE_DEPTH);
    let (signal_tx, signal_rx) = bounded(SIGNAL_QUEUE_DEPTH);
    let keepalive = signal_tx.clone();
    thread::spawn(move || read_loop(source, event_tx, signal_tx));
    KeyCapture {
        events: event_rx,
        signals: signal_rx,
        _signal_keepalive: keepalive,
        signal_handle: None,
    }
}

fn read_loop<R: Read>(mut source: R, events: Sender<KeyEvent>, signals: Sender<SessionSignal>) {
    let mut decoder = Decoder::new();
    let mut buf = [0u8; 64];
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        for event in decoder.feed(&buf[..n]) {
            let signal = SessionSignal::from_event(&event);
            if events.send(event).is_err() {
                return;
            }
            match signal {
                // Ctrl+C closes the stream after the event is delivered.
                Some(SessionSignal::Interrupt) => {
                    let _ = signals.send(SessionSignal::Interrupt);
                    return;
                }
                Some(other) => {
                    let _ = signals.send(other);
                }
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use super::super::event::Special;
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[test]
    fn test_events_delivered_in_order() {
        let capture = capture_from(Cursor::new(b"ab\x1b[B".to_vec()));
        let keys: Vec<_> = (0..3)
            .map(|_| capture.events().recv_timeout(TIMEOUT).unwrap())
            .collect();
        assert_eq!(keys[0].key, 'a');
        assert_eq!(keys[1].key, 'b');
        assert_eq!(keys[2].special, Special::Down);
    }

    #[test]
    fn test_stream_closes_on_source_end() {
        let capture = capture_from(Cursor::new(b"x".to_vec()));
        assert_eq!(capture.events().recv_timeout(TIMEOUT).unwrap().key, 'x');
        assert!(capture.events().recv_timeout(TIMEOUT).is_err());
    }

    #[test]
    fn test_signal_channel_stays_connected_after_source_end() {
        use crossbeam_channel::TryRecvError;

        let capture = capture_from(Cursor::new(b"x".to_vec()));
        // Drain the event stream to its disconnect.
        assert_eq!(capture.events().recv_timeout(TIMEOUT).unwrap().key, 'x');
        assert!(capture.events().recv_timeout(TIMEOUT).is_err());
        // The signal channel must still be open (empty, not disconnected):
        // a disconnected channel would win every `select!` and preempt
        // buffered events in the consumer loops.
        assert_eq!(capture.signals().try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_ctrl_c_raises_interrupt_and_terminates() {
        let capture = capture_from(Cursor::new(vec![CTRL_C, b'z']));
        let ev = capture.events().recv_timeout(TIMEOUT).unwrap();
        assert!(ev.ctrl);
        assert_eq!(
            capture.signals().recv_timeout(TIMEOUT).unwrap(),
            SessionSignal::Interrupt
        );
        // The trailing byte is never delivered: the stream ended.
        assert!(capture.events().recv_timeout(TIMEOUT).is_err());
    }

    #[test]
    fn test_ctrl_z_raises_suspend_without_terminating() {
        let capture = capture_from(Cursor::new(vec![CTRL_Z, b'z']));
        let first = capture.events().recv_timeout(TIMEOUT).unwrap();
        assert!(first.ctrl);
        assert_eq!(
            capture.signals().recv_timeout(TIMEOUT).unwrap(),
            SessionSignal::Suspend
        );
        assert_eq!(capture.events().recv_timeout(TIMEOUT).unwrap().key, 'z');
    }

    #[test]
    fn test_rune_split_across_reads() {
        // A reader that yields one byte per read call.
        struct OneByte(Vec<u8>, usize);
        impl Read for OneByte {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.1 >= self.0.len() {
                    return Ok(0);
                }
                buf[0] = self.0[self.1];
                self.1 += 1;
                Ok(1)
            }
        }
        let capture = capture_from(OneByte("ゆ".as_bytes().to_vec(), 0));
        let ev = capture.events().recv_timeout(TIMEOUT).unwrap();
        assert!(ev.is_rune_start);
        assert_eq!(ev.key, 'ゆ');
    }
}
