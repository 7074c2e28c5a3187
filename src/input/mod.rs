//! Input Pipeline
//!
//! Raw terminal bytes in, structured key events out.

pub mod capture;
pub mod decoder;
pub mod event;

// Re-exports
pub use capture::{capture_events, capture_from, KeyCapture, SessionSignal};
pub use decoder::Decoder;
pub use event::{KeyEvent, Special, RAW_CAPACITY};
