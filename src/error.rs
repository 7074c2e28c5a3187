//! Error Types
//!
//! Library-wide error taxonomy.

use thiserror::Error;

/// Errors surfaced by selection and editing entry points.
///
/// Decode-level anomalies (malformed escape sequences, invalid UTF-8) are
/// recovered inside the decoder and never appear here; the stream only ends
/// when the byte source does.
#[derive(Debug, Error)]
pub enum Error {
    /// The keyboard event stream closed (byte source ended or errored).
    #[error("keyboard event stream closed")]
    StreamClosed,

    /// A selection was requested over zero candidates.
    #[error("zero length list provided")]
    EmptyInput,

    /// The session was interrupted (Ctrl+C or process signal).
    #[error("interrupted")]
    Interrupted,

    /// A value could not be rendered for table display.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// A control key event has no textual byte representation.
    #[error("control characters cannot be formatted")]
    ControlKey,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
