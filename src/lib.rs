//! termpick — interactive terminal selection and line editing.
//!
//! A slim interactive layer for CLIs: select an item from a list or a row
//! from a table with the arrow keys, or edit multi-line text in place.
//! Behind both sits a byte-level keyboard decoder that handles escape
//! sequences and UTF-8 input split across arbitrary reads, and a line
//! buffer whose cursor always lands on character boundaries.
//!
//! # List selection
//!
//! ```no_run
//! fn main() -> termpick::Result<()> {
//!     let items = vec!["Option A".to_string(), "Option B".to_string()];
//!     if let Some(choice) = termpick::select_from_list(&items)? {
//!         println!("you selected: {choice}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Table row selection
//!
//! ```no_run
//! use termpick::{select_from_table, Value};
//!
//! fn main() -> termpick::Result<()> {
//!     let rows = vec![
//!         vec![Value::from("a"), Value::from("Apple Inc."), Value::from(178.72)],
//!         vec![Value::from("b"), Value::from("Broadcom"), Value::from(376.04)],
//!     ];
//!     if let Some(row) = select_from_table(&rows)? {
//!         println!("{row:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Text editing
//!
//! ```no_run
//! fn main() -> termpick::Result<()> {
//!     let text = termpick::Editor::new().edit()?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! Navigation: arrow keys move, Enter confirms a selection, `q` or Ctrl+C
//! quits without one. The editor confirms with Ctrl+D and also understands
//! Emacs-style Ctrl+A/E/P/N/J.

pub mod editor;
pub mod error;
pub mod input;
pub mod select;
pub mod term;

// Re-exports
pub use editor::{CursorPosition, EditBuffer, Editor};
pub use error::{Error, Result};
pub use input::{capture_events, capture_from, Decoder, KeyCapture, KeyEvent, SessionSignal, Special};
pub use select::{select_from_list, select_from_table, Data, Dataset, Selection, Value};
