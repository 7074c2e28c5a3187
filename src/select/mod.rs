//! Selection
//!
//! Interactive single-selection over lists and tables.

pub mod dataset;
pub mod list;
pub mod table;
pub mod value;

// Re-exports
pub use dataset::{Data, Dataset, Selection};
pub use list::select_from_list;
pub use table::select_from_table;
pub use value::Value;
