//! Address book persistence.
//!
//! [`BookStore`] is the port the session talks to; [`JsonFileStore`] is the
//! file-backed implementation used by the binary.

mod json_file;
mod traits;

pub use json_file::{JsonFileStore, FORMAT_VERSION};
pub use traits::BookStore;
