//! Assistant Bot - a command-line contact manager.
//!
//! Keeps names, phone numbers and birthdays in an address book, answers
//! lookups, lists birthdays coming up in the next week, and persists the book
//! to a JSON file between runs.
//!
//! # Architecture
//!
//! - **domain**: Validated field types (name, phone, birthday)
//! - **models**: Contact records and the address book
//! - **storage**: Persistence port and the JSON file store
//! - **commands**: Command parsing, handlers and the error boundary
//! - **session**: The interactive loop and its load/save lifecycle
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;

pub use commands::{execute, Command, Context, Input, Outcome};
pub use config::Config;
pub use domain::{Birthday, Name, Phone, ValidationError};
pub use error::{CommandError, ConfigError, StorageError};
pub use models::{AddressBook, Record};
pub use session::Session;
pub use storage::{BookStore, JsonFileStore};
