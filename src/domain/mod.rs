//! Contact field value objects.
//!
//! Each field is an independent type that validates its raw text at
//! construction time, so an invalid name, phone or birthday can never be
//! stored in a record. All of them render back to text through `Display`.

pub mod birthday;
pub mod errors;
pub mod name;
pub mod phone;

pub use birthday::Birthday;
pub use errors::ValidationError;
pub use name::Name;
pub use phone::Phone;
