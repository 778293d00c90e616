use crate::error::StorageResult;
use crate::models::AddressBook;

/// Persistence port for the address book.
///
/// The whole book is loaded once at startup and saved once at exit, so
/// implementations deal in complete snapshots rather than single records.
pub trait BookStore {
    /// Load the stored book, or an empty one if nothing has been saved yet.
    fn load(&self) -> StorageResult<AddressBook>;

    /// Replace the stored book with `book`.
    fn save(&self, book: &AddressBook) -> StorageResult<()>;
}
