//! External metadata lookup
//!
//! A lookup source takes an ISBN and returns zero or more partial records
//! (ISBN, author, title, publisher filled in). Lookups never modify a
//! catalog; callers decide what to do with the candidates.

mod errors;
pub mod google;

pub use errors::{BoxError, LookupError, LookupResult};
pub use google::{GoogleBooks, Transport};

use crate::record::{Isbn, Record};

/// Source of bibliographic metadata keyed by ISBN
pub trait IsbnLookup {
    /// An empty vector means the source knows nothing about `isbn`.
    fn lookup(&self, isbn: &Isbn) -> LookupResult<Vec<Record>>;
}
