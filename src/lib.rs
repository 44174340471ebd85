//! bookshelf - A personal book catalog backed by a flat delimited text file
//!
//! Records are kept in two ordered partitions: books (by author) and
//! anthologies (by title). The file is append-only; removals take effect
//! in memory and are not written back.

pub mod catalog;
pub mod config;
pub mod location;
pub mod lookup;
pub mod observability;
pub mod record;
pub mod store;

pub use catalog::{Catalog, CatalogError, CatalogResult};
pub use config::{ConfigError, ConfigResult, ShelfConfig};
pub use location::LocationMapper;
pub use lookup::{IsbnLookup, LookupError, LookupResult};
pub use record::{Isbn, Record, RecordError, RecordResult};
pub use store::{OpenMode, Store, StoreError, StoreResult};
