//! In-memory sorted catalog
//!
//! Records live in two disjoint sequences chosen by the anthology flag:
//!
//! - `books`, ordered by `Record::compare_by_author`
//! - `anthologies`, ordered by `Record::compare_by_title`
//!
//! Both stay sorted after every operation. Insertion uses binary search
//! for the leftmost valid position. Membership and removal scan the
//! partition linearly, because record identity (ISBN, else author and
//! title) does not follow either sort key.
//!
//! The anthology partition keeps a parallel array of title keys so
//! insertion can narrow its search without recomputing keys. The array is
//! rebuilt lazily after bulk construction.

mod errors;

pub use errors::{CatalogError, CatalogResult};

use std::cmp::Ordering;

use crate::record::{Record, RecordResult, TitleSortKey};

/// Dual-partition sorted collection of records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Record>,
    anthologies: Vec<Record>,
    /// `anthology_keys[i] == anthologies[i].title_sort_key()` unless stale
    anthology_keys: Vec<TitleSortKey>,
    keys_stale: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from records in any order.
    ///
    /// Each partition is sorted once; the anthology key cache is left stale
    /// and rebuilt on first use.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let (mut anthologies, mut books): (Vec<Record>, Vec<Record>) =
            records.into_iter().partition(|r| r.anthology);
        books.sort_by(Record::compare_by_author);
        anthologies.sort_by(Record::compare_by_title);

        Self {
            books,
            anthologies,
            anthology_keys: Vec::new(),
            keys_stale: true,
        }
    }

    /// Recomputes the anthology key cache from the anthology sequence.
    pub fn rebuild_anthology_key_cache(&mut self) {
        self.anthology_keys = self.anthologies.iter().map(Record::title_sort_key).collect();
        self.keys_stale = false;
    }

    fn ensure_anthology_keys(&mut self) {
        if self.keys_stale {
            self.rebuild_anthology_key_cache();
        }
    }

    /// Inserts `record` at the leftmost position that keeps its partition
    /// sorted. Returns the position within the partition.
    pub fn insert(&mut self, record: Record) -> usize {
        if record.anthology {
            self.ensure_anthology_keys();
            let key = record.title_sort_key();

            // Narrow to the run of equal keys, then break ties on the full order
            let lo = self.anthology_keys.partition_point(|k| k < &key);
            let hi = lo + self.anthology_keys[lo..].partition_point(|k| k <= &key);
            let idx = lo
                + self.anthologies[lo..hi]
                    .partition_point(|r| r.compare_by_title(&record) == Ordering::Less);

            self.anthologies.insert(idx, record);
            self.anthology_keys.insert(idx, key);
            idx
        } else {
            let idx = self
                .books
                .partition_point(|r| r.compare_by_author(&record) == Ordering::Less);
            self.books.insert(idx, record);
            idx
        }
    }

    fn partition(&self, anthology: bool) -> &[Record] {
        if anthology {
            &self.anthologies
        } else {
            &self.books
        }
    }

    /// Position of a record equal to `record` within its partition.
    pub fn find(&self, record: &Record) -> Option<usize> {
        self.partition(record.anthology)
            .iter()
            .position(|r| r.equals(record))
    }

    /// Like `find`, but absence is an error.
    pub fn index(&self, record: &Record) -> CatalogResult<usize> {
        self.find(record)
            .ok_or_else(|| CatalogError::NotFound(record.identity()))
    }

    /// Removes and returns the stored record equal to `record`.
    pub fn remove(&mut self, record: &Record) -> CatalogResult<Record> {
        let idx = self.index(record)?;
        if record.anthology {
            if !self.keys_stale {
                self.anthology_keys.remove(idx);
            }
            Ok(self.anthologies.remove(idx))
        } else {
            Ok(self.books.remove(idx))
        }
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.find(record).is_some()
    }

    /// Whether any record in either partition carries `isbn`.
    ///
    /// Fails if `isbn` is not a valid ISBN. Empty input matches nothing.
    pub fn contains_isbn(&self, isbn: &str) -> RecordResult<bool> {
        let probe = Record::new(Some(isbn))?;
        if probe.isbn().is_none() {
            return Ok(false);
        }
        Ok(self.iter().any(|r| r.equals(&probe)))
    }

    /// Total records across both partitions
    pub fn len(&self) -> usize {
        self.books.len() + self.anthologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Standalone books in author order
    pub fn books(&self) -> &[Record] {
        &self.books
    }

    /// Anthologies in title order
    pub fn anthologies(&self) -> &[Record] {
        &self.anthologies
    }

    /// Books, then anthologies
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.books.iter().chain(self.anthologies.iter())
    }

    /// Whether both partitions satisfy their ordering.
    pub fn is_sorted(&self) -> bool {
        self.books
            .windows(2)
            .all(|w| w[0].compare_by_author(&w[1]) != Ordering::Greater)
            && self
                .anthologies
                .windows(2)
                .all(|w| w[0].compare_by_title(&w[1]) != Ordering::Greater)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Record;
    type IntoIter = std::iter::Chain<std::slice::Iter<'a, Record>, std::slice::Iter<'a, Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter().chain(self.anthologies.iter())
    }
}
