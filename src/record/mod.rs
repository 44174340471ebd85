//! Book records
//!
//! A `Record` is one catalog entry. It has no `Eq` or `Ord`; `PartialEq`
//! delegates to `equals`, and the identity rule is not transitive:
//!
//! - If either record carries an ISBN, they are the same entry iff both
//!   carry the same ISBN.
//! - Otherwise they are the same entry iff author and title match.
//!
//! Two orderings exist. `compare_by_author` drives the book partition and
//! `compare_by_title` drives the anthology partition. Both are total:
//! records with equal sort keys are tie-broken on every remaining field.

mod errors;
mod fields;
mod isbn;
mod sort_key;

pub use errors::{RecordError, RecordResult};
pub use fields::{HEADER, MIN_FIELDS};
pub use isbn::Isbn;
pub use sort_key::{author_key, AuthorSortKey, TitleSortKey};

use std::cmp::Ordering;

/// One catalog entry
#[derive(Debug, Clone, Default)]
pub struct Record {
    isbn: Option<Isbn>,
    pub read: bool,
    /// Free text; multiple authors are joined with "and"
    pub author: String,
    pub title: String,
    pub publisher: String,
    pub comments: String,
    pub location: String,
    pub series: String,
    /// Places the record in the title-ordered partition
    pub anthology: bool,
}

/// Hashable identity of a record.
///
/// Matches `Record::equals` whenever both sides agree on whether an ISBN
/// is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordIdentity {
    Isbn(Isbn),
    AuthorTitle { author: String, title: String },
}

impl Record {
    /// Creates an empty record, validating `isbn` when it is non-empty.
    pub fn new(isbn: Option<&str>) -> RecordResult<Self> {
        let mut record = Self::default();
        record.set_isbn(isbn)?;
        Ok(record)
    }

    /// Creates a record with only author and title set and no ISBN.
    pub fn unnumbered(author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn isbn(&self) -> Option<&Isbn> {
        self.isbn.as_ref()
    }

    /// Sets the identifier. Empty or whitespace-only input clears it.
    ///
    /// On failure the previous identifier is kept.
    pub fn set_isbn(&mut self, isbn: Option<&str>) -> RecordResult<()> {
        self.isbn = match isbn.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Isbn::parse(raw)?),
        };
        Ok(())
    }

    /// Attaches an already validated identifier.
    pub fn with_isbn(mut self, isbn: Isbn) -> Self {
        self.isbn = Some(isbn);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = series.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn with_anthology(mut self, anthology: bool) -> Self {
        self.anthology = anthology;
        self
    }

    /// Author with any leading lowercase particles removed
    pub fn author_key(&self) -> &str {
        author_key(&self.author)
    }

    pub fn author_sort_key(&self) -> AuthorSortKey<'_> {
        AuthorSortKey {
            author_key: self.author_key(),
            series: &self.series,
            title: &self.title,
        }
    }

    pub fn title_sort_key(&self) -> TitleSortKey {
        TitleSortKey {
            title: self.title.clone(),
            series: self.series.clone(),
            author_key: self.author_key().to_string(),
        }
    }

    /// Catalog identity; see the module docs.
    pub fn equals(&self, other: &Record) -> bool {
        match (&self.isbn, &other.isbn) {
            (None, None) => self.author == other.author && self.title == other.title,
            (a, b) => a == b,
        }
    }

    pub fn identity(&self) -> RecordIdentity {
        match &self.isbn {
            Some(isbn) => RecordIdentity::Isbn(isbn.clone()),
            None => RecordIdentity::AuthorTitle {
                author: self.author.clone(),
                title: self.title.clone(),
            },
        }
    }

    /// Book ordering: (author key, series, title), then every other field.
    pub fn compare_by_author(&self, other: &Record) -> Ordering {
        self.author_sort_key()
            .cmp(&other.author_sort_key())
            .then_with(|| self.tie_break(other))
    }

    /// Anthology ordering: (title, series, author key), then every other field.
    pub fn compare_by_title(&self, other: &Record) -> Ordering {
        (self.title.as_str(), self.series.as_str(), self.author_key())
            .cmp(&(other.title.as_str(), other.series.as_str(), other.author_key()))
            .then_with(|| self.tie_break(other))
    }

    /// The ordering of this record's partition
    pub fn compare_in_partition(&self, other: &Record) -> Ordering {
        if self.anthology {
            self.compare_by_title(other)
        } else {
            self.compare_by_author(other)
        }
    }

    fn tie_break(&self, other: &Record) -> Ordering {
        let lhs = (
            self.isbn.as_ref().map(Isbn::as_str),
            self.author.as_str(),
            self.publisher.as_str(),
            self.comments.as_str(),
            self.location.as_str(),
            self.read,
            self.anthology,
        );
        let rhs = (
            other.isbn.as_ref().map(Isbn::as_str),
            other.author.as_str(),
            other.publisher.as_str(),
            other.comments.as_str(),
            other.location.as_str(),
            other.read,
            other.anthology,
        );
        lhs.cmp(&rhs)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_isbn(isbn: &str) -> Record {
        Record::new(Some(isbn)).unwrap()
    }

    #[test]
    fn test_new_without_isbn() {
        assert!(Record::new(None).unwrap().isbn().is_none());
        assert!(Record::new(Some("")).unwrap().isbn().is_none());
        assert!(Record::new(Some("  ")).unwrap().isbn().is_none());
    }

    #[test]
    fn test_new_rejects_bad_isbn() {
        let err = Record::new(Some("0-306-40615-3")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_set_isbn_failure_keeps_previous() {
        let mut record = with_isbn("0-306-40615-2");
        assert!(record.set_isbn(Some("garbage")).is_err());
        assert_eq!(record.isbn().unwrap().as_str(), "978-030640615-7");
    }

    #[test]
    fn test_equal_by_isbn_regardless_of_fields() {
        let a = with_isbn("0-306-40615-2").with_author("A").with_title("One");
        let b = with_isbn("978 0306 40615 7").with_author("B").with_title("Two");
        assert!(a.equals(&b));
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_distinct_isbns_unequal() {
        let a = with_isbn("0-306-40615-2").with_author("A").with_title("One");
        let b = with_isbn("0-19-853453-1").with_author("A").with_title("One");
        assert!(!a.equals(&b));
    }

    #[test]
    fn test_one_sided_isbn_unequal() {
        let a = with_isbn("0-306-40615-2").with_author("A").with_title("One");
        let b = Record::unnumbered("A", "One");
        assert!(!a.equals(&b));
        assert!(!b.equals(&a));
    }

    #[test]
    fn test_equal_by_author_title_without_isbn() {
        let a = Record::unnumbered("Doe, Jane", "Alpha").with_publisher("X");
        let b = Record::unnumbered("Doe, Jane", "Alpha").with_publisher("Y");
        assert!(a.equals(&b));
        assert_eq!(a, b);
        assert!(!a.equals(&Record::unnumbered("Doe, Jane", "Beta")));
    }

    #[test]
    fn test_author_ordering_ignores_particles() {
        let vries = Record::unnumbered("de Vries, Hugo", "Z");
        let adams = Record::unnumbered("Adams, Douglas", "A");
        let zed = Record::unnumbered("Zed, Zoe", "A");
        assert_eq!(adams.compare_by_author(&vries), Ordering::Less);
        assert_eq!(vries.compare_by_author(&zed), Ordering::Less);
    }

    #[test]
    fn test_author_ordering_series_before_title() {
        let a = Record::unnumbered("Doe", "Zebra").with_series("");
        let b = Record::unnumbered("Doe", "Aardvark").with_series("Saga");
        assert_eq!(a.compare_by_author(&b), Ordering::Less);
    }

    #[test]
    fn test_title_ordering() {
        let a = Record::unnumbered("Zed", "Alpha");
        let b = Record::unnumbered("Abe", "Beta");
        assert_eq!(a.compare_by_title(&b), Ordering::Less);
        assert_eq!(b.compare_by_author(&a), Ordering::Less);
    }

    #[test]
    fn test_ordering_total_on_equal_keys() {
        let a = Record::unnumbered("Doe", "Alpha").with_publisher("Penguin");
        let b = Record::unnumbered("Doe", "Alpha").with_publisher("Tor");
        assert_eq!(a.compare_by_author(&b), Ordering::Less);
        assert_eq!(b.compare_by_author(&a), Ordering::Greater);
        assert_eq!(a.compare_by_author(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_compare_in_partition() {
        let a = Record::unnumbered("Zed", "Alpha").with_anthology(true);
        let b = Record::unnumbered("Abe", "Beta").with_anthology(true);
        assert_eq!(a.compare_in_partition(&b), Ordering::Less);
    }
}
