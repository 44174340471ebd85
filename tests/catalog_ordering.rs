//! Catalog Ordering Tests
//!
//! - Both partitions stay sorted after any sequence of inserts
//! - Insert returns the position the record ends up at
//! - Removal restores the previous sequences
//! - Lookup is by identity, not by full field equality

use bookshelf::{Catalog, CatalogError, Record};
use proptest::prelude::*;

// =============================================================================
// Test Utilities
// =============================================================================

fn book(author: &str, title: &str) -> Record {
    Record::unnumbered(author, title)
}

fn anthology(title: &str) -> Record {
    Record::unnumbered("Various", title).with_anthology(true)
}

fn titles(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        prop::option::of(prop::sample::select(vec![
            "0-306-40615-2",
            "0-8044-2957-X",
            "978-0-19-853453-2",
        ])),
        prop::sample::select(vec!["", "Le Guin, Ursula", "Banks, Iain", "Banks, Iain M.", "Asimov"]),
        "[A-C][a-c]{0,3}",
        prop::sample::select(vec!["", "Culture", "Earthsea"]),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(isbn, author, title, series, read, anth)| {
            Record::new(isbn)
                .unwrap()
                .with_author(author)
                .with_title(title)
                .with_series(series)
                .with_read(read)
                .with_anthology(anth)
        })
}

// =============================================================================
// Ordering
// =============================================================================

/// Books are ordered by author, skipping leading lowercase particles.
#[test]
fn test_books_ordered_by_author_key() {
    let mut catalog = Catalog::new();
    catalog.insert(book("van Vogt, A. E.", "Slan"));
    catalog.insert(book("Simak, Clifford", "City"));
    catalog.insert(book("Asimov, Isaac", "Foundation"));

    assert_eq!(titles(catalog.books()), vec!["Foundation", "City", "Slan"]);
    assert!(catalog.anthologies().is_empty());
}

/// Within one author, series groups before title.
#[test]
fn test_series_before_title() {
    let mut catalog = Catalog::new();
    catalog.insert(book("Banks, Iain", "Excession").with_series("Culture"));
    catalog.insert(book("Banks, Iain", "The Wasp Factory"));
    catalog.insert(book("Banks, Iain", "Consider Phlebas").with_series("Culture"));

    assert_eq!(
        titles(catalog.books()),
        vec!["The Wasp Factory", "Consider Phlebas", "Excession"]
    );
}

/// Anthologies are ordered by title and kept apart from books.
#[test]
fn test_anthologies_ordered_by_title() {
    let mut catalog = Catalog::new();
    catalog.insert(anthology("Dangerous Visions"));
    catalog.insert(book("Aardvark, Al", "Zzz"));
    catalog.insert(anthology("Again, Dangerous Visions"));

    assert_eq!(
        titles(catalog.anthologies()),
        vec!["Again, Dangerous Visions", "Dangerous Visions"]
    );
    assert_eq!(titles(catalog.books()), vec!["Zzz"]);
    assert_eq!(catalog.len(), 3);
}

/// Iteration yields all books, then all anthologies.
#[test]
fn test_iteration_order() {
    let catalog = Catalog::from_records(vec![
        anthology("B"),
        book("Zed", "A"),
        anthology("A"),
        book("Abe", "C"),
    ]);

    let all: Vec<&str> = catalog.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(all, vec!["C", "A", "A", "B"]);
    assert_eq!((&catalog).into_iter().count(), 4);
}

// =============================================================================
// Identity
// =============================================================================

/// Records with the same ISBN are the same record whatever else differs.
#[test]
fn test_find_by_isbn_identity() {
    let mut catalog = Catalog::new();
    let stored = Record::new(Some("0-306-40615-2"))
        .unwrap()
        .with_author("Someone")
        .with_title("A Title");
    catalog.insert(stored);

    let probe = Record::new(Some("9780306406157"))
        .unwrap()
        .with_author("Someone")
        .with_title("A Title")
        .with_comments("different");
    assert_eq!(catalog.find(&probe), Some(0));
    assert!(catalog.contains(&probe));
    assert!(catalog.contains_isbn("978-0-306-40615-7").unwrap());
    assert!(!catalog.contains_isbn("0-8044-2957-X").unwrap());
    assert!(catalog.contains_isbn("123").is_err());
}

/// An ISBN on only one side never matches, even with equal author/title.
#[test]
fn test_isbn_on_one_side_is_not_equal() {
    let mut catalog = Catalog::new();
    catalog.insert(book("Alpha", "A"));

    let probe = Record::new(Some("0-306-40615-2"))
        .unwrap()
        .with_author("Alpha")
        .with_title("A");
    assert_eq!(catalog.find(&probe), None);
}

/// Removing an absent record is reported and leaves the catalog unchanged.
#[test]
fn test_remove_missing() {
    let mut catalog = Catalog::new();
    catalog.insert(book("Alpha", "A"));

    let err = catalog.remove(&book("Beta", "B")).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    assert_eq!(err.code(), "SHELF_RECORD_NOT_FOUND");
    assert_eq!(catalog.len(), 1);
}

/// Duplicates are allowed; removal takes one of them.
#[test]
fn test_duplicates() {
    let mut catalog = Catalog::new();
    catalog.insert(book("Alpha", "A"));
    catalog.insert(book("Alpha", "A"));
    assert_eq!(catalog.len(), 2);

    catalog.remove(&book("Alpha", "A")).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains(&book("Alpha", "A")));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Incremental inserts keep both partitions sorted.
    #[test]
    fn prop_inserts_keep_sorted(records in prop::collection::vec(arb_record(), 0..40)) {
        let mut catalog = Catalog::new();
        for record in records.iter().cloned() {
            let anth = record.anthology;
            let idx = catalog.insert(record.clone());
            let partition = if anth { catalog.anthologies() } else { catalog.books() };
            prop_assert!(partition[idx].compare_in_partition(&record).is_eq());
            prop_assert!(catalog.is_sorted());
        }
        prop_assert_eq!(catalog.len(), records.len());
    }

    /// Bulk construction gives the same sequences as incremental inserts.
    #[test]
    fn prop_bulk_matches_incremental(records in prop::collection::vec(arb_record(), 0..40)) {
        let bulk = Catalog::from_records(records.clone());
        let mut incremental = Catalog::new();
        for record in records {
            incremental.insert(record);
        }

        prop_assert!(bulk.is_sorted());
        for (a, b) in bulk.iter().zip(incremental.iter()) {
            prop_assert!(a.compare_in_partition(b).is_eq());
        }
    }

    /// A record sharing an ISBN is found however its other fields differ,
    /// and one without an ISBN never matches a numbered record.
    #[test]
    fn prop_isbn_identity(
        records in prop::collection::vec(arb_record(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let catalog = Catalog::from_records(records.clone());
        let target = pick.get(&records);

        let renamed = target.clone().with_author("Someone Else").with_title("Other");
        prop_assert_eq!(catalog.find(&renamed).is_some(), target.isbn().is_some());

        if let Some(isbn) = target.isbn() {
            prop_assert!(catalog.contains_isbn(isbn.as_str()).unwrap());
            let unnumbered = Record::unnumbered(target.author.clone(), target.title.clone())
                .with_anthology(target.anthology);
            let matches_unnumbered = catalog.iter().any(|r| {
                r.isbn().is_none()
                    && r.anthology == target.anthology
                    && r.author == target.author
                    && r.title == target.title
            });
            prop_assert_eq!(catalog.contains(&unnumbered), matches_unnumbered);
        }
    }

    /// Insert followed by remove of the same record restores the catalog.
    #[test]
    fn prop_insert_remove_restores(
        records in prop::collection::vec(arb_record(), 0..20),
        extra in arb_record(),
    ) {
        let mut catalog = Catalog::from_records(records);
        let before: Vec<Record> = catalog.iter().cloned().collect();

        catalog.insert(extra.clone());
        catalog.remove(&extra).unwrap();

        prop_assert!(catalog.is_sorted());
        prop_assert_eq!(catalog.len(), before.len());
        let mut remaining: Vec<Record> = catalog.iter().cloned().collect();
        for record in &before {
            let pos = remaining.iter().position(|r| r.equals(record));
            prop_assert!(pos.is_some());
            if let Some(pos) = pos {
                remaining.remove(pos);
            }
        }
    }
}
