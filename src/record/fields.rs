//! Positional field mapping for stored rows
//!
//! Column order: ISBN, Read, Author, Title, Publisher, Comments, Location,
//! Series, Anthology. Older files stop after Location or Series; missing
//! trailing columns take documented defaults (empty series, not an
//! anthology).

use super::errors::{RecordError, RecordResult};
use super::Record;

/// Header row column names, in storage order
pub const HEADER: [&str; 9] = [
    "ISBN",
    "Read",
    "Author",
    "Title",
    "Publisher",
    "Comments",
    "Location",
    "Series",
    "Anthology",
];

/// Fewest columns a stored row may have
pub const MIN_FIELDS: usize = 7;

const YES: &str = "yes";
const NO: &str = "no";

fn flag(field: &str) -> bool {
    field == YES
}

impl Record {
    /// Builds a record from a stored row.
    ///
    /// Flags are true only for the exact string "yes".
    pub fn from_fields<S: AsRef<str>>(row: &[S]) -> RecordResult<Self> {
        if row.len() < MIN_FIELDS || row.len() > HEADER.len() {
            return Err(RecordError::FieldCount { found: row.len() });
        }
        let field = move |i: usize| row[i].as_ref();

        let mut record = Record::new(Some(field(0)))?;
        record.read = flag(field(1));
        record.author = field(2).to_string();
        record.title = field(3).to_string();
        record.publisher = field(4).to_string();
        record.comments = field(5).to_string();
        record.location = field(6).to_string();
        record.series = match row.len() {
            7 => String::new(),
            _ => field(7).to_string(),
        };
        record.anthology = row.len() == 9 && flag(field(8));
        Ok(record)
    }

    /// The full nine-column row for this record
    pub fn to_fields(&self) -> [&str; 9] {
        [
            self.isbn().map(|isbn| isbn.as_str()).unwrap_or(""),
            if self.read { YES } else { NO },
            self.author.as_str(),
            self.title.as_str(),
            self.publisher.as_str(),
            self.comments.as_str(),
            self.location.as_str(),
            self.series.as_str(),
            if self.anthology { YES } else { NO },
        ]
    }

    /// Whether a row is the column header.
    ///
    /// Header rows from older files may also stop after Location or Series.
    pub fn is_header<S: AsRef<str>>(row: &[S]) -> bool {
        row.len() >= MIN_FIELDS
            && row.len() <= HEADER.len()
            && row.iter().zip(HEADER.iter()).all(|(f, h)| f.as_ref() == *h)
    }
}
