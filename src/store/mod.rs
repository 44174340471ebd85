//! Persistence adapter binding a `Catalog` to a delimited text file
//!
//! # Design
//!
//! - The file is read once on open (when readable) and replayed into a
//!   fresh catalog; on-disk row order does not matter.
//! - Every `add_record` appends exactly one row. Existing rows are never
//!   rewritten.
//!   A last row without a line terminator gets one before the first append.
//! - Removals are in-memory only. A removed record is still in the file
//!   and comes back on the next load unless the caller rewrites the file.
//! - An empty writable file gets the header row exactly once.
//! - Rows are buffered; `commit` flushes and syncs them. Until a commit
//!   succeeds the file may lag behind the catalog.
//!
//! One `Store` owns its file. Concurrent writers to the same file are not
//! coordinated.

mod codec;
mod errors;
mod mode;

pub use codec::{encode_row, DecodeError, Row, RowReader};
use codec::TERMINATOR;
pub use errors::{StoreError, StoreResult};
pub use mode::OpenMode;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogError};
use crate::observability::{log_event_with_fields, Event};
use crate::record::{Record, HEADER};

/// A catalog mirrored to a backing file
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    mode: OpenMode,
    /// `None` once closed
    file: Option<BufWriter<File>>,
    has_header: bool,
    /// The file's last row has no line terminator yet
    unterminated: bool,
    /// Rows written since the last commit
    pending_rows: usize,
    catalog: Catalog,
}

impl Store {
    /// Opens `path` in `mode`, loading it when readable.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` if the file cannot be opened or read
    /// - `StoreError::Parse` if any row is malformed; nothing is loaded and
    ///   the file is released
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = mode
            .options()
            .open(&path)
            .map_err(|e| StoreError::io(&path, "Failed to open catalog file", e))?;

        let mut store = Self {
            path,
            mode,
            file: Some(BufWriter::new(file)),
            has_header: false,
            unterminated: false,
            pending_rows: 0,
            catalog: Catalog::new(),
        };
        let path_str = store.path.display().to_string();
        log_event_with_fields(
            Event::StoreOpened,
            &[("mode", mode.as_str()), ("path", path_str.as_str())],
        );

        if mode.readable() {
            store.load()?;
        }

        if mode.writable() {
            store.unterminated = store.last_row_unterminated()?;
        }

        if mode.writable() && !store.has_header && store.catalog.is_empty() {
            // A non-readable file may already hold rows we never saw
            if mode.readable() || store.file_len()? == 0 {
                store.write_header()?;
            }
        }

        Ok(store)
    }

    /// Re-reads the whole file into a fresh catalog, replacing the current
    /// one. Unsaved in-memory removals are lost.
    ///
    /// # Errors
    ///
    /// `StoreError::State` if the store is closed or was not opened for
    /// reading; otherwise as `open`. On error the current catalog is kept.
    pub fn reload(&mut self) -> StoreResult<()> {
        if self.file.is_none() {
            return Err(StoreError::State("No backing file attached".into()));
        }
        if !self.mode.readable() {
            return Err(StoreError::State(format!(
                "Backing file is not readable (opened in {} mode)",
                self.mode
            )));
        }
        self.load()
    }

    fn load(&mut self) -> StoreResult<()> {
        let path_str = self.path.display().to_string();
        let result = self.read_records();
        let (records, has_header) = match result {
            Ok(loaded) => loaded,
            Err(e) => {
                // A failed scan may stop mid-file; appends must still land at the end
                if let Some(writer) = self.file.as_mut() {
                    let _ = writer.seek(SeekFrom::End(0));
                }
                log_event_with_fields(
                    Event::LoadFailed,
                    &[("error", e.to_string().as_str()), ("path", path_str.as_str())],
                );
                return Err(e);
            }
        };

        self.catalog = Catalog::from_records(records);
        self.has_header = has_header;
        log_event_with_fields(
            Event::CatalogLoaded,
            &[
                ("anthologies", self.catalog.anthologies().len().to_string().as_str()),
                ("books", self.catalog.books().len().to_string().as_str()),
                ("path", path_str.as_str()),
            ],
        );
        Ok(())
    }

    /// Reads every row from the start of the file. Leaves the file
    /// position at the end so later appends follow the last row.
    fn read_records(&mut self) -> StoreResult<(Vec<Record>, bool)> {
        let path = self.path.clone();
        let writer = self
            .file
            .as_mut()
            .ok_or_else(|| StoreError::State("No backing file attached".into()))?;
        writer
            .seek(SeekFrom::Start(0))
            .map_err(|e| StoreError::io(&path, "Failed to rewind catalog file", e))?;

        Self::parse_rows(&path, BufReader::new(writer.get_ref()))
    }

    fn parse_rows<R: Read>(path: &Path, source: BufReader<R>) -> StoreResult<(Vec<Record>, bool)> {
        let mut reader = RowReader::new(source);
        let mut records = Vec::new();
        let mut has_header = false;
        let mut first = true;

        loop {
            let row = match reader.next_row() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(DecodeError::UnterminatedQuote { line }) => {
                    return Err(StoreError::malformed(path, line, "Unterminated quoted field"))
                }
                Err(DecodeError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                    return Err(StoreError::malformed(
                        path,
                        reader.line() + 1,
                        "Row is not valid UTF-8",
                    ))
                }
                Err(DecodeError::Io(e)) => {
                    return Err(StoreError::io(path, "Failed to read catalog file", e))
                }
            };

            if first {
                first = false;
                if Record::is_header(row.fields.as_slice()) {
                    has_header = true;
                    let line = row.line.to_string();
                    log_event_with_fields(Event::HeaderDetected, &[("line", line.as_str())]);
                    continue;
                }
            }

            let record = Record::from_fields(row.fields.as_slice())
                .map_err(|e| StoreError::invalid_row(path, row.line, e))?;
            records.push(record);
        }

        Ok((records, has_header))
    }

    fn file_len(&self) -> StoreResult<u64> {
        match &self.file {
            Some(writer) => writer
                .get_ref()
                .metadata()
                .map(|m| m.len())
                .map_err(|e| StoreError::io(&self.path, "Failed to read file metadata", e)),
            None => Ok(0),
        }
    }

    /// Whether the file is non-empty and its last byte is not a newline.
    ///
    /// Reads through a separate handle because `Write` and `Append` modes
    /// cannot read.
    fn last_row_unterminated(&self) -> StoreResult<bool> {
        if self.file_len()? == 0 {
            return Ok(false);
        }
        let mut file = File::open(&self.path)
            .map_err(|e| StoreError::io(&self.path, "Failed to open catalog file", e))?;
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|e| StoreError::io(&self.path, "Failed to read catalog file", e))?;
        Ok(last[0] != b'\n')
    }

    fn write_header(&mut self) -> StoreResult<()> {
        self.append_line(&encode_row(&HEADER))?;
        self.has_header = true;
        let path_str = self.path.display().to_string();
        log_event_with_fields(Event::HeaderWritten, &[("path", path_str.as_str())]);
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> StoreResult<()> {
        if let Some(writer) = self.file.as_mut() {
            if self.unterminated {
                writer
                    .write_all(TERMINATOR.as_bytes())
                    .map_err(|e| StoreError::io(&self.path, "Failed to terminate last row", e))?;
                self.unterminated = false;
            }
            writer
                .write_all(line.as_bytes())
                .map_err(|e| StoreError::io(&self.path, "Failed to append row", e))?;
            self.pending_rows += 1;
        }
        Ok(())
    }

    /// Inserts `record` into the catalog and, when writable, appends one
    /// row for it. Returns the record's position within its partition.
    ///
    /// If the append fails the record stays in the catalog.
    pub fn add_record(&mut self, record: Record) -> StoreResult<usize> {
        let line = encode_row(&record.to_fields());
        let title = record.title.clone();
        let idx = self.catalog.insert(record);

        if self.mode.writable() && self.file.is_some() {
            self.append_line(&line)?;
            log_event_with_fields(Event::RecordAppended, &[("title", title.as_str())]);
        }
        Ok(idx)
    }

    /// Removes a record from the catalog. The file is not modified.
    ///
    /// # Errors
    ///
    /// `StoreError::Catalog(CatalogError::NotFound)` if no equal record is
    /// held; this is an expected outcome.
    pub fn remove_record(&mut self, record: &Record) -> StoreResult<Record> {
        match self.catalog.remove(record) {
            Ok(removed) => {
                log_event_with_fields(Event::RecordRemoved, &[("title", removed.title.as_str())]);
                Ok(removed)
            }
            Err(e @ CatalogError::NotFound(_)) => {
                log_event_with_fields(Event::RecordMissing, &[("title", record.title.as_str())]);
                Err(e.into())
            }
        }
    }

    /// Flushes appended rows and syncs them to disk. A no-op when nothing
    /// has been written since the last commit.
    pub fn commit(&mut self) -> StoreResult<()> {
        if self.pending_rows == 0 {
            return Ok(());
        }
        let Some(writer) = self.file.as_mut() else {
            return Ok(());
        };

        writer
            .flush()
            .map_err(|e| StoreError::io(&self.path, "Failed to flush catalog file", e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| StoreError::io(&self.path, "fsync failed on catalog file", e))?;

        let rows = self.pending_rows.to_string();
        self.pending_rows = 0;
        log_event_with_fields(Event::Committed, &[("rows", rows.as_str())]);
        Ok(())
    }

    /// Commits and releases the file. The catalog stays readable; later
    /// `add_record` calls only update memory and `reload` fails.
    pub fn close(&mut self) -> StoreResult<()> {
        if self.file.is_none() {
            return Ok(());
        }
        let committed = self.commit();
        self.file = None;
        let path_str = self.path.display().to_string();
        log_event_with_fields(Event::StoreClosed, &[("path", path_str.as_str())]);
        committed
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Consumes the store, releasing the file, and returns the catalog.
    pub fn into_catalog(mut self) -> StoreResult<Catalog> {
        self.close()?;
        Ok(std::mem::take(&mut self.catalog))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Whether a header row was found on load or written on open
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Whether the backing file is still held
    pub fn is_attached(&self) -> bool {
        self.file.is_some()
    }

    /// Rows appended since the last commit
    pub fn pending_rows(&self) -> usize {
        self.pending_rows
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if let Some(writer) = self.file.as_mut() {
            if let Err(e) = writer.flush() {
                let path_str = self.path.display().to_string();
                log_event_with_fields(
                    Event::CloseFailed,
                    &[("error", e.to_string().as_str()), ("path", path_str.as_str())],
                );
            }
        }
    }
}
