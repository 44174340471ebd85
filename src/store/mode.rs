//! Access modes for the backing file

use std::fmt;
use std::fs::OpenOptions;

use serde::Deserialize;

/// How the backing file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenMode {
    /// Load only; the file must exist
    Read,
    /// Truncate (or create) and write; nothing is loaded
    Write,
    /// Append to (or create) the file; nothing is loaded
    Append,
    /// Load, then append; the file is created if missing
    ReadWrite,
}

impl OpenMode {
    pub fn readable(&self) -> bool {
        matches!(self, OpenMode::Read | OpenMode::ReadWrite)
    }

    pub fn writable(&self) -> bool {
        !matches!(self, OpenMode::Read)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OpenMode::Read => "read",
            OpenMode::Write => "write",
            OpenMode::Append => "append",
            OpenMode::ReadWrite => "read_write",
        }
    }

    pub(crate) fn options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::Write => {
                options.write(true).create(true).truncate(true);
            }
            OpenMode::Append => {
                options.append(true).create(true);
            }
            OpenMode::ReadWrite => {
                options.read(true).write(true).create(true);
            }
        }
        options
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
