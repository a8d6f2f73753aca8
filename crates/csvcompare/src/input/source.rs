//! Dataset origin, used for reporting and to gate write-back.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a dataset's data came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Read from a file on disk.
    File(PathBuf),
    /// Built from a list of text lines.
    Lines,
    /// Built from a raw text blob.
    Text,
    /// Placeholder for a dataset with no data.
    Null,
}

impl Origin {
    /// The backing file path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Origin::File(path) => Some(path),
            _ => None,
        }
    }

    /// Whether write-back to this origin is possible right now.
    pub fn is_writable(&self) -> bool {
        self.path().is_some_and(Path::is_file)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File(path) => write!(f, "{}", path.display()),
            Origin::Lines => write!(f, "init from lines"),
            Origin::Text => write!(f, "init from text"),
            Origin::Null => write!(f, "null"),
        }
    }
}
