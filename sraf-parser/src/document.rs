//! Document sources
//!
//! The scanner never performs I/O. A [`Document`] carries the text together with the
//! identifier and size that open every report row.

use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier written to the `file name` column
    pub id: String,
    /// Size in bytes written to the `file size` column
    pub size: u64,
    pub text: String,
}

impl Document {
    /// Build a document from in-memory text; its size is the UTF-8 byte length
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Document {
            id: id.into(),
            size: text.len() as u64,
            text,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Read a document from disk
    ///
    /// Invalid UTF-8 is replaced rather than rejected. The size is the byte length on
    /// disk and the identifier is the path as given.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let size = bytes.len() as u64;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Document::new(path.display().to_string(), text).with_size(size))
    }
}
