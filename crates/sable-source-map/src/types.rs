//! Identifier and position types shared across the crate

use serde::{Deserialize, Serialize};

/// Handle to a file registered in a [`crate::FileSet`].
///
/// Ids are dense and sequential in registration order, so they double
/// as vector indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub usize);

/// A resolved position within one file.
///
/// Everything is 0-indexed and byte-based: `row` counts the newlines
/// before the position, `column` counts bytes from the start of the
/// row. The derived ordering is document order, since `offset` comes
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Byte offset from the start of the file
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Column in bytes from the start of the row (0-indexed)
    pub column: usize,
}
