//! File set for managing source files

use crate::line_index::LineIndex;
use crate::types::{FileId, Location};
use serde::{Deserialize, Serialize};

/// Registry of the source files known to one compilation.
///
/// Analysis passes register files as they parse them; diagnostic
/// construction resolves AST node offsets back through the same set.
/// Ids are sequential in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSet {
    files: Vec<SourceFile>,
}

/// A source file with its path and offset index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// File path or identifier
    pub path: String,
    /// File content, for in-memory files. `None` means the file is
    /// disk-backed and only its path is tracked; offsets into it
    /// cannot be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Line-start index for offset lookups, built when content is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_index: Option<LineIndex>,
}

impl FileSet {
    /// Create a new empty file set.
    pub fn new() -> Self {
        FileSet { files: Vec::new() }
    }

    /// Register a file and return its id.
    ///
    /// When `content` is provided the file's line-start index is built
    /// immediately and offsets into the file become resolvable. Without
    /// content only the path is tracked.
    pub fn add_file(&mut self, path: String, content: Option<String>) -> FileId {
        let id = FileId(self.files.len());
        let line_index = content.as_deref().map(LineIndex::new);
        self.files.push(SourceFile {
            path,
            content,
            line_index,
        });
        id
    }

    /// Get a file by id.
    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    /// Resolve a byte offset in a file to its path and position.
    ///
    /// Returns `None` when the id is unknown, the file has no content
    /// index, or the offset is out of bounds. Resolution never panics;
    /// callers degrade to a location-less diagnostic.
    pub fn resolve(&self, id: FileId, offset: usize) -> Option<(&str, Location)> {
        let file = self.get_file(id)?;
        let location = file.line_index.as_ref()?.offset_to_location(offset)?;
        Some((file.path.as_str(), location))
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let files = FileSet::new();
        assert!(files.is_empty());
        assert!(files.get_file(FileId(0)).is_none());
    }

    #[test]
    fn test_add_and_get_file() {
        let mut files = FileSet::new();
        let id = files.add_file("main.sb".to_string(), Some("module main".to_string()));

        assert_eq!(id, FileId(0));
        let file = files.get_file(id).unwrap();
        assert_eq!(file.path, "main.sb");
        assert!(file.line_index.is_some());
    }

    #[test]
    fn test_sequential_ids() {
        let mut files = FileSet::new();
        let a = files.add_file("a.sb".to_string(), Some("a".to_string()));
        let b = files.add_file("b.sb".to_string(), Some("b".to_string()));
        assert_eq!(a, FileId(0));
        assert_eq!(b, FileId(1));
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_resolve_offset() {
        let mut files = FileSet::new();
        let id = files.add_file("main.sb".to_string(), Some("let x = 1\nlet y = 2".to_string()));

        let (path, loc) = files.resolve(id, 14).unwrap();
        assert_eq!(path, "main.sb");
        assert_eq!(loc.row, 1);
        assert_eq!(loc.column, 4);
    }

    #[test]
    fn test_resolve_without_content() {
        let mut files = FileSet::new();
        let id = files.add_file("disk-only.sb".to_string(), None);

        assert!(files.get_file(id).unwrap().line_index.is_none());
        assert!(files.resolve(id, 0).is_none());
    }

    #[test]
    fn test_resolve_unknown_file() {
        let files = FileSet::new();
        assert!(files.resolve(FileId(7), 0).is_none());
    }

    #[test]
    fn test_resolve_out_of_bounds() {
        let mut files = FileSet::new();
        let id = files.add_file("short.sb".to_string(), Some("x".to_string()));
        assert!(files.resolve(id, 100).is_none());
    }

    #[test]
    fn test_serialization() {
        let mut files = FileSet::new();
        files.add_file("main.sb".to_string(), Some("module main".to_string()));

        let json = serde_json::to_string(&files).unwrap();
        let back: FileSet = serde_json::from_str(&json).unwrap();

        let file = back.get_file(FileId(0)).unwrap();
        assert_eq!(file.path, "main.sb");
        assert!(file.line_index.is_some());
    }
}
