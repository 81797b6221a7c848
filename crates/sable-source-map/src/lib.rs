//! Source file tracking for sable
//!
//! This crate provides the file set used by the diagnostic layer to turn
//! byte offsets (as carried by AST nodes) into concrete row/column
//! positions. Analysis passes register the files they parse; the error
//! reporting layer resolves node offsets back through the same set.
//!
//! The core types are:
//! - [`FileSet`]: registry of source files, keyed by [`FileId`]
//! - [`LineIndex`]: per-file line-start index for offset lookups
//! - [`Location`]: 0-indexed positions in a single file
//!
//! # Example
//!
//! ```rust
//! use sable_source_map::FileSet;
//!
//! let mut files = FileSet::new();
//! let id = files.add_file("main.sb".into(), Some("let x = 1\nlet y = 2".into()));
//!
//! let (path, loc) = files.resolve(id, 10).unwrap();
//! assert_eq!(path, "main.sb");
//! assert_eq!(loc.row, 1);
//! assert_eq!(loc.column, 0);
//! ```

pub mod file_set;
pub mod line_index;
pub mod types;

pub use file_set::{FileSet, SourceFile};
pub use line_index::LineIndex;
pub use types::{FileId, Location};
