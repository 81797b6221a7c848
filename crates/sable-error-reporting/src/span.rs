//! Source position resolution.
//!
//! Failures reach the diagnostic layer carrying one of four position
//! shapes: structured scanner positions, AST node byte offsets, free-text
//! `path:line:col` strings from external tools, and plain
//! file/line/column triples. This module normalizes all of them into
//! [`Span`]. Resolution is total: every shape yields either a complete
//! span or `None`, never a partial location and never an error.

use sable_source_map::{FileId, FileSet};
use serde::{Deserialize, Serialize};

/// A structured source position as produced by a scanner or external
/// tool: file path plus 1-based line and column.
///
/// A `line` of 0 means the line is unknown; same for `column`. This is
/// the pre-resolution shape — unlike [`Span`], a `FilePosition` may be
/// arbitrarily incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilePosition {
    /// File path; empty when unknown
    pub file: String,
    /// 1-based line number; 0 when unknown
    pub line: u32,
    /// 1-based column number; 0 when unknown
    pub column: u32,
    /// Byte offset into the file, when the producer tracked one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl FilePosition {
    /// Create a position from its parts, with no byte offset.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        FilePosition {
            file: file.into(),
            line,
            column,
            offset: None,
        }
    }
}

/// The byte extent of an AST node: the file it was parsed from plus its
/// start (inclusive) and end (exclusive) offsets.
///
/// Parsers hand these to the error constructors; resolution back to
/// line/column goes through the [`FileSet`] the same parser populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeSpan {
    /// File the node belongs to
    pub file: FileId,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl NodeSpan {
    /// Create a node span from its parts.
    pub fn new(file: FileId, start: usize, end: usize) -> Self {
        NodeSpan { file, start, end }
    }
}

/// A resolved, concrete source location.
///
/// Invariant: `file` is non-empty and `line >= 1`. An unresolvable
/// location is represented by the absence of a span (`Option<Span>`),
/// never by a degenerate value, so downstream renderers can trust every
/// span they see. `column` may be 0 when only the line is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// File path
    pub file: String,
    /// 1-based line number
    pub line: u32,
    /// 1-based column number; 0 when unknown
    pub column: u32,
    /// Byte offset range `(start, end)` when derived from an AST node
    /// rather than a single point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsets: Option<(usize, usize)>,
}

impl Span {
    /// Resolve a `(start, end)` pair of scanner positions.
    ///
    /// The span takes its file, line, and column from `start`; the byte
    /// offset range is carried only when both ends have one. Returns
    /// `None` when `start` has no filename or no line.
    pub fn from_positions(start: &FilePosition, end: &FilePosition) -> Option<Span> {
        if start.file.is_empty() || start.line == 0 {
            return None;
        }
        let offsets = match (start.offset, end.offset) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        };
        Some(Span {
            file: start.file.clone(),
            line: start.line,
            column: start.column,
            offsets,
        })
    }

    /// Resolve an AST node's byte offset range through the file set.
    ///
    /// Returns `None` when the file is unknown to the set, has no
    /// content index, or either offset falls outside the file. Callers
    /// degrade to a location-less diagnostic in that case.
    pub fn from_offsets(files: &FileSet, id: FileId, start: usize, end: usize) -> Option<Span> {
        let (path, start_loc) = files.resolve(id, start)?;
        let (_, _end_loc) = files.resolve(id, end)?;
        Some(Span {
            file: path.to_string(),
            line: u32::try_from(start_loc.row).ok()? + 1,
            column: u32::try_from(start_loc.column).ok()? + 1,
            offsets: Some((start, end)),
        })
    }

    /// Resolve an AST node through the file set.
    ///
    /// Shorthand for [`Span::from_offsets`] with the node's own extent.
    pub fn from_node(files: &FileSet, node: &NodeSpan) -> Option<Span> {
        Span::from_offsets(files, node.file, node.start, node.end)
    }

    /// Resolve an already-structured file/line/column triple, as found
    /// in an external compiler's own diagnostic lines. Offset unknown.
    pub fn from_position(pos: &FilePosition) -> Option<Span> {
        if pos.file.is_empty() || pos.line == 0 {
            return None;
        }
        Some(Span {
            file: pos.file.clone(),
            line: pos.line,
            column: pos.column,
            offsets: None,
        })
    }

    /// Resolve a free-text location string (`path[:line[:col]]`).
    ///
    /// Convenience for [`parse_file_position`] followed by
    /// [`Span::from_position`]: yields a span only when the text named
    /// both a file and a line.
    pub fn from_text(text: &str) -> Option<Span> {
        Span::from_position(&parse_file_position(text))
    }
}

/// Parse a free-text location of the form `path[:line[:col]]`.
///
/// The grammar, segment by segment (split on `:`, at most three parts):
/// - `path` — a path of `""` or the sentinel `"-"` means "no file"
/// - `line` — best-effort integer; a non-numeric segment reads as 0
/// - `col` — same
///
/// Parsing is total: malformed segments degrade to the unknown value
/// rather than failing the whole resolution. Use [`Span::from_text`] to
/// apply the span guard on top.
///
/// # Example
///
/// ```
/// use sable_error_reporting::span::parse_file_position;
///
/// let pos = parse_file_position("main.sb:42:7");
/// assert_eq!(pos.file, "main.sb");
/// assert_eq!(pos.line, 42);
/// assert_eq!(pos.column, 7);
/// ```
pub fn parse_file_position(text: &str) -> FilePosition {
    fn numeric(segment: &str) -> u32 {
        segment.trim().parse().unwrap_or(0)
    }

    let segments: Vec<&str> = text.splitn(3, ':').collect();
    let (path, line, column) = match segments.as_slice() {
        [path] => (*path, 0, 0),
        [path, line] => (*path, numeric(line), 0),
        [path, line, column] => (*path, numeric(line), numeric(column)),
        // splitn(3, ..) yields between one and three segments
        _ => ("", 0, 0),
    };

    let file = if path.is_empty() || path == "-" {
        String::new()
    } else {
        path.to_string()
    };

    FilePosition {
        file,
        line,
        column,
        offset: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_set_with(content: &str) -> (FileSet, FileId) {
        let mut files = FileSet::new();
        let id = files.add_file("main.sb".to_string(), Some(content.to_string()));
        (files, id)
    }

    #[test]
    fn test_from_positions_copies_fields() {
        let start = FilePosition {
            file: "main.sb".to_string(),
            line: 3,
            column: 9,
            offset: Some(21),
        };
        let end = FilePosition {
            file: "main.sb".to_string(),
            line: 3,
            column: 14,
            offset: Some(26),
        };

        let span = Span::from_positions(&start, &end).unwrap();
        assert_eq!(span.file, "main.sb");
        assert_eq!(span.line, 3);
        assert_eq!(span.column, 9);
        assert_eq!(span.offsets, Some((21, 26)));
    }

    #[test]
    fn test_from_positions_empty_filename_is_no_span() {
        let start = FilePosition::new("", 3, 9);
        let end = FilePosition::new("", 3, 14);
        assert!(Span::from_positions(&start, &end).is_none());
    }

    #[test]
    fn test_from_positions_without_offsets() {
        let start = FilePosition::new("main.sb", 1, 1);
        let end = FilePosition::new("main.sb", 1, 5);
        let span = Span::from_positions(&start, &end).unwrap();
        assert_eq!(span.offsets, None);
    }

    #[test]
    fn test_from_offsets_resolves_line_and_column() {
        let (files, id) = file_set_with("module main\n\nrule first {\n}\n");

        // "rule" starts at offset 13: line 3, column 1
        let span = Span::from_offsets(&files, id, 13, 17).unwrap();
        assert_eq!(span.file, "main.sb");
        assert_eq!(span.line, 3);
        assert_eq!(span.column, 1);
        assert_eq!(span.offsets, Some((13, 17)));
    }

    #[test]
    fn test_from_offsets_out_of_bounds_is_no_span() {
        let (files, id) = file_set_with("short");
        assert!(Span::from_offsets(&files, id, 2, 400).is_none());
        assert!(Span::from_offsets(&files, id, 400, 401).is_none());
    }

    #[test]
    fn test_from_offsets_unknown_file_is_no_span() {
        let files = FileSet::new();
        assert!(Span::from_offsets(&files, FileId(3), 0, 1).is_none());
    }

    #[test]
    fn test_from_offsets_monotone_with_document_order() {
        let (files, id) = file_set_with("a {\n  b\n}\nc {\n  d\n}\n");
        let earlier = Span::from_offsets(&files, id, 6, 7).unwrap();
        let later = Span::from_offsets(&files, id, 16, 17).unwrap();
        assert!(earlier.line < later.line || (earlier.line == later.line && earlier.column <= later.column));
    }

    #[test]
    fn test_parse_path_line_col() {
        let pos = parse_file_position("main.sb:42:7");
        assert_eq!(pos.file, "main.sb");
        assert_eq!(pos.line, 42);
        assert_eq!(pos.column, 7);

        let span = Span::from_text("main.sb:42:7").unwrap();
        assert_eq!(span.file, "main.sb");
        assert_eq!(span.line, 42);
        assert_eq!(span.column, 7);
        assert_eq!(span.offsets, None);
    }

    #[test]
    fn test_parse_path_line() {
        let pos = parse_file_position("lib.sb:12");
        assert_eq!(pos.file, "lib.sb");
        assert_eq!(pos.line, 12);
        assert_eq!(pos.column, 0);
    }

    #[test]
    fn test_parse_bare_path() {
        let pos = parse_file_position("lib.sb");
        assert_eq!(pos.file, "lib.sb");
        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);

        // A line-less position does not pass the span guard
        assert!(Span::from_text("lib.sb").is_none());
    }

    #[test]
    fn test_parse_sentinel_and_empty() {
        assert!(parse_file_position("-").file.is_empty());
        assert!(parse_file_position("").file.is_empty());
        assert!(Span::from_text("-").is_none());
        assert!(Span::from_text("").is_none());
    }

    #[test]
    fn test_parse_non_numeric_segments_read_as_absent() {
        let pos = parse_file_position("main.sb:twelve:x");
        assert_eq!(pos.file, "main.sb");
        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);
        assert!(Span::from_text("main.sb:twelve:x").is_none());

        // Line parses, column does not
        let pos = parse_file_position("main.sb:9:x");
        assert_eq!(pos.line, 9);
        assert_eq!(pos.column, 0);
        assert!(Span::from_text("main.sb:9:x").is_some());
    }

    #[test]
    fn test_from_position_triple() {
        let span = Span::from_position(&FilePosition::new("gen.c", 88, 13)).unwrap();
        assert_eq!(span.file, "gen.c");
        assert_eq!(span.line, 88);
        assert_eq!(span.column, 13);
        assert_eq!(span.offsets, None);

        assert!(Span::from_position(&FilePosition::new("gen.c", 0, 13)).is_none());
        assert!(Span::from_position(&FilePosition::new("", 88, 13)).is_none());
    }

    #[test]
    fn test_span_serialization() {
        let span = Span {
            file: "main.sb".to_string(),
            line: 4,
            column: 2,
            offsets: Some((30, 35)),
        };
        let json = serde_json::to_string(&span).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(span, back);
    }
}
