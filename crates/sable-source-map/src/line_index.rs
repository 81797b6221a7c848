//! Offset-to-position lookup for a single file

use crate::types::Location;
use serde::{Deserialize, Serialize};

/// Map from byte offsets to row/column positions.
///
/// Stores the starting offset of every line, computed in one scan when
/// the file is registered. Lookups binary-search the starts, so the
/// source text itself does not need to stay resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIndex {
    /// Starting byte offset of each line; entry 0 is always 0
    line_starts: Vec<usize>,

    /// File length in bytes
    len: usize,
}

impl LineIndex {
    /// Scan `content` once and record where each line starts.
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter_map(|(offset, byte)| (byte == b'\n').then_some(offset + 1)),
        );

        LineIndex {
            line_starts,
            len: content.len(),
        }
    }

    /// Resolve a byte offset to its row and column.
    ///
    /// `None` when the offset lies past the end of the file. The end
    /// offset itself resolves, so a node extending to EOF stays
    /// resolvable; a `\n` resolves to the line it terminates.
    ///
    /// ```
    /// use sable_source_map::LineIndex;
    ///
    /// let index = LineIndex::new("module checks\nrule no-tabs {\n}\n");
    /// let loc = index.offset_to_location(14).unwrap();
    /// assert_eq!((loc.row, loc.column), (1, 0));
    /// ```
    pub fn offset_to_location(&self, offset: usize) -> Option<Location> {
        if offset > self.len {
            return None;
        }

        // partition_point counts the line starts at or before the
        // offset, which is one past the row index
        let row = self.line_starts.partition_point(|&start| start <= offset) - 1;

        Some(Location {
            offset,
            row,
            column: offset - self.line_starts[row],
        })
    }

    /// File length in bytes.
    pub fn total_length(&self) -> usize {
        self.len
    }

    /// Number of lines, counting the one after a trailing newline.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
