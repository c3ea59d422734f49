//! Source location tracking

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in source code
///
/// Lines are 1-based. Columns are 0-based UTF-8 byte offsets within the
/// physical line, the same unit CPython uses for `col_offset`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The extent of an AST node, as far as the dump records it
///
/// Dumps from interpreters older than 3.8 carry no end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Option<Position>,
}

impl Span {
    pub fn new(start: Position, end: Option<Position>) -> Self {
        Self { start, end }
    }
}
