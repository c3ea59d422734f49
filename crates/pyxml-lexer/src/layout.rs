//! Line structure: NEWLINE vs NL, INDENT/DEDENT, ENDMARKER
//!
//! The raw lexer only knows about individual lexemes. This pass walks its
//! output once and adds what CPython's tokenizer derives from line
//! structure, tracking bracket depth and the indentation stack.

use std::ops::Range;
use std::sync::Arc;

use logos::Logos;
use pyxml_ast::Position;

use crate::{ExactKind, LexError, Token};

/// Start offsets of the physical lines, for position lookups
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = Vec::new();
        let mut offset = 0;
        for line in source.split_inclusive('\n') {
            starts.push(offset);
            offset += line.len();
        }
        // The position after a final line break lives on an empty line
        if source.is_empty() || source.ends_with('\n') {
            starts.push(offset);
        }
        Self { starts }
    }

    fn position(&self, offset: usize) -> Position {
        let index = self.starts.partition_point(|&start| start <= offset) - 1;
        Position::new(index + 1, offset - self.starts[index])
    }

    /// End position in `tokenize` convention: a trailing line break still
    /// counts as a column of the line it terminates.
    fn end_position(&self, range: &Range<usize>, source: &str) -> Position {
        if range.is_empty() {
            return self.position(range.start);
        }
        let last = source[range.clone()]
            .chars()
            .next_back()
            .map_or(1, char::len_utf8);
        let position = self.position(range.end - last);
        Position::new(position.line, position.column + last)
    }
}

pub(crate) struct Layout<'a> {
    source: &'a str,
    shared: Arc<str>,
    index: LineIndex,
    tokens: Vec<Token>,
    indents: Vec<usize>,
    depth: usize,
    /// No significant token seen yet on the current logical line
    at_line_start: bool,
}

impl<'a> Layout<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            shared: Arc::from(source),
            index: LineIndex::new(source),
            tokens: Vec::new(),
            indents: vec![0],
            depth: 0,
            at_line_start: true,
        }
    }

    pub(crate) fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut lexer = ExactKind::lexer(self.source);

        while let Some(result) = lexer.next() {
            let range = lexer.span();
            let exact = match result {
                Ok(exact) => exact,
                Err(()) if starts_string(lexer.slice()) => {
                    return Err(LexError::UnterminatedString {
                        position: self.index.position(range.start),
                    });
                }
                Err(()) => ExactKind::ErrorToken,
            };

            match exact {
                ExactKind::Newline => {
                    if self.depth > 0 || self.at_line_start {
                        self.push(ExactKind::Nl, range);
                    } else {
                        self.push(ExactKind::Newline, range);
                        self.at_line_start = true;
                    }
                }
                ExactKind::Comment => self.push(exact, range),
                _ => {
                    if self.at_line_start && self.depth == 0 {
                        self.indent_to(range.start)?;
                    }
                    self.at_line_start = false;
                    if exact.opens_bracket() {
                        self.depth += 1;
                    } else if exact.closes_bracket() {
                        self.depth = self.depth.saturating_sub(1);
                    }
                    self.push(exact, range);
                }
            }
        }

        self.finish();
        Ok(self.tokens)
    }

    fn indent_to(&mut self, offset: usize) -> Result<(), LexError> {
        let position = self.index.position(offset);
        let current = self.indents.last().copied().unwrap_or(0);
        if position.column > current {
            self.indents.push(position.column);
            let line_start = self.index.starts[position.line - 1];
            self.push(ExactKind::Indent, line_start..line_start + position.column);
        } else if position.column < current {
            while self.indents.last().is_some_and(|&level| level > position.column) {
                self.indents.pop();
                self.push_at(ExactKind::Dedent, offset);
            }
            if self.indents.last() != Some(&position.column) {
                return Err(LexError::InconsistentDedent { position });
            }
        }
        Ok(())
    }

    fn finish(&mut self) {
        let end = self.source.len();
        if !self.at_line_start {
            // The last logical line has no line break of its own
            self.push(ExactKind::Newline, end..end);
        } else if self.tokens.last().is_some_and(|t| t.is(ExactKind::Comment)) {
            self.push(ExactKind::Nl, end..end);
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push_at(ExactKind::Dedent, end);
        }
        self.push_at(ExactKind::EndMarker, end);
    }

    fn push(&mut self, exact: ExactKind, range: Range<usize>) {
        let start = self.index.position(range.start);
        let end = self.index.end_position(&range, self.source);
        self.tokens.push(Token {
            kind: exact.kind(),
            exact,
            text: self.source[range.clone()].to_string(),
            start,
            end,
            span: range,
            source: self.shared.clone(),
        });
    }

    /// Zero-width token (DEDENT, ENDMARKER)
    fn push_at(&mut self, exact: ExactKind, offset: usize) {
        let position = self.index.position(offset);
        self.tokens.push(Token {
            kind: exact.kind(),
            exact,
            text: String::new(),
            start: position,
            end: position,
            span: offset..offset,
            source: self.shared.clone(),
        });
    }
}

fn starts_string(slice: &str) -> bool {
    slice
        .trim_start_matches(|c: char| "rRbBuUfF".contains(c))
        .starts_with(['\'', '"'])
}
