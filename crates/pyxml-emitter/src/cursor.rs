//! Forward-only cursor over the token stream
//!
//! The cursor hands out the literal text between tokens ("gaps") together
//! with the tokens themselves. Each gap is handed out at most once, so a
//! converter that takes every token exactly once and places every piece of
//! text it receives reproduces the source by construction.
//!
//! Line breaks and comments inside brackets carry no structure. They are
//! folded: `peek` and `pop` step over them and their text becomes part of
//! the gap between the surrounding tokens.

use pyxml_ast::Position;
use pyxml_lexer::{ExactKind, Token, TokenKind};

pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    /// Raw index of the next token that has not been stepped over
    next: usize,
    /// Raw index of the last popped token
    current: Option<usize>,
    /// The gap before `current` has not been handed out yet
    leading: bool,
    /// The gap after `current` has already been handed out
    trailing_taken: bool,
    closers: Vec<Option<usize>>,
    folded: Vec<bool>,
}

/// A dotted name popped as a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedName {
    /// Gap before the first NAME
    pub leading: String,
    /// Source text from the first NAME to the last, inner gaps included
    pub text: String,
    /// Canonical qualified name (`a.b.c`)
    pub name: String,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let mut closers = vec![None; tokens.len()];
        let mut folded = vec![false; tokens.len()];
        let mut open: Vec<usize> = Vec::new();
        for (index, token) in tokens.iter().enumerate() {
            if token.exact.opens_bracket() {
                open.push(index);
            } else if token.exact.closes_bracket() {
                if let Some(opener) = open.pop() {
                    closers[opener] = Some(index);
                }
            } else if !open.is_empty() && matches!(token.kind, TokenKind::Nl | TokenKind::Comment)
            {
                folded[index] = true;
            }
        }
        Self {
            tokens,
            next: 0,
            current: None,
            leading: true,
            trailing_taken: false,
            closers,
            folded,
        }
    }

    // === Lookahead ===

    fn significant_from(&self, mut index: usize) -> Option<usize> {
        while index < self.tokens.len() {
            if !self.folded[index] {
                return Some(index);
            }
            index += 1;
        }
        None
    }

    /// Raw index of the next significant token
    pub fn peek_index(&self) -> Option<usize> {
        self.significant_from(self.next)
    }

    /// Next significant token, without advancing
    pub fn peek(&self) -> Option<&'t Token> {
        self.peek_index().map(|index| &self.tokens[index])
    }

    /// Raw index of the first significant token after `index`
    pub fn significant_after(&self, index: usize) -> Option<usize> {
        self.significant_from(index + 1)
    }

    /// The `n`-th significant token ahead; `peek_nth(0)` is `peek()`
    pub fn peek_nth(&self, n: usize) -> Option<&'t Token> {
        let mut index = self.peek_index()?;
        for _ in 0..n {
            index = self.significant_from(index + 1)?;
        }
        Some(&self.tokens[index])
    }

    pub fn at(&self, exact: ExactKind) -> bool {
        self.peek().is_some_and(|token| token.is(exact))
    }

    pub fn at_keyword(&self, word: &str) -> bool {
        self.peek().is_some_and(|token| token.is_keyword(word))
    }

    /// Index of the bracket closing the opening bracket at `index`
    pub fn matching_close(&self, index: usize) -> Option<usize> {
        self.closers.get(index).copied().flatten()
    }

    pub fn token(&self, index: usize) -> Option<&'t Token> {
        self.tokens.get(index)
    }

    /// The last popped token
    pub fn current(&self) -> Option<&'t Token> {
        self.current.map(|index| &self.tokens[index])
    }

    /// Where the next token starts, or where the stream ends
    pub fn position(&self) -> Position {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|token| token.start)
            .unwrap_or_default()
    }

    /// Significant tokens not yet popped
    pub fn remaining(&self) -> usize {
        (self.next..self.tokens.len())
            .filter(|&index| !self.folded[index])
            .count()
    }

    // === Consumption ===

    /// Consume the next significant token
    pub fn pop(&mut self) -> Option<&'t Token> {
        let index = self.peek_index()?;
        self.leading = !self.trailing_taken;
        self.trailing_taken = false;
        self.current = Some(index);
        self.next = index + 1;
        Some(&self.tokens[index])
    }

    /// The gap before the current token, if nobody has taken it yet
    pub fn take_leading_gap(&mut self) -> String {
        match self.current {
            Some(index) if self.leading => {
                self.leading = false;
                self.gap(self.previous_significant(index), index)
            }
            _ => String::new(),
        }
    }

    /// Leading gap plus the text of the current token
    pub fn text_around(&mut self) -> String {
        let mut text = self.take_leading_gap();
        if let Some(token) = self.current() {
            text.push_str(&token.text);
        }
        text
    }

    /// The gap between the current token and the next one, once
    pub fn gap_to_next(&mut self) -> String {
        if self.trailing_taken {
            return String::new();
        }
        let Some(to) = self.peek_index() else {
            return String::new();
        };
        self.trailing_taken = true;
        self.gap(self.current, to)
    }

    /// Text of the current token with the gaps on both sides
    pub fn text_prev_to_next(&mut self) -> String {
        let mut text = self.text_around();
        text.push_str(&self.gap_to_next());
        text
    }

    /// Pop `NAME ('.' NAME)*`
    ///
    /// Returns `None` without consuming anything when no NAME is next.
    pub fn pop_dotted_name(&mut self) -> Option<DottedName> {
        if !self.peek().is_some_and(|token| token.kind == TokenKind::Name) {
            return None;
        }
        let first = self.pop()?;
        let leading = self.take_leading_gap();
        let mut text = first.text.clone();
        let mut name = first.text.clone();
        while self.at(ExactKind::Dot)
            && self
                .peek_nth(1)
                .is_some_and(|token| token.kind == TokenKind::Name)
        {
            self.pop();
            text.push_str(&self.text_around());
            let part = self.pop()?;
            text.push_str(&self.text_around());
            name.push('.');
            name.push_str(&part.text);
        }
        Some(DottedName {
            leading,
            text,
            name,
        })
    }

    // === Gaps ===

    fn previous_significant(&self, index: usize) -> Option<usize> {
        (0..index).rev().find(|&i| !self.folded[i])
    }

    /// Text between two significant tokens, folded tokens included
    ///
    /// Sliced from the source by byte offsets, so lines that hold no token
    /// at all (a lone backslash continuation) are still part of the gap.
    fn gap(&self, from: Option<usize>, to: usize) -> String {
        let previous = from.map(|index| &self.tokens[index]);
        self.tokens[to].text_since(previous).to_string()
    }
}
