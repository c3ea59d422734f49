//! Trivia collection
//!
//! Trivia is everything between statements that carries no structure of
//! its own: blank lines, comment lines, indentation markers, statement
//! separators. It is gathered into plain text leaves.

use pyxml_lexer::{ExactKind, Token, TokenKind};
use pyxml_tree::Element;

use crate::TokenCursor;

fn is_trivia(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Newline
            | TokenKind::Nl
            | TokenKind::Comment
            | TokenKind::Indent
            | TokenKind::Dedent
    ) || token.is(ExactKind::Semi)
}

impl<'t> TokenCursor<'t> {
    /// Gather the trivia before the next structural token into one leaf
    ///
    /// The leaf is always attached, even when empty. The gap up to the
    /// next structural token is part of it, so a second call right after
    /// the first yields an empty leaf.
    pub fn consume_trivia(&mut self, parent: &mut Element) {
        let mut text = String::new();
        while self.peek().is_some_and(is_trivia) {
            self.pop();
            text.push_str(&self.text_around());
        }
        text.push_str(&self.gap_to_next());
        parent.push_leaf(text);
    }

    /// Statement epilogue: `;`, a same-line comment, the NEWLINE
    ///
    /// Stops after a `;` that is followed by another statement on the same
    /// line. Nothing is attached when there is nothing to take.
    pub fn consume_line_end(&mut self, statement: &mut Element) {
        let mut text = String::new();
        if self.at(ExactKind::Semi) {
            let line = self.peek().map(|token| token.start.line);
            let next = self.peek_nth(1);
            let ends_line = next.is_some_and(|token| {
                matches!(
                    token.kind,
                    TokenKind::Newline | TokenKind::Comment | TokenKind::EndMarker
                ) || Some(token.start.line) != line
            });
            if !ends_line {
                return;
            }
            self.pop();
            text.push_str(&self.text_around());
        }
        if self.peek().is_some_and(|token| token.kind == TokenKind::Comment) {
            self.pop();
            text.push_str(&self.text_around());
        }
        if self.at(ExactKind::Newline) {
            self.pop();
            text.push_str(&self.text_around());
        }
        statement.push_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyxml_lexer::tokenize;

    #[test]
    fn test_trivia_collects_blank_and_comment_lines() {
        let tokens = tokenize("\n# header\n\nx\n").unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        let mut parent = Element::new("Module");
        cursor.consume_trivia(&mut parent);
        assert_eq!(parent.text(), "\n# header\n\n");
        assert!(cursor.at(ExactKind::Name));
    }

    #[test]
    fn test_trivia_is_idempotent() {
        let tokens = tokenize("  # c\nx\n").unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        let mut first = Element::new("a");
        let mut second = Element::new("b");
        cursor.consume_trivia(&mut first);
        cursor.consume_trivia(&mut second);
        assert_eq!(first.text(), "  # c\n");
        assert_eq!(second.text(), "");
        assert_eq!(second.leaves().count(), 1);
    }

    #[test]
    fn test_trivia_takes_indentation() {
        let tokens = tokenize("if x:\n\n    y\n").unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        for _ in 0..4 {
            cursor.pop();
            cursor.text_around();
        }
        let mut parent = Element::new("body");
        cursor.consume_trivia(&mut parent);
        assert_eq!(parent.text(), "\n    ");
        assert!(cursor.at_keyword("y"));
    }

    #[test]
    fn test_line_end_keeps_comment() {
        let tokens = tokenize("x  # note\ny\n").unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        cursor.pop();
        let mut statement = Element::new("Expr");
        statement.push_text(cursor.text_around());
        cursor.consume_line_end(&mut statement);
        assert_eq!(statement.text(), "x  # note\n");
        assert!(cursor.at_keyword("y"));
    }

    #[test]
    fn test_line_end_stops_before_next_statement() {
        let tokens = tokenize("a; b\n").unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        cursor.pop();
        let mut statement = Element::new("Expr");
        cursor.consume_line_end(&mut statement);
        assert_eq!(statement.text(), "");
        assert!(cursor.at(ExactKind::Semi));
    }

    #[test]
    fn test_line_end_takes_trailing_semicolon() {
        let tokens = tokenize("a ;\n").unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        cursor.pop();
        cursor.text_around();
        let mut statement = Element::new("Expr");
        cursor.consume_line_end(&mut statement);
        assert_eq!(statement.text(), " ;\n");
    }
}
