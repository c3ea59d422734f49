//! Traversal context and dispatch
//!
//! The emitter walks the AST depth-first and drains the token cursor in
//! the same order. The AST recursion order is the synchronization
//! protocol: every handler knows which tokens its node guarantees and
//! requires them at the cursor, in order.

use pyxml_ast::{AstNode, NodeKind, Position, Span};
use pyxml_lexer::{ExactKind, Token, TokenKind};
use pyxml_tree::Element;

use crate::handlers::{self, stmt, OpToken};
use crate::{ConvertError, ConvertOptions, Degradation, Result, TokenCursor};

/// A conversion rule: handlers append the element for `node` to `parent`
pub type Handler = fn(&mut Emitter<'_>, &AstNode, &mut Element) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Rule {
    pub handler: Handler,
    /// Redundant parentheses around the node are consumed by the emitter
    pub parenthesizable: bool,
}

pub struct Emitter<'t> {
    pub(crate) cursor: TokenCursor<'t>,
    options: ConvertOptions,
    degradations: Vec<Degradation>,
    /// Kinds of the nodes being emitted, innermost last
    context: Vec<String>,
}

impl<'t> Emitter<'t> {
    pub fn new(tokens: &'t [Token], options: ConvertOptions) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            options,
            degradations: Vec::new(),
            context: Vec::new(),
        }
    }

    pub fn into_degradations(self) -> Vec<Degradation> {
        self.degradations
    }

    // === Dispatch ===

    /// Convert a whole module (or expression) into its root element
    pub fn emit_root(&mut self, root: &AstNode) -> Result<Element> {
        self.context.push(root.kind.to_string());
        let element = match root.kind {
            NodeKind::Module => stmt::module(self, root)?,
            NodeKind::Expression => stmt::expression(self, root)?,
            _ => {
                return Err(ConvertError::UnsupportedRoot {
                    kind: root.kind.to_string(),
                })
            }
        };
        self.context.pop();
        Ok(element)
    }

    /// Convert one node, appending its element to `parent`
    pub fn emit(&mut self, node: &AstNode, parent: &mut Element) -> Result<()> {
        log::trace!("{} at {}", node.kind, self.cursor.position());
        self.context.push(node.kind.to_string());
        let result = match handlers::rule(&node.kind) {
            Some(rule) if rule.parenthesizable => self.parenthesized(node, parent, rule.handler),
            Some(rule) => (rule.handler)(self, node, parent),
            None => self.fallback(node, parent),
        };
        self.context.pop();
        result
    }

    /// Emit every node of a list, in order
    pub fn emit_all(&mut self, nodes: &[&AstNode], parent: &mut Element) -> Result<()> {
        for node in nodes {
            self.emit(node, parent)?;
        }
        Ok(())
    }

    /// Emit items separated by commas
    ///
    /// Any run of commas after an item is taken, so trailing commas and
    /// lists without them are both fine. Line breaks and comments inside
    /// the brackets travel with the gaps.
    pub fn comma_delimited(&mut self, items: &[&AstNode], parent: &mut Element) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                parent.push_text(self.cursor.gap_to_next());
            }
            self.emit(item, parent)?;
            self.commas(parent);
        }
        Ok(())
    }

    /// Take a run of commas at the cursor
    pub fn commas(&mut self, parent: &mut Element) {
        while self.cursor.at(ExactKind::Comma) {
            self.cursor.pop();
            parent.push_text(self.cursor.text_around());
        }
    }

    fn parenthesized(&mut self, node: &AstNode, parent: &mut Element, handler: Handler) -> Result<()> {
        let count = self.owned_parens(node);
        for _ in 0..count {
            self.expect(ExactKind::Lpar)?;
            parent.push_text(self.cursor.text_around());
        }
        handler(self, node, parent)?;
        for _ in 0..count {
            self.expect(ExactKind::Rpar)?;
            parent.push_text(self.cursor.text_around());
        }
        Ok(())
    }

    /// Number of opening parentheses at the cursor that belong to `node`
    fn owned_parens(&self, node: &AstNode) -> usize {
        let span = node.span();
        let mut count = 0;
        let mut index = self.cursor.peek_index();
        while let Some(open) = index {
            let Some(token) = self.cursor.token(open).filter(|t| t.is(ExactKind::Lpar)) else {
                break;
            };
            let owned = match span {
                Some(Span {
                    start,
                    end: Some(end),
                }) => {
                    token.start <= start
                        && self
                            .cursor
                            .matching_close(open)
                            .and_then(|close| self.cursor.token(close))
                            .is_some_and(|close| close.end >= end)
                }
                Some(Span { start, end: None }) => {
                    token.start < start || (node.kind == NodeKind::Tuple && token.start == start)
                }
                None => true,
            };
            if !owned {
                break;
            }
            count += 1;
            index = self.cursor.significant_after(open);
        }
        count
    }

    fn fallback(&mut self, node: &AstNode, parent: &mut Element) -> Result<()> {
        let position = node.span().map(|span| span.start);
        if self.options.strict {
            return Err(ConvertError::UnimplementedNodeKind {
                kind: node.kind.to_string(),
                position: position.unwrap_or_else(|| self.cursor.position()),
            });
        }
        log::warn!(
            "no conversion rule for {} node at {}, walking its fields",
            node.kind,
            self.cursor.position()
        );
        self.degradations.push(Degradation {
            kind: node.kind.to_string(),
            position,
        });

        let mut element = Element::new(node.kind.as_str());
        // Operators and contexts have no fields and no tokens of their own
        for child in node.children().filter(|child| !child.fields.is_empty()) {
            self.emit(child, &mut element)?;
        }
        parent.push(element);
        Ok(())
    }

    // === Token expectations ===

    fn node_name(&self) -> String {
        self.context.last().cloned().unwrap_or_default()
    }

    fn require(&mut self, expected: &str, accept: impl Fn(&Token) -> bool) -> Result<&'t Token> {
        match self.cursor.peek() {
            Some(token) if accept(token) => self
                .cursor
                .pop()
                .ok_or_else(|| self.underflow(format!("ran out of tokens expecting {}", expected))),
            Some(token) if token.is(ExactKind::EndMarker) => {
                Err(self.underflow(format!("reached the end of the source expecting {}", expected)))
            }
            Some(token) => Err(self.mismatch(expected, token.describe(), token.start)),
            None => Err(self.underflow(format!("ran out of tokens expecting {}", expected))),
        }
    }

    pub(crate) fn mismatch(
        &self,
        expected: &str,
        found: String,
        position: Position,
    ) -> ConvertError {
        ConvertError::TokenMismatch {
            node: self.node_name(),
            expected: expected.to_string(),
            found,
            position,
        }
    }

    pub(crate) fn underflow(&self, detail: String) -> ConvertError {
        ConvertError::StructuralUnderflow {
            node: self.node_name(),
            detail,
            position: self.cursor.position(),
        }
    }

    /// Pop a token of the given exact type
    pub fn expect(&mut self, exact: ExactKind) -> Result<&'t Token> {
        self.require(exact.name(), |token| token.is(exact))
    }

    /// Pop a token of the given coarse type
    pub fn expect_kind(&mut self, kind: TokenKind) -> Result<&'t Token> {
        self.require(kind.name(), |token| token.kind == kind)
    }

    /// Pop a NAME spelling the identifier `id`
    ///
    /// The AST holds identifiers NFKC-normalized, so non-ASCII spellings
    /// are taken as they are.
    pub fn expect_name(&mut self, id: &str) -> Result<&'t Token> {
        self.require(&format!("'{}'", id), |token| {
            token.kind == TokenKind::Name && (token.text == id || !token.text.is_ascii())
        })
    }

    pub fn expect_keyword(&mut self, word: &str) -> Result<&'t Token> {
        self.require(&format!("'{}'", word), |token| token.is_keyword(word))
    }

    pub fn expect_op(&mut self, op: OpToken) -> Result<&'t Token> {
        match op {
            OpToken::Op(exact) => self.expect(exact),
            OpToken::Keyword(word) => self.expect_keyword(word),
        }
    }

    /// Pop a keyword and return it with its leading gap
    pub fn keyword(&mut self, word: &str) -> Result<String> {
        self.expect_keyword(word)?;
        Ok(self.cursor.text_around())
    }

    /// An element holding exactly the text of `token`
    ///
    /// The gap before the token goes to `parent`, so the element text is
    /// the token alone.
    pub fn atom(&mut self, parent: &mut Element, tag: &str, token: &Token) -> Element {
        parent.push_text(self.cursor.take_leading_gap());
        Element::with_text(tag, token.text.as_str())
    }
}
