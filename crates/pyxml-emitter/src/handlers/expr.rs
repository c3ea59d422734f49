//! Expression handlers
//!
//! Expression handlers never collect trivia. Parentheses around them are
//! taken by the emitter before the handler runs.

use pyxml_ast::{AstNode, Scalar};
use pyxml_lexer::{ExactKind, TokenKind};
use pyxml_tree::Element;

use super::ops::{self, OpToken};
use crate::{ConvertError, Emitter, Result};

fn unknown_operator(em: &Emitter<'_>, op: &AstNode) -> ConvertError {
    ConvertError::UnimplementedNodeKind {
        kind: op.kind.to_string(),
        position: em.cursor.position(),
    }
}

fn set_ctx(element: &mut Element, node: &AstNode) -> Result<()> {
    if let Some(ctx) = node.opt_node("ctx")? {
        element.set_attribute("ctx", ctx.kind.as_str());
    }
    Ok(())
}

/// Scalar value as an attribute, for everything but strings
fn set_value(element: &mut Element, name: &str, node: &AstNode, field: &str) {
    match node.scalar(field) {
        Ok(Scalar::Str(_)) | Err(_) => {}
        Ok(value) => element.set_attribute(name, value.to_string()),
    }
}

/// Op element spelled by one or more tokens, with the gaps around them
fn operator(em: &mut Emitter<'_>, op: &AstNode, tokens: &[OpToken]) -> Result<Element> {
    let mut text = String::new();
    for token in tokens {
        em.expect_op(*token)?;
        text.push_str(&em.cursor.text_around());
    }
    text.push_str(&em.cursor.gap_to_next());
    Ok(Element::with_text(op.kind.as_str(), text))
}

// === Atoms ===

pub fn num(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let token = em.expect_kind(TokenKind::Number)?;
    let mut element = em.atom(parent, "Num", token);
    set_value(&mut element, "n", node, "n");
    parent.push(element);
    Ok(())
}

/// `Str`, `Bytes` and `JoinedStr`: one `s` child per literal of an
/// implicit concatenation
///
/// An f-string is a single STRING token, so its replacement fields stay
/// inside the literal text.
pub fn string(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let element = string_run(em, node.kind.as_str(), parent)?;
    parent.push(element);
    Ok(())
}

fn string_run(em: &mut Emitter<'_>, tag: &str, parent: &mut Element) -> Result<Element> {
    let token = em.expect_kind(TokenKind::String)?;
    parent.push_text(em.cursor.take_leading_gap());
    let mut element = Element::new(tag);
    element.push(Element::with_text("s", token.text.as_str()));
    while em
        .cursor
        .peek()
        .is_some_and(|next| next.kind == TokenKind::String)
    {
        let token = em.expect_kind(TokenKind::String)?;
        element.push_text(em.cursor.take_leading_gap());
        element.push(Element::with_text("s", token.text.as_str()));
    }
    Ok(element)
}

pub fn name_constant(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let token = em.expect_kind(TokenKind::Name)?;
    let mut element = em.atom(parent, "NameConstant", token);
    set_value(&mut element, "value", node, "value");
    parent.push(element);
    Ok(())
}

/// `Constant` covers every literal since Python 3.8; the token at the
/// cursor says which one this is
pub fn constant(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let kind = em.cursor.peek().map(|token| token.kind);
    let mut element = match kind {
        Some(TokenKind::String) => string_run(em, "Constant", parent)?,
        Some(kind @ (TokenKind::Number | TokenKind::Name)) => {
            let token = em.expect_kind(kind)?;
            em.atom(parent, "Constant", token)
        }
        _ => {
            let token = em.expect(ExactKind::Ellipsis)?;
            em.atom(parent, "Constant", token)
        }
    };
    set_value(&mut element, "value", node, "value");
    parent.push(element);
    Ok(())
}

pub fn ellipsis(em: &mut Emitter<'_>, _node: &AstNode, parent: &mut Element) -> Result<()> {
    let token = em.expect(ExactKind::Ellipsis)?;
    let element = em.atom(parent, "Ellipsis", token);
    parent.push(element);
    Ok(())
}

pub fn name(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let id = node.str("id")?;
    let token = em.expect_name(id)?;
    let mut element = em.atom(parent, "Name", token);
    element.set_attribute("name", id);
    set_ctx(&mut element, node)?;
    parent.push(element);
    Ok(())
}

// === Displays ===

pub fn tuple(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("Tuple");
    set_ctx(&mut element, node)?;
    em.comma_delimited(&node.nodes("elts")?, &mut element)?;
    parent.push(element);
    Ok(())
}

fn bracketed(
    em: &mut Emitter<'_>,
    node: &AstNode,
    parent: &mut Element,
    open: ExactKind,
    close: ExactKind,
) -> Result<()> {
    let mut element = Element::new(node.kind.as_str());
    set_ctx(&mut element, node)?;
    em.expect(open)?;
    element.push_text(em.cursor.text_around());
    em.comma_delimited(&node.nodes("elts")?, &mut element)?;
    em.expect(close)?;
    element.push_text(em.cursor.text_around());
    parent.push(element);
    Ok(())
}

pub fn list(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    bracketed(em, node, parent, ExactKind::Lsqb, ExactKind::Rsqb)
}

pub fn set(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    bracketed(em, node, parent, ExactKind::Lbrace, ExactKind::Rbrace)
}

/// Entries become `key`/`value` pairs; a `None` key is a `**mapping`
/// unpacking
pub fn dict(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("Dict");
    em.expect(ExactKind::Lbrace)?;
    element.push_text(em.cursor.text_around());

    let keys = node.opt_nodes("keys")?;
    let values = node.nodes("values")?;
    for (key, value) in keys.into_iter().zip(values) {
        match key {
            Some(key) => {
                let mut wrapper = Element::new("key");
                em.emit(key, &mut wrapper)?;
                element.push(wrapper);
                em.expect(ExactKind::Colon)?;
                element.push_text(em.cursor.text_around());
            }
            None => {
                em.expect(ExactKind::DoubleStar)?;
                element.push_text(em.cursor.text_around());
            }
        }
        let mut wrapper = Element::new("value");
        em.emit(value, &mut wrapper)?;
        element.push(wrapper);
        em.commas(&mut element);
    }

    em.expect(ExactKind::Rbrace)?;
    element.push_text(em.cursor.text_around());
    parent.push(element);
    Ok(())
}

// === Operators ===

pub fn bin_op(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("BinOp");
    em.emit(node.node("left")?, &mut element)?;
    let op = node.node("op")?;
    let token = ops::binary(op.kind.as_str()).ok_or_else(|| unknown_operator(em, op))?;
    element.push(operator(em, op, &[token])?);
    em.emit(node.node("right")?, &mut element)?;
    parent.push(element);
    Ok(())
}

pub fn unary_op(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("UnaryOp");
    let op = node.node("op")?;
    let token = ops::unary(op.kind.as_str()).ok_or_else(|| unknown_operator(em, op))?;
    element.push(operator(em, op, &[token])?);
    em.emit(node.node("operand")?, &mut element)?;
    parent.push(element);
    Ok(())
}

pub fn bool_op(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("BoolOp");
    let op = node.node("op")?;
    let token = ops::boolean(op.kind.as_str()).ok_or_else(|| unknown_operator(em, op))?;
    for (index, value) in node.nodes("values")?.into_iter().enumerate() {
        if index > 0 {
            element.push(operator(em, op, &[token])?);
        }
        em.emit(value, &mut element)?;
    }
    parent.push(element);
    Ok(())
}

pub fn compare(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("Compare");
    em.emit(node.node("left")?, &mut element)?;
    for (op, comparator) in node.nodes("ops")?.into_iter().zip(node.nodes("comparators")?) {
        let tokens = ops::comparison(op.kind.as_str()).ok_or_else(|| unknown_operator(em, op))?;
        element.push(operator(em, op, tokens)?);
        em.emit(comparator, &mut element)?;
    }
    parent.push(element);
    Ok(())
}

// === Calls and trailers ===

/// Positional and keyword arguments share one `args` element, in source
/// order when the dump has positions for all of them
pub fn call(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("Call");
    let mut func = Element::new("func");
    em.emit(node.node("func")?, &mut func)?;
    element.push(func);

    em.expect(ExactKind::Lpar)?;
    element.push_text(em.cursor.text_around());

    let mut items = node.nodes("args")?;
    items.extend(node.nodes("keywords")?);
    if items.iter().all(|item| item.span().is_some()) {
        items.sort_by_key(|item| item.span().map(|span| span.start));
    }
    if !items.is_empty() {
        let mut args = Element::new("args");
        em.comma_delimited(&items, &mut args)?;
        element.push(args);
    }

    em.expect(ExactKind::Rpar)?;
    element.push_text(em.cursor.text_around());
    parent.push(element);
    Ok(())
}

/// `name=value`, or `**mapping` when the keyword has no name
pub fn keyword(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("keyword");
    match node.opt_str("arg")? {
        Some(arg) => {
            let token = em.expect_name(arg)?;
            parent.push_text(em.cursor.take_leading_gap());
            element.set_attribute("arg", arg);
            element.push_text(token.text.as_str());
            em.expect(ExactKind::Equal)?;
        }
        None => {
            em.expect(ExactKind::DoubleStar)?;
        }
    }
    element.push_text(em.cursor.text_around());
    em.emit(node.node("value")?, &mut element)?;
    parent.push(element);
    Ok(())
}

pub fn starred(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("Starred");
    set_ctx(&mut element, node)?;
    em.expect(ExactKind::Star)?;
    element.push_text(em.cursor.text_around());
    em.emit(node.node("value")?, &mut element)?;
    parent.push(element);
    Ok(())
}

pub fn attribute(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    let mut element = Element::new("Attribute");
    let attr = node.str("attr")?;
    element.set_attribute("attr", attr);
    set_ctx(&mut element, node)?;
    em.emit(node.node("value")?, &mut element)?;
    em.expect(ExactKind::Dot)?;
    element.push_text(em.cursor.text_around());
    let token = em.expect_name(attr)?;
    let attr = em.atom(&mut element, "attr", token);
    element.push(attr);
    parent.push(element);
    Ok(())
}
