//! Statement handlers
//!
//! Every statement handler starts by collecting the trivia before the
//! statement into a leaf of `parent`, and ends with the statement's line
//! end (`;`, trailing comment, NEWLINE) inside its own element.

use pyxml_ast::{AstNode, NodeKind};
use pyxml_lexer::{ExactKind, TokenKind};
use pyxml_tree::Element;

use super::ops;
use crate::{ConvertError, DottedName, Emitter, Result};

// === Roots ===

/// Body statements, trailing trivia, then ENDMARKER
pub fn module(em: &mut Emitter<'_>, node: &AstNode) -> Result<Element> {
    let mut element = Element::new("Module");
    em.emit_all(&node.nodes("body")?, &mut element)?;
    finish(em, &mut element)?;
    Ok(element)
}

/// An `eval`-mode tree: a single expression
pub fn expression(em: &mut Emitter<'_>, node: &AstNode) -> Result<Element> {
    let mut element = Element::new("Expression");
    em.cursor.consume_trivia(&mut element);
    em.emit(node.node("body")?, &mut element)?;
    finish(em, &mut element)?;
    Ok(element)
}

fn finish(em: &mut Emitter<'_>, element: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(element);
    if !em.cursor.at(ExactKind::EndMarker) {
        let left = em.cursor.remaining();
        return Err(em.underflow(format!("{} token(s) left after the last node", left)));
    }
    em.expect(ExactKind::EndMarker)?;
    element.push_text(em.cursor.text_around());
    Ok(())
}

// === Helpers ===

/// Statements of a block field, wrapped in an element named after it
fn suite(em: &mut Emitter<'_>, node: &AstNode, field: &str) -> Result<Element> {
    let mut element = Element::new(field);
    em.emit_all(&node.nodes(field)?, &mut element)?;
    Ok(element)
}

/// `:` ending a compound statement header, with the rest of its line
fn header_end(em: &mut Emitter<'_>, element: &mut Element) -> Result<()> {
    em.expect(ExactKind::Colon)?;
    element.push_text(em.cursor.text_around());
    em.cursor.consume_line_end(element);
    Ok(())
}

/// A list field that older dumps may not have
fn nodes_or_empty<'a>(node: &'a AstNode, field: &str) -> Result<Vec<&'a AstNode>> {
    match node.get(field) {
        None => Ok(Vec::new()),
        Some(_) => Ok(node.nodes(field)?),
    }
}

fn keyword_statement(
    em: &mut Emitter<'_>,
    parent: &mut Element,
    tag: &str,
    word: &str,
) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new(tag);
    element.push_text(em.keyword(word)?);
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

// === Simple statements ===

pub fn expr_statement(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("Expr");
    em.emit(node.node("value")?, &mut element)?;
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

pub fn pass(em: &mut Emitter<'_>, _node: &AstNode, parent: &mut Element) -> Result<()> {
    keyword_statement(em, parent, "Pass", "pass")
}

pub fn break_statement(em: &mut Emitter<'_>, _node: &AstNode, parent: &mut Element) -> Result<()> {
    keyword_statement(em, parent, "Break", "break")
}

pub fn continue_statement(
    em: &mut Emitter<'_>,
    _node: &AstNode,
    parent: &mut Element,
) -> Result<()> {
    keyword_statement(em, parent, "Continue", "continue")
}

/// `a = b = value`: targets and the `=` between them go in `targets`
pub fn assign(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("Assign");

    let targets = node.nodes("targets")?;
    let mut wrapper = Element::new("targets");
    for (index, target) in targets.iter().enumerate() {
        em.emit(target, &mut wrapper)?;
        if index + 1 < targets.len() {
            em.expect(ExactKind::Equal)?;
            wrapper.push_text(em.cursor.text_prev_to_next());
        }
    }
    element.push(wrapper);

    em.expect(ExactKind::Equal)?;
    element.push_text(em.cursor.text_prev_to_next());
    em.emit(node.node("value")?, &mut element)?;
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

pub fn aug_assign(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("AugAssign");
    em.emit(node.node("target")?, &mut element)?;

    let op = node.node("op")?;
    let token = ops::augmented(op.kind.as_str()).ok_or_else(|| {
        ConvertError::UnimplementedNodeKind {
            kind: op.kind.to_string(),
            position: em.cursor.position(),
        }
    })?;
    em.expect_op(token)?;
    element.push(Element::with_text(
        op.kind.as_str(),
        em.cursor.text_prev_to_next(),
    ));

    em.emit(node.node("value")?, &mut element)?;
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

pub fn return_statement(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("Return");
    element.push_text(em.keyword("return")?);
    if let Some(value) = node.opt_node("value")? {
        em.emit(value, &mut element)?;
    }
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

pub fn delete(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("Delete");
    element.push_text(em.keyword("del")?);
    let mut targets = Element::new("targets");
    em.comma_delimited(&node.nodes("targets")?, &mut targets)?;
    element.push(targets);
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

pub fn assert(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("Assert");
    element.push_text(em.keyword("assert")?);
    em.emit(node.node("test")?, &mut element)?;
    if let Some(msg) = node.opt_node("msg")? {
        em.expect(ExactKind::Comma)?;
        element.push_text(em.cursor.text_around());
        let mut wrapper = Element::new("msg");
        em.emit(msg, &mut wrapper)?;
        element.push(wrapper);
    }
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

fn scope_declaration(
    em: &mut Emitter<'_>,
    node: &AstNode,
    parent: &mut Element,
    word: &str,
) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new(node.kind.as_str());
    element.push_text(em.keyword(word)?);
    let mut names = Element::new("names");
    for name in node.strs("names")? {
        let token = em.expect_name(name)?;
        let name = em.atom(&mut names, "name", token);
        names.push(name);
        em.commas(&mut names);
    }
    element.push(names);
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

pub fn global(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    scope_declaration(em, node, parent, "global")
}

pub fn nonlocal(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    scope_declaration(em, node, parent, "nonlocal")
}

// === Imports ===

/// Pop a dotted name that must spell `expected`
fn dotted_name(em: &mut Emitter<'_>, expected: &str) -> Result<DottedName> {
    let position = em.cursor.position();
    match em.cursor.pop_dotted_name() {
        Some(dotted) if dotted.name == expected || !dotted.name.is_ascii() => Ok(dotted),
        Some(dotted) => Err(em.mismatch(
            &format!("'{}'", expected),
            format!("'{}'", dotted.name),
            position,
        )),
        None => {
            em.expect_kind(TokenKind::Name)?;
            Err(em.underflow("dotted name expected".to_string()))
        }
    }
}

/// `alias` elements for the names of an import
///
/// The `name` child keeps the dotted name as written, inner gaps
/// included; the canonical name is the `name` attribute.
fn import_names(em: &mut Emitter<'_>, node: &AstNode, names: &mut Element) -> Result<()> {
    for alias in node.nodes("names")? {
        let mut element = Element::new("alias");
        let name = alias.str("name")?;
        element.set_attribute("name", name);

        if name == "*" {
            let token = em.expect(ExactKind::Star)?;
            let star = em.atom(&mut element, "name", token);
            element.push(star);
        } else {
            let dotted = dotted_name(em, name)?;
            element.push_text(dotted.leading);
            element.push(Element::with_text("name", dotted.text));
        }

        if let Some(asname) = alias.opt_str("asname")? {
            element.set_attribute("asname", asname);
            element.push_text(em.keyword("as")?);
            let token = em.expect_name(asname)?;
            let asname = em.atom(&mut element, "asname", token);
            element.push(asname);
        }

        names.push(element);
        em.commas(names);
    }
    Ok(())
}

pub fn import(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("Import");
    element.push_text(em.keyword("import")?);
    let mut names = Element::new("names");
    import_names(em, node, &mut names)?;
    element.push(names);
    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

/// `from ..pkg.mod import (a as b, c)`
pub fn import_from(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("ImportFrom");
    // Absent or null means an absolute import
    let level = match node.get("level") {
        Some(field) if !field.is_none() => node.int("level")?,
        _ => 0,
    };
    element.set_attribute("level", level.to_string());
    element.push_text(em.keyword("from")?);

    // `...` is a single token worth three levels
    while em.cursor.at(ExactKind::Dot) || em.cursor.at(ExactKind::Ellipsis) {
        em.cursor.pop();
        element.push_text(em.cursor.text_around());
    }

    if let Some(module) = node.opt_str("module")? {
        let dotted = dotted_name(em, module)?;
        element.push_text(dotted.leading);
        element.push(Element::with_text("module", dotted.text));
    }

    element.push_text(em.keyword("import")?);
    let mut names = Element::new("names");
    if em.cursor.at(ExactKind::Lpar) {
        em.cursor.pop();
        element.push_text(em.cursor.text_around());
        import_names(em, node, &mut names)?;
        element.push(names);
        em.expect(ExactKind::Rpar)?;
        element.push_text(em.cursor.text_around());
    } else {
        import_names(em, node, &mut names)?;
        element.push(names);
    }

    em.cursor.consume_line_end(&mut element);
    parent.push(element);
    Ok(())
}

// === Compound statements ===

fn parameter(
    em: &mut Emitter<'_>,
    arg: &AstNode,
    default: Option<&AstNode>,
    tag: &str,
    parent: &mut Element,
) -> Result<()> {
    let name = arg.str("arg")?;
    let token = em.expect_name(name)?;
    let mut element = em.atom(parent, tag, token);
    element.set_attribute("name", name);

    if let Some(annotation) = arg.opt_node("annotation")? {
        em.expect(ExactKind::Colon)?;
        element.push_text(em.cursor.text_around());
        let mut wrapper = Element::new("annotation");
        em.emit(annotation, &mut wrapper)?;
        element.push(wrapper);
    }
    if let Some(default) = default {
        em.expect(ExactKind::Equal)?;
        let mut wrapper = Element::new("default");
        wrapper.push_text(em.cursor.text_around());
        em.emit(default, &mut wrapper)?;
        element.push(wrapper);
    }

    parent.push(element);
    em.commas(parent);
    Ok(())
}

/// Parameter list in source order: positional-only, `/`, positional,
/// `*args` or a bare `*`, keyword-only, `**kwargs`
fn parameters(em: &mut Emitter<'_>, arguments: &AstNode, args: &mut Element) -> Result<()> {
    let posonly = nodes_or_empty(arguments, "posonlyargs")?;
    let mut positional = posonly.clone();
    positional.extend(arguments.nodes("args")?);
    let defaults = arguments.nodes("defaults")?;
    let first_default = positional.len().saturating_sub(defaults.len());

    for (index, arg) in positional.iter().enumerate() {
        let default = index
            .checked_sub(first_default)
            .and_then(|offset| defaults.get(offset).copied());
        parameter(em, arg, default, "arg", args)?;
        if index + 1 == posonly.len() {
            em.expect(ExactKind::Slash)?;
            args.push_text(em.cursor.text_around());
            em.commas(args);
        }
    }

    let vararg = arguments.opt_node("vararg")?;
    let kwonly = nodes_or_empty(arguments, "kwonlyargs")?;
    if vararg.is_some() || !kwonly.is_empty() {
        em.expect(ExactKind::Star)?;
        args.push_text(em.cursor.text_around());
        match vararg {
            Some(vararg) => parameter(em, vararg, None, "vararg", args)?,
            None => em.commas(args),
        }
        let kw_defaults = match arguments.get("kw_defaults") {
            Some(_) => arguments.opt_nodes("kw_defaults")?,
            None => Vec::new(),
        };
        for (index, arg) in kwonly.iter().enumerate() {
            let default = kw_defaults.get(index).copied().flatten();
            parameter(em, arg, default, "arg", args)?;
        }
    }

    if let Some(kwarg) = arguments.opt_node("kwarg")? {
        em.expect(ExactKind::DoubleStar)?;
        args.push_text(em.cursor.text_around());
        parameter(em, kwarg, None, "kwarg", args)?;
    }
    Ok(())
}

/// Decorators, `def name(params) -> returns:`, then the body
pub fn function_def(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("FunctionDef");
    element.set_attribute("name", node.str("name")?);

    let decorators = node.nodes("decorator_list")?;
    if !decorators.is_empty() {
        let mut wrapper = Element::new("decorator_list");
        for (index, decorator) in decorators.iter().enumerate() {
            if index > 0 {
                em.cursor.consume_trivia(&mut wrapper);
            }
            em.expect(ExactKind::At)?;
            wrapper.push_text(em.cursor.text_around());
            em.emit(decorator, &mut wrapper)?;
            em.cursor.consume_line_end(&mut wrapper);
        }
        element.push(wrapper);
        em.cursor.consume_trivia(&mut element);
    }

    element.push_text(em.keyword("def")?);
    em.expect_name(node.str("name")?)?;
    element.push_text(em.cursor.text_around());

    let mut arguments = Element::new("arguments");
    em.expect(ExactKind::Lpar)?;
    arguments.push_text(em.cursor.text_around());
    let mut args = Element::new("args");
    parameters(em, node.node("args")?, &mut args)?;
    if !args.children().is_empty() {
        arguments.push(args);
    }
    em.expect(ExactKind::Rpar)?;
    arguments.push_text(em.cursor.text_around());
    element.push(arguments);

    if let Some(returns) = node.opt_node("returns")? {
        em.expect(ExactKind::Rarrow)?;
        element.push_text(em.cursor.text_around());
        let mut wrapper = Element::new("returns");
        em.emit(returns, &mut wrapper)?;
        element.push(wrapper);
    }

    header_end(em, &mut element)?;
    element.push(suite(em, node, "body")?);
    parent.push(element);
    Ok(())
}

pub fn if_statement(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let element = if_chain(em, node, "if")?;
    parent.push(element);
    Ok(())
}

/// An `if` or `elif` clause and whatever follows it
///
/// An `orelse` holding a single `If` spelled `elif` continues the chain
/// inside the `orelse` element.
fn if_chain(em: &mut Emitter<'_>, node: &AstNode, word: &str) -> Result<Element> {
    let mut element = Element::new("If");
    element.push_text(em.keyword(word)?);
    em.emit(node.node("test")?, &mut element)?;
    header_end(em, &mut element)?;
    element.push(suite(em, node, "body")?);

    let orelse = node.nodes("orelse")?;
    if orelse.is_empty() {
        return Ok(element);
    }
    em.cursor.consume_trivia(&mut element);
    match orelse.as_slice() {
        [nested] if nested.kind == NodeKind::If && em.cursor.at_keyword("elif") => {
            let mut wrapper = Element::new("orelse");
            wrapper.push(if_chain(em, nested, "elif")?);
            element.push(wrapper);
        }
        _ => {
            element.push_text(em.keyword("else")?);
            header_end(em, &mut element)?;
            element.push(suite(em, node, "orelse")?);
        }
    }
    Ok(element)
}

pub fn while_statement(em: &mut Emitter<'_>, node: &AstNode, parent: &mut Element) -> Result<()> {
    em.cursor.consume_trivia(parent);
    let mut element = Element::new("While");
    element.push_text(em.keyword("while")?);
    em.emit(node.node("test")?, &mut element)?;
    header_end(em, &mut element)?;
    element.push(suite(em, node, "body")?);

    if !node.nodes("orelse")?.is_empty() {
        em.cursor.consume_trivia(&mut element);
        element.push_text(em.keyword("else")?);
        header_end(em, &mut element)?;
        element.push(suite(em, node, "orelse")?);
    }
    parent.push(element);
    Ok(())
}
