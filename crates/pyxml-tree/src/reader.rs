//! XML reading and source reconstruction
//!
//! The reader understands the subset of XML a tree document can contain,
//! plus the usual decorations other tools may add (declarations,
//! processing instructions, comments, doctype, CDATA sections). Lexing
//! switches between a content mode and a tag mode with `Lexer::morph`.

use logos::{Lexer, Logos};

use crate::{Element, MarkupError};

/// Tokens between tags
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Content {
    #[regex(r"[^<&]+")]
    Text,

    #[regex(r"&[#A-Za-z0-9]+;")]
    Entity,

    #[regex(r"<[A-Za-z_:][A-Za-z0-9_:.\-]*")]
    StartTag,

    #[regex(r"</[A-Za-z_:][A-Za-z0-9_:.\-]*[ \t\r\n]*>")]
    EndTag,

    #[token("<![CDATA[", |lex| skip_past(lex, "]]>"))]
    CData,

    #[token("<!--", |lex| skip_past(lex, "-->"))]
    Comment,

    #[token("<?", |lex| skip_past(lex, "?>"))]
    Instruction,

    #[token("<!DOCTYPE", |lex| skip_past(lex, ">"))]
    Doctype,
}

/// Tokens inside a start tag
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum Tag {
    #[regex(r"[A-Za-z_:][A-Za-z0-9_:.\-]*")]
    Name,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*"|'[^']*'"#)]
    Value,

    #[token(">")]
    Close,

    #[token("/>")]
    SelfClose,
}

fn skip_past<'s, T>(lex: &mut Lexer<'s, T>, terminator: &str) -> bool
where
    T: Logos<'s, Source = str>,
{
    match lex.remainder().find(terminator) {
        Some(offset) => {
            lex.bump(offset + terminator.len());
            true
        }
        None => false,
    }
}

/// Parse an XML document into its root element
pub fn read(xml: &str) -> Result<Element, MarkupError> {
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut lex = Content::lexer(xml);

    while let Some(token) = lex.next() {
        let offset = lex.span().start;
        let token = token.map_err(|_| MarkupError::Unexpected { offset })?;
        match token {
            Content::Text => {
                let text = lex.slice();
                match stack.last_mut() {
                    Some(parent) => parent.append_text(text),
                    None if text.trim().is_empty() => {}
                    None => return Err(MarkupError::TextOutsideRoot { offset }),
                }
            }
            Content::Entity => {
                let decoded = decode_entity(lex.slice(), offset)?;
                let parent = stack
                    .last_mut()
                    .ok_or(MarkupError::TextOutsideRoot { offset })?;
                parent.append_text(&decoded);
            }
            Content::CData => {
                let slice = lex.slice();
                let inner = &slice["<![CDATA[".len()..slice.len() - "]]>".len()];
                let parent = stack
                    .last_mut()
                    .ok_or(MarkupError::TextOutsideRoot { offset })?;
                parent.append_text(inner);
            }
            Content::Comment | Content::Instruction | Content::Doctype => {}
            Content::StartTag => {
                let mut element = Element::new(&lex.slice()[1..]);
                let mut tag = lex.morph::<Tag>();
                let self_closing = read_attributes(&mut tag, &mut element)?;
                lex = tag.morph();
                if self_closing {
                    attach(&mut stack, &mut root, element, offset)?;
                } else {
                    stack.push(element);
                }
            }
            Content::EndTag => {
                let name = lex.slice()[2..].trim_end_matches('>').trim_end();
                let element = stack.pop().ok_or_else(|| MarkupError::MismatchedTag {
                    expected: String::new(),
                    found: name.to_string(),
                    offset,
                })?;
                if element.tag() != name {
                    return Err(MarkupError::MismatchedTag {
                        expected: element.tag().to_string(),
                        found: name.to_string(),
                        offset,
                    });
                }
                attach(&mut stack, &mut root, element, offset)?;
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(MarkupError::UnexpectedEof {
            tag: open.tag().to_string(),
        });
    }
    root.ok_or(MarkupError::NoRoot)
}

/// Read attributes up to the end of a start tag; true if self-closing
fn read_attributes(tag: &mut Lexer<'_, Tag>, element: &mut Element) -> Result<bool, MarkupError> {
    loop {
        match tag.next() {
            Some(Ok(Tag::Close)) => return Ok(false),
            Some(Ok(Tag::SelfClose)) => return Ok(true),
            Some(Ok(Tag::Name)) => {
                let name = tag.slice().to_string();
                if tag.next() != Some(Ok(Tag::Equals)) {
                    return Err(MarkupError::Unexpected { offset: tag.span().start });
                }
                if tag.next() != Some(Ok(Tag::Value)) {
                    return Err(MarkupError::Unexpected { offset: tag.span().start });
                }
                let quoted = tag.slice();
                let value = unescape(&quoted[1..quoted.len() - 1], tag.span().start + 1)?;
                element.set_attribute(name, value);
            }
            Some(_) => return Err(MarkupError::Unexpected { offset: tag.span().start }),
            None => {
                return Err(MarkupError::UnexpectedEof {
                    tag: element.tag().to_string(),
                })
            }
        }
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    offset: usize,
) -> Result<(), MarkupError> {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(MarkupError::MultipleRoots { offset }),
    }
    Ok(())
}

fn decode_entity(entity: &str, offset: usize) -> Result<String, MarkupError> {
    let name = &entity[1..entity.len() - 1];
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(decimal) = name.strip_prefix('#') {
                decimal.parse().ok()
            } else {
                None
            };
            code.and_then(char::from_u32)
        }
    };
    decoded
        .map(String::from)
        .ok_or_else(|| MarkupError::UnknownEntity {
            entity: entity.to_string(),
            offset,
        })
}

/// Decode entity references inside an attribute value
fn unescape(raw: &str, offset: usize) -> Result<String, MarkupError> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let end = rest[amp..].find(';').ok_or(MarkupError::Unexpected {
            offset: offset + (raw.len() - rest.len()) + amp,
        })?;
        let entity = &rest[amp..amp + end + 1];
        out.push_str(&decode_entity(entity, offset + (raw.len() - rest.len()) + amp)?);
        rest = &rest[amp + end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Recover the source text from a tree document
pub fn reconstruct(xml: &str) -> Result<String, MarkupError> {
    Ok(read(xml)?.text())
}
