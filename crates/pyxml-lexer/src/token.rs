//! Token definitions for Python source

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use logos::{Lexer, Logos};
use pyxml_ast::Position;

/// Exact token type, one variant per operator
///
/// Mirrors CPython's `tokenize` exact types. `Nl`, `Indent`, `Dedent`,
/// `EndMarker` and `ErrorToken` are never matched by the raw lexer; the
/// layout pass produces them.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\x0C]+")]
#[logos(skip r"\\\r?\n")]
pub enum ExactKind {
    // === Line structure ===
    #[regex(r"\r?\n")]
    Newline,
    Nl,
    Indent,
    Dedent,
    EndMarker,

    #[regex(r"#[^\r\n]*")]
    Comment,

    // === Atoms ===
    #[regex(r"[\p{XID_Start}_][\p{XID_Continue}]*")]
    Name,

    #[regex(r"0[xX](_?[0-9a-fA-F])+")]
    #[regex(r"0[oO](_?[0-7])+")]
    #[regex(r"0[bB](_?[01])+")]
    #[regex(r"[0-9](_?[0-9])*[jJ]?")]
    #[regex(r"[0-9](_?[0-9])*\.([0-9](_?[0-9])*)?([eE][+-]?[0-9](_?[0-9])*)?[jJ]?")]
    #[regex(r"\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?[jJ]?")]
    #[regex(r"[0-9](_?[0-9])*[eE][+-]?[0-9](_?[0-9])*[jJ]?")]
    Number,

    #[regex(r#"[rRbBuUfF]{0,2}'([^'\\\r\n]|\\(.|\r?\n))*'"#)]
    #[regex(r#"[rRbBuUfF]{0,2}"([^"\\\r\n]|\\(.|\r?\n))*""#)]
    #[regex(r#"[rRbBuUfF]{0,2}'''"#, |lex| close_triple(lex, "'''"))]
    #[regex(r#"[rRbBuUfF]{0,2}""""#, |lex| close_triple(lex, "\"\"\""))]
    String,

    // === Delimiters ===
    #[token("(")]
    Lpar,
    #[token(")")]
    Rpar,
    #[token("[")]
    Lsqb,
    #[token("]")]
    Rsqb,
    #[token("{")]
    Lbrace,
    #[token("}")]
    Rbrace,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("->")]
    Rarrow,
    #[token("@")]
    At,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("|")]
    Vbar,
    #[token("&")]
    Amper,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Equal,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("~")]
    Tilde,
    #[token("^")]
    Circumflex,
    #[token("<<")]
    LeftShift,
    #[token(">>")]
    RightShift,
    #[token("**")]
    DoubleStar,
    #[token("//")]
    DoubleSlash,
    #[token(":=")]
    ColonEqual,

    // === Augmented assignment ===
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("&=")]
    AmperEqual,
    #[token("|=")]
    VbarEqual,
    #[token("^=")]
    CircumflexEqual,
    #[token("<<=")]
    LeftShiftEqual,
    #[token(">>=")]
    RightShiftEqual,
    #[token("**=")]
    DoubleStarEqual,
    #[token("//=")]
    DoubleSlashEqual,
    #[token("@=")]
    AtEqual,

    ErrorToken,
}

/// Extend a triple-quoted string match up to its closing quotes
fn close_triple(lex: &mut Lexer<ExactKind>, quotes: &str) -> bool {
    let rest = lex.remainder();
    let mut escaped = false;
    for (offset, c) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if rest[offset..].starts_with(quotes) {
            lex.bump(offset + quotes.len());
            return true;
        }
    }
    false
}

/// Coarse token type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Name,
    Number,
    String,
    Op,
    Comment,
    Nl,
    Newline,
    Indent,
    Dedent,
    EndMarker,
    ErrorToken,
}

impl TokenKind {
    /// The `tokenize` module name
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Op => "OP",
            TokenKind::Comment => "COMMENT",
            TokenKind::Nl => "NL",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::EndMarker => "ENDMARKER",
            TokenKind::ErrorToken => "ERRORTOKEN",
        }
    }
}

impl ExactKind {
    pub fn kind(&self) -> TokenKind {
        match self {
            ExactKind::Newline => TokenKind::Newline,
            ExactKind::Nl => TokenKind::Nl,
            ExactKind::Indent => TokenKind::Indent,
            ExactKind::Dedent => TokenKind::Dedent,
            ExactKind::EndMarker => TokenKind::EndMarker,
            ExactKind::Comment => TokenKind::Comment,
            ExactKind::Name => TokenKind::Name,
            ExactKind::Number => TokenKind::Number,
            ExactKind::String => TokenKind::String,
            ExactKind::ErrorToken => TokenKind::ErrorToken,
            _ => TokenKind::Op,
        }
    }

    pub fn opens_bracket(&self) -> bool {
        matches!(self, ExactKind::Lpar | ExactKind::Lsqb | ExactKind::Lbrace)
    }

    pub fn closes_bracket(&self) -> bool {
        matches!(self, ExactKind::Rpar | ExactKind::Rsqb | ExactKind::Rbrace)
    }

    /// The `tokenize` module name of the exact type
    pub fn name(&self) -> &'static str {
        match self {
            ExactKind::Newline => "NEWLINE",
            ExactKind::Nl => "NL",
            ExactKind::Indent => "INDENT",
            ExactKind::Dedent => "DEDENT",
            ExactKind::EndMarker => "ENDMARKER",
            ExactKind::Comment => "COMMENT",
            ExactKind::Name => "NAME",
            ExactKind::Number => "NUMBER",
            ExactKind::String => "STRING",
            ExactKind::Lpar => "LPAR",
            ExactKind::Rpar => "RPAR",
            ExactKind::Lsqb => "LSQB",
            ExactKind::Rsqb => "RSQB",
            ExactKind::Lbrace => "LBRACE",
            ExactKind::Rbrace => "RBRACE",
            ExactKind::Colon => "COLON",
            ExactKind::Comma => "COMMA",
            ExactKind::Semi => "SEMI",
            ExactKind::Dot => "DOT",
            ExactKind::Ellipsis => "ELLIPSIS",
            ExactKind::Rarrow => "RARROW",
            ExactKind::At => "AT",
            ExactKind::Plus => "PLUS",
            ExactKind::Minus => "MINUS",
            ExactKind::Star => "STAR",
            ExactKind::Slash => "SLASH",
            ExactKind::Vbar => "VBAR",
            ExactKind::Amper => "AMPER",
            ExactKind::Less => "LESS",
            ExactKind::Greater => "GREATER",
            ExactKind::Equal => "EQUAL",
            ExactKind::Percent => "PERCENT",
            ExactKind::EqEqual => "EQEQUAL",
            ExactKind::NotEqual => "NOTEQUAL",
            ExactKind::LessEqual => "LESSEQUAL",
            ExactKind::GreaterEqual => "GREATEREQUAL",
            ExactKind::Tilde => "TILDE",
            ExactKind::Circumflex => "CIRCUMFLEX",
            ExactKind::LeftShift => "LEFTSHIFT",
            ExactKind::RightShift => "RIGHTSHIFT",
            ExactKind::DoubleStar => "DOUBLESTAR",
            ExactKind::DoubleSlash => "DOUBLESLASH",
            ExactKind::ColonEqual => "COLONEQUAL",
            ExactKind::PlusEqual => "PLUSEQUAL",
            ExactKind::MinEqual => "MINEQUAL",
            ExactKind::StarEqual => "STAREQUAL",
            ExactKind::SlashEqual => "SLASHEQUAL",
            ExactKind::PercentEqual => "PERCENTEQUAL",
            ExactKind::AmperEqual => "AMPEREQUAL",
            ExactKind::VbarEqual => "VBAREQUAL",
            ExactKind::CircumflexEqual => "CIRCUMFLEXEQUAL",
            ExactKind::LeftShiftEqual => "LEFTSHIFTEQUAL",
            ExactKind::RightShiftEqual => "RIGHTSHIFTEQUAL",
            ExactKind::DoubleStarEqual => "DOUBLESTAREQUAL",
            ExactKind::DoubleSlashEqual => "DOUBLESLASHEQUAL",
            ExactKind::AtEqual => "ATEQUAL",
            ExactKind::ErrorToken => "ERRORTOKEN",
        }
    }
}

/// A token with its text and location
///
/// `span` is the byte range of the token in `source`, which every token of
/// one stream shares.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub exact: ExactKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
    pub span: Range<usize>,
    pub source: Arc<str>,
}

impl Token {
    pub fn is(&self, exact: ExactKind) -> bool {
        self.exact == exact
    }

    /// A NAME token spelling the given keyword
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Name && self.text == word
    }

    /// Source text from the end of `previous` (or the start of the file)
    /// up to this token
    pub fn text_since(&self, previous: Option<&Token>) -> &str {
        let from = previous.map_or(0, |token| token.span.end);
        self.source.get(from..self.span.start).unwrap_or("")
    }

    /// Short human description, for diagnostics
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Op | TokenKind::Name => format!("'{}'", self.text),
            _ => self.exact.name().to_string(),
        }
    }
}

impl fmt::Display for Token {
    /// Same layout as `python -m tokenize -e`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = format!(
            "{},{}-{},{}:",
            self.start.line, self.start.column, self.end.line, self.end.column
        );
        write!(f, "{:<20}{:<15}{:?}", range, self.exact.name(), self.text)
    }
}
