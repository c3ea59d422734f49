//! Operator nodes and the tokens they guarantee

use pyxml_lexer::ExactKind;

/// A token an operator node is spelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpToken {
    Op(ExactKind),
    Keyword(&'static str),
}

use OpToken::{Keyword, Op};

/// `BinOp.op`
pub fn binary(op: &str) -> Option<OpToken> {
    let exact = match op {
        "Add" => ExactKind::Plus,
        "Sub" => ExactKind::Minus,
        "Mult" => ExactKind::Star,
        "MatMult" => ExactKind::At,
        "Div" => ExactKind::Slash,
        "FloorDiv" => ExactKind::DoubleSlash,
        "Mod" => ExactKind::Percent,
        "Pow" => ExactKind::DoubleStar,
        "LShift" => ExactKind::LeftShift,
        "RShift" => ExactKind::RightShift,
        "BitOr" => ExactKind::Vbar,
        "BitXor" => ExactKind::Circumflex,
        "BitAnd" => ExactKind::Amper,
        _ => return None,
    };
    Some(Op(exact))
}

/// `AugAssign.op`
pub fn augmented(op: &str) -> Option<OpToken> {
    let exact = match op {
        "Add" => ExactKind::PlusEqual,
        "Sub" => ExactKind::MinEqual,
        "Mult" => ExactKind::StarEqual,
        "MatMult" => ExactKind::AtEqual,
        "Div" => ExactKind::SlashEqual,
        "FloorDiv" => ExactKind::DoubleSlashEqual,
        "Mod" => ExactKind::PercentEqual,
        "Pow" => ExactKind::DoubleStarEqual,
        "LShift" => ExactKind::LeftShiftEqual,
        "RShift" => ExactKind::RightShiftEqual,
        "BitOr" => ExactKind::VbarEqual,
        "BitXor" => ExactKind::CircumflexEqual,
        "BitAnd" => ExactKind::AmperEqual,
        _ => return None,
    };
    Some(Op(exact))
}

/// `UnaryOp.op`
pub fn unary(op: &str) -> Option<OpToken> {
    match op {
        "UAdd" => Some(Op(ExactKind::Plus)),
        "USub" => Some(Op(ExactKind::Minus)),
        "Invert" => Some(Op(ExactKind::Tilde)),
        "Not" => Some(Keyword("not")),
        _ => None,
    }
}

/// `BoolOp.op`
pub fn boolean(op: &str) -> Option<OpToken> {
    match op {
        "And" => Some(Keyword("and")),
        "Or" => Some(Keyword("or")),
        _ => None,
    }
}

/// `Compare.ops` items; `is not` and `not in` take two tokens
pub fn comparison(op: &str) -> Option<&'static [OpToken]> {
    let tokens: &'static [OpToken] = match op {
        "Eq" => &[Op(ExactKind::EqEqual)],
        "NotEq" => &[Op(ExactKind::NotEqual)],
        "Lt" => &[Op(ExactKind::Less)],
        "LtE" => &[Op(ExactKind::LessEqual)],
        "Gt" => &[Op(ExactKind::Greater)],
        "GtE" => &[Op(ExactKind::GreaterEqual)],
        "Is" => &[Keyword("is")],
        "IsNot" => &[Keyword("is"), Keyword("not")],
        "In" => &[Keyword("in")],
        "NotIn" => &[Keyword("not"), Keyword("in")],
        _ => return None,
    };
    Some(tokens)
}
