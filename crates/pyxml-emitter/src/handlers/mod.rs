//! Conversion rules, one handler per node kind

pub(crate) mod expr;
mod ops;
pub(crate) mod stmt;

pub use ops::*;

use pyxml_ast::NodeKind;

use crate::{Handler, Rule};

/// The rule for a node kind, if it has one
///
/// Roots (`Module`, `Expression`) are converted by `Emitter::emit_root`;
/// helper nodes (`alias`, `arguments`, `arg`) by the handlers of the
/// statements that own them.
pub fn rule(kind: &NodeKind) -> Option<Rule> {
    let (handler, parenthesizable): (Handler, bool) = match kind {
        // === Statements ===
        NodeKind::Expr => (stmt::expr_statement, false),
        NodeKind::Pass => (stmt::pass, false),
        NodeKind::Break => (stmt::break_statement, false),
        NodeKind::Continue => (stmt::continue_statement, false),
        NodeKind::Assign => (stmt::assign, false),
        NodeKind::AugAssign => (stmt::aug_assign, false),
        NodeKind::Return => (stmt::return_statement, false),
        NodeKind::Import => (stmt::import, false),
        NodeKind::ImportFrom => (stmt::import_from, false),
        NodeKind::FunctionDef => (stmt::function_def, false),
        NodeKind::If => (stmt::if_statement, false),
        NodeKind::While => (stmt::while_statement, false),
        NodeKind::Global => (stmt::global, false),
        NodeKind::Nonlocal => (stmt::nonlocal, false),
        NodeKind::Delete => (stmt::delete, false),
        NodeKind::Assert => (stmt::assert, false),

        // === Expressions ===
        NodeKind::Num => (expr::num, true),
        NodeKind::Str => (expr::string, true),
        NodeKind::Bytes => (expr::string, true),
        NodeKind::JoinedStr => (expr::string, true),
        NodeKind::NameConstant => (expr::name_constant, true),
        NodeKind::Constant => (expr::constant, true),
        NodeKind::Ellipsis => (expr::ellipsis, true),
        NodeKind::Name => (expr::name, true),
        NodeKind::Tuple => (expr::tuple, true),
        NodeKind::List => (expr::list, true),
        NodeKind::Set => (expr::set, true),
        NodeKind::Dict => (expr::dict, true),
        NodeKind::BinOp => (expr::bin_op, true),
        NodeKind::UnaryOp => (expr::unary_op, true),
        NodeKind::BoolOp => (expr::bool_op, true),
        NodeKind::Compare => (expr::compare, true),
        NodeKind::Call => (expr::call, true),
        NodeKind::Starred => (expr::starred, false),
        NodeKind::Attribute => (expr::attribute, true),
        NodeKind::Keyword => (expr::keyword, false),

        NodeKind::Module
        | NodeKind::Expression
        | NodeKind::Alias
        | NodeKind::Arguments
        | NodeKind::Arg
        | NodeKind::Other(_) => return None,
    };
    Some(Rule {
        handler,
        parenthesizable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_cover_supported_kinds() {
        for name in ["Assign", "ImportFrom", "BinOp", "Compare", "keyword", "Constant"] {
            assert!(rule(&NodeKind::from(name)).is_some(), "no rule for {}", name);
        }
        for name in ["Module", "alias", "arguments", "Lambda", "Load"] {
            assert!(rule(&NodeKind::from(name)).is_none(), "unexpected rule for {}", name);
        }
    }

    #[test]
    fn test_only_expressions_take_parentheses() {
        let paren = |name: &str| rule(&NodeKind::from(name)).is_some_and(|r| r.parenthesizable);
        assert!(paren("BinOp"));
        assert!(paren("Tuple"));
        assert!(!paren("Assign"));
        assert!(!paren("keyword"));
    }
}
