//! Node kind tags

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! node_kinds {
    ($($variant:ident => $name:literal,)*) => {
        /// The class of an AST node
        ///
        /// Closed over the kinds the emitter has rules for; every other class
        /// (operators, contexts, constructs without a rule) is kept verbatim
        /// in `Other`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum NodeKind {
            $($variant,)*
            Other(String),
        }

        impl NodeKind {
            /// The CPython class name
            pub fn as_str(&self) -> &str {
                match self {
                    $(NodeKind::$variant => $name,)*
                    NodeKind::Other(name) => name,
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = std::convert::Infallible;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                Ok(match name {
                    $($name => NodeKind::$variant,)*
                    other => NodeKind::Other(other.to_string()),
                })
            }
        }
    };
}

node_kinds! {
    // === Roots ===
    Module => "Module",
    Expression => "Expression",

    // === Statements ===
    Expr => "Expr",
    Pass => "Pass",
    Break => "Break",
    Continue => "Continue",
    Assign => "Assign",
    AugAssign => "AugAssign",
    Return => "Return",
    Import => "Import",
    ImportFrom => "ImportFrom",
    FunctionDef => "FunctionDef",
    If => "If",
    While => "While",
    Global => "Global",
    Nonlocal => "Nonlocal",
    Delete => "Delete",
    Assert => "Assert",

    // === Expressions ===
    Num => "Num",
    Str => "Str",
    Bytes => "Bytes",
    JoinedStr => "JoinedStr",
    NameConstant => "NameConstant",
    Constant => "Constant",
    Ellipsis => "Ellipsis",
    Name => "Name",
    Tuple => "Tuple",
    List => "List",
    Set => "Set",
    Dict => "Dict",
    BinOp => "BinOp",
    UnaryOp => "UnaryOp",
    BoolOp => "BoolOp",
    Compare => "Compare",
    Call => "Call",
    Starred => "Starred",
    Attribute => "Attribute",

    // === Helper nodes ===
    Keyword => "keyword",
    Alias => "alias",
    Arguments => "arguments",
    Arg => "arg",
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        NodeKind::from(name.as_str())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kind_round_trips_name() {
        let kind = NodeKind::from("ImportFrom");
        assert_eq!(kind, NodeKind::ImportFrom);
        assert_eq!(kind.as_str(), "ImportFrom");
    }

    #[test]
    fn test_lowercase_helper_kinds() {
        assert_eq!(NodeKind::from("keyword"), NodeKind::Keyword);
        assert_eq!(NodeKind::from("alias"), NodeKind::Alias);
        assert_eq!(NodeKind::Arguments.to_string(), "arguments");
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let kind = NodeKind::from("Lambda");
        assert_eq!(kind, NodeKind::Other("Lambda".to_string()));
        assert_eq!(kind.as_str(), "Lambda");
    }
}
