//! AST nodes

use crate::{AstError, Field, NodeKind, Position, Result, Scalar, Span};

/// A node of the external AST: a kind tag plus an ordered field table
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub fields: Vec<(String, Field)>,
}

impl AstNode {
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field append
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Field>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Decode a JSON dump
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    fn require(&self, name: &str) -> Result<&Field> {
        self.get(name).ok_or_else(|| AstError::MissingField {
            node: self.kind.to_string(),
            field: name.to_string(),
        })
    }

    fn wrong_type(&self, name: &str, expected: &'static str) -> AstError {
        AstError::FieldType {
            node: self.kind.to_string(),
            field: name.to_string(),
            expected,
        }
    }

    /// A required single-child field
    pub fn node(&self, name: &str) -> Result<&AstNode> {
        self.require(name)?
            .as_node()
            .ok_or_else(|| self.wrong_type(name, "a node"))
    }

    /// A single-child field that may be `None` or absent
    pub fn opt_node(&self, name: &str) -> Result<Option<&AstNode>> {
        match self.get(name) {
            None => Ok(None),
            Some(Field::Scalar(Scalar::None)) => Ok(None),
            Some(Field::Node(node)) => Ok(Some(node)),
            Some(_) => Err(self.wrong_type(name, "a node or None")),
        }
    }

    /// A list-of-nodes field
    pub fn nodes(&self, name: &str) -> Result<Vec<&AstNode>> {
        self.opt_nodes(name)?
            .into_iter()
            .map(|item| item.ok_or_else(|| self.wrong_type(name, "a list of nodes")))
            .collect()
    }

    /// A list field whose items may be `None` (e.g. `Dict.keys`)
    pub fn opt_nodes(&self, name: &str) -> Result<Vec<Option<&AstNode>>> {
        match self.require(name)? {
            Field::List(items) => items
                .iter()
                .map(|item| match item {
                    Field::Node(node) => Ok(Some(node.as_ref())),
                    Field::Scalar(Scalar::None) => Ok(None),
                    _ => Err(self.wrong_type(name, "a list of nodes")),
                })
                .collect(),
            _ => Err(self.wrong_type(name, "a list")),
        }
    }

    /// A list-of-identifiers field (e.g. `Global.names`)
    pub fn strs(&self, name: &str) -> Result<Vec<&str>> {
        match self.require(name)? {
            Field::List(items) => items
                .iter()
                .map(|item| match item {
                    Field::Scalar(Scalar::Str(s)) => Ok(s.as_str()),
                    _ => Err(self.wrong_type(name, "a list of strings")),
                })
                .collect(),
            _ => Err(self.wrong_type(name, "a list")),
        }
    }

    pub fn str(&self, name: &str) -> Result<&str> {
        self.opt_str(name)?
            .ok_or_else(|| self.wrong_type(name, "a string"))
    }

    pub fn opt_str(&self, name: &str) -> Result<Option<&str>> {
        match self.get(name) {
            None | Some(Field::Scalar(Scalar::None)) => Ok(None),
            Some(Field::Scalar(Scalar::Str(s))) => Ok(Some(s)),
            Some(_) => Err(self.wrong_type(name, "a string")),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        match self.require(name)? {
            Field::Scalar(Scalar::Int(n)) => Ok(*n),
            _ => Err(self.wrong_type(name, "an int")),
        }
    }

    pub fn scalar(&self, name: &str) -> Result<&Scalar> {
        match self.require(name)? {
            Field::Scalar(scalar) => Ok(scalar),
            _ => Err(self.wrong_type(name, "a scalar")),
        }
    }

    fn opt_position(&self, line: &str, column: &str) -> Option<Position> {
        match (self.get(line)?, self.get(column)?) {
            (Field::Scalar(Scalar::Int(l)), Field::Scalar(Scalar::Int(c))) => {
                Some(Position::new(usize::try_from(*l).ok()?, usize::try_from(*c).ok()?))
            }
            _ => None,
        }
    }

    /// Location attributes, when the dump carries them
    pub fn span(&self) -> Option<Span> {
        let start = self.opt_position("lineno", "col_offset")?;
        let end = self.opt_position("end_lineno", "end_col_offset");
        Some(Span::new(start, end))
    }

    /// Child nodes in field order, flattening lists
    pub fn children(&self) -> impl Iterator<Item = &AstNode> + '_ {
        self.fields.iter().flat_map(|(_, value)| {
            let items: Vec<&AstNode> = match value {
                Field::Node(node) => vec![node.as_ref()],
                Field::List(items) => items.iter().filter_map(Field::as_node).collect(),
                Field::Scalar(_) => Vec::new(),
            };
            items
        })
    }

    /// Number of nodes in this subtree
    pub fn count(&self) -> usize {
        1 + self.children().map(AstNode::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(id: &str) -> AstNode {
        AstNode::new("Name")
            .with("id", id)
            .with("ctx", AstNode::new("Load"))
    }

    #[test]
    fn test_accessors() {
        let call = AstNode::new("Call")
            .with("func", name("f"))
            .with("args", vec![name("a"), name("b")])
            .with("keywords", Vec::<AstNode>::new());

        assert_eq!(call.node("func").unwrap().str("id").unwrap(), "f");
        assert_eq!(call.nodes("args").unwrap().len(), 2);
        assert!(call.nodes("keywords").unwrap().is_empty());
        assert!(call.opt_node("starargs").unwrap().is_none());
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let node = name("x");
        assert!(matches!(
            node.node("value"),
            Err(AstError::MissingField { .. })
        ));
        assert!(matches!(node.node("id"), Err(AstError::FieldType { .. })));
        assert!(matches!(node.int("id"), Err(AstError::FieldType { .. })));
    }

    #[test]
    fn test_span() {
        let node = name("x")
            .with("lineno", 2i64)
            .with("col_offset", 4i64)
            .with("end_lineno", 2i64)
            .with("end_col_offset", 5i64);
        let span = node.span().unwrap();
        assert_eq!(span.start, Position::new(2, 4));
        assert_eq!(span.end, Some(Position::new(2, 5)));

        let legacy = name("x").with("lineno", 1i64).with("col_offset", 0i64);
        assert_eq!(legacy.span().unwrap().end, None);
        assert!(name("x").span().is_none());
    }

    #[test]
    fn test_children_and_count() {
        let assign = AstNode::new("Assign")
            .with("targets", vec![name("x")])
            .with("value", AstNode::new("Num").with("n", 1i64));
        assert_eq!(assign.children().count(), 2);
        // Assign, Name, Load, Num
        assert_eq!(assign.count(), 4);
    }

    #[test]
    fn test_from_json() {
        let node = AstNode::from_json(r#"{"_type": "Global", "names": ["a", "b"]}"#).unwrap();
        assert_eq!(node.strs("names").unwrap(), vec!["a", "b"]);
        assert!(AstNode::from_json("{not json").is_err());
    }
}
