//! Field values and their JSON decoding

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::{AstNode, NodeKind};

/// A scalar field value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::None => f.write_str("None"),
            Scalar::Bool(true) => f.write_str("True"),
            Scalar::Bool(false) => f.write_str("False"),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

/// The value of a named field
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Scalar(Scalar),
    Node(Box<AstNode>),
    /// An ordered list; items are usually nodes, but CPython also stores
    /// identifier lists (`Global.names`) and `None` holes (`Dict.keys`).
    List(Vec<Field>),
}

impl Field {
    pub fn as_node(&self) -> Option<&AstNode> {
        match self {
            Field::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Field::Scalar(Scalar::None))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Field::Scalar(Scalar::None) => "None",
            Field::Scalar(Scalar::Bool(_)) => "a bool",
            Field::Scalar(Scalar::Int(_)) => "an int",
            Field::Scalar(Scalar::Float(_)) => "a float",
            Field::Scalar(Scalar::Str(_)) => "a string",
            Field::Node(_) => "a node",
            Field::List(_) => "a list",
        }
    }
}

impl From<AstNode> for Field {
    fn from(node: AstNode) -> Self {
        Field::Node(Box::new(node))
    }
}

impl From<Option<AstNode>> for Field {
    fn from(node: Option<AstNode>) -> Self {
        match node {
            Some(node) => Field::from(node),
            None => Field::Scalar(Scalar::None),
        }
    }
}

impl From<Vec<AstNode>> for Field {
    fn from(nodes: Vec<AstNode>) -> Self {
        Field::List(nodes.into_iter().map(Field::from).collect())
    }
}

impl From<Vec<Field>> for Field {
    fn from(items: Vec<Field>) -> Self {
        Field::List(items)
    }
}

impl From<Scalar> for Field {
    fn from(scalar: Scalar) -> Self {
        Field::Scalar(scalar)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Scalar(Scalar::Str(s))
    }
}

impl From<i64> for Field {
    fn from(n: i64) -> Self {
        Field::Scalar(Scalar::Int(n))
    }
}

impl From<f64> for Field {
    fn from(n: f64) -> Self {
        Field::Scalar(Scalar::Float(n))
    }
}

impl From<bool> for Field {
    fn from(b: bool) -> Self {
        Field::Scalar(Scalar::Bool(b))
    }
}

// === JSON decoding ===
//
// Nodes are decoded straight from the map stream so that fields keep the
// order in which the dump lists them.

const KIND_KEY: &str = "_type";

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an AST node object, a list, or a scalar")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Field, E> {
        Ok(Field::Scalar(Scalar::None))
    }

    fn visit_none<E: de::Error>(self) -> Result<Field, E> {
        Ok(Field::Scalar(Scalar::None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Field, D::Error> {
        Field::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Field, E> {
        Ok(Field::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Field, E> {
        Ok(Field::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Field, E> {
        Ok(match i64::try_from(v) {
            Ok(n) => Field::from(n),
            Err(_) => Field::from(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Field, E> {
        Ok(Field::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Field, E> {
        Ok(Field::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Field, E> {
        Ok(Field::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Field, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Field>()? {
            items.push(item);
        }
        Ok(Field::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Field, A::Error> {
        let mut kind: Option<NodeKind> = None;
        let mut fields = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == KIND_KEY {
                if kind.is_some() {
                    return Err(de::Error::duplicate_field(KIND_KEY));
                }
                kind = Some(NodeKind::from(map.next_value::<String>()?));
            } else {
                fields.push((key, map.next_value::<Field>()?));
            }
        }

        let kind = kind.ok_or_else(|| de::Error::missing_field(KIND_KEY))?;
        Ok(Field::from(AstNode { kind, fields }))
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for AstNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Field::deserialize(deserializer)? {
            Field::Node(node) => Ok(*node),
            other => Err(de::Error::custom(format_args!(
                "expected an AST node object, found {}",
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_field_order() {
        let json = r#"{"_type": "BinOp", "right": {"_type": "Name", "id": "b"},
                       "op": {"_type": "Add"}, "left": {"_type": "Name", "id": "a"}}"#;
        let node: AstNode = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = node.fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["right", "op", "left"]);
        assert_eq!(node.kind, NodeKind::BinOp);
    }

    #[test]
    fn test_decode_scalars_and_holes() {
        let json = r#"{"_type": "Dict", "keys": [null, {"_type": "Num", "n": 1}],
                       "values": [], "lineno": 3, "flag": true, "x": 1.5}"#;
        let node: AstNode = serde_json::from_str(json).unwrap();
        match node.get("keys") {
            Some(Field::List(items)) => {
                assert!(items[0].is_none());
                assert_eq!(items[1].as_node().map(|n| n.kind.as_str()), Some("Num"));
            }
            other => panic!("unexpected keys field: {:?}", other),
        }
        assert_eq!(node.get("lineno"), Some(&Field::Scalar(Scalar::Int(3))));
        assert_eq!(node.get("flag"), Some(&Field::Scalar(Scalar::Bool(true))));
        assert_eq!(node.get("x"), Some(&Field::Scalar(Scalar::Float(1.5))));
    }

    #[test]
    fn test_decode_requires_type_key() {
        let result: Result<AstNode, _> = serde_json::from_str(r#"{"id": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_non_node_root() {
        let result: Result<AstNode, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }
}
