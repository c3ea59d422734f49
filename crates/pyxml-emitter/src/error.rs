//! Conversion error types

use pyxml_ast::{AstError, Position};
use thiserror::Error;

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{node}: expected {expected}, found {found} at {position}")]
    TokenMismatch {
        node: String,
        expected: String,
        found: String,
        position: Position,
    },

    #[error("{node}: {detail} at {position}")]
    StructuralUnderflow {
        node: String,
        detail: String,
        position: Position,
    },

    #[error("no conversion rule for {kind} node at {position}")]
    UnimplementedNodeKind { kind: String, position: Position },

    #[error("{kind} cannot be the root of a conversion")]
    UnsupportedRoot { kind: String },

    #[error(transparent)]
    Ast(#[from] AstError),
}

impl ConvertError {
    /// Source position the error points at, when it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            ConvertError::TokenMismatch { position, .. } => Some(*position),
            ConvertError::StructuralUnderflow { position, .. } => Some(*position),
            ConvertError::UnimplementedNodeKind { position, .. } => Some(*position),
            ConvertError::UnsupportedRoot { .. } => None,
            ConvertError::Ast(_) => None,
        }
    }
}
