//! AST error types

use thiserror::Error;

pub type Result<T, E = AstError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AstError {
    #[error("invalid AST dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{node} node has no field `{field}`")]
    MissingField { node: String, field: String },

    #[error("field `{field}` of {node} node is not {expected}")]
    FieldType {
        node: String,
        field: String,
        expected: &'static str,
    },
}
