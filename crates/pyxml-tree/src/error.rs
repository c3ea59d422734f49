//! Markup error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("unexpected markup at byte {offset}")]
    Unexpected { offset: usize },

    #[error("unexpected end of document inside <{tag}>")]
    UnexpectedEof { tag: String },

    #[error("closing tag </{found}> at byte {offset} does not match <{expected}>")]
    MismatchedTag {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("unknown entity {entity} at byte {offset}")]
    UnknownEntity { entity: String, offset: usize },

    #[error("text outside the root element at byte {offset}")]
    TextOutsideRoot { offset: usize },

    #[error("second root element at byte {offset}")]
    MultipleRoots { offset: usize },

    #[error("document has no root element")]
    NoRoot,
}
