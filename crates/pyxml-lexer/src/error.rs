//! Lexer error types

use pyxml_ast::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("unindent does not match any outer indentation level at {position}")]
    InconsistentDedent { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position } => *position,
            LexError::InconsistentDedent { position } => *position,
        }
    }
}
