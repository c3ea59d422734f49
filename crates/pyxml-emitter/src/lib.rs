//! pyxml Emitter - AST and token stream to lossless element tree
//!
//! Walks the AST depth-first while draining the token stream in matching
//! order, turning every token and every gap between tokens into text
//! leaves of the tree:
//! - statements collect the trivia before them (blank lines, comments,
//!   indentation) and keep their own line end
//! - expressions take the parentheses around them
//! - node kinds without a rule degrade to a structural walk, or fail in
//!   strict mode

mod cursor;
mod emitter;
mod error;
pub mod handlers;
mod options;
mod trivia;

pub use cursor::*;
pub use emitter::*;
pub use error::*;
pub use options::*;

use pyxml_ast::AstNode;
use pyxml_lexer::Token;

/// Convert an AST and the tokens of its source into an element tree
pub fn convert(tokens: &[Token], ast: &AstNode, options: ConvertOptions) -> Result<Conversion> {
    log::debug!(
        "converting {} node(s) against {} token(s)",
        ast.count(),
        tokens.len()
    );
    let mut emitter = Emitter::new(tokens, options);
    let tree = emitter.emit_root(ast)?;
    let degradations = emitter.into_degradations();
    log::debug!(
        "converted {} into <{}>, {} degradation(s)",
        ast.kind,
        tree.tag(),
        degradations.len()
    );
    Ok(Conversion { tree, degradations })
}
