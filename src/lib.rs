//! pyxml - Lossless conversion of Python source to XML
//!
//! The root crate ties the workspace together: it tokenizes the source,
//! loads the AST dump, runs the emitter and serializes the tree. The
//! actual implementation is in the workspace member crates.

use thiserror::Error;

// Re-export main crates for convenience
pub use pyxml_ast as ast;
pub use pyxml_emitter as emitter;
pub use pyxml_lexer as lexer;
pub use pyxml_tree as tree;

pub use pyxml_emitter::{convert, Conversion, ConvertError, ConvertOptions};
pub use pyxml_tree::{reconstruct, serialize, Element, SerializeOptions};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] pyxml_lexer::LexError),

    #[error(transparent)]
    Ast(#[from] pyxml_ast::AstError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Markup(#[from] pyxml_tree::MarkupError),
}

impl Error {
    /// Source position the error points at, when it has one
    pub fn position(&self) -> Option<pyxml_ast::Position> {
        match self {
            Error::Lex(e) => Some(e.position()),
            Error::Convert(e) => e.position(),
            Error::Ast(_) | Error::Markup(_) => None,
        }
    }
}

/// Tokenize `source`, load its AST dump and build the element tree
pub fn to_tree(source: &str, ast_json: &str, options: ConvertOptions) -> Result<Conversion, Error> {
    let tokens = pyxml_lexer::tokenize(source)?;
    let root = pyxml_ast::AstNode::from_json(ast_json)?;
    Ok(convert(&tokens, &root, options)?)
}

/// Convert Python source and its AST dump to an XML document
pub fn py2xml(source: &str, ast_json: &str) -> Result<String, Error> {
    let conversion = to_tree(source, ast_json, ConvertOptions::default())?;
    Ok(serialize(&conversion.tree, &SerializeOptions::default()))
}

/// Recover the Python source from an XML document
pub fn xml2py(xml: &str) -> Result<String, Error> {
    Ok(reconstruct(xml)?)
}
