//! pyxml AST - Read-only view of a CPython `ast` dump
//!
//! The AST is produced outside of this workspace (by CPython's `ast`
//! module) and handed over as JSON: every node is an object carrying its
//! class name under `_type`, followed by its fields in declaration order.
//! This crate only reads that structure; it never builds an AST from
//! Python source.

mod error;
mod field;
mod kind;
mod node;
mod span;

pub use error::*;
pub use field::*;
pub use kind::*;
pub use node::*;
pub use span::*;
