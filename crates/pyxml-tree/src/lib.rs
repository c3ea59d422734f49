//! pyxml Tree - Lossless element tree and its XML form
//!
//! The tree is deliberately small: elements with ordered attributes and
//! ordered children, where a child is either an element or a text leaf.
//! All source text lives in text leaves, so concatenating them in document
//! order reproduces the source.

mod element;
mod error;
mod reader;
mod serialize;

pub use element::*;
pub use error::*;
pub use reader::*;
pub use serialize::*;
