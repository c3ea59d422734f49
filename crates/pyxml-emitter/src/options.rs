//! Conversion options and results

use pyxml_ast::Position;
use pyxml_tree::Element;

/// Options for a single conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Fail on node kinds without a conversion rule instead of falling
    /// back to a structural walk
    pub strict: bool,
}

impl ConvertOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// A subtree emitted by the fallback walk
///
/// The walk consumes no tokens of its own, so the text of the construct
/// is not in the tree and reconstruction of the file is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    pub kind: String,
    pub position: Option<Position>,
}

/// The result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tree: Element,
    pub degradations: Vec<Degradation>,
}

impl Conversion {
    /// True when every node went through a conversion rule
    pub fn is_lossless(&self) -> bool {
        self.degradations.is_empty()
    }
}
