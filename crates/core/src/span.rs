//! Source span extraction.
//!
//! tree-sitter keeps no literal text for compound type expressions, so whenever a
//! signature fragment is needed verbatim we slice it back out of the source.

use tree_sitter::Node;

/// Anything that covers a 0-based, end-exclusive byte range of the source.
pub trait Spanned {
    fn start_byte(&self) -> usize;
    fn end_byte(&self) -> usize;
}

impl Spanned for Node<'_> {
    fn start_byte(&self) -> usize {
        Node::start_byte(self)
    }
    fn end_byte(&self) -> usize {
        Node::end_byte(self)
    }
}

/// Exact text covered by `node`.
///
/// The parser is the offset authority: a range outside `source` (or off a char
/// boundary) means the node did not come from this source and panics.
pub fn source_span<'s>(source: &'s str, node: &impl Spanned) -> &'s str {
    &source[node.start_byte()..node.end_byte()]
}
