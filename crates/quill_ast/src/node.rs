//! The base contract every syntax tree node fulfills

use quill_tokens::span::Span;
use quill_tokens::token::Token;

/// A node in the syntax tree.
///
/// Every concrete node exposes the first and last token it covers, either
/// stored directly or derived from a child's span, so the exact source
/// range of any node can always be reconstructed. Nodes are immutable once
/// constructed and own their children exclusively.
pub trait AstNode {
    fn first_token(&self) -> &Token;

    fn last_token(&self) -> &Token;

    /// The source range this node occupies
    fn span(&self) -> Span {
        let first = self.first_token();
        let last = self.last_token();
        Span::new(first.offset(), last.end().saturating_sub(first.offset()))
    }

    /// Whether any of this node's edge tokens were fabricated by error
    /// recovery
    fn is_recovered(&self) -> bool {
        self.first_token().is_recovered() || self.last_token().is_recovered()
    }
}
