//! The layered recursive descent parser.
//!
//! One [Parser] context holds the token cursor, the diagnostic reporter,
//! and the node factory; the grammar layers live as `impl` blocks in
//! `declarations` and `expressions`, outer layers calling inner ones.
//!
//! Recovery philosophy: every "expected X, got Y" condition is *reported*,
//! never returned as a hard error. When the expected token is missing the
//! parser fabricates a synthetic token carrying the expected lexeme (marked
//! [recovered](Token::is_recovered)), so the produced tree is always
//! structurally complete. Under the fail-fast listener the report itself
//! propagates as `Err`, which is what makes the same code strict for the
//! CLI and resilient for tooling.
//!
//! Termination: [Parser::advance] strictly increases the cursor while
//! tokens remain, and every parse loop either consumes a token or advances
//! explicitly, so parsing finishes in at most token-list-length steps on
//! any input.

use quill_ast::expr::IdentifierExpr;
use quill_ast::factory::AstFactory;
use quill_ast::op::OperatorType;
use quill_tokens::diagnostics::{MessageCode, StaticMessage, StaticMessageReporter};
use quill_tokens::token::{Keyword, Token, TokenKind};
use std::fmt::{Debug, Formatter};
use tracing::trace;

mod declarations;
mod expressions;

pub type ParseResult<T> = Result<T, StaticMessage>;

/// The shared state of all grammar layers
pub struct Parser<'l> {
    tokens: Vec<Token>,
    position: usize,
    reporter: StaticMessageReporter<'l>,
    factory: AstFactory,
}

impl<'l> Parser<'l> {
    /// Creates a parser over a lexed token list.
    ///
    /// Token lists built by hand (tests) may omit the trailing EOF marker;
    /// it is appended so the cursor always has a resting point.
    pub fn new(
        mut tokens: Vec<Token>,
        reporter: StaticMessageReporter<'l>,
        factory: AstFactory,
    ) -> Self {
        if !tokens.last().is_some_and(|token| token.kind().is_eof()) {
            let offset = tokens.last().map(Token::end).unwrap_or(0);
            tokens.push(Token::new(offset, TokenKind::Eof, ""));
        }
        Self {
            tokens,
            position: 0,
            reporter,
            factory,
        }
    }

    /// The current cursor position; only ever increases
    pub fn position(&self) -> usize {
        self.position
    }

    /// False once the cursor rests on the EOF marker
    pub fn has_next(&self) -> bool {
        !self.current().kind().is_eof()
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    /// The kind `offset` tokens ahead, clamped to EOF
    fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.position + offset)
            .map(Token::kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Non-consuming lookahead
    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind() == kind
    }

    fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current().kind())
    }

    /// Consumes and returns the current token iff its kind is one of
    /// `kinds`
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if self.check_any(kinds) && self.has_next() {
            Some(self.advance())
        } else {
            None
        }
    }

    fn match_kind(&mut self, kind: TokenKind) -> Option<Token> {
        self.match_any(&[kind])
    }

    fn match_keyword(&mut self, keyword: Keyword) -> Option<Token> {
        self.match_kind(TokenKind::Keyword(keyword))
    }

    /// Returns the current token and moves the cursor forward while tokens
    /// remain; at EOF the marker is returned and the cursor stays put
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.has_next() {
            self.position += 1;
        }
        token
    }

    /// Fabricates a synthetic token carrying the expected lexeme at the
    /// current offset
    fn synthetic(&self, kind: TokenKind, lexeme: &str) -> Token {
        Token::recovered(self.current().offset(), kind, lexeme)
    }

    /// Consumes a token of `kind`, or reports `code` and substitutes a
    /// synthetic token carrying `lexeme`
    fn expect(&mut self, kind: TokenKind, lexeme: &str, code: MessageCode) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let found = self.current().clone();
        trace!("expected {kind:?} but found {found:?}");
        self.reporter.report_token(&found, code)?;
        Ok(self.synthetic(kind, lexeme))
    }

    fn expect_keyword(&mut self, keyword: Keyword, code: MessageCode) -> ParseResult<Token> {
        self.expect(TokenKind::Keyword(keyword), keyword.lexeme(), code)
    }

    /// Consumes an identifier, or reports and substitutes a synthetic
    /// identifier node
    fn expect_identifier(&mut self) -> ParseResult<IdentifierExpr> {
        let token = self.expect(
            TokenKind::Identifier,
            "",
            MessageCode::SyntaxExpectedIdentifier,
        )?;
        Ok(self.factory.identifier(token))
    }
}

impl Debug for Parser<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("position", &self.position)
            .field("current", self.current())
            .finish()
    }
}

/// Whether a token kind can begin a primary expression
fn starts_primary(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::String
            | TokenKind::Number
            | TokenKind::OpenParen
            | TokenKind::Keyword(Keyword::If)
    )
}

/// Whether a token kind can begin any expression
fn starts_expression(kind: TokenKind) -> bool {
    starts_primary(kind) || OperatorType::prefix(kind).is_some()
}
