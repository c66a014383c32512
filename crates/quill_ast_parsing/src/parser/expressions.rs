//! The expression grammar: precedence climbing from the conditional at the
//! loosest level down through the property/call chain to primaries.
//!
//! Each binary level is a left-associative fold: it repeatedly matches its
//! own operator set and delegates tighter-binding operators to the next
//! level down.

use super::{starts_primary, ParseResult, Parser};
use quill_ast::expr::Expr;
use quill_ast::op::{Operator, OperatorType};
use quill_tokens::diagnostics::MessageCode;
use quill_tokens::token::{Keyword, OperatorToken, Token, TokenKind};

const LOGICAL_OR: &[TokenKind] = &[TokenKind::Operator(OperatorToken::Or)];
const LOGICAL_AND: &[TokenKind] = &[TokenKind::Operator(OperatorToken::And)];
const EQUALITY: &[TokenKind] = &[
    TokenKind::Operator(OperatorToken::Equal),
    TokenKind::Operator(OperatorToken::NotEqual),
    TokenKind::Operator(OperatorToken::StrictEqual),
    TokenKind::Operator(OperatorToken::StrictNotEqual),
];
const COMPARISON: &[TokenKind] = &[
    TokenKind::Operator(OperatorToken::Less),
    TokenKind::Operator(OperatorToken::Greater),
    TokenKind::Operator(OperatorToken::LessEqual),
    TokenKind::Operator(OperatorToken::GreaterEqual),
];
const SHIFT: &[TokenKind] = &[
    TokenKind::Operator(OperatorToken::ShiftLeft),
    TokenKind::Operator(OperatorToken::ShiftRight),
];
const ADDITIVE: &[TokenKind] = &[
    TokenKind::Operator(OperatorToken::Plus),
    TokenKind::Operator(OperatorToken::Minus),
];
const MULTIPLICATIVE: &[TokenKind] = &[
    TokenKind::Operator(OperatorToken::Star),
    TokenKind::Operator(OperatorToken::Slash),
    TokenKind::Operator(OperatorToken::Percent),
];
const PREFIX: &[TokenKind] = &[
    TokenKind::Operator(OperatorToken::Minus),
    TokenKind::Operator(OperatorToken::Plus),
    TokenKind::Operator(OperatorToken::Increment),
    TokenKind::Operator(OperatorToken::Decrement),
    TokenKind::Operator(OperatorToken::Not),
];
const POSTFIX: &[TokenKind] = &[
    TokenKind::Operator(OperatorToken::Increment),
    TokenKind::Operator(OperatorToken::Decrement),
];

impl Parser<'_> {
    /// Parses one expression at the loosest precedence level
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_conditional()
    }

    /// `if condition then branch (else branch)?`
    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        let Some(if_token) = self.match_keyword(Keyword::If) else {
            return self.parse_logical_or();
        };
        let condition = self.parse_conditional()?;
        let then_token = self.expect_keyword(Keyword::Then, MessageCode::SyntaxExpectedThen)?;
        let then_branch = self.parse_conditional()?;
        let (else_token, else_branch) = match self.match_keyword(Keyword::Else) {
            Some(else_token) => (Some(else_token), Some(self.parse_conditional()?)),
            None => (None, None),
        };
        Ok(self.factory.conditional_expr(
            if_token,
            condition,
            then_token,
            then_branch,
            else_token,
            else_branch,
        ))
    }

    /// One left-associative binary level: folds every operator in
    /// `operators`, delegating operands to `next`
    fn parse_binary_level(
        &mut self,
        operators: &[TokenKind],
        next: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut left = next(self)?;
        while let Some(operator_token) = self.match_any(operators) {
            let operator = self.binary_operator(&operator_token)?;
            let right = next(self)?;
            left = self
                .factory
                .binary_expr(left, operator_token, operator, right);
        }
        Ok(left)
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(LOGICAL_OR, Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(LOGICAL_AND, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(EQUALITY, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(COMPARISON, Self::parse_shift)
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(SHIFT, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(ADDITIVE, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(MULTIPLICATIVE, Self::parse_prefix)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let Some(operator_token) = self.match_any(PREFIX) else {
            return self.parse_postfix();
        };
        let operator = self.prefix_operator(&operator_token)?;
        let operand = self.parse_prefix()?;
        Ok(self.factory.prefix_expr(operator_token, operator, operand))
    }

    /// Postfix `++`/`--`, decided by non-consuming lookahead: when the
    /// token after the operator could begin a primary, the operator is
    /// left in place as the next statement's prefix operator
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let operand = self.parse_chain()?;
        if self.check_any(POSTFIX) && !starts_primary(self.peek_kind(1)) {
            let operator_token = self.advance();
            let operator = self.postfix_operator(&operator_token)?;
            return Ok(self.factory.postfix_expr(operand, operator_token, operator));
        }
        Ok(operand)
    }

    /// The property/call chain: `.name` accesses and `(args)` calls folded
    /// left over a primary
    fn parse_chain(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if let Some(dot_token) = self.match_kind(TokenKind::Dot) {
                let name = self.expect_identifier()?;
                expr = self.factory.property_expr(expr, dot_token, name);
            } else if self.check(TokenKind::OpenParen) {
                let open_paren = self.advance();
                let (arguments, close_paren) =
                    self.parse_paren_items(|parser| parser.parse_expression())?;
                expr = self
                    .factory
                    .call_expr(expr, open_paren, arguments, close_paren);
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.current().kind() {
            TokenKind::OpenParen => {
                let open_paren = self.advance();
                let inner = self.parse_expression()?;
                let close_paren = self.expect(
                    TokenKind::CloseParen,
                    ")",
                    MessageCode::SyntaxExpectedParentheses,
                )?;
                Ok(self.factory.group_expr(open_paren, inner, close_paren))
            }
            TokenKind::Number | TokenKind::String => {
                let token = self.advance();
                Ok(self.factory.literal_expr(token))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(self.factory.identifier_expr(token))
            }
            _ => {
                let found = self.current().clone();
                self.reporter
                    .report_token(&found, MessageCode::SyntaxUnexpectedToken)?;
                let synthetic = self.synthetic(TokenKind::Identifier, "");
                // skip the offending token so callers always make progress
                if self.has_next() {
                    self.advance();
                }
                Ok(self.factory.identifier_expr(synthetic))
            }
        }
    }

    /// Comma-separated items up to `)`, shared by call arguments and
    /// function parameters. A trailing comma ends the list; a missing
    /// comma between items is reported without aborting.
    pub(super) fn parse_paren_items<T>(
        &mut self,
        mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<(Vec<T>, Token)> {
        let mut items = Vec::new();
        loop {
            if self.check(TokenKind::CloseParen) || !self.has_next() {
                break;
            }
            let before = self.position();
            items.push(parse_item(self)?);
            if self.match_kind(TokenKind::Comma).is_some() {
                continue;
            }
            if self.check(TokenKind::CloseParen) || !self.has_next() {
                break;
            }
            let found = self.current().clone();
            self.reporter
                .report_token(&found, MessageCode::SyntaxExpectedComma)?;
            if self.position() == before {
                self.advance();
            }
        }
        let close_paren = self.expect(
            TokenKind::CloseParen,
            ")",
            MessageCode::SyntaxExpectedParentheses,
        )?;
        Ok((items, close_paren))
    }

    fn binary_operator(&mut self, token: &Token) -> ParseResult<Operator> {
        self.resolve_operator(OperatorType::binary(token.kind()), token)
    }

    fn prefix_operator(&mut self, token: &Token) -> ParseResult<Operator> {
        self.resolve_operator(OperatorType::prefix(token.kind()), token)
    }

    fn postfix_operator(&mut self, token: &Token) -> ParseResult<Operator> {
        self.resolve_operator(OperatorType::postfix(token.kind()), token)
    }

    /// A lexeme not recognized in the requested category reports and
    /// resolves to the invalid operator rather than failing
    fn resolve_operator(
        &mut self,
        resolved: Option<OperatorType>,
        token: &Token,
    ) -> ParseResult<Operator> {
        match resolved {
            Some(op_type) => Ok(Operator::new(op_type)),
            None => {
                self.reporter
                    .report_token(token, MessageCode::SyntaxInvalidOperator)?;
                Ok(Operator::INVALID)
            }
        }
    }
}
