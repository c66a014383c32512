//! Expression nodes

use crate::node::AstNode;
use crate::op::Operator;
use quill_tokens::token::Token;

/// An expression
#[derive(Debug, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    Prefix(PrefixExpr),
    Postfix(PostfixExpr),
    Binary(BinaryExpr),
    Conditional(ConditionalExpr),
    Property(PropertyExpr),
    Call(CallExpr),
    Group(GroupExpr),
}

impl AstNode for Expr {
    fn first_token(&self) -> &Token {
        match self {
            Expr::Literal(e) => e.first_token(),
            Expr::Identifier(e) => e.first_token(),
            Expr::Prefix(e) => e.first_token(),
            Expr::Postfix(e) => e.first_token(),
            Expr::Binary(e) => e.first_token(),
            Expr::Conditional(e) => e.first_token(),
            Expr::Property(e) => e.first_token(),
            Expr::Call(e) => e.first_token(),
            Expr::Group(e) => e.first_token(),
        }
    }

    fn last_token(&self) -> &Token {
        match self {
            Expr::Literal(e) => e.last_token(),
            Expr::Identifier(e) => e.last_token(),
            Expr::Prefix(e) => e.last_token(),
            Expr::Postfix(e) => e.last_token(),
            Expr::Binary(e) => e.last_token(),
            Expr::Conditional(e) => e.last_token(),
            Expr::Property(e) => e.last_token(),
            Expr::Call(e) => e.last_token(),
            Expr::Group(e) => e.last_token(),
        }
    }
}

/// A number or string literal
#[derive(Debug, PartialEq)]
pub struct LiteralExpr {
    pub token: Token,
}

impl LiteralExpr {
    /// The literal text; for strings this is the value with quotes already
    /// stripped by the lexer
    pub fn value(&self) -> &str {
        self.token.lexeme()
    }
}

impl AstNode for LiteralExpr {
    fn first_token(&self) -> &Token {
        &self.token
    }

    fn last_token(&self) -> &Token {
        &self.token
    }
}

/// A plain identifier reference
#[derive(Debug, PartialEq)]
pub struct IdentifierExpr {
    pub token: Token,
}

impl IdentifierExpr {
    pub fn name(&self) -> &str {
        self.token.lexeme()
    }
}

impl AstNode for IdentifierExpr {
    fn first_token(&self) -> &Token {
        &self.token
    }

    fn last_token(&self) -> &Token {
        &self.token
    }
}

/// A prefix unary operation
#[derive(Debug, PartialEq)]
pub struct PrefixExpr {
    pub operator_token: Token,
    pub operator: Operator,
    pub operand: Box<Expr>,
}

impl AstNode for PrefixExpr {
    fn first_token(&self) -> &Token {
        &self.operator_token
    }

    fn last_token(&self) -> &Token {
        self.operand.last_token()
    }
}

/// A postfix unary operation
#[derive(Debug, PartialEq)]
pub struct PostfixExpr {
    pub operand: Box<Expr>,
    pub operator_token: Token,
    pub operator: Operator,
}

impl AstNode for PostfixExpr {
    fn first_token(&self) -> &Token {
        self.operand.first_token()
    }

    fn last_token(&self) -> &Token {
        &self.operator_token
    }
}

/// A binary operation; spans `left.first_token() .. right.last_token()`
#[derive(Debug, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator_token: Token,
    pub operator: Operator,
    pub right: Box<Expr>,
}

impl AstNode for BinaryExpr {
    fn first_token(&self) -> &Token {
        self.left.first_token()
    }

    fn last_token(&self) -> &Token {
        self.right.last_token()
    }
}

/// `if condition then branch` with an optional `else` branch
#[derive(Debug, PartialEq)]
pub struct ConditionalExpr {
    pub if_token: Token,
    pub condition: Box<Expr>,
    pub then_token: Token,
    pub then_branch: Box<Expr>,
    pub else_token: Option<Token>,
    pub else_branch: Option<Box<Expr>>,
}

impl AstNode for ConditionalExpr {
    fn first_token(&self) -> &Token {
        &self.if_token
    }

    fn last_token(&self) -> &Token {
        match &self.else_branch {
            Some(else_branch) => else_branch.last_token(),
            None => self.then_branch.last_token(),
        }
    }
}

/// A property access `object.name`
#[derive(Debug, PartialEq)]
pub struct PropertyExpr {
    pub object: Box<Expr>,
    pub dot_token: Token,
    pub name: IdentifierExpr,
}

impl AstNode for PropertyExpr {
    fn first_token(&self) -> &Token {
        self.object.first_token()
    }

    fn last_token(&self) -> &Token {
        &self.name.token
    }
}

/// A call `callee(arguments)`
#[derive(Debug, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub open_paren: Token,
    pub arguments: Vec<Expr>,
    pub close_paren: Token,
}

impl AstNode for CallExpr {
    fn first_token(&self) -> &Token {
        self.callee.first_token()
    }

    fn last_token(&self) -> &Token {
        &self.close_paren
    }
}

/// A parenthesized expression
#[derive(Debug, PartialEq)]
pub struct GroupExpr {
    pub open_paren: Token,
    pub inner: Box<Expr>,
    pub close_paren: Token,
}

impl AstNode for GroupExpr {
    fn first_token(&self) -> &Token {
        &self.open_paren
    }

    fn last_token(&self) -> &Token {
        &self.close_paren
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::OperatorType;
    use quill_tokens::token::{OperatorToken, TokenKind};

    #[test]
    fn test_binary_span_is_derived_from_children() {
        let left = Expr::Literal(LiteralExpr {
            token: Token::new(0, TokenKind::Number, "1"),
        });
        let right = Expr::Literal(LiteralExpr {
            token: Token::new(4, TokenKind::Number, "2"),
        });
        let binary = BinaryExpr {
            left: Box::new(left),
            operator_token: Token::new(2, TokenKind::Operator(OperatorToken::Plus), "+"),
            operator: Operator::new(OperatorType::Add),
            right: Box::new(right),
        };
        assert_eq!(binary.first_token().offset(), 0);
        assert_eq!(binary.last_token().end(), 5);
        assert_eq!(binary.span().len(), 5);
    }

    #[test]
    fn test_first_token_never_after_last_token() {
        let expr = Expr::Prefix(PrefixExpr {
            operator_token: Token::new(0, TokenKind::Operator(OperatorToken::Minus), "-"),
            operator: Operator::new(OperatorType::Negate),
            operand: Box::new(Expr::Identifier(IdentifierExpr {
                token: Token::new(1, TokenKind::Identifier, "x"),
            })),
        });
        assert!(expr.first_token().offset() <= expr.last_token().offset());
    }
}
