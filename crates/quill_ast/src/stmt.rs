//! Statement nodes

use crate::expr::{Expr, IdentifierExpr};
use crate::node::AstNode;
use quill_tokens::token::Token;

/// A statement
#[derive(Debug, PartialEq)]
pub enum Stmt {
    Return(ReturnStmt),
    Let(LetStmt),
    Expr(ExprStmt),
}

impl AstNode for Stmt {
    fn first_token(&self) -> &Token {
        match self {
            Stmt::Return(s) => s.first_token(),
            Stmt::Let(s) => s.first_token(),
            Stmt::Expr(s) => s.first_token(),
        }
    }

    fn last_token(&self) -> &Token {
        match self {
            Stmt::Return(s) => s.last_token(),
            Stmt::Let(s) => s.last_token(),
            Stmt::Expr(s) => s.last_token(),
        }
    }
}

/// `return` with an optional value
#[derive(Debug, PartialEq)]
pub struct ReturnStmt {
    pub return_token: Token,
    pub value: Option<Expr>,
}

impl AstNode for ReturnStmt {
    fn first_token(&self) -> &Token {
        &self.return_token
    }

    fn last_token(&self) -> &Token {
        match &self.value {
            Some(value) => value.last_token(),
            None => &self.return_token,
        }
    }
}

/// A `: TypeName` annotation on a binding, parameter, or function
#[derive(Debug, PartialEq)]
pub struct TypeAnnotation {
    pub colon_token: Token,
    pub name: IdentifierExpr,
}

impl AstNode for TypeAnnotation {
    fn first_token(&self) -> &Token {
        &self.colon_token
    }

    fn last_token(&self) -> &Token {
        &self.name.token
    }
}

/// `let const* name (: Type)? = initializer`.
///
/// At most one modifier is honored; extra modifiers are reported during
/// parsing and dropped.
#[derive(Debug, PartialEq)]
pub struct LetStmt {
    pub let_token: Token,
    pub modifier: Option<Token>,
    pub name: IdentifierExpr,
    pub annotation: Option<TypeAnnotation>,
    pub assign_token: Token,
    pub initializer: Expr,
}

impl LetStmt {
    pub fn is_const(&self) -> bool {
        self.modifier.is_some()
    }
}

impl AstNode for LetStmt {
    fn first_token(&self) -> &Token {
        &self.let_token
    }

    fn last_token(&self) -> &Token {
        self.initializer.last_token()
    }
}

/// A bare expression in statement position
#[derive(Debug, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
}

impl AstNode for ExprStmt {
    fn first_token(&self) -> &Token {
        self.expr.first_token()
    }

    fn last_token(&self) -> &Token {
        self.expr.last_token()
    }
}

/// `{ statement* }`
#[derive(Debug, PartialEq)]
pub struct Block {
    pub open_curly: Token,
    pub statements: Vec<Stmt>,
    pub close_curly: Token,
}

impl AstNode for Block {
    fn first_token(&self) -> &Token {
        &self.open_curly
    }

    fn last_token(&self) -> &Token {
        &self.close_curly
    }
}
