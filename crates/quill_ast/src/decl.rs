//! Top-level declaration nodes

use crate::expr::{Expr, IdentifierExpr};
use crate::node::AstNode;
use crate::stmt::{Block, LetStmt, TypeAnnotation};
use quill_tokens::token::Token;

/// The root of one parsed module: every top-level declaration plus the EOF
/// marker closing the stream
#[derive(Debug, PartialEq)]
pub struct ModuleRoot {
    pub declarations: Vec<Decl>,
    pub eof_token: Token,
}

impl AstNode for ModuleRoot {
    fn first_token(&self) -> &Token {
        match self.declarations.first() {
            Some(decl) => decl.first_token(),
            None => &self.eof_token,
        }
    }

    fn last_token(&self) -> &Token {
        &self.eof_token
    }
}

/// A top-level declaration
#[derive(Debug, PartialEq)]
pub enum Decl {
    Type(TypeDecl),
    Let(LetStmt),
    Function(FunctionDecl),
}

impl AstNode for Decl {
    fn first_token(&self) -> &Token {
        match self {
            Decl::Type(d) => d.first_token(),
            Decl::Let(d) => d.first_token(),
            Decl::Function(d) => d.first_token(),
        }
    }

    fn last_token(&self) -> &Token {
        match self {
            Decl::Type(d) => d.last_token(),
            Decl::Let(d) => d.last_token(),
            Decl::Function(d) => d.last_token(),
        }
    }
}

/// `type Name { member* }`; an `external type Name` has no body
#[derive(Debug, PartialEq)]
pub struct TypeDecl {
    pub external_token: Option<Token>,
    pub type_token: Token,
    pub name: IdentifierExpr,
    pub body: Option<TypeBody>,
}

impl TypeDecl {
    pub fn is_external(&self) -> bool {
        self.external_token.is_some()
    }

    pub fn members(&self) -> &[TypeMember] {
        match &self.body {
            Some(body) => &body.members,
            None => &[],
        }
    }
}

impl AstNode for TypeDecl {
    fn first_token(&self) -> &Token {
        match &self.external_token {
            Some(external) => external,
            None => &self.type_token,
        }
    }

    fn last_token(&self) -> &Token {
        match &self.body {
            Some(body) => &body.close_curly,
            None => &self.name.token,
        }
    }
}

/// The braced member list of a type declaration
#[derive(Debug, PartialEq)]
pub struct TypeBody {
    pub open_curly: Token,
    pub members: Vec<TypeMember>,
    pub close_curly: Token,
}

/// One `name: TypeName` member inside a type body
#[derive(Debug, PartialEq)]
pub struct TypeMember {
    pub name: IdentifierExpr,
    pub colon_token: Token,
    pub ty: IdentifierExpr,
}

impl AstNode for TypeMember {
    fn first_token(&self) -> &Token {
        &self.name.token
    }

    fn last_token(&self) -> &Token {
        &self.ty.token
    }
}

/// `name (params)? (: ReturnType)? -> body`; an external function carries
/// neither arrow nor body
#[derive(Debug, PartialEq)]
pub struct FunctionDecl {
    pub external_token: Option<Token>,
    pub name: IdentifierExpr,
    pub parameters: Option<ParameterList>,
    pub return_type: Option<TypeAnnotation>,
    pub arrow_token: Option<Token>,
    pub body: Option<FunctionBody>,
}

impl FunctionDecl {
    pub fn is_external(&self) -> bool {
        self.external_token.is_some()
    }

    pub fn parameter_slice(&self) -> &[Parameter] {
        match &self.parameters {
            Some(list) => &list.parameters,
            None => &[],
        }
    }
}

impl AstNode for FunctionDecl {
    fn first_token(&self) -> &Token {
        match &self.external_token {
            Some(external) => external,
            None => &self.name.token,
        }
    }

    fn last_token(&self) -> &Token {
        if let Some(body) = &self.body {
            return body.last_token();
        }
        if let Some(return_type) = &self.return_type {
            return return_type.last_token();
        }
        if let Some(parameters) = &self.parameters {
            return &parameters.close_paren;
        }
        &self.name.token
    }
}

/// The parenthesized parameter list of a function declaration
#[derive(Debug, PartialEq)]
pub struct ParameterList {
    pub open_paren: Token,
    pub parameters: Vec<Parameter>,
    pub close_paren: Token,
}

/// One function parameter with an optional type annotation
#[derive(Debug, PartialEq)]
pub struct Parameter {
    pub name: IdentifierExpr,
    pub annotation: Option<TypeAnnotation>,
}

impl AstNode for Parameter {
    fn first_token(&self) -> &Token {
        &self.name.token
    }

    fn last_token(&self) -> &Token {
        match &self.annotation {
            Some(annotation) => annotation.last_token(),
            None => &self.name.token,
        }
    }
}

/// A function body: either a single expression or a statement block
#[derive(Debug, PartialEq)]
pub enum FunctionBody {
    Expr(Expr),
    Block(Block),
}

impl AstNode for FunctionBody {
    fn first_token(&self) -> &Token {
        match self {
            FunctionBody::Expr(expr) => expr.first_token(),
            FunctionBody::Block(block) => block.first_token(),
        }
    }

    fn last_token(&self) -> &Token {
        match self {
            FunctionBody::Expr(expr) => expr.last_token(),
            FunctionBody::Block(block) => block.last_token(),
        }
    }
}
