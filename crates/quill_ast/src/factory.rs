//! Centralized node construction.
//!
//! The parser never builds nodes directly; everything goes through one
//! [AstFactory] so construction stays in one place and can be traced.

use crate::decl::{
    Decl, FunctionBody, FunctionDecl, ModuleRoot, Parameter, ParameterList, TypeBody, TypeDecl,
    TypeMember,
};
use crate::expr::{
    BinaryExpr, CallExpr, ConditionalExpr, Expr, GroupExpr, IdentifierExpr, LiteralExpr,
    PostfixExpr, PrefixExpr, PropertyExpr,
};
use crate::op::Operator;
use crate::stmt::{Block, ExprStmt, LetStmt, ReturnStmt, Stmt, TypeAnnotation};
use itertools::Itertools;
use log::trace;
use quill_tokens::token::Token;

/// Builds every node of the syntax tree
#[derive(Debug, Clone, Copy, Default)]
pub struct AstFactory;

impl AstFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn identifier(&self, token: Token) -> IdentifierExpr {
        IdentifierExpr { token }
    }

    pub fn identifier_expr(&self, token: Token) -> Expr {
        Expr::Identifier(self.identifier(token))
    }

    pub fn literal_expr(&self, token: Token) -> Expr {
        Expr::Literal(LiteralExpr { token })
    }

    pub fn prefix_expr(&self, operator_token: Token, operator: Operator, operand: Expr) -> Expr {
        Expr::Prefix(PrefixExpr {
            operator_token,
            operator,
            operand: Box::new(operand),
        })
    }

    pub fn postfix_expr(&self, operand: Expr, operator_token: Token, operator: Operator) -> Expr {
        Expr::Postfix(PostfixExpr {
            operand: Box::new(operand),
            operator_token,
            operator,
        })
    }

    pub fn binary_expr(
        &self,
        left: Expr,
        operator_token: Token,
        operator: Operator,
        right: Expr,
    ) -> Expr {
        trace!("building binary expression for {:?}", operator_token);
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator_token,
            operator,
            right: Box::new(right),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn conditional_expr(
        &self,
        if_token: Token,
        condition: Expr,
        then_token: Token,
        then_branch: Expr,
        else_token: Option<Token>,
        else_branch: Option<Expr>,
    ) -> Expr {
        Expr::Conditional(ConditionalExpr {
            if_token,
            condition: Box::new(condition),
            then_token,
            then_branch: Box::new(then_branch),
            else_token,
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn property_expr(&self, object: Expr, dot_token: Token, name: IdentifierExpr) -> Expr {
        Expr::Property(PropertyExpr {
            object: Box::new(object),
            dot_token,
            name,
        })
    }

    pub fn call_expr(
        &self,
        callee: Expr,
        open_paren: Token,
        arguments: Vec<Expr>,
        close_paren: Token,
    ) -> Expr {
        Expr::Call(CallExpr {
            callee: Box::new(callee),
            open_paren,
            arguments,
            close_paren,
        })
    }

    pub fn group_expr(&self, open_paren: Token, inner: Expr, close_paren: Token) -> Expr {
        Expr::Group(GroupExpr {
            open_paren,
            inner: Box::new(inner),
            close_paren,
        })
    }

    pub fn return_stmt(&self, return_token: Token, value: Option<Expr>) -> Stmt {
        Stmt::Return(ReturnStmt {
            return_token,
            value,
        })
    }

    pub fn let_stmt(
        &self,
        let_token: Token,
        modifier: Option<Token>,
        name: IdentifierExpr,
        annotation: Option<TypeAnnotation>,
        assign_token: Token,
        initializer: Expr,
    ) -> LetStmt {
        LetStmt {
            let_token,
            modifier,
            name,
            annotation,
            assign_token,
            initializer,
        }
    }

    pub fn expr_stmt(&self, expr: Expr) -> Stmt {
        Stmt::Expr(ExprStmt { expr })
    }

    pub fn block(&self, open_curly: Token, statements: Vec<Stmt>, close_curly: Token) -> Block {
        Block {
            open_curly,
            statements,
            close_curly,
        }
    }

    pub fn type_annotation(&self, colon_token: Token, name: IdentifierExpr) -> TypeAnnotation {
        TypeAnnotation { colon_token, name }
    }

    pub fn type_member(
        &self,
        name: IdentifierExpr,
        colon_token: Token,
        ty: IdentifierExpr,
    ) -> TypeMember {
        TypeMember {
            name,
            colon_token,
            ty,
        }
    }

    pub fn type_body(
        &self,
        open_curly: Token,
        members: Vec<TypeMember>,
        close_curly: Token,
    ) -> TypeBody {
        TypeBody {
            open_curly,
            members,
            close_curly,
        }
    }

    pub fn type_decl(
        &self,
        external_token: Option<Token>,
        type_token: Token,
        name: IdentifierExpr,
        body: Option<TypeBody>,
    ) -> TypeDecl {
        trace!(
            "building type declaration {} with members [{}]",
            name.name(),
            body.iter()
                .flat_map(|body| &body.members)
                .map(|member| member.name.name())
                .join(", ")
        );
        TypeDecl {
            external_token,
            type_token,
            name,
            body,
        }
    }

    pub fn parameter(&self, name: IdentifierExpr, annotation: Option<TypeAnnotation>) -> Parameter {
        Parameter { name, annotation }
    }

    pub fn parameter_list(
        &self,
        open_paren: Token,
        parameters: Vec<Parameter>,
        close_paren: Token,
    ) -> ParameterList {
        ParameterList {
            open_paren,
            parameters,
            close_paren,
        }
    }

    pub fn function_decl(
        &self,
        external_token: Option<Token>,
        name: IdentifierExpr,
        parameters: Option<ParameterList>,
        return_type: Option<TypeAnnotation>,
        arrow_token: Option<Token>,
        body: Option<FunctionBody>,
    ) -> FunctionDecl {
        trace!("building function declaration {}", name.name());
        FunctionDecl {
            external_token,
            name,
            parameters,
            return_type,
            arrow_token,
            body,
        }
    }

    pub fn module_root(&self, declarations: Vec<Decl>, eof_token: Token) -> ModuleRoot {
        trace!(
            "building module root with {} declarations",
            declarations.len()
        );
        ModuleRoot {
            declarations,
            eof_token,
        }
    }
}
