//! The visitor protocol.
//!
//! [AstVisitor] has one method per concrete node type; every default body
//! delegates to the matching `walk_*` free function, which traverses the
//! node's children in declaration order. Consumers override only the kinds
//! they care about and call `walk_*` themselves to keep descending. The
//! `walk_*` matches are exhaustive, so adding a node variant breaks every
//! walker at compile time instead of silently skipping the new node.

use crate::decl::{Decl, FunctionBody, FunctionDecl, ModuleRoot, Parameter, TypeDecl, TypeMember};
use crate::expr::{
    BinaryExpr, CallExpr, ConditionalExpr, Expr, GroupExpr, IdentifierExpr, LiteralExpr,
    PostfixExpr, PrefixExpr, PropertyExpr,
};
use crate::stmt::{Block, ExprStmt, LetStmt, ReturnStmt, Stmt};

/// A syntax tree traversal; by default every method walks all children
pub trait AstVisitor {
    fn visit_module_root(&mut self, node: &ModuleRoot) {
        walk_module_root(self, node);
    }

    fn visit_decl(&mut self, node: &Decl) {
        walk_decl(self, node);
    }

    fn visit_type_decl(&mut self, node: &TypeDecl) {
        walk_type_decl(self, node);
    }

    fn visit_type_member(&mut self, node: &TypeMember) {
        walk_type_member(self, node);
    }

    fn visit_function_decl(&mut self, node: &FunctionDecl) {
        walk_function_decl(self, node);
    }

    fn visit_parameter(&mut self, node: &Parameter) {
        walk_parameter(self, node);
    }

    fn visit_stmt(&mut self, node: &Stmt) {
        walk_stmt(self, node);
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) {
        walk_return_stmt(self, node);
    }

    fn visit_let_stmt(&mut self, node: &LetStmt) {
        walk_let_stmt(self, node);
    }

    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        walk_expr_stmt(self, node);
    }

    fn visit_block(&mut self, node: &Block) {
        walk_block(self, node);
    }

    fn visit_expr(&mut self, node: &Expr) {
        walk_expr(self, node);
    }

    fn visit_literal_expr(&mut self, node: &LiteralExpr) {
        walk_literal_expr(self, node);
    }

    fn visit_identifier_expr(&mut self, node: &IdentifierExpr) {
        walk_identifier_expr(self, node);
    }

    fn visit_prefix_expr(&mut self, node: &PrefixExpr) {
        walk_prefix_expr(self, node);
    }

    fn visit_postfix_expr(&mut self, node: &PostfixExpr) {
        walk_postfix_expr(self, node);
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) {
        walk_binary_expr(self, node);
    }

    fn visit_conditional_expr(&mut self, node: &ConditionalExpr) {
        walk_conditional_expr(self, node);
    }

    fn visit_property_expr(&mut self, node: &PropertyExpr) {
        walk_property_expr(self, node);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        walk_call_expr(self, node);
    }

    fn visit_group_expr(&mut self, node: &GroupExpr) {
        walk_group_expr(self, node);
    }
}

pub fn walk_module_root<V: AstVisitor + ?Sized>(visitor: &mut V, node: &ModuleRoot) {
    for decl in &node.declarations {
        visitor.visit_decl(decl);
    }
}

pub fn walk_decl<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Decl) {
    match node {
        Decl::Type(decl) => visitor.visit_type_decl(decl),
        Decl::Let(decl) => visitor.visit_let_stmt(decl),
        Decl::Function(decl) => visitor.visit_function_decl(decl),
    }
}

pub fn walk_type_decl<V: AstVisitor + ?Sized>(visitor: &mut V, node: &TypeDecl) {
    for member in node.members() {
        visitor.visit_type_member(member);
    }
}

pub fn walk_type_member<V: AstVisitor + ?Sized>(visitor: &mut V, node: &TypeMember) {
    visitor.visit_identifier_expr(&node.name);
    visitor.visit_identifier_expr(&node.ty);
}

pub fn walk_function_decl<V: AstVisitor + ?Sized>(visitor: &mut V, node: &FunctionDecl) {
    visitor.visit_identifier_expr(&node.name);
    for parameter in node.parameter_slice() {
        visitor.visit_parameter(parameter);
    }
    match &node.body {
        Some(FunctionBody::Expr(expr)) => visitor.visit_expr(expr),
        Some(FunctionBody::Block(block)) => visitor.visit_block(block),
        None => {}
    }
}

pub fn walk_parameter<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Parameter) {
    visitor.visit_identifier_expr(&node.name);
}

pub fn walk_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Stmt) {
    match node {
        Stmt::Return(stmt) => visitor.visit_return_stmt(stmt),
        Stmt::Let(stmt) => visitor.visit_let_stmt(stmt),
        Stmt::Expr(stmt) => visitor.visit_expr_stmt(stmt),
    }
}

pub fn walk_return_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, node: &ReturnStmt) {
    if let Some(value) = &node.value {
        visitor.visit_expr(value);
    }
}

pub fn walk_let_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, node: &LetStmt) {
    visitor.visit_identifier_expr(&node.name);
    visitor.visit_expr(&node.initializer);
}

pub fn walk_expr_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, node: &ExprStmt) {
    visitor.visit_expr(&node.expr);
}

pub fn walk_block<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Block) {
    for stmt in &node.statements {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Expr) {
    match node {
        Expr::Literal(expr) => visitor.visit_literal_expr(expr),
        Expr::Identifier(expr) => visitor.visit_identifier_expr(expr),
        Expr::Prefix(expr) => visitor.visit_prefix_expr(expr),
        Expr::Postfix(expr) => visitor.visit_postfix_expr(expr),
        Expr::Binary(expr) => visitor.visit_binary_expr(expr),
        Expr::Conditional(expr) => visitor.visit_conditional_expr(expr),
        Expr::Property(expr) => visitor.visit_property_expr(expr),
        Expr::Call(expr) => visitor.visit_call_expr(expr),
        Expr::Group(expr) => visitor.visit_group_expr(expr),
    }
}

pub fn walk_literal_expr<V: AstVisitor + ?Sized>(_visitor: &mut V, _node: &LiteralExpr) {}

pub fn walk_identifier_expr<V: AstVisitor + ?Sized>(_visitor: &mut V, _node: &IdentifierExpr) {}

pub fn walk_prefix_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &PrefixExpr) {
    visitor.visit_expr(&node.operand);
}

pub fn walk_postfix_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &PostfixExpr) {
    visitor.visit_expr(&node.operand);
}

pub fn walk_binary_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &BinaryExpr) {
    visitor.visit_expr(&node.left);
    visitor.visit_expr(&node.right);
}

pub fn walk_conditional_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &ConditionalExpr) {
    visitor.visit_expr(&node.condition);
    visitor.visit_expr(&node.then_branch);
    if let Some(else_branch) = &node.else_branch {
        visitor.visit_expr(else_branch);
    }
}

pub fn walk_property_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &PropertyExpr) {
    visitor.visit_expr(&node.object);
    visitor.visit_identifier_expr(&node.name);
}

pub fn walk_call_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &CallExpr) {
    visitor.visit_expr(&node.callee);
    for argument in &node.arguments {
        visitor.visit_expr(argument);
    }
}

pub fn walk_group_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &GroupExpr) {
    visitor.visit_expr(&node.inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::AstFactory;
    use crate::op::{Operator, OperatorType};
    use quill_tokens::token::{OperatorToken, Token, TokenKind};

    #[derive(Default)]
    struct CountingVisitor {
        identifiers: usize,
        literals: usize,
        binaries: usize,
    }

    impl AstVisitor for CountingVisitor {
        fn visit_identifier_expr(&mut self, _node: &IdentifierExpr) {
            self.identifiers += 1;
        }

        fn visit_literal_expr(&mut self, _node: &LiteralExpr) {
            self.literals += 1;
        }

        fn visit_binary_expr(&mut self, node: &BinaryExpr) {
            self.binaries += 1;
            walk_binary_expr(self, node);
        }
    }

    #[test]
    fn test_default_walk_reaches_every_leaf() {
        // a + (1 * b)
        let factory = AstFactory::new();
        let inner = factory.binary_expr(
            factory.literal_expr(Token::new(5, TokenKind::Number, "1")),
            Token::new(7, TokenKind::Operator(OperatorToken::Star), "*"),
            Operator::new(OperatorType::Multiply),
            factory.identifier_expr(Token::new(9, TokenKind::Identifier, "b")),
        );
        let expr = factory.binary_expr(
            factory.identifier_expr(Token::new(0, TokenKind::Identifier, "a")),
            Token::new(2, TokenKind::Operator(OperatorToken::Plus), "+"),
            Operator::new(OperatorType::Add),
            inner,
        );

        let mut visitor = CountingVisitor::default();
        visitor.visit_expr(&expr);
        assert_eq!(visitor.identifiers, 2);
        assert_eq!(visitor.literals, 1);
        assert_eq!(visitor.binaries, 2);
    }
}
