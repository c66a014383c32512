//! Reconstructs canonical source text from a syntax tree.
//!
//! The printer is a plain [AstVisitor]: every override writes into an owned
//! buffer and recurses through the default walk order. Output is stable:
//! one declaration per line, 4-space indents inside blocks and type bodies,
//! single spaces around binary operators.

use itertools::Itertools;
use log::debug;
use quill_ast::decl::{FunctionBody, FunctionDecl, ModuleRoot, Parameter, TypeDecl};
use quill_ast::expr::{
    BinaryExpr, CallExpr, ConditionalExpr, GroupExpr, IdentifierExpr, LiteralExpr, PostfixExpr,
    PrefixExpr, PropertyExpr,
};
use quill_ast::stmt::{Block, ExprStmt, LetStmt, ReturnStmt, TypeAnnotation};
use quill_ast::visit::AstVisitor;
use quill_tokens::token::TokenKind;

const INDENT: &str = "    ";

/// Prints a syntax tree back as canonical quill source
#[derive(Debug, Default)]
pub struct PrettyPrinter {
    out: String,
    indent: usize,
}

impl PrettyPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints one module and returns the finished text
    pub fn print(root: &ModuleRoot) -> String {
        let mut printer = PrettyPrinter::new();
        printer.visit_module_root(root);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn write_annotation(&mut self, annotation: &TypeAnnotation) {
        self.write(": ");
        self.write(annotation.name.name());
    }

    fn parameter_text(parameter: &Parameter) -> String {
        match &parameter.annotation {
            Some(annotation) => format!("{}: {}", parameter.name.name(), annotation.name.name()),
            None => parameter.name.name().to_string(),
        }
    }
}

impl AstVisitor for PrettyPrinter {
    fn visit_module_root(&mut self, node: &ModuleRoot) {
        debug!(
            "pretty-printing module with {} declarations",
            node.declarations.len()
        );
        for (index, decl) in node.declarations.iter().enumerate() {
            if index > 0 {
                self.newline();
            }
            self.visit_decl(decl);
        }
        if !node.declarations.is_empty() {
            self.out.push('\n');
        }
    }

    fn visit_type_decl(&mut self, node: &TypeDecl) {
        if node.is_external() {
            self.write("external ");
        }
        self.write("type ");
        self.write(node.name.name());
        if let Some(body) = &node.body {
            self.write(" {");
            self.indent += 1;
            for member in &body.members {
                self.newline();
                self.write(member.name.name());
                self.write(": ");
                self.write(member.ty.name());
            }
            self.indent -= 1;
            self.newline();
            self.write("}");
        }
    }

    fn visit_function_decl(&mut self, node: &FunctionDecl) {
        if node.is_external() {
            self.write("external ");
        }
        self.write(node.name.name());
        if node.parameters.is_some() {
            let parameters = node
                .parameter_slice()
                .iter()
                .map(Self::parameter_text)
                .join(", ");
            self.write("(");
            self.write(&parameters);
            self.write(")");
        }
        if let Some(return_type) = &node.return_type {
            self.write_annotation(return_type);
        }
        match &node.body {
            Some(FunctionBody::Expr(expr)) => {
                self.write(" -> ");
                self.visit_expr(expr);
            }
            Some(FunctionBody::Block(block)) => {
                self.write(" -> ");
                self.visit_block(block);
            }
            None => {}
        }
    }

    fn visit_let_stmt(&mut self, node: &LetStmt) {
        self.write("let ");
        if node.is_const() {
            self.write("const ");
        }
        self.write(node.name.name());
        if let Some(annotation) = &node.annotation {
            self.write_annotation(annotation);
        }
        self.write(" = ");
        self.visit_expr(&node.initializer);
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) {
        self.write("return");
        if let Some(value) = &node.value {
            self.write(" ");
            self.visit_expr(value);
        }
    }

    fn visit_block(&mut self, node: &Block) {
        self.write("{");
        self.indent += 1;
        for stmt in &node.statements {
            self.newline();
            self.visit_stmt(stmt);
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        self.visit_expr(&node.expr);
    }

    fn visit_literal_expr(&mut self, node: &LiteralExpr) {
        if node.token.kind() == TokenKind::String {
            self.write("'");
            self.write(node.value());
            self.write("'");
        } else {
            self.write(node.value());
        }
    }

    fn visit_identifier_expr(&mut self, node: &IdentifierExpr) {
        self.write(node.name());
    }

    fn visit_prefix_expr(&mut self, node: &PrefixExpr) {
        self.write(node.operator_token.lexeme());
        self.visit_expr(&node.operand);
    }

    fn visit_postfix_expr(&mut self, node: &PostfixExpr) {
        self.visit_expr(&node.operand);
        self.write(node.operator_token.lexeme());
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) {
        self.visit_expr(&node.left);
        self.write(" ");
        self.write(node.operator_token.lexeme());
        self.write(" ");
        self.visit_expr(&node.right);
    }

    fn visit_conditional_expr(&mut self, node: &ConditionalExpr) {
        self.write("if ");
        self.visit_expr(&node.condition);
        self.write(" then ");
        self.visit_expr(&node.then_branch);
        if let Some(else_branch) = &node.else_branch {
            self.write(" else ");
            self.visit_expr(else_branch);
        }
    }

    fn visit_property_expr(&mut self, node: &PropertyExpr) {
        self.visit_expr(&node.object);
        self.write(".");
        self.write(node.name.name());
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.visit_expr(&node.callee);
        self.write("(");
        for (index, argument) in node.arguments.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.visit_expr(argument);
        }
        self.write(")");
    }

    fn visit_group_expr(&mut self, node: &GroupExpr) {
        self.write("(");
        self.visit_expr(&node.inner);
        self.write(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_ast_parsing::parse_tolerant;

    fn print_source(text: &str) -> String {
        let (root, messages) = parse_tolerant(text);
        assert!(messages.is_empty(), "unexpected: {messages:?}");
        PrettyPrinter::print(&root)
    }

    #[test]
    fn test_prints_declarations_canonically() {
        let printed = print_source(
            "external type Text\ntype Point { x: Number y: Number }\nlet const one = 1",
        );
        assert_eq!(
            printed,
            "external type Text\n\
             type Point {\n    x: Number\n    y: Number\n}\n\
             let const one = 1\n"
        );
    }

    #[test]
    fn test_prints_functions_and_blocks() {
        let printed = print_source("main(argc: Number): Number -> {\nreturn argc + 1\n}");
        assert_eq!(
            printed,
            "main(argc: Number): Number -> {\n    return argc + 1\n}\n"
        );
    }

    #[test]
    fn test_prints_expressions_with_stable_spacing() {
        let printed = print_source("f -> if a<b then -x else g('s',1+2*3).h");
        assert_eq!(
            printed,
            "f -> if a < b then -x else g('s', 1 + 2 * 3).h\n"
        );
    }

    #[test]
    fn test_printing_is_idempotent() {
        let source = "type Point {\n    x: Number\n}\nscale(p: Point, f: Number) -> p.x * f\n";
        let once = print_source(source);
        let twice = print_source(&once);
        assert_eq!(once, twice);
        assert_eq!(once, source);
    }

    #[test]
    fn test_groups_are_preserved() {
        let printed = print_source("f -> (1 + 2) * 3");
        assert_eq!(printed, "f -> (1 + 2) * 3\n");
    }
}
