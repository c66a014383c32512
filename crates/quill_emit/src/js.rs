//! A naive JavaScript transpiler.
//!
//! Declarations map one to one: `type` becomes a class skeleton, functions
//! become `function` declarations (an expression body becomes an implicit
//! `return`), `let` bindings become `let`/`const`. Conditional expressions
//! become ternaries. External declarations are assumed to be provided by
//! the host and emit only a comment. Comments from the source are dropped.

use itertools::Itertools;
use log::debug;
use quill_ast::decl::{FunctionBody, FunctionDecl, ModuleRoot, TypeDecl};
use quill_ast::expr::{
    BinaryExpr, CallExpr, ConditionalExpr, GroupExpr, IdentifierExpr, LiteralExpr, PostfixExpr,
    PrefixExpr, PropertyExpr,
};
use quill_ast::stmt::{Block, ExprStmt, LetStmt, ReturnStmt};
use quill_ast::visit::AstVisitor;
use quill_tokens::token::TokenKind;

const INDENT: &str = "  ";

/// Transpiles a syntax tree to JavaScript source
#[derive(Debug, Default)]
pub struct JsTranspiler {
    out: String,
    indent: usize,
}

impl JsTranspiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transpiles one module and returns the finished JavaScript
    pub fn transpile(root: &ModuleRoot) -> String {
        let mut transpiler = JsTranspiler::new();
        transpiler.visit_module_root(root);
        transpiler.finish()
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
}

impl AstVisitor for JsTranspiler {
    fn visit_module_root(&mut self, node: &ModuleRoot) {
        debug!(
            "transpiling module with {} declarations",
            node.declarations.len()
        );
        for (index, decl) in node.declarations.iter().enumerate() {
            if index > 0 {
                self.newline();
            }
            self.visit_decl(decl);
            self.out.push('\n');
        }
    }

    fn visit_type_decl(&mut self, node: &TypeDecl) {
        if node.is_external() {
            self.write(&format!(
                "// external type {} provided by the host",
                node.name.name()
            ));
            return;
        }
        self.write("class ");
        self.write(node.name.name());
        self.write(" {");
        self.indent += 1;
        self.newline();
        self.write("constructor() {");
        self.indent += 1;
        for member in node.members() {
            self.newline();
            self.write("this.");
            self.write(member.name.name());
            self.write(" = null;");
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    fn visit_function_decl(&mut self, node: &FunctionDecl) {
        if node.is_external() {
            self.write(&format!(
                "// external function {} provided by the host",
                node.name.name()
            ));
            return;
        }
        let parameters = node
            .parameter_slice()
            .iter()
            .map(|parameter| parameter.name.name())
            .join(", ");
        self.write("function ");
        self.write(node.name.name());
        self.write("(");
        self.write(&parameters);
        self.write(") ");
        match &node.body {
            Some(FunctionBody::Expr(expr)) => {
                self.write("{");
                self.indent += 1;
                self.newline();
                self.write("return ");
                self.visit_expr(expr);
                self.write(";");
                self.indent -= 1;
                self.newline();
                self.write("}");
            }
            Some(FunctionBody::Block(block)) => self.visit_block(block),
            None => self.write("{}"),
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

    fn visit_let_stmt(&mut self, node: &LetStmt) {
        self.write(if node.is_const() { "const " } else { "let " });
        self.write(node.name.name());
        self.write(" = ");
        self.visit_expr(&node.initializer);
        self.write(";");
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) {
        self.write("return");
        if let Some(value) = &node.value {
            self.write(" ");
            self.visit_expr(value);
        }
        self.write(";");
    }

    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        self.visit_expr(&node.expr);
        self.write(";");
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
        self.write("(");
        self.visit_expr(&node.condition);
        self.write(" ? ");
        self.visit_expr(&node.then_branch);
        self.write(" : ");
        match &node.else_branch {
            Some(else_branch) => self.visit_expr(else_branch),
            None => self.write("undefined"),
        }
        self.write(")");
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

    fn transpile_source(text: &str) -> String {
        let (root, messages) = parse_tolerant(text);
        assert!(messages.is_empty(), "unexpected: {messages:?}");
        JsTranspiler::transpile(&root)
    }

    #[test]
    fn test_type_becomes_a_class_skeleton() {
        let js = transpile_source("type Point { x: Number y: Number }");
        assert_eq!(
            js,
            "class Point {\n  constructor() {\n    this.x = null;\n    this.y = null;\n  }\n}\n"
        );
    }

    #[test]
    fn test_expression_body_becomes_implicit_return() {
        let js = transpile_source("double(n: Number): Number -> n * 2");
        assert_eq!(js, "function double(n) {\n  return n * 2;\n}\n");
    }

    #[test]
    fn test_block_body_and_bindings() {
        let js = transpile_source("main -> {\nlet const x = 1\nreturn x\n}");
        assert_eq!(js, "function main() {\n  const x = 1;\n  return x;\n}\n");
    }

    #[test]
    fn test_conditional_becomes_a_ternary() {
        let js = transpile_source("max(a, b) -> if a > b then a else b");
        assert_eq!(js, "function max(a, b) {\n  return (a > b ? a : b);\n}\n");
    }

    #[test]
    fn test_conditional_without_else_falls_back_to_undefined() {
        let js = transpile_source("f(a) -> if a then a");
        assert!(js.contains("(a ? a : undefined)"));
    }

    #[test]
    fn test_external_declarations_emit_comments_only() {
        let js = transpile_source("external type Text\nexternal log(message: Text)");
        assert_eq!(
            js,
            "// external type Text provided by the host\n\n\
             // external function log provided by the host\n"
        );
    }

    #[test]
    fn test_strict_equality_passes_through() {
        let js = transpile_source("same(a, b) -> a === b");
        assert!(js.contains("a === b"));
    }
}
