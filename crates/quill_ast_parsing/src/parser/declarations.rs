//! The module, declaration, and statement grammar layers.
//!
//! A module is a run of top-level declarations until EOF: `type` blocks,
//! `let` bindings, and function declarations, each optionally preceded by
//! the `external` modifier. Statements only occur inside function block
//! bodies.

use super::{starts_expression, ParseResult, Parser};
use quill_ast::decl::{Decl, FunctionBody, FunctionDecl, ModuleRoot, Parameter, TypeDecl};
use quill_ast::node::AstNode;
use quill_ast::stmt::{Block, LetStmt, Stmt, TypeAnnotation};
use quill_tokens::diagnostics::MessageCode;
use quill_tokens::token::{Keyword, OperatorToken, Token, TokenKind};
use tracing::trace;

impl Parser<'_> {
    /// Parses the whole token stream as one module
    pub fn parse_module_root(&mut self) -> ParseResult<ModuleRoot> {
        trace!("parsing module root");
        let mut declarations = Vec::new();
        while self.has_next() {
            let before = self.position();
            if let Some(decl) = self.parse_declaration()? {
                declarations.push(decl);
            }
            // reported-but-unconsumed tokens must not stall the loop
            if self.position() == before {
                self.advance();
            }
        }
        let eof_token = self.advance();
        Ok(self.factory.module_root(declarations, eof_token))
    }

    fn parse_declaration(&mut self) -> ParseResult<Option<Decl>> {
        let external_token = self.match_keyword(Keyword::External);
        if let Some(type_token) = self.match_keyword(Keyword::Type) {
            let decl = self.parse_type_decl(external_token, type_token)?;
            return Ok(Some(Decl::Type(decl)));
        }
        if let Some(let_token) = self.match_keyword(Keyword::Let) {
            if let Some(external) = &external_token {
                self.reporter
                    .report_token(external, MessageCode::SyntaxUnexpectedToken)?;
            }
            return Ok(Some(Decl::Let(self.parse_var_decl(let_token)?)));
        }
        if self.check(TokenKind::Identifier) {
            let decl = self.parse_function_decl(external_token)?;
            return Ok(Some(Decl::Function(decl)));
        }
        let found = self.current().clone();
        self.reporter
            .report_token(&found, MessageCode::SyntaxUnexpectedToken)?;
        Ok(None)
    }

    /// `type Name { member* }`; externals carry no body
    fn parse_type_decl(
        &mut self,
        external_token: Option<Token>,
        type_token: Token,
    ) -> ParseResult<TypeDecl> {
        let name = self.expect_identifier()?;
        let body = if self.check(TokenKind::OpenCurly) {
            let open_curly = self.advance();
            let mut members = Vec::new();
            while self.has_next() && !self.check(TokenKind::CloseCurly) {
                let before = self.position();
                members.push(self.parse_type_member()?);
                if self.position() == before {
                    self.advance();
                }
            }
            let close_curly =
                self.expect(TokenKind::CloseCurly, "}", MessageCode::SyntaxExpectedCurly)?;
            Some(self.factory.type_body(open_curly, members, close_curly))
        } else {
            None
        };
        match (&external_token, &body) {
            (Some(_), Some(body)) => {
                self.reporter.report_node(
                    &body.open_curly,
                    &body.close_curly,
                    MessageCode::SyntaxExternalWithBody,
                )?;
            }
            (None, None) => {
                let found = self.current().clone();
                self.reporter
                    .report_token(&found, MessageCode::SyntaxExpectedCurly)?;
            }
            _ => {}
        }
        Ok(self
            .factory
            .type_decl(external_token, type_token, name, body))
    }

    fn parse_type_member(&mut self) -> ParseResult<quill_ast::decl::TypeMember> {
        let name = self.expect_identifier()?;
        let colon_token = self.expect(TokenKind::Colon, ":", MessageCode::SyntaxUnexpectedToken)?;
        let ty = self.expect_identifier()?;
        Ok(self.factory.type_member(name, colon_token, ty))
    }

    /// `name (params)? (: ReturnType)? -> body`
    fn parse_function_decl(
        &mut self,
        external_token: Option<Token>,
    ) -> ParseResult<FunctionDecl> {
        let name = self.expect_identifier()?;
        trace!("parsing function declaration {}", name.name());
        let parameters = if self.check(TokenKind::OpenParen) {
            let open_paren = self.advance();
            let (params, close_paren) =
                self.parse_paren_items(|parser| parser.parse_parameter())?;
            Some(self.factory.parameter_list(open_paren, params, close_paren))
        } else {
            None
        };
        let return_type = self.parse_type_annotation()?;

        if external_token.is_some() {
            // an external function has no body; if one follows anyway it
            // is parsed, kept, and reported
            if let Some(arrow_token) = self.match_kind(TokenKind::Arrow) {
                let body = self.parse_function_body()?;
                self.reporter.report_node(
                    &arrow_token,
                    body.last_token(),
                    MessageCode::SyntaxExternalWithBody,
                )?;
                return Ok(self.factory.function_decl(
                    external_token,
                    name,
                    parameters,
                    return_type,
                    Some(arrow_token),
                    Some(body),
                ));
            }
            return Ok(self.factory.function_decl(
                external_token,
                name,
                parameters,
                return_type,
                None,
                None,
            ));
        }

        let arrow_token =
            self.expect(TokenKind::Arrow, "->", MessageCode::SyntaxUnexpectedToken)?;
        let body = self.parse_function_body()?;
        Ok(self.factory.function_decl(
            None,
            name,
            parameters,
            return_type,
            Some(arrow_token),
            Some(body),
        ))
    }

    fn parse_function_body(&mut self) -> ParseResult<FunctionBody> {
        if self.check(TokenKind::OpenCurly) {
            Ok(FunctionBody::Block(self.parse_block()?))
        } else {
            Ok(FunctionBody::Expr(self.parse_expression()?))
        }
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let name = self.expect_identifier()?;
        let annotation = self.parse_type_annotation()?;
        Ok(self.factory.parameter(name, annotation))
    }

    fn parse_type_annotation(&mut self) -> ParseResult<Option<TypeAnnotation>> {
        let Some(colon_token) = self.match_kind(TokenKind::Colon) else {
            return Ok(None);
        };
        let name = self.expect_identifier()?;
        Ok(Some(self.factory.type_annotation(colon_token, name)))
    }

    /// `return expr?`, `let var-decl`, or an expression statement
    pub fn parse_statement(&mut self) -> ParseResult<Stmt> {
        if let Some(return_token) = self.match_keyword(Keyword::Return) {
            let value = if starts_expression(self.current().kind()) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            return Ok(self.factory.return_stmt(return_token, value));
        }
        if let Some(let_token) = self.match_keyword(Keyword::Let) {
            return Ok(Stmt::Let(self.parse_var_decl(let_token)?));
        }
        let expr = self.parse_expression()?;
        Ok(self.factory.expr_stmt(expr))
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        let open_curly = self.advance();
        let mut statements = Vec::new();
        while self.has_next() && !self.check(TokenKind::CloseCurly) {
            let before = self.position();
            statements.push(self.parse_statement()?);
            if self.position() == before {
                self.advance();
            }
        }
        let close_curly = self.expect(TokenKind::CloseCurly, "}", MessageCode::SyntaxExpectedCurly)?;
        Ok(self.factory.block(open_curly, statements, close_curly))
    }

    /// `let const* name (: Type)? = initializer`; only the first modifier
    /// is honored
    fn parse_var_decl(&mut self, let_token: Token) -> ParseResult<LetStmt> {
        let mut modifier = None;
        while let Some(const_token) = self.match_keyword(Keyword::Const) {
            if modifier.is_none() {
                modifier = Some(const_token);
            } else {
                self.reporter
                    .report_token(&const_token, MessageCode::SyntaxTooManyModifiers)?;
            }
        }
        let name = self.expect_identifier()?;
        let annotation = self.parse_type_annotation()?;
        let assign_token = self.expect(
            TokenKind::Operator(OperatorToken::Assign),
            "=",
            MessageCode::SyntaxUnexpectedToken,
        )?;
        let initializer = self.parse_expression()?;
        Ok(self.factory.let_stmt(
            let_token,
            modifier,
            name,
            annotation,
            assign_token,
            initializer,
        ))
    }
}
