#![doc = include_str!("../README.md")]

use quill_ast::decl::ModuleRoot;
use quill_ast::factory::AstFactory;
use quill_tokens::diagnostics::{Collector, FailFast, StaticMessage, StaticMessageReporter};
use quill_tokens::span::SourceIndex;
use quill_tokens::token::{Token, TokenKind};
use std::sync::Arc;

pub mod lexer;
pub mod parser;
pub mod scanner;

use parser::Parser;

/// Runs the whole pipeline under the fail-fast listener: the first
/// diagnostic aborts and is returned as the error.
///
/// This is the one-shot CLI behavior; use [parse_tolerant] for tooling
/// that needs a tree for malformed input.
pub fn parse_strict(text: &str) -> Result<ModuleRoot, StaticMessage> {
    let source = Arc::new(SourceIndex::new(text));
    let mut listener = FailFast;
    let mut reporter = StaticMessageReporter::new(source.clone(), &mut listener);
    let tokens = lexer::tokenize(&source, &mut reporter)?;
    let mut parser = Parser::new(tokens, reporter, AstFactory::new());
    parser.parse_module_root()
}

/// Runs the whole pipeline under a collecting listener: always produces a
/// complete, best-effort tree plus every diagnostic in report order.
pub fn parse_tolerant(text: &str) -> (ModuleRoot, Vec<StaticMessage>) {
    let source = Arc::new(SourceIndex::new(text));
    let mut collector = Collector::new();
    let root = {
        let mut reporter = StaticMessageReporter::new(source.clone(), &mut collector);
        // a collecting listener never fails the lexer or the parser
        let tokens = lexer::tokenize(&source, &mut reporter).unwrap_or_default();
        let mut parser = Parser::new(tokens, reporter, AstFactory::new());
        parser.parse_module_root().unwrap_or_else(|_| ModuleRoot {
            declarations: vec![],
            eof_token: Token::new(source.len(), TokenKind::Eof, ""),
        })
    };
    (root, collector.into_messages())
}
