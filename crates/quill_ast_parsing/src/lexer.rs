//! Converts source text into a flat token stream.
//!
//! The lexer walks the [Scanner] one code point at a time: whitespace is
//! skipped, operators are matched greedily by chained single-character
//! lookahead, and `//` comments are buffered and attached as leading
//! metadata on the next emitted token. Every stream ends with exactly one
//! EOF marker whose offset equals the input length.
//!
//! Lexical problems go through the [StaticMessageReporter]: with a
//! recovering listener the lexer reports and keeps scanning, with the
//! fail-fast listener the first problem aborts [tokenize] with that
//! message.

use crate::scanner::Scanner;
use quill_tokens::diagnostics::{
    FailFast, MessageCode, StaticMessage, StaticMessageReporter,
};
use quill_tokens::span::SourceIndex;
use quill_tokens::token::{Keyword, OperatorToken, Token, TokenKind};
use std::sync::Arc;
use tracing::trace;

/// Tokenizes the whole input, reporting problems through `reporter`.
///
/// Returns `Err` only when the installed listener fails fast; a collecting
/// listener makes this infallible.
pub fn tokenize(
    source: &Arc<SourceIndex>,
    reporter: &mut StaticMessageReporter<'_>,
) -> Result<Vec<Token>, StaticMessage> {
    let mut lexer = Lexer::new(source.text());
    let mut tokens = Vec::new();
    while let Some(token) = lexer.scan_token(reporter)? {
        tokens.push(lexer.attach_pending(token));
    }
    let eof = Token::new(lexer.offset(), TokenKind::Eof, "");
    tokens.push(lexer.attach_pending(eof));
    trace!("lexed {} tokens from {} chars", tokens.len(), source.len());
    Ok(tokens)
}

/// Tokenizes under the fail-fast listener: the first lexical problem is
/// returned as an error
pub fn tokenize_strict(source: &Arc<SourceIndex>) -> Result<Vec<Token>, StaticMessage> {
    let mut listener = FailFast;
    let mut reporter = StaticMessageReporter::new(source.clone(), &mut listener);
    tokenize(source, &mut reporter)
}

struct Lexer {
    scanner: Scanner,
    /// Comment tokens waiting to be attached to the next emitted token;
    /// drained on every emission, EOF included
    pending_comments: Vec<Token>,
}

impl Lexer {
    fn new(text: &str) -> Self {
        Self {
            scanner: Scanner::new(text),
            pending_comments: Vec::new(),
        }
    }

    fn offset(&self) -> usize {
        self.scanner.offset()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.scanner.peek(offset).ok()
    }

    fn bump(&mut self) -> Option<char> {
        self.scanner.read().ok()
    }

    fn text_from(&self, start: usize) -> String {
        self.scanner
            .substring(start, self.scanner.offset())
            .unwrap_or_default()
    }

    fn attach_pending(&mut self, token: Token) -> Token {
        if self.pending_comments.is_empty() {
            token
        } else {
            token.with_leading_comments(std::mem::take(&mut self.pending_comments))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek(0).is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Scans the next token, or `None` at end of input. Comments are
    /// buffered, not returned.
    fn scan_token(
        &mut self,
        reporter: &mut StaticMessageReporter<'_>,
    ) -> Result<Option<Token>, StaticMessage> {
        loop {
            self.skip_whitespace();
            let start = self.scanner.offset();
            if self.scanner.matches_literal("//") {
                self.scan_line_comment(start);
                continue;
            }
            let Some(c) = self.bump() else {
                return Ok(None);
            };
            let kind = match c {
                '(' => TokenKind::OpenParen,
                ')' => TokenKind::CloseParen,
                '{' => TokenKind::OpenCurly,
                '}' => TokenKind::CloseCurly,
                ':' => TokenKind::Colon,
                '.' => TokenKind::Dot,
                ',' => TokenKind::Comma,
                '-' => {
                    if self.scanner.matches('>') {
                        TokenKind::Arrow
                    } else if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::MinusAssign)
                    } else if self.scanner.matches('-') {
                        TokenKind::Operator(OperatorToken::Decrement)
                    } else if self.peek(0).is_some_and(|d| d.is_ascii_digit()) {
                        // a minus directly followed by a digit folds into
                        // the numeric literal
                        return Ok(Some(self.scan_number(start)));
                    } else {
                        TokenKind::Operator(OperatorToken::Minus)
                    }
                }
                '+' => {
                    if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::PlusAssign)
                    } else if self.scanner.matches('+') {
                        TokenKind::Operator(OperatorToken::Increment)
                    } else {
                        TokenKind::Operator(OperatorToken::Plus)
                    }
                }
                '*' => {
                    if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::StarAssign)
                    } else {
                        TokenKind::Operator(OperatorToken::Star)
                    }
                }
                '%' => {
                    if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::PercentAssign)
                    } else {
                        TokenKind::Operator(OperatorToken::Percent)
                    }
                }
                '=' => {
                    if self.scanner.matches('=') {
                        if self.scanner.matches('=') {
                            TokenKind::Operator(OperatorToken::StrictEqual)
                        } else {
                            TokenKind::Operator(OperatorToken::Equal)
                        }
                    } else {
                        TokenKind::Operator(OperatorToken::Assign)
                    }
                }
                '!' => {
                    if self.scanner.matches('=') {
                        if self.scanner.matches('=') {
                            TokenKind::Operator(OperatorToken::StrictNotEqual)
                        } else {
                            TokenKind::Operator(OperatorToken::NotEqual)
                        }
                    } else {
                        TokenKind::Operator(OperatorToken::Not)
                    }
                }
                '<' => {
                    if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::LessEqual)
                    } else if self.scanner.matches('<') {
                        TokenKind::Operator(OperatorToken::ShiftLeft)
                    } else {
                        TokenKind::Operator(OperatorToken::Less)
                    }
                }
                '>' => {
                    if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::GreaterEqual)
                    } else if self.scanner.matches('>') {
                        TokenKind::Operator(OperatorToken::ShiftRight)
                    } else {
                        TokenKind::Operator(OperatorToken::Greater)
                    }
                }
                '|' => {
                    if self.scanner.matches('|') {
                        TokenKind::Operator(OperatorToken::Or)
                    } else if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::PipeAssign)
                    } else {
                        TokenKind::Operator(OperatorToken::Pipe)
                    }
                }
                '&' => {
                    if self.scanner.matches('&') {
                        TokenKind::Operator(OperatorToken::And)
                    } else if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::AmpAssign)
                    } else {
                        TokenKind::Operator(OperatorToken::Amp)
                    }
                }
                '/' => {
                    if self.scanner.matches('=') {
                        TokenKind::Operator(OperatorToken::SlashAssign)
                    } else {
                        TokenKind::Operator(OperatorToken::Slash)
                    }
                }
                '\'' => return self.scan_string(start, reporter).map(Some),
                c if c.is_ascii_digit() => return Ok(Some(self.scan_number_tail(start, c))),
                c if c.is_alphabetic() || c == '_' => {
                    return Ok(Some(self.scan_identifier_or_keyword(start)));
                }
                _ => {
                    reporter.report_offset(start, 1, MessageCode::SyntaxInvalidCharacter)?;
                    continue;
                }
            };
            return Ok(Some(Token::new(start, kind, self.text_from(start))));
        }
    }

    /// Scans a comment up to, but not including, the end of line; `\r\n`
    /// counts as one terminator
    fn scan_line_comment(&mut self, start: usize) {
        loop {
            match self.peek(0) {
                None | Some('\n') => break,
                Some('\r') if self.peek(1) == Some('\n') => break,
                _ => {
                    self.bump();
                }
            }
        }
        let comment = Token::new(start, TokenKind::Comment, self.text_from(start));
        self.pending_comments.push(comment);
    }

    /// Scans the remainder of a numeric literal; the sign and/or first
    /// digit are already consumed.
    fn scan_number(&mut self, start: usize) -> Token {
        match self.bump() {
            Some(first_digit) => self.scan_number_tail(start, first_digit),
            None => Token::new(start, TokenKind::Number, self.text_from(start)),
        }
    }

    fn scan_number_tail(&mut self, start: usize, first_digit: char) -> Token {
        if first_digit == '0' && self.peek(0).is_some_and(|c| matches!(c, 'x' | 'X')) {
            self.bump();
            while self.peek(0).is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
        } else if self.peek(0).is_some_and(|c| matches!(c, 'e' | 'E')) {
            // the exponent marker is only recognized directly after the
            // first digit: `2e6` is one number, `25e6` is `25` then `e6`
            self.bump();
            while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        } else {
            while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
            if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
                while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }
        Token::new(start, TokenKind::Number, self.text_from(start))
    }

    /// Scans a single-quoted string; the opening quote is already consumed.
    ///
    /// Reaching end of input reports an unterminated string but still
    /// produces a token, so the lexer never aborts mid-stream under a
    /// recovering listener.
    fn scan_string(
        &mut self,
        start: usize,
        reporter: &mut StaticMessageReporter<'_>,
    ) -> Result<Token, StaticMessage> {
        let value_start = self.scanner.offset();
        while self.peek(0).is_some_and(|c| c != '\'') {
            self.bump();
        }
        let value = self
            .scanner
            .substring(value_start, self.scanner.offset())
            .unwrap_or_default();
        if !self.scanner.matches('\'') {
            reporter.report_offset(
                start,
                self.scanner.offset() - start,
                MessageCode::SyntaxUnterminatedString,
            )?;
        }
        Ok(Token::new(start, TokenKind::String, value))
    }

    fn scan_identifier_or_keyword(&mut self, start: usize) -> Token {
        while self.peek(0).is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let lexeme = self.text_from(start);
        let kind = match Keyword::from_lexeme(&lexeme) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        };
        Token::new(start, kind, lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_tokens::diagnostics::Collector;
    use test_log::test;

    fn lex(text: &str) -> (Vec<Token>, Vec<StaticMessage>) {
        let source = Arc::new(SourceIndex::new(text));
        let mut collector = Collector::new();
        let tokens = {
            let mut reporter = StaticMessageReporter::new(source.clone(), &mut collector);
            tokenize(&source, &mut reporter).expect("collector never fails the lexer")
        };
        (tokens, collector.into_messages())
    }

    fn lexemes(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|token| !token.kind().is_eof())
            .map(|token| token.lexeme())
            .collect()
    }

    #[test]
    fn test_every_stream_ends_with_eof_at_input_length() {
        for text in ["", "   ", "let x = 1", "'open", "// only a comment"] {
            let (tokens, _) = lex(text);
            let eof = tokens.last().unwrap();
            assert!(eof.kind().is_eof(), "{text:?}");
            assert!(eof.is_empty());
            assert_eq!(eof.offset(), text.chars().count(), "{text:?}");
            assert_eq!(
                tokens.iter().filter(|t| t.kind().is_eof()).count(),
                1,
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_offsets_are_non_decreasing() {
        let (tokens, _) = lex("main(a: Number): Number -> a + 1");
        let mut last = 0;
        for token in &tokens {
            assert!(token.offset() >= last);
            last = token.offset();
        }
    }

    #[test]
    fn test_hex_literal_is_one_token() {
        let (tokens, messages) = lex("0xDEADBEEF");
        assert!(messages.is_empty());
        assert_eq!(tokens[0].kind(), TokenKind::Number);
        assert_eq!(tokens[0].lexeme(), "0xDEADBEEF");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_negative_fraction_is_one_token() {
        let (tokens, _) = lex("-1.5");
        assert_eq!(tokens[0].kind(), TokenKind::Number);
        assert_eq!(tokens[0].lexeme(), "-1.5");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_exponent_after_first_digit() {
        let (tokens, _) = lex("2e6");
        assert_eq!(tokens[0].kind(), TokenKind::Number);
        assert_eq!(tokens[0].lexeme(), "2e6");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_exponent_is_not_recognized_after_later_digits() {
        // regression pin: the exponent marker is only checked directly
        // after the first digit, so `25e6` is a number and an identifier
        let (tokens, _) = lex("25e6");
        assert_eq!(tokens[0].kind(), TokenKind::Number);
        assert_eq!(tokens[0].lexeme(), "25");
        assert_eq!(tokens[1].kind(), TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme(), "e6");
    }

    #[test]
    fn test_string_value_has_quotes_stripped() {
        let (tokens, messages) = lex("'Hello'");
        assert!(messages.is_empty());
        assert_eq!(tokens[0].kind(), TokenKind::String);
        assert_eq!(tokens[0].lexeme(), "Hello");
    }

    #[test]
    fn test_unterminated_string_reports_but_still_produces_a_token() {
        let (tokens, messages) = lex("'Hello");
        assert_eq!(tokens[0].kind(), TokenKind::String);
        assert_eq!(tokens[0].lexeme(), "Hello");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].code(), MessageCode::SyntaxUnterminatedString);
        assert_eq!(messages[0].offset(), 0);
    }

    #[test]
    fn test_unterminated_string_fails_fast_under_strict_listener() {
        let source = Arc::new(SourceIndex::new("'Hello"));
        let err = tokenize_strict(&source).unwrap_err();
        assert_eq!(err.code(), MessageCode::SyntaxUnterminatedString);
    }

    #[test]
    fn test_empty_unterminated_string() {
        let (tokens, messages) = lex("'");
        assert_eq!(tokens[0].kind(), TokenKind::String);
        assert_eq!(tokens[0].lexeme(), "");
        assert_eq!(messages[0].code(), MessageCode::SyntaxUnterminatedString);
    }

    #[test]
    fn test_comments_attach_to_the_next_token_in_order() {
        let (tokens, _) = lex("// A\n// B\n1");
        let number = &tokens[0];
        assert_eq!(number.kind(), TokenKind::Number);
        let comments: Vec<_> = number
            .leading_comments()
            .iter()
            .map(|c| c.lexeme())
            .collect();
        assert_eq!(comments, vec!["// A", "// B"]);
    }

    #[test]
    fn test_comment_buffer_clears_on_every_emission() {
        let (tokens, _) = lex("// A\n1 2");
        assert_eq!(tokens[0].leading_comments().len(), 1);
        assert!(tokens[1].leading_comments().is_empty());
    }

    #[test]
    fn test_trailing_comment_attaches_to_eof() {
        let (tokens, _) = lex("1\n// trailing");
        let eof = tokens.last().unwrap();
        assert!(eof.kind().is_eof());
        assert_eq!(eof.leading_comments().len(), 1);
        assert_eq!(eof.leading_comments()[0].lexeme(), "// trailing");
    }

    #[test]
    fn test_crlf_terminates_a_comment_without_being_included() {
        let (tokens, _) = lex("// A\r\n1");
        let comment = &tokens[0].leading_comments()[0];
        assert_eq!(comment.lexeme(), "// A");
    }

    #[test]
    fn test_greedy_operator_chains() {
        let (tokens, _) = lex("-> -= -- - ++ += === == = !== != ! <= << < >= >> > || |= | && &= &");
        let expected = vec![
            "->", "-=", "--", "-", "++", "+=", "===", "==", "=", "!==", "!=", "!", "<=", "<<",
            "<", ">=", ">>", ">", "||", "|=", "|", "&&", "&=", "&",
        ];
        assert_eq!(lexemes(&tokens), expected);
        assert_eq!(tokens[0].kind(), TokenKind::Arrow);
    }

    #[test]
    fn test_slash_family() {
        let (tokens, _) = lex("a / b /= c");
        assert_eq!(
            tokens[1].kind(),
            TokenKind::Operator(OperatorToken::Slash)
        );
        assert_eq!(
            tokens[3].kind(),
            TokenKind::Operator(OperatorToken::SlashAssign)
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let (tokens, _) = lex("external type lettuce let");
        assert_eq!(
            tokens[0].kind(),
            TokenKind::Keyword(Keyword::External)
        );
        assert_eq!(tokens[1].kind(), TokenKind::Keyword(Keyword::Type));
        assert_eq!(tokens[2].kind(), TokenKind::Identifier);
        assert_eq!(tokens[3].kind(), TokenKind::Keyword(Keyword::Let));
    }

    #[test]
    fn test_invalid_character_reports_and_scanning_continues() {
        let (tokens, messages) = lex("# 1");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].code(), MessageCode::SyntaxInvalidCharacter);
        assert_eq!(messages[0].offset(), 0);
        assert_eq!(messages[0].length(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::Number);
    }

    #[test]
    fn test_invalid_character_throws_under_strict_listener() {
        let source = Arc::new(SourceIndex::new("#"));
        let err = tokenize_strict(&source).unwrap_err();
        assert_eq!(err.code(), MessageCode::SyntaxInvalidCharacter);
    }

    #[test]
    fn test_pairs_and_symbols() {
        let (tokens, _) = lex("( ) { } : . ,");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::OpenCurly,
                TokenKind::CloseCurly,
                TokenKind::Colon,
                TokenKind::Dot,
                TokenKind::Comma,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spaced_minus_stays_an_operator() {
        let (tokens, _) = lex("a - 1");
        assert_eq!(
            tokens[1].kind(),
            TokenKind::Operator(OperatorToken::Minus)
        );
        assert_eq!(tokens[2].lexeme(), "1");
    }

    #[test]
    fn test_lexer_never_emits_recovered_tokens() {
        let (tokens, _) = lex("let x = 'oops");
        assert!(tokens.iter().all(|token| !token.is_recovered()));
    }
}
