//! Span-aware diagnostics and the reporter abstraction.
//!
//! Every lexical and syntactic problem flows through one
//! [StaticMessageReporter] as a [StaticMessage]. What happens next is up to
//! the installed [MessageListener]: [FailFast] hands the message back as an
//! error so the caller unwinds on the first report, while [Collector]
//! records it and lets the pipeline keep going, which is what enables the
//! parser to substitute synthetic tokens instead of aborting.

use crate::span::SourceIndex;
use crate::token::Token;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// How severe a reported message is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Hint,
    Tip,
}

/// The closed registry of message codes, each carrying a fixed name and
/// severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCode {
    SyntaxUnexpectedToken,
    SyntaxExpectedIdentifier,
    SyntaxExpectedParentheses,
    SyntaxExpectedComma,
    SyntaxExpectedCurly,
    SyntaxExpectedThen,
    SyntaxInvalidOperator,
    SyntaxTooManyModifiers,
    SyntaxExternalWithBody,
    SyntaxInvalidCharacter,
    SyntaxUnterminatedString,
}

impl MessageCode {
    pub fn name(&self) -> &'static str {
        match self {
            MessageCode::SyntaxUnexpectedToken => "SYNTAX_UNEXPECTED_TOKEN",
            MessageCode::SyntaxExpectedIdentifier => "SYNTAX_EXPECTED_IDENTIFIER",
            MessageCode::SyntaxExpectedParentheses => "SYNTAX_EXPECTED_PARENTHESES",
            MessageCode::SyntaxExpectedComma => "SYNTAX_EXPECTED_COMMA",
            MessageCode::SyntaxExpectedCurly => "SYNTAX_EXPECTED_CURLY",
            MessageCode::SyntaxExpectedThen => "SYNTAX_EXPECTED_THEN",
            MessageCode::SyntaxInvalidOperator => "SYNTAX_INVALID_OPERATOR",
            MessageCode::SyntaxTooManyModifiers => "SYNTAX_TOO_MANY_MODIFIERS",
            MessageCode::SyntaxExternalWithBody => "SYNTAX_EXTERNAL_WITH_BODY",
            MessageCode::SyntaxInvalidCharacter => "SYNTAX_INVALID_CHARACTER",
            MessageCode::SyntaxUnterminatedString => "SYNTAX_UNTERMINATED_STRING",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            MessageCode::SyntaxTooManyModifiers => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MessageCode::SyntaxUnexpectedToken => "unexpected token",
            MessageCode::SyntaxExpectedIdentifier => "expected an identifier",
            MessageCode::SyntaxExpectedParentheses => "expected parentheses",
            MessageCode::SyntaxExpectedComma => "expected a comma",
            MessageCode::SyntaxExpectedCurly => "expected curly braces",
            MessageCode::SyntaxExpectedThen => "expected `then`",
            MessageCode::SyntaxInvalidOperator => "invalid operator",
            MessageCode::SyntaxTooManyModifiers => "too many modifiers",
            MessageCode::SyntaxExternalWithBody => "external declarations cannot have a body",
            MessageCode::SyntaxInvalidCharacter => "invalid character",
            MessageCode::SyntaxUnterminatedString => "unterminated string",
        }
    }
}

/// A diagnostic tied to a range of the source text.
///
/// Resolves its own `line:column` through the shared [SourceIndex], so a
/// message stays printable after the pipeline that produced it is gone.
#[derive(Debug, Clone)]
pub struct StaticMessage {
    source: Arc<SourceIndex>,
    offset: usize,
    length: usize,
    code: MessageCode,
}

impl StaticMessage {
    pub fn new(source: Arc<SourceIndex>, offset: usize, length: usize, code: MessageCode) -> Self {
        Self {
            source,
            offset,
            length,
            code,
        }
    }

    pub fn source(&self) -> &Arc<SourceIndex> {
        &self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn code(&self) -> MessageCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }
}

impl Display for StaticMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.source.line(self.offset), self.source.column(self.offset)) {
            (Ok(line), Ok(column)) => write!(
                f,
                "{}:{}: {}: {}",
                line + 1,
                column + 1,
                self.code.name(),
                self.code.description()
            ),
            _ => write!(
                f,
                "@{}: {}: {}",
                self.offset,
                self.code.name(),
                self.code.description()
            ),
        }
    }
}

impl std::error::Error for StaticMessage {}

/// Receives every reported [StaticMessage].
///
/// Returning `Err` makes the report propagate as a failure up through
/// whatever stage reported it; returning `Ok` lets that stage continue.
pub trait MessageListener {
    fn on_message(&mut self, message: StaticMessage) -> Result<(), StaticMessage>;
}

/// The strict listener: the first report aborts the pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl MessageListener for FailFast {
    fn on_message(&mut self, message: StaticMessage) -> Result<(), StaticMessage> {
        Err(message)
    }
}

/// The recovering listener: records every report in order and lets the
/// pipeline continue
#[derive(Debug, Default)]
pub struct Collector {
    messages: Vec<StaticMessage>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[StaticMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<StaticMessage> {
        self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|message| message.severity() == Severity::Error)
    }
}

impl MessageListener for Collector {
    fn on_message(&mut self, message: StaticMessage) -> Result<(), StaticMessage> {
        self.messages.push(message);
        Ok(())
    }
}

/// Builds [StaticMessage]s for tokens, nodes, and raw offsets and forwards
/// them to the installed listener
pub struct StaticMessageReporter<'l> {
    source: Arc<SourceIndex>,
    listener: &'l mut dyn MessageListener,
}

impl<'l> StaticMessageReporter<'l> {
    pub fn new(source: Arc<SourceIndex>, listener: &'l mut dyn MessageListener) -> Self {
        Self { source, listener }
    }

    pub fn source(&self) -> &Arc<SourceIndex> {
        &self.source
    }

    /// Reports a message covering `length` chars starting at `offset`
    pub fn report_offset(
        &mut self,
        offset: usize,
        length: usize,
        code: MessageCode,
    ) -> Result<(), StaticMessage> {
        let message = StaticMessage::new(self.source.clone(), offset, length, code);
        self.listener.on_message(message)
    }

    /// Reports a message covering one token
    pub fn report_token(&mut self, token: &Token, code: MessageCode) -> Result<(), StaticMessage> {
        self.report_offset(token.offset(), token.len(), code)
    }

    /// Reports a message covering a node, given its first and last tokens
    pub fn report_node(
        &mut self,
        first: &Token,
        last: &Token,
        code: MessageCode,
    ) -> Result<(), StaticMessage> {
        let offset = first.offset();
        let length = last.end().saturating_sub(offset);
        self.report_offset(offset, length, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn reporter_over<'l>(
        text: &str,
        listener: &'l mut dyn MessageListener,
    ) -> StaticMessageReporter<'l> {
        StaticMessageReporter::new(Arc::new(SourceIndex::new(text)), listener)
    }

    #[test]
    fn test_fail_fast_aborts_on_first_report() {
        let mut listener = FailFast;
        let mut reporter = reporter_over("let x = ;", &mut listener);
        let err = reporter
            .report_offset(8, 1, MessageCode::SyntaxUnexpectedToken)
            .unwrap_err();
        assert_eq!(err.code(), MessageCode::SyntaxUnexpectedToken);
        assert_eq!(err.offset(), 8);
    }

    #[test]
    fn test_collector_preserves_order() {
        let mut listener = Collector::new();
        {
            let mut reporter = reporter_over("a ,, b", &mut listener);
            reporter
                .report_offset(2, 1, MessageCode::SyntaxExpectedComma)
                .unwrap();
            reporter
                .report_offset(3, 1, MessageCode::SyntaxUnexpectedToken)
                .unwrap();
        }
        let codes: Vec<_> = listener
            .messages()
            .iter()
            .map(|message| message.code())
            .collect();
        assert_eq!(
            codes,
            vec![
                MessageCode::SyntaxExpectedComma,
                MessageCode::SyntaxUnexpectedToken
            ]
        );
        assert!(listener.has_errors());
    }

    #[test]
    fn test_report_token_covers_token() {
        let mut listener = Collector::new();
        {
            let mut reporter = reporter_over("foo", &mut listener);
            let token = Token::new(0, TokenKind::Identifier, "foo");
            reporter
                .report_token(&token, MessageCode::SyntaxExpectedIdentifier)
                .unwrap();
        }
        let message = &listener.messages()[0];
        assert_eq!(message.offset(), 0);
        assert_eq!(message.length(), 3);
    }

    #[test]
    fn test_display_is_one_based() {
        let mut listener = Collector::new();
        {
            let mut reporter = reporter_over("a\nbb ?", &mut listener);
            reporter
                .report_offset(5, 1, MessageCode::SyntaxInvalidCharacter)
                .unwrap();
        }
        let rendered = listener.messages()[0].to_string();
        assert!(
            rendered.starts_with("2:4: SYNTAX_INVALID_CHARACTER"),
            "got {rendered}"
        );
    }

    #[test]
    fn test_severity_registry() {
        assert_eq!(
            MessageCode::SyntaxTooManyModifiers.severity(),
            Severity::Warning
        );
        assert_eq!(
            MessageCode::SyntaxUnterminatedString.severity(),
            Severity::Error
        );
        assert_eq!(
            MessageCode::SyntaxExpectedParentheses.name(),
            "SYNTAX_EXPECTED_PARENTHESES"
        );
    }
}
