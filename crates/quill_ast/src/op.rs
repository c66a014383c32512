//! The semantic operator model.
//!
//! Token-level operator lexemes resolve into [OperatorType]s per grammar
//! category (binary, prefix, postfix). A lexeme that is not recognized in
//! the requested category resolves to [OperatorType::InvalidOrError]
//! instead of failing, so one malformed operator never aborts a parse; the
//! node it ends up in still carries the offending token.

use quill_tokens::token::{OperatorToken, TokenKind};

/// Precedence classes, loosest binding first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Conditional,
    LogicalOr,
    LogicalAnd,
    Equality,
    Comparison,
    Shift,
    Additive,
    Multiplicative,
    Prefix,
    Postfix,
}

/// Every operator the grammar knows, across all three categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorType {
    // binary
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Equal,
    StrictEqual,
    NotEqual,
    StrictNotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    ShiftLeft,
    ShiftRight,
    LogicalAnd,
    LogicalOr,
    // prefix
    Positive,
    Negate,
    Not,
    PreIncrement,
    PreDecrement,
    // postfix
    PostIncrement,
    PostDecrement,
    /// Stands in for an operator token that could not be resolved in the
    /// requested category
    InvalidOrError,
}

impl OperatorType {
    /// The precedence class, or `None` for [OperatorType::InvalidOrError]
    pub fn precedence(&self) -> Option<Precedence> {
        let precedence = match self {
            OperatorType::LogicalOr => Precedence::LogicalOr,
            OperatorType::LogicalAnd => Precedence::LogicalAnd,
            OperatorType::Equal
            | OperatorType::StrictEqual
            | OperatorType::NotEqual
            | OperatorType::StrictNotEqual => Precedence::Equality,
            OperatorType::Less
            | OperatorType::LessEqual
            | OperatorType::Greater
            | OperatorType::GreaterEqual => Precedence::Comparison,
            OperatorType::ShiftLeft | OperatorType::ShiftRight => Precedence::Shift,
            OperatorType::Add | OperatorType::Subtract => Precedence::Additive,
            OperatorType::Multiply | OperatorType::Divide | OperatorType::Remainder => {
                Precedence::Multiplicative
            }
            OperatorType::Positive
            | OperatorType::Negate
            | OperatorType::Not
            | OperatorType::PreIncrement
            | OperatorType::PreDecrement => Precedence::Prefix,
            OperatorType::PostIncrement | OperatorType::PostDecrement => Precedence::Postfix,
            OperatorType::InvalidOrError => return None,
        };
        Some(precedence)
    }

    /// Resolves a token kind as a binary operator
    pub fn binary(kind: TokenKind) -> Option<OperatorType> {
        let TokenKind::Operator(op) = kind else {
            return None;
        };
        match op {
            OperatorToken::Plus => Some(OperatorType::Add),
            OperatorToken::Minus => Some(OperatorType::Subtract),
            OperatorToken::Star => Some(OperatorType::Multiply),
            OperatorToken::Slash => Some(OperatorType::Divide),
            OperatorToken::Percent => Some(OperatorType::Remainder),
            OperatorToken::Equal => Some(OperatorType::Equal),
            OperatorToken::StrictEqual => Some(OperatorType::StrictEqual),
            OperatorToken::NotEqual => Some(OperatorType::NotEqual),
            OperatorToken::StrictNotEqual => Some(OperatorType::StrictNotEqual),
            OperatorToken::Less => Some(OperatorType::Less),
            OperatorToken::LessEqual => Some(OperatorType::LessEqual),
            OperatorToken::Greater => Some(OperatorType::Greater),
            OperatorToken::GreaterEqual => Some(OperatorType::GreaterEqual),
            OperatorToken::ShiftLeft => Some(OperatorType::ShiftLeft),
            OperatorToken::ShiftRight => Some(OperatorType::ShiftRight),
            OperatorToken::And => Some(OperatorType::LogicalAnd),
            OperatorToken::Or => Some(OperatorType::LogicalOr),
            _ => None,
        }
    }

    /// Resolves a token kind as a prefix operator
    pub fn prefix(kind: TokenKind) -> Option<OperatorType> {
        let TokenKind::Operator(op) = kind else {
            return None;
        };
        match op {
            OperatorToken::Plus => Some(OperatorType::Positive),
            OperatorToken::Minus => Some(OperatorType::Negate),
            OperatorToken::Not => Some(OperatorType::Not),
            OperatorToken::Increment => Some(OperatorType::PreIncrement),
            OperatorToken::Decrement => Some(OperatorType::PreDecrement),
            _ => None,
        }
    }

    /// Resolves a token kind as a postfix operator
    pub fn postfix(kind: TokenKind) -> Option<OperatorType> {
        let TokenKind::Operator(op) = kind else {
            return None;
        };
        match op {
            OperatorToken::Increment => Some(OperatorType::PostIncrement),
            OperatorToken::Decrement => Some(OperatorType::PostDecrement),
            _ => None,
        }
    }
}

/// An operator as it appears in the syntax tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operator {
    op_type: OperatorType,
}

impl Operator {
    /// The well-typed stand-in for a malformed operator token
    pub const INVALID: Operator = Operator {
        op_type: OperatorType::InvalidOrError,
    };

    pub const fn new(op_type: OperatorType) -> Self {
        Self { op_type }
    }

    pub fn op_type(&self) -> OperatorType {
        self.op_type
    }

    pub fn precedence(&self) -> Option<Precedence> {
        self.op_type.precedence()
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.op_type, OperatorType::InvalidOrError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Conditional < Precedence::LogicalOr);
        assert!(Precedence::Additive < Precedence::Multiplicative);
        assert!(Precedence::Multiplicative < Precedence::Prefix);
    }

    #[test]
    fn test_binary_resolution() {
        assert_eq!(
            OperatorType::binary(TokenKind::Operator(OperatorToken::Plus)),
            Some(OperatorType::Add)
        );
        assert_eq!(
            OperatorType::binary(TokenKind::Operator(OperatorToken::StrictEqual)),
            Some(OperatorType::StrictEqual)
        );
        // `!` is prefix-only
        assert_eq!(
            OperatorType::binary(TokenKind::Operator(OperatorToken::Not)),
            None
        );
        assert_eq!(OperatorType::binary(TokenKind::Dot), None);
    }

    #[test]
    fn test_prefix_and_postfix_resolution() {
        assert_eq!(
            OperatorType::prefix(TokenKind::Operator(OperatorToken::Minus)),
            Some(OperatorType::Negate)
        );
        assert_eq!(
            OperatorType::prefix(TokenKind::Operator(OperatorToken::Increment)),
            Some(OperatorType::PreIncrement)
        );
        assert_eq!(
            OperatorType::postfix(TokenKind::Operator(OperatorToken::Decrement)),
            Some(OperatorType::PostDecrement)
        );
        assert_eq!(
            OperatorType::postfix(TokenKind::Operator(OperatorToken::Not)),
            None
        );
    }

    #[test]
    fn test_invalid_operator() {
        assert!(Operator::INVALID.is_invalid());
        assert_eq!(Operator::INVALID.precedence(), None);
        assert_eq!(
            Operator::new(OperatorType::Add).precedence(),
            Some(Precedence::Additive)
        );
    }
}
