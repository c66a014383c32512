//! A minimal character cursor over one source text

use thiserror::Error;

/// An access past the end of the scanned text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("scan position {offset} is outside of [0, {length}]")]
pub struct ScanError {
    pub offset: usize,
    pub length: usize,
}

/// A forward-only cursor over the code points of one source text.
///
/// The scanner has no lookahead beyond the explicit `offset` given to
/// [peek](Scanner::peek) and no side effects beyond cursor advancement.
#[derive(Debug)]
pub struct Scanner {
    chars: Vec<char>,
    position: usize,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            position: 0,
        }
    }

    /// The current cursor position in char offsets
    pub fn offset(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Looks at the code point `offset` positions ahead without consuming
    pub fn peek(&self, offset: usize) -> Result<char, ScanError> {
        self.chars
            .get(self.position + offset)
            .copied()
            .ok_or(ScanError {
                offset: self.position + offset,
                length: self.chars.len(),
            })
    }

    /// Consumes and returns the next code point
    pub fn read(&mut self) -> Result<char, ScanError> {
        let c = self.peek(0)?;
        self.position += 1;
        Ok(c)
    }

    /// Consumes the next code point iff it equals `expected`
    pub fn matches(&mut self, expected: char) -> bool {
        if self.peek(0) == Ok(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `literal` iff the text at the cursor starts with it
    pub fn matches_literal(&mut self, literal: &str) -> bool {
        let mut len = 0;
        for (offset, expected) in literal.chars().enumerate() {
            if self.peek(offset) != Ok(expected) {
                return false;
            }
            len += 1;
        }
        self.position += len;
        true
    }

    /// The text between two previously visited positions
    pub fn substring(&self, start: usize, end: usize) -> Result<String, ScanError> {
        if start > end || end > self.chars.len() {
            return Err(ScanError {
                offset: end,
                length: self.chars.len(),
            });
        }
        Ok(self.chars[start..end].iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_read() {
        let mut scanner = Scanner::new("ab");
        assert_eq!(scanner.peek(0), Ok('a'));
        assert_eq!(scanner.peek(1), Ok('b'));
        assert_eq!(scanner.read(), Ok('a'));
        assert_eq!(scanner.offset(), 1);
        assert_eq!(scanner.read(), Ok('b'));
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_peek_past_end_is_an_error() {
        let scanner = Scanner::new("a");
        assert_eq!(
            scanner.peek(1),
            Err(ScanError {
                offset: 1,
                length: 1
            })
        );
        let mut empty = Scanner::new("");
        assert!(empty.peek(0).is_err());
        assert!(empty.read().is_err());
    }

    #[test]
    fn test_matches_consumes_only_on_match() {
        let mut scanner = Scanner::new("-=");
        assert!(!scanner.matches('>'));
        assert_eq!(scanner.offset(), 0);
        assert!(scanner.matches('-'));
        assert!(scanner.matches('='));
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_matches_literal() {
        let mut scanner = Scanner::new("//x");
        assert!(!scanner.matches_literal("/*"));
        assert_eq!(scanner.offset(), 0);
        assert!(scanner.matches_literal("//"));
        assert_eq!(scanner.offset(), 2);
    }

    #[test]
    fn test_substring() {
        let mut scanner = Scanner::new("hello");
        for _ in 0..5 {
            scanner.read().unwrap();
        }
        assert_eq!(scanner.substring(1, 4).unwrap(), "ell");
        assert!(scanner.substring(3, 9).is_err());
    }

    #[test]
    fn test_non_ascii_code_points() {
        let mut scanner = Scanner::new("héllo");
        assert_eq!(scanner.read(), Ok('h'));
        assert_eq!(scanner.read(), Ok('é'));
        // offsets count code points, not bytes
        assert_eq!(scanner.offset(), 2);
    }
}
