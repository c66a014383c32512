//! Source positions and the line/column index over one input

use std::sync::OnceLock;

/// A trait for anything that can provide the [Span] it occupies in source text
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A half-open range of char offsets into one source text
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Span {
    offset: usize,
    len: usize,
}

impl Span {
    /// Creates a new span
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first offset past this span
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Creates a span that encompasses both
    pub fn join(&self, other: Self) -> Self {
        let min = self.offset.min(other.offset);
        let max = self.end().max(other.end());
        Self {
            offset: min,
            len: max - min,
        }
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

/// An offset query landed outside of the indexed text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("offset {offset} is outside of [0, {length}]")]
pub struct OffsetOutOfRange {
    pub offset: usize,
    pub length: usize,
}

/// Wraps one input text and resolves char offsets to lines and columns.
///
/// The line-start table is built lazily on the first query, so inputs that
/// never produce a diagnostic never pay for it. Both queries are O(log n)
/// binary searches over that table.
#[derive(Debug)]
pub struct SourceIndex {
    text: String,
    char_len: usize,
    line_starts: OnceLock<Vec<usize>>,
}

impl SourceIndex {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self {
            text,
            char_len,
            line_starts: OnceLock::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The length of the input in chars
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    fn line_starts(&self) -> &[usize] {
        self.line_starts.get_or_init(|| {
            let mut starts = vec![0];
            starts.extend(
                self.text
                    .chars()
                    .enumerate()
                    .filter(|(_, c)| *c == '\n')
                    .map(|(offset, _)| offset + 1),
            );
            starts
        })
    }

    fn check_offset(&self, offset: usize) -> Result<(), OffsetOutOfRange> {
        if offset > self.char_len {
            Err(OffsetOutOfRange {
                offset,
                length: self.char_len,
            })
        } else {
            Ok(())
        }
    }

    /// The zero-based line containing `offset`
    pub fn line(&self, offset: usize) -> Result<usize, OffsetOutOfRange> {
        self.check_offset(offset)?;
        let starts = self.line_starts();
        Ok(starts.partition_point(|start| *start <= offset) - 1)
    }

    /// The zero-based column of `offset` within its line
    pub fn column(&self, offset: usize) -> Result<usize, OffsetOutOfRange> {
        let line = self.line(offset)?;
        Ok(offset - self.line_starts()[line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_join() {
        let a = Span::new(0, 8);
        let b = Span::new(16, 8);
        assert_eq!(a.join(b), Span::new(0, 24));
        assert_eq!(b.join(a), Span::new(0, 24));
    }

    #[test]
    fn test_span_end() {
        assert_eq!(Span::new(3, 5).end(), 8);
        assert!(Span::new(3, 0).is_empty());
    }

    #[test]
    fn test_line_and_column() {
        let index = SourceIndex::new("one\ntwo\n\nfour");
        assert_eq!(index.line(0).unwrap(), 0);
        assert_eq!(index.line(3).unwrap(), 0);
        assert_eq!(index.line(4).unwrap(), 1);
        assert_eq!(index.column(4).unwrap(), 0);
        assert_eq!(index.column(6).unwrap(), 2);
        assert_eq!(index.line(8).unwrap(), 2);
        assert_eq!(index.line(9).unwrap(), 3);
        assert_eq!(index.column(12).unwrap(), 3);
    }

    #[test]
    fn test_offset_at_len_is_valid() {
        let index = SourceIndex::new("ab");
        assert_eq!(index.line(2).unwrap(), 0);
        assert_eq!(index.column(2).unwrap(), 2);
    }

    #[test]
    fn test_offset_out_of_range() {
        let index = SourceIndex::new("ab");
        let err = index.line(3).unwrap_err();
        assert_eq!(
            err,
            OffsetOutOfRange {
                offset: 3,
                length: 2
            }
        );
        assert!(index.column(17).is_err());
    }

    #[test]
    fn test_empty_input() {
        let index = SourceIndex::new("");
        assert!(index.is_empty());
        assert_eq!(index.line(0).unwrap(), 0);
        assert!(index.line(1).is_err());
    }
}
