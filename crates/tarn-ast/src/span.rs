// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

use std::fmt;

/// A span in the source code, as 1-based line/column pairs.
///
/// `end_col` is exclusive: a token `let` at the start of a line spans
/// columns 1 to 4. Spans order by their start position first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self { start_line, start_col, end_line, end_col }
    }

    /// A zero-width span at a single position.
    pub fn point(line: u32, col: u32) -> Self {
        Self::new(line, col, line, col)
    }

    /// Union running from the start of `self` to the end of `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start_line: self.start_line,
            start_col: self.start_col,
            end_line: other.end_line,
            end_col: other.end_col,
        }
    }

    pub fn start(&self) -> (u32, u32) {
        (self.start_line, self.start_col)
    }

    pub fn end(&self) -> (u32, u32) {
        (self.end_line, self.end_col)
    }

    pub fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Span) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// True if `self` ends at or before the point where `other` starts.
    pub fn precedes(&self, other: &Span) -> bool {
        self.end() <= other.start()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Precomputed line-start offsets for O(log n) byte-offset → line:col lookup.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. line_starts[0] is always 0.
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map by scanning source for newlines. O(n).
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        LineMap { line_starts }
    }

    /// Convert byte offset to (line, col), both 1-based. O(log n).
    ///
    /// Columns count characters, not bytes, so the source is needed to
    /// walk the line prefix.
    pub fn offset_to_line_col(&self, source: &str, offset: usize) -> (u32, u32) {
        let target = offset as u32;
        let line_idx = match self.line_starts.binary_search(&target) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx] as usize;
        let prefix = source.get(line_start..offset).unwrap_or("");
        let col = prefix.chars().count() as u32 + 1;
        ((line_idx + 1) as u32, col)
    }

    /// Span covering the byte range `start..end`.
    pub fn span(&self, source: &str, start: usize, end: usize) -> Span {
        let (start_line, start_col) = self.offset_to_line_col(source, start);
        let (end_line, end_col) = self.offset_to_line_col(source, end);
        Span::new(start_line, start_col, end_line, end_col)
    }

    /// Get the source text of a 1-based line number. O(1).
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| (s as usize).saturating_sub(1)) // exclude the \n
            .unwrap_or(source.len());
        source.get(start..end)
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.offset_to_line_col("", 0), (1, 1));
        assert_eq!(lm.line_count(), 1);
    }

    #[test]
    fn multi_line() {
        let src = "abc\ndef\nghi";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 3);
        assert_eq!(lm.offset_to_line_col(src, 0), (1, 1)); // 'a'
        assert_eq!(lm.offset_to_line_col(src, 2), (1, 3)); // 'c'
        assert_eq!(lm.offset_to_line_col(src, 4), (2, 1)); // 'd'
        assert_eq!(lm.offset_to_line_col(src, 8), (3, 1)); // 'g'

        assert_eq!(lm.line_text(src, 1), Some("abc"));
        assert_eq!(lm.line_text(src, 3), Some("ghi"));
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn columns_count_chars() {
        let src = "\"é\" x";
        let lm = LineMap::new(src);
        // 'x' is the fifth character but the sixth byte
        assert_eq!(lm.offset_to_line_col(src, 5), (1, 5));
    }

    #[test]
    fn span_union_and_order() {
        let a = Span::new(1, 1, 1, 4);
        let b = Span::new(2, 3, 2, 4);
        let u = a.to(b);
        assert_eq!(u, Span::new(1, 1, 2, 4));
        assert!(u.contains(&a));
        assert!(u.contains(&b));
        assert!(a.precedes(&b));
        assert!(!b.precedes(&a));
        assert!(a < b);
    }

    #[test]
    fn point_is_empty() {
        assert!(Span::point(3, 7).is_empty());
        assert!(!Span::new(3, 7, 3, 8).is_empty());
    }
}
