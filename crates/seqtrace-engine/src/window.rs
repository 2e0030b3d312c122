use seqtrace_types::SeqNo;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// How many sequence numbers a window shows by default.
pub const DEFAULT_VISIBLE_COUNT: usize = 200;

/// Contiguous slice of the sorted sequence domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: usize,
    pub count: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            start: 0,
            count: DEFAULT_VISIBLE_COUNT,
        }
    }
}

impl Window {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// Window covering any domain entirely.
    pub fn full() -> Self {
        Self {
            start: 0,
            count: usize::MAX,
        }
    }

    /// Index range within a domain of `len` items.
    ///
    /// The start is pulled back so the window never runs past the end.
    pub fn range(&self, len: usize) -> Range<usize> {
        let count = self.count.min(len);
        let start = self.start.min(len - count);
        start..start + count
    }

    pub fn slice<'a>(&self, domain: &'a [SeqNo]) -> &'a [SeqNo] {
        &domain[self.range(domain.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_inside_domain() {
        assert_eq!(Window::new(10, 5).range(100), 10..15);
    }

    #[test]
    fn test_range_clamped_at_end() {
        assert_eq!(Window::new(98, 5).range(100), 95..100);
        assert_eq!(Window::new(500, 200).range(100), 0..100);
    }

    #[test]
    fn test_empty_domain() {
        assert_eq!(Window::default().range(0), 0..0);
        assert!(Window::default().slice(&[]).is_empty());
    }

    #[test]
    fn test_full_window() {
        let domain = [1, 2, 3];
        assert_eq!(Window::full().slice(&domain), &domain);
    }

    #[test]
    fn test_zero_count() {
        assert_eq!(Window::new(2, 0).range(10), 2..2);
    }
}
