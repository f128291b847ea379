//! Pagination with best-effort normalization.

use serde::{Deserialize, Serialize};

/// A one-based page number, normalized on construction.
///
/// Pagination is best-effort rather than strict: any requested page below 1
/// is coerced to 1 instead of rejected, so a sloppy client still gets the
/// first page back. Page numbers are never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page(i64);

impl Page {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Normalize a requested page number, coercing values below 1 to 1.
    #[must_use]
    pub const fn normalize(requested: i64) -> Self {
        if requested < 1 { Self(1) } else { Self(requested) }
    }

    /// The one-based page number.
    #[must_use]
    pub const fn number(self) -> i64 {
        self.0
    }

    /// Zero-based row offset for a given page size.
    #[must_use]
    pub const fn offset(self, page_size: i64) -> i64 {
        (self.0 - 1) * page_size
    }
}

impl From<i64> for Page {
    fn from(requested: i64) -> Self {
        Self::normalize(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clamps_to_first_page() {
        assert_eq!(Page::normalize(0), Page::FIRST);
        assert_eq!(Page::normalize(-1), Page::FIRST);
        assert_eq!(Page::normalize(i64::MIN), Page::FIRST);
        assert_eq!(Page::normalize(1), Page::FIRST);
    }

    #[test]
    fn test_normalize_keeps_valid_pages() {
        assert_eq!(Page::normalize(2).number(), 2);
        assert_eq!(Page::normalize(100).number(), 100);
    }

    #[test]
    fn test_offset_is_zero_based() {
        assert_eq!(Page::normalize(1).offset(10), 0);
        assert_eq!(Page::normalize(2).offset(10), 10);
        assert_eq!(Page::normalize(5).offset(20), 80);
        // Clamped pages always land on the first row
        assert_eq!(Page::normalize(-3).offset(10), 0);
    }
}
