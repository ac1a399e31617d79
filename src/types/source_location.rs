//! Source location tracking for tokens and parse nodes
//!
//! Every token produced by the lexer carries a [`SourceLocation`] pointing
//! back into the input it was lexed from. Unit commands produced by macro
//! expansion (e.g. `\kHz` expanding to `\kilo\hertz`) carry the location of
//! the expansion body instead, which is why ranges across different inputs
//! collapse to `None`.

use alloc::sync::Arc;

use crate::types::ErrorLocationProvider;

/// A span `[start, end)` of byte offsets into a shared input string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// The complete input the offsets refer to.
    pub input: Arc<str>,
    /// Byte offset of the first character in the span.
    pub start: usize,
    /// Byte offset one past the last character in the span.
    pub end: usize,
}

impl SourceLocation {
    /// Creates a location sharing an existing input buffer.
    #[must_use]
    pub const fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Creates a location over a freshly allocated copy of `input`.
    #[must_use]
    pub fn from_str(input: &str, start: usize, end: usize) -> Self {
        Self::new(Arc::from(input), start, end)
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn input_arc(&self) -> Arc<str> {
        Arc::clone(&self.input)
    }

    /// Merges two locations into one spanning from the start of `first` to
    /// the end of `second`. Locations from different inputs cannot be merged.
    #[must_use]
    pub fn range(first: Option<Self>, second: Option<Self>) -> Option<Self> {
        match (first, second) {
            (Some(fp), None) => Some(fp),
            (None, Some(sp)) => Some(sp),
            (Some(fp), Some(sp)) => {
                if !Arc::ptr_eq(&fp.input, &sp.input) {
                    return None;
                }
                Some(Self {
                    input: fp.input,
                    start: fp.start,
                    end: sp.end,
                })
            }
            (None, None) => None,
        }
    }
}

/// Borrowing variant of [`SourceLocation::range`] for node locations.
pub trait SourceRangeRef {
    #[must_use]
    fn range_ref(self, second: Self) -> Option<SourceLocation>;
}

impl SourceRangeRef for Option<&SourceLocation> {
    fn range_ref(self, second: Self) -> Option<SourceLocation> {
        SourceLocation::range(self.cloned(), second.cloned())
    }
}

impl ErrorLocationProvider for SourceLocation {
    fn loc(&self) -> Option<&SourceLocation> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_creation() {
        let input: Arc<str> = Arc::from(r"\SI{5}{\kilo\hertz}");
        let loc = SourceLocation::new(Arc::clone(&input), 7, 12);

        assert_eq!(loc.start(), 7);
        assert_eq!(loc.end(), 12);
        assert_eq!(&loc.input()[loc.start()..loc.end()], r"\kilo");
    }

    #[test]
    fn test_range_merges_same_input_only() {
        let input: Arc<str> = Arc::from(r"\kilo\metre");
        let prefix = SourceLocation::new(Arc::clone(&input), 0, 5);
        let unit = SourceLocation::new(Arc::clone(&input), 5, 11);

        let merged = SourceLocation::range(Some(prefix.clone()), Some(unit)).unwrap();
        assert_eq!((merged.start(), merged.end()), (0, 11));

        let alone = SourceLocation::range(Some(prefix.clone()), None).unwrap();
        assert_eq!(alone.end(), 5);

        let expansion = SourceLocation::from_str(r"\kilo\metre", 5, 11);
        assert!(SourceLocation::range(Some(prefix), Some(expansion)).is_none());
    }

    #[test]
    fn test_range_ref_borrows() {
        let loc = SourceLocation::from_str("abc", 1, 2);
        let merged = Some(&loc).range_ref(None).unwrap();
        assert_eq!(merged, loc);
        assert!(None.range_ref(None).is_none());
    }
}
