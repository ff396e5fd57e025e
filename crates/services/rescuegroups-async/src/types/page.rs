//! One fetched slice of a larger result set

use serde::{Deserialize, Serialize};

/// Parsed result page
///
/// Built fresh per call and never mutated afterwards. Callers that
/// accumulate results concatenate `data` across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records in upstream order
    pub data: Vec<T>,
    /// Total matching rows reported upstream (0 when not reported)
    pub total: u64,
    /// Offset that produced this page
    pub offset: u32,
    /// Limit that produced this page
    pub limit: u32,
    /// Whether rows remain past this page
    pub has_more: bool,
    /// Non-fatal upstream warnings, only for `warning` envelopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// `offset + returned < total`
#[must_use]
pub fn has_more(offset: u32, returned: usize, total: u64) -> bool {
    u64::from(offset).saturating_add(returned as u64) < total
}

impl<T> Page<T> {
    /// Assembles a page, deriving `has_more` from the arithmetic
    ///
    /// Rows past `limit` do not count towards `has_more`.
    #[must_use]
    pub fn new(
        data: Vec<T>,
        total: u64,
        offset: u32,
        limit: u32,
        warnings: Option<Vec<String>>,
    ) -> Self {
        let counted = data.len().min(usize::try_from(limit).unwrap_or(usize::MAX));
        Self {
            has_more: has_more(offset, counted, total),
            data,
            total,
            offset,
            limit,
            warnings,
        }
    }

    /// Offset to request for the following page, if any
    #[must_use]
    pub fn next_offset(&self) -> Option<u32> {
        if !self.has_more {
            return None;
        }
        u32::try_from(self.data.len())
            .ok()
            .and_then(|len| self.offset.checked_add(len))
    }

    /// First record, for single-record lookups
    #[must_use]
    pub fn into_first(self) -> Option<T> {
        self.data.into_iter().next()
    }

    /// Number of records on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundary_is_exclusive() {
        assert!(!has_more(75, 25, 100));
        assert!(has_more(74, 25, 100));
        assert!(!has_more(0, 0, 0));
    }

    #[test]
    fn next_offset_follows_returned_count() {
        let page = Page::new(vec![1, 2, 3], 10, 4, 5, None);
        assert!(page.has_more);
        assert_eq!(page.next_offset(), Some(7));

        let last = Page::new(vec![1, 2, 3], 10, 7, 5, None);
        assert!(!last.has_more);
        assert_eq!(last.next_offset(), None);
    }

    #[test]
    fn rows_past_limit_do_not_end_paging() {
        let page = Page::new(vec![0; 30], 40, 0, 20, None);
        assert!(page.has_more);
        assert_eq!(page.len(), 30);
    }

    #[test]
    fn into_first_takes_head() {
        assert_eq!(Page::new(vec!["a", "b"], 2, 0, 2, None).into_first(), Some("a"));
        assert_eq!(Page::<u8>::new(vec![], 0, 0, 1, None).into_first(), None);
    }

    proptest! {
        #[test]
        fn prop_has_more_matches_arithmetic(
            offset in 0u32..10_000,
            limit in 1u32..200,
            returned in 0usize..400,
            total in 0u64..20_000,
        ) {
            let page = Page::new(vec![(); returned], total, offset, limit, None);
            prop_assert_eq!(
                page.has_more,
                u64::from(offset) + u64::from(limit.min(returned as u32)) < total
            );
        }

        #[test]
        fn prop_exhausted_page_has_no_more(offset in 0u32..10_000, returned in 0usize..200) {
            let total = u64::from(offset) + returned as u64;
            let page = Page::new(vec![(); returned], total, offset, 200, None);
            prop_assert!(!page.has_more);
            prop_assert_eq!(page.next_offset(), None);
        }
    }
}
