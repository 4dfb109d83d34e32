//! Paginated collection value type
//!
//! A [`PaginatedCollection`] is a read-only snapshot of one page: the items,
//! the request window that produced them (offset, limit), and whether more
//! data exists beyond the trailing edge. It is constructed fresh on every
//! `get` and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// An ordered page of items plus the window it answers.
///
/// `offset` and `limit` describe the *request window*, not the number of
/// items returned: a source at the end of its data legitimately returns
/// fewer than `limit` items. `items.len() <= limit` always holds for pages
/// produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedCollection<T> {
    items: Vec<T>,
    offset: usize,
    limit: usize,
    has_more: bool,
}

impl<T> PaginatedCollection<T> {
    /// Builds a page from its parts. Construction never fails; callers are
    /// responsible for the semantic fit of `offset`/`limit` to `items`.
    pub fn new(items: Vec<T>, offset: usize, limit: usize, has_more: bool) -> Self {
        Self {
            items,
            offset,
            limit,
            has_more,
        }
    }

    /// An empty page for the given window, flagged as exhausted.
    pub fn empty(offset: usize, limit: usize) -> Self {
        Self::new(Vec::new(), offset, limit, false)
    }

    /// The items in retrieval order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The requested offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The requested limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether items exist beyond this page's trailing edge.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of items actually returned.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the page, yielding the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_return_construction_values() {
        let page = PaginatedCollection::new(vec!["a", "b", "c"], 10, 5, true);

        assert_eq!(page.items(), &["a", "b", "c"]);
        assert_eq!(page.offset(), 10);
        assert_eq!(page.limit(), 5);
        assert!(page.has_more());
        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
    }

    #[test]
    fn test_empty_page() {
        let page = PaginatedCollection::<String>::empty(0, 20);

        assert!(page.is_empty());
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 20);
        assert!(!page.has_more());
    }

    #[test]
    fn test_into_items_preserves_order() {
        let page = PaginatedCollection::new(vec![3, 1, 2], 0, 3, false);
        assert_eq!(page.into_items(), vec![3, 1, 2]);
    }

    #[test]
    fn test_fewer_items_than_limit_is_valid() {
        let page = PaginatedCollection::new(vec![1, 2], 0, 10, false);
        assert!(page.len() <= page.limit());
    }
}
