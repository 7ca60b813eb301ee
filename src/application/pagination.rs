//! Fixed-size page arithmetic for the post listing.

/// Number of post cards per listing page.
pub const POSTS_PER_PAGE: usize = 39;

/// One page worth of items plus the page count for the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> PageWindow<T> {
    /// Slice the `page`-th window (1-based) out of an ordered collection.
    ///
    /// Pages past the end of the collection are not rejected; the slice
    /// simply yields an empty tail and navigation links stay well-formed.
    pub fn slice(items: Vec<T>, page: usize) -> Self {
        let total_pages = total_pages(items.len());
        let page = page.max(1);

        let start = (page - 1).saturating_mul(POSTS_PER_PAGE).min(items.len());
        let end = start.saturating_add(POSTS_PER_PAGE).min(items.len());
        let items = items.into_iter().take(end).skip(start).collect();

        Self {
            items,
            page,
            total_pages,
        }
    }
}

/// `ceil(total / 39)`, floored at one page so that an empty collection
/// still has a valid page for navigation links to target.
pub fn total_pages(total: usize) -> usize {
    total.div_ceil(POSTS_PER_PAGE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(39), 1);
        assert_eq!(total_pages(40), 2);
        assert_eq!(total_pages(78), 2);
        assert_eq!(total_pages(79), 3);
    }

    #[test]
    fn empty_collection_still_reports_one_page() {
        assert_eq!(total_pages(0), 1);
        let window = PageWindow::slice(Vec::<usize>::new(), 1);
        assert!(window.items.is_empty());
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn second_page_of_a_hundred_posts() {
        let window = PageWindow::slice(numbered(100), 2);
        assert_eq!(window.items.len(), POSTS_PER_PAGE);
        assert_eq!(window.items.first(), Some(&40));
        assert_eq!(window.items.last(), Some(&78));
        assert_eq!(window.total_pages, 3);
    }

    #[test]
    fn final_partial_page_holds_the_remainder() {
        let window = PageWindow::slice(numbered(100), 3);
        assert_eq!(window.items.len(), 100 - 2 * POSTS_PER_PAGE);
        assert_eq!(window.items.first(), Some(&79));
        assert_eq!(window.items.last(), Some(&100));
    }

    #[test]
    fn adjacent_pages_are_disjoint_and_contiguous() {
        let n = 97;
        let mut seen = Vec::new();
        for page in 1..=total_pages(n) {
            let window = PageWindow::slice(numbered(n), page);
            let expected_len = POSTS_PER_PAGE.min(n - (page - 1) * POSTS_PER_PAGE);
            assert_eq!(window.items.len(), expected_len);
            seen.extend(window.items);
        }
        assert_eq!(seen, numbered(n));
    }

    #[test]
    fn pages_past_the_end_yield_an_empty_tail() {
        let window = PageWindow::slice(numbered(10), 50);
        assert!(window.items.is_empty());
        assert_eq!(window.page, 50);
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn page_zero_is_clamped_to_one() {
        let window = PageWindow::slice(numbered(5), 0);
        assert_eq!(window.page, 1);
        assert_eq!(window.items.len(), 5);
    }
}
