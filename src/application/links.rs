//! Listing URL construction for pagination controls.
//!
//! Boundary links point at the current page rather than disappearing;
//! disabling them is a presentation concern handled by the templates.

use url::form_urlencoded;

use crate::domain::filter::FilterSelection;

/// Prev/current/next listing URLs for one rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLinks {
    pub prev_href: String,
    pub current_href: String,
    pub next_href: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// `/posts?page=<n>&category=<c>&author=<a>&tag=<t>`, unset filters omitted.
pub fn listing_url(selection: &FilterSelection) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &selection.page.to_string());
    if let Some(category) = selection.category.as_deref() {
        query.append_pair("category", category);
    }
    if let Some(author) = selection.author.as_deref() {
        query.append_pair("author", author);
    }
    if let Some(tag) = selection.tag.as_deref() {
        query.append_pair("tag", tag);
    }
    format!("/posts?{}", query.finish())
}

pub fn build_listing_links(selection: &FilterSelection, total_pages: usize) -> ListingLinks {
    let page = selection.page.max(1);
    let prev = page.saturating_sub(1).max(1);
    let next = page.saturating_add(1).min(total_pages.max(1));

    // The current-page link carries only the page number, matching the
    // rendered output this front end replaces.
    let current = FilterSelection {
        page,
        ..FilterSelection::default()
    };

    ListingLinks {
        prev_href: listing_url(&selection.with_page(prev)),
        current_href: listing_url(&current),
        next_href: listing_url(&selection.with_page(next)),
        prev_disabled: page == 1,
        next_disabled: page >= total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(
        author: Option<&str>,
        tag: Option<&str>,
        category: Option<&str>,
        page: usize,
    ) -> FilterSelection {
        FilterSelection {
            author: author.map(String::from),
            tag: tag.map(String::from),
            category: category.map(String::from),
            page,
        }
    }

    #[test]
    fn absent_filters_are_omitted_from_the_query() {
        let url = listing_url(&selection(None, None, None, 2));
        assert_eq!(url, "/posts?page=2");
    }

    #[test]
    fn active_filters_are_echoed_in_category_author_tag_order() {
        let url = listing_url(&selection(Some("3"), Some("9"), Some("7"), 4));
        assert_eq!(url, "/posts?page=4&category=7&author=3&tag=9");
    }

    #[test]
    fn prev_never_drops_below_page_one() {
        let links = build_listing_links(&selection(None, None, None, 1), 5);
        assert_eq!(links.prev_href, "/posts?page=1");
        assert!(links.prev_disabled);
    }

    #[test]
    fn next_never_exceeds_total_pages() {
        let links = build_listing_links(&selection(None, None, None, 5), 5);
        assert_eq!(links.next_href, "/posts?page=5");
        assert!(links.next_disabled);
    }

    #[test]
    fn links_preserve_the_active_filters() {
        let links = build_listing_links(&selection(Some("a1"), None, Some("c2"), 2), 3);
        assert_eq!(links.prev_href, "/posts?page=1&category=c2&author=a1");
        assert_eq!(links.next_href, "/posts?page=3&category=c2&author=a1");
        assert!(!links.prev_disabled);
        assert!(!links.next_disabled);
    }

    #[test]
    fn current_link_carries_only_the_page_number() {
        let links = build_listing_links(&selection(Some("a1"), Some("t1"), Some("c1"), 2), 3);
        assert_eq!(links.current_href, "/posts?page=2");
    }

    #[test]
    fn empty_collection_links_both_point_to_page_one() {
        let links = build_listing_links(&selection(None, None, None, 1), 1);
        assert_eq!(links.prev_href, "/posts?page=1");
        assert_eq!(links.next_href, "/posts?page=1");
    }

    #[test]
    fn filter_values_are_percent_encoded() {
        let url = listing_url(&selection(None, Some("rust lang"), None, 1));
        assert_eq!(url, "/posts?page=1&tag=rust+lang");
    }
}
