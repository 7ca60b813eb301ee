//! Listing composition: fetch, paginate, and shape posts for rendering.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::application::fetch::{ContentFetcher, FetchError, PostFilters};
use crate::application::links::{build_listing_links, listing_url};
use crate::application::pagination::PageWindow;
use crate::domain::content::{Author, Category, Post, Tag};
use crate::domain::filter::FilterSelection;
use crate::presentation::views::{
    FilterGroupView, FilterOptionView, ListingContext, PaginationView, PostCardView,
    TaxonomyContext, TaxonomyEntryView,
};

const HUMAN_DATE: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:long] [day padding:none], [year]");
const ISO_DATE: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Clone)]
pub struct ListingService {
    fetcher: Arc<dyn ContentFetcher>,
}

impl ListingService {
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { fetcher }
    }

    /// Assemble one listing page: the four upstream lookups run
    /// concurrently, the filtered post list is paginated in memory, and
    /// the full term collections feed the filter controls.
    pub async fn listing_context(
        &self,
        selection: &FilterSelection,
    ) -> Result<ListingContext, ListingError> {
        let filters = PostFilters::from(selection);
        let (posts, authors, tags, categories) = tokio::try_join!(
            self.fetcher.list_posts(&filters),
            self.fetcher.list_authors(),
            self.fetcher.list_tags(),
            self.fetcher.list_categories(),
        )?;

        let window = PageWindow::slice(posts, selection.page);
        let links = build_listing_links(selection, window.total_pages);

        let authors_by_id: HashMap<u64, &Author> =
            authors.iter().map(|author| (author.id, author)).collect();
        let cards: Vec<PostCardView> = window
            .items
            .iter()
            .map(|post| post_to_card(post, &authors_by_id))
            .collect();

        let filter_groups = vec![
            author_filter_group(&authors, selection.author.as_deref()),
            tag_filter_group(&tags, selection.tag.as_deref()),
            category_filter_group(&categories, selection.category.as_deref()),
        ];

        let post_count = cards.len();
        Ok(ListingContext {
            posts: cards,
            post_count,
            has_results: post_count > 0,
            filters: filter_groups,
            pagination: PaginationView {
                page: window.page,
                total_pages: window.total_pages,
                prev_href: links.prev_href,
                current_href: links.current_href,
                next_href: links.next_href,
                prev_disabled: links.prev_disabled,
                next_disabled: links.next_disabled,
            },
        })
    }

    pub async fn authors_index(&self) -> Result<TaxonomyContext, ListingError> {
        let authors = self.fetcher.list_authors().await?;
        let entries = authors
            .iter()
            .map(|author| TaxonomyEntryView {
                name: author.name.clone(),
                href: filtered_listing_url(|selection| {
                    selection.author = Some(author.id.to_string());
                }),
                count: None,
            })
            .collect();

        Ok(TaxonomyContext {
            title: "Authors".to_string(),
            entries,
        })
    }

    pub async fn tags_index(&self) -> Result<TaxonomyContext, ListingError> {
        let tags = self.fetcher.list_tags().await?;
        let entries = tags
            .iter()
            .map(|tag| TaxonomyEntryView {
                name: tag.name.clone(),
                href: filtered_listing_url(|selection| {
                    selection.tag = Some(tag.id.to_string());
                }),
                count: Some(tag.count),
            })
            .collect();

        Ok(TaxonomyContext {
            title: "Tags".to_string(),
            entries,
        })
    }

    pub async fn categories_index(&self) -> Result<TaxonomyContext, ListingError> {
        let categories = self.fetcher.list_categories().await?;
        let entries = categories
            .iter()
            .map(|category| TaxonomyEntryView {
                name: category.name.clone(),
                href: filtered_listing_url(|selection| {
                    selection.category = Some(category.id.to_string());
                }),
                count: Some(category.count),
            })
            .collect();

        Ok(TaxonomyContext {
            title: "Categories".to_string(),
            entries,
        })
    }
}

fn filtered_listing_url(apply: impl FnOnce(&mut FilterSelection)) -> String {
    let mut selection = FilterSelection {
        page: 1,
        ..FilterSelection::default()
    };
    apply(&mut selection);
    listing_url(&selection)
}

fn post_to_card(post: &Post, authors_by_id: &HashMap<u64, &Author>) -> PostCardView {
    let published = post
        .date
        .format(HUMAN_DATE)
        .unwrap_or_else(|_| post.date.to_string());
    let iso_date = post
        .date
        .format(ISO_DATE)
        .unwrap_or_else(|_| post.date.to_string());

    PostCardView {
        title: sanitize_title(&post.title.rendered),
        excerpt_html: sanitize_excerpt(&post.excerpt.rendered),
        permalink: post.link.clone(),
        author: authors_by_id
            .get(&post.author)
            .map(|author| author.name.clone()),
        published,
        iso_date,
    }
}

fn author_filter_group(authors: &[Author], active: Option<&str>) -> FilterGroupView {
    FilterGroupView {
        label: "Author".to_string(),
        param: "author".to_string(),
        options: authors
            .iter()
            .map(|author| filter_option(&author.name, author.id, active))
            .collect(),
    }
}

fn tag_filter_group(tags: &[Tag], active: Option<&str>) -> FilterGroupView {
    FilterGroupView {
        label: "Tag".to_string(),
        param: "tag".to_string(),
        options: tags
            .iter()
            .map(|tag| filter_option(&tag.name, tag.id, active))
            .collect(),
    }
}

fn category_filter_group(categories: &[Category], active: Option<&str>) -> FilterGroupView {
    FilterGroupView {
        label: "Category".to_string(),
        param: "category".to_string(),
        options: categories
            .iter()
            .map(|category| filter_option(&category.name, category.id, active))
            .collect(),
    }
}

fn filter_option(label: &str, id: u64, active: Option<&str>) -> FilterOptionView {
    let value = id.to_string();
    FilterOptionView {
        is_active: active == Some(value.as_str()),
        label: label.to_string(),
        value,
    }
}

/// Upstream titles may carry markup; strip it down to encoded text.
fn sanitize_title(html: &str) -> String {
    ammonia::Builder::empty().clean(html).to_string()
}

/// Excerpts keep a small inline allowlist; everything else the upstream
/// embedded (scripts, styles, images) is removed.
fn sanitize_excerpt(html: &str) -> String {
    ammonia::Builder::default()
        .tags(HashSet::from(["p", "em", "strong", "a", "code", "br"]))
        .clean(html)
        .to_string()
}
