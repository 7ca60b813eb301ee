use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use time::macros::datetime;
use tower::ServiceExt;
use vetrina::application::fetch::{ContentFetcher, FetchError, PostFilters};
use vetrina::application::listing::ListingService;
use vetrina::domain::content::{Author, Category, Post, Rendered, Tag};
use vetrina::infra::http::{HttpState, build_router};

#[derive(Default)]
struct StaticContent {
    posts: Vec<Post>,
    authors: Vec<Author>,
    tags: Vec<Tag>,
    categories: Vec<Category>,
    unavailable: bool,
}

#[async_trait]
impl ContentFetcher for StaticContent {
    async fn list_posts(&self, filters: &PostFilters) -> Result<Vec<Post>, FetchError> {
        self.guard()?;
        let posts = self
            .posts
            .iter()
            .filter(|post| {
                filters
                    .author
                    .as_deref()
                    .is_none_or(|author| post.author.to_string() == author)
            })
            .cloned()
            .collect();
        Ok(posts)
    }

    async fn list_authors(&self) -> Result<Vec<Author>, FetchError> {
        self.guard()?;
        Ok(self.authors.clone())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, FetchError> {
        self.guard()?;
        Ok(self.tags.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.guard()?;
        Ok(self.categories.clone())
    }

    async fn health_check(&self) -> Result<(), FetchError> {
        self.guard()
    }
}

impl StaticContent {
    fn guard(&self) -> Result<(), FetchError> {
        if self.unavailable {
            Err(FetchError::Unreachable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

fn make_post(id: u64, author: u64) -> Post {
    Post {
        id,
        slug: format!("post-{id}"),
        link: format!("https://wp.example.com/post-{id}"),
        date: datetime!(2026-02-01 09:30:00),
        title: Rendered {
            rendered: format!("Post number {id}"),
        },
        excerpt: Rendered {
            rendered: format!("<p>Excerpt for post {id}</p>"),
        },
        author,
        tags: vec![9],
        categories: vec![7],
    }
}

fn app(content: StaticContent) -> axum::Router {
    let fetcher: Arc<dyn ContentFetcher> = Arc::new(content);
    build_router(HttpState {
        listing: ListingService::new(Arc::clone(&fetcher)),
        fetcher,
    })
}

async fn get_page(router: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn sample_terms(content: &mut StaticContent) {
    content.authors = vec![Author {
        id: 6,
        name: "Ada Lovelace".to_string(),
        slug: "ada".to_string(),
    }];
    content.tags = vec![Tag {
        id: 9,
        name: "rust".to_string(),
        slug: "rust".to_string(),
        count: 12,
    }];
    content.categories = vec![Category {
        id: 7,
        name: "Engineering".to_string(),
        slug: "engineering".to_string(),
        count: 4,
    }];
}

#[tokio::test]
async fn second_page_shows_the_second_window_of_posts() {
    let mut content = StaticContent {
        posts: (1..=100).map(|id| make_post(id, 6)).collect(),
        ..Default::default()
    };
    sample_terms(&mut content);

    let (status, body) = get_page(app(content), "/posts?page=2").await;

    assert_eq!(status, StatusCode::OK);
    // Page 2 covers posts 40 through 78 of 100.
    assert!(body.contains("Post number 40"));
    assert!(body.contains("Post number 78"));
    assert!(!body.contains("Post number 39<"));
    assert!(!body.contains("Post number 79"));
    assert!(body.contains(r#"href="/posts?page=1""#));
    assert!(body.contains(r#"href="/posts?page=3""#));
}

#[tokio::test]
async fn listing_renders_author_names_and_dates() {
    let mut content = StaticContent {
        posts: vec![make_post(1, 6)],
        ..Default::default()
    };
    sample_terms(&mut content);

    let (status, body) = get_page(app(content), "/posts").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains("February 1, 2026"));
    assert!(body.contains("Excerpt for post 1"));
}

#[tokio::test]
async fn filters_are_preserved_in_pagination_links() {
    let mut content = StaticContent {
        posts: (1..=50).map(|id| make_post(id, 6)).collect(),
        ..Default::default()
    };
    sample_terms(&mut content);

    let (status, body) = get_page(app(content), "/posts?author=6&page=2").await;

    assert_eq!(status, StatusCode::OK);
    // Query separators come out HTML-escaped inside href attributes.
    assert!(body.contains(r#"href="/posts?page=1&amp;author=6""#));
}

#[tokio::test]
async fn empty_result_shows_placeholder_and_keeps_filters() {
    let mut content = StaticContent::default();
    sample_terms(&mut content);

    let (status, body) = get_page(app(content), "/posts?author=99").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No Results Found"));
    // With no posts both neighbors resolve to page 1 of the same filter.
    assert!(body.contains(r#"class="prev disabled" href="/posts?page=1&amp;author=99""#));
    assert!(body.contains(r#"class="next disabled" href="/posts?page=1&amp;author=99""#));
}

#[tokio::test]
async fn non_numeric_page_falls_back_to_the_first_page() {
    let mut content = StaticContent {
        posts: (1..=50).map(|id| make_post(id, 6)).collect(),
        ..Default::default()
    };
    sample_terms(&mut content);

    let (status, body) = get_page(app(content), "/posts?page=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Post number 1<"));
    assert!(body.contains(r#"aria-current="page" href="/posts?page=1""#));
}

#[tokio::test]
async fn root_serves_the_listing() {
    let mut content = StaticContent {
        posts: vec![make_post(1, 6)],
        ..Default::default()
    };
    sample_terms(&mut content);

    let (status, body) = get_page(app(content), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Post number 1"));
}

#[tokio::test]
async fn unknown_route_renders_the_html_not_found_page() {
    let (status, body) = get_page(app(StaticContent::default()), "/no-such-page").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found"));
}

#[tokio::test]
async fn taxonomy_pages_link_into_the_filtered_listing() {
    let mut content = StaticContent::default();
    sample_terms(&mut content);
    let router = app(content);

    let (status, body) = get_page(router.clone(), "/posts/tags").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("rust"));
    assert!(body.contains(r#"href="/posts?page=1&amp;tag=9""#));
    assert!(body.contains("(12)"));

    let (status, body) = get_page(router.clone(), "/posts/authors").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/posts?page=1&amp;author=6""#));

    let (status, body) = get_page(router, "/posts/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/posts?page=1&amp;category=7""#));
}

#[tokio::test]
async fn unreachable_upstream_renders_the_error_page() {
    let content = StaticContent {
        unavailable: true,
        ..Default::default()
    };

    let (status, body) = get_page(app(content), "/posts").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Content Unavailable"));
}

#[tokio::test]
async fn health_endpoint_reflects_upstream_reachability() {
    let (status, _) = get_page(app(StaticContent::default()), "/_health/upstream").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let content = StaticContent {
        unavailable: true,
        ..Default::default()
    };
    let (status, _) = get_page(app(content), "/_health/upstream").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
