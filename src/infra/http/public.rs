use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::{
        chrome,
        error::{ErrorReport, fetch_error_status},
        fetch::ContentFetcher,
        listing::{ListingError, ListingService},
    },
    domain::filter::FilterSelection,
    presentation::views::{
        ErrorPageView, ErrorTemplate, IndexTemplate, LayoutContext, TaxonomyContext,
        TaxonomyTemplate, render_not_found_response, render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub listing: ListingService,
    pub fetcher: Arc<dyn ContentFetcher>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(posts_index))
        .route("/posts", get(posts_index))
        .route("/posts/authors", get(authors_index))
        .route("/posts/tags", get(tags_index))
        .route("/posts/categories", get(categories_index))
        .route("/_health/upstream", get(upstream_health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListingQuery {
    author: Option<String>,
    tag: Option<String>,
    category: Option<String>,
    page: Option<String>,
}

async fn posts_index(
    State(state): State<HttpState>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let selection = FilterSelection::from_params(
        query.author,
        query.tag,
        query.category,
        query.page.as_deref(),
    );

    match state.listing.listing_context(&selection).await {
        Ok(content) => {
            let view = LayoutContext::new(chrome::layout_chrome(), content);
            render_template_response(IndexTemplate { view }, StatusCode::OK)
        }
        Err(err) => listing_error_to_response(err),
    }
}

async fn authors_index(State(state): State<HttpState>) -> Response {
    taxonomy_response(state.listing.authors_index().await)
}

async fn tags_index(State(state): State<HttpState>) -> Response {
    taxonomy_response(state.listing.tags_index().await)
}

async fn categories_index(State(state): State<HttpState>) -> Response {
    taxonomy_response(state.listing.categories_index().await)
}

fn taxonomy_response(result: Result<TaxonomyContext, ListingError>) -> Response {
    match result {
        Ok(content) => {
            let view = LayoutContext::new(chrome::layout_chrome(), content);
            render_template_response(TaxonomyTemplate { view }, StatusCode::OK)
        }
        Err(err) => listing_error_to_response(err),
    }
}

async fn upstream_health(State(state): State<HttpState>) -> Response {
    match state.fetcher.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::public::upstream_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

async fn fallback() -> Response {
    render_not_found_response(chrome::layout_chrome())
}

/// Upstream fetch failures fail the whole page render; no partial
/// aggregation is attempted across the four lookups.
fn listing_error_to_response(err: ListingError) -> Response {
    let ListingError::Fetch(fetch_err) = err;
    let status = fetch_error_status(&fetch_err);

    let content = ErrorPageView::content_unavailable();
    let view = LayoutContext::new(chrome::layout_chrome(), content);
    let mut response = render_template_response(ErrorTemplate { view }, status);
    ErrorReport::from_error(
        "infra::http::public::listing_error_to_response",
        status,
        &fetch_err,
    )
    .attach(&mut response);
    response
}
