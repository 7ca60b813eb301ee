use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::{ErrorReport, HttpError};

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
    pub target: Option<String>,
    pub rel: Option<String>,
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub content_menu: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub content_menu: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            content_menu: chrome.content_menu,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

/// One card in the listing grid. `excerpt_html` is already sanitized.
#[derive(Clone)]
pub struct PostCardView {
    pub title: String,
    pub excerpt_html: String,
    pub permalink: String,
    pub author: Option<String>,
    pub published: String,
    pub iso_date: String,
}

#[derive(Clone)]
pub struct FilterOptionView {
    pub label: String,
    pub value: String,
    pub is_active: bool,
}

/// One `<select>` in the filter controls (`param` is the query name).
#[derive(Clone)]
pub struct FilterGroupView {
    pub label: String,
    pub param: String,
    pub options: Vec<FilterOptionView>,
}

#[derive(Clone)]
pub struct PaginationView {
    pub page: usize,
    pub total_pages: usize,
    pub prev_href: String,
    pub current_href: String,
    pub next_href: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

pub struct ListingContext {
    pub posts: Vec<PostCardView>,
    pub post_count: usize,
    pub has_results: bool,
    pub filters: Vec<FilterGroupView>,
    pub pagination: PaginationView,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<ListingContext>,
}

#[derive(Clone)]
pub struct TaxonomyEntryView {
    pub name: String,
    pub href: String,
    pub count: Option<u64>,
}

pub struct TaxonomyContext {
    pub title: String,
    pub entries: Vec<TaxonomyEntryView>,
}

#[derive(Template)]
#[template(path = "taxonomy.html")]
pub struct TaxonomyTemplate {
    pub view: LayoutContext<TaxonomyContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist. Try returning to the posts listing."
                .to_string(),
            primary_action: Some(ErrorAction::posts()),
        }
    }

    pub fn content_unavailable() -> Self {
        Self {
            title: "Content Unavailable".to_string(),
            message: "The content service could not be reached. Please try again shortly."
                .to_string(),
            primary_action: Some(ErrorAction::posts()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn posts() -> Self {
        Self {
            href: "/posts".to_string(),
            label: "Back to posts".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
