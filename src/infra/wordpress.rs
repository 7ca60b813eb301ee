//! reqwest-backed `ContentFetcher` against the WordPress REST API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::application::fetch::{ContentFetcher, FetchError, PostFilters};
use crate::config::WordPressSettings;
use crate::domain::content::{Author, Category, Post, Tag};
use crate::infra::error::InfraError;

const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

pub struct WordPressClient {
    http: reqwest::Client,
    base: Url,
    page_size: u32,
}

impl WordPressClient {
    pub fn new(settings: &WordPressSettings) -> Result<Self, InfraError> {
        let base = settings
            .base_url
            .clone()
            .ok_or_else(|| InfraError::configuration("wordpress.url is not configured"))?;
        let base = ensure_trailing_slash(base);

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("vetrina/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| InfraError::upstream(err.to_string()))?;

        Ok(Self {
            http,
            base,
            page_size: settings.page_size.get(),
        })
    }

    /// Drain a whole upstream collection. WordPress caps `per_page` at
    /// 100, so larger collections are walked page by page using the
    /// `X-WP-TotalPages` response header.
    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        filters: &[(&'static str, String)],
    ) -> Result<Vec<T>, FetchError> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let url = collection_url(&self.base, resource, self.page_size, page, filters)?;

            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|err| transport_error(resource, err))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    resource,
                    status: status.as_u16(),
                });
            }

            let total_pages = response
                .headers()
                .get(TOTAL_PAGES_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u32>().ok());

            let batch: Vec<T> = response.json().await.map_err(|err| FetchError::Decode {
                resource,
                message: err.to_string(),
            })?;
            let batch_len = batch.len();
            items.extend(batch);

            match total_pages {
                Some(total) if page < total => page += 1,
                Some(_) => break,
                // Header missing: keep walking while pages come back full.
                None if batch_len == self.page_size as usize => page += 1,
                None => break,
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl ContentFetcher for WordPressClient {
    async fn list_posts(&self, filters: &PostFilters) -> Result<Vec<Post>, FetchError> {
        self.fetch_collection("posts", &post_filter_pairs(filters))
            .await
    }

    async fn list_authors(&self) -> Result<Vec<Author>, FetchError> {
        self.fetch_collection("users", &[]).await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, FetchError> {
        self.fetch_collection("tags", &[]).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.fetch_collection("categories", &[]).await
    }

    async fn health_check(&self) -> Result<(), FetchError> {
        let url = collection_url(&self.base, "posts", 1, 1, &[])?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error("posts", err))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Status {
                resource: "posts",
                status: status.as_u16(),
            })
        }
    }
}

/// WordPress query parameter names differ from the inbound ones: a single
/// author id goes into `author`, term ids into the plural `tags` and
/// `categories`. Values are forwarded verbatim.
fn post_filter_pairs(filters: &PostFilters) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(author) = filters.author.as_ref() {
        pairs.push(("author", author.clone()));
    }
    if let Some(tag) = filters.tag.as_ref() {
        pairs.push(("tags", tag.clone()));
    }
    if let Some(category) = filters.category.as_ref() {
        pairs.push(("categories", category.clone()));
    }
    pairs
}

fn collection_url(
    base: &Url,
    resource: &'static str,
    per_page: u32,
    page: u32,
    filters: &[(&'static str, String)],
) -> Result<Url, FetchError> {
    let mut url = base
        .join(&format!("wp-json/wp/v2/{resource}"))
        .map_err(|err| FetchError::Decode {
            resource,
            message: format!("failed to build endpoint url: {err}"),
        })?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("per_page", &per_page.to_string());
        query.append_pair("page", &page.to_string());
        for (key, value) in filters {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}

fn transport_error(resource: &'static str, err: reqwest::Error) -> FetchError {
    if err.is_connect() || err.is_timeout() {
        FetchError::Unreachable(err.to_string())
    } else {
        FetchError::Decode {
            resource,
            message: err.to_string(),
        }
    }
}

/// `Url::join` drops the last path segment unless the base ends in `/`,
/// which matters for subdirectory WordPress installs.
fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_url_carries_paging_parameters() {
        let base = Url::parse("https://wp.example.com/").expect("base url");
        let url = collection_url(&base, "posts", 100, 2, &[]).expect("endpoint url");
        assert_eq!(
            url.as_str(),
            "https://wp.example.com/wp-json/wp/v2/posts?per_page=100&page=2"
        );
    }

    #[test]
    fn post_filters_map_to_wordpress_parameter_names() {
        let filters = PostFilters {
            author: Some("3".into()),
            tag: Some("9".into()),
            category: Some("7".into()),
        };
        let base = Url::parse("https://wp.example.com/").expect("base url");
        let url = collection_url(&base, "posts", 100, 1, &post_filter_pairs(&filters))
            .expect("endpoint url");
        assert_eq!(
            url.as_str(),
            "https://wp.example.com/wp-json/wp/v2/posts?per_page=100&page=1&author=3&tags=9&categories=7"
        );
    }

    #[test]
    fn subdirectory_installs_keep_their_path_prefix() {
        let base = ensure_trailing_slash(Url::parse("https://example.com/blog").expect("base url"));
        let url = collection_url(&base, "tags", 100, 1, &[]).expect("endpoint url");
        assert_eq!(
            url.as_str(),
            "https://example.com/blog/wp-json/wp/v2/tags?per_page=100&page=1"
        );
    }
}
