//! Content records as the WordPress REST API serves them.
//!
//! These shapes are owned by the upstream API, not by vetrina; only the
//! fields the listing pages consume are deserialized.

use serde::Deserialize;
use time::PrimitiveDateTime;

/// WordPress wraps HTML-bearing fields in a `{ "rendered": "..." }` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

time::serde::format_description!(
    wp_datetime,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

/// A published post. `author`, `tags`, and `categories` are numeric
/// references into the corresponding term collections.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: u64,
    pub slug: String,
    pub link: String,
    #[serde(with = "wp_datetime")]
    pub date: PrimitiveDateTime,
    pub title: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    pub author: u64,
    #[serde(default)]
    pub tags: Vec<u64>,
    #[serde(default)]
    pub categories: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_deserializes_from_wp_payload() {
        let raw = r#"{
            "id": 42,
            "slug": "hello-world",
            "link": "https://wp.example.com/hello-world",
            "date": "2026-03-14T09:26:53",
            "title": { "rendered": "Hello World" },
            "excerpt": { "rendered": "<p>First!</p>" },
            "author": 1,
            "tags": [3, 5],
            "categories": [2]
        }"#;

        let post: Post = serde_json::from_str(raw).expect("valid post payload");
        assert_eq!(post.id, 42);
        assert_eq!(post.title.rendered, "Hello World");
        assert_eq!(post.date.year(), 2026);
        assert_eq!(post.tags, vec![3, 5]);
    }

    #[test]
    fn missing_optional_collections_default_to_empty() {
        let raw = r#"{
            "id": 7,
            "slug": "bare",
            "link": "https://wp.example.com/bare",
            "date": "2025-01-01T00:00:00",
            "title": { "rendered": "Bare" },
            "author": 1
        }"#;

        let post: Post = serde_json::from_str(raw).expect("valid post payload");
        assert!(post.tags.is_empty());
        assert!(post.categories.is_empty());
        assert!(post.excerpt.rendered.is_empty());
    }
}
