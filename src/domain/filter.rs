//! Transient filter selection derived from request parameters.

/// At most one selected author, tag, and category, plus a 1-based page
/// number. Rebuilt from the query string on every request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub author: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
    pub page: usize,
}

impl FilterSelection {
    pub fn from_params(
        author: Option<String>,
        tag: Option<String>,
        category: Option<String>,
        page: Option<&str>,
    ) -> Self {
        Self {
            author: normalize(author),
            tag: normalize(tag),
            category: normalize(category),
            page: parse_page(page),
        }
    }

    pub fn has_filters(&self) -> bool {
        self.author.is_some() || self.tag.is_some() || self.category.is_some()
    }

    /// The same selection pointed at a different page.
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Invalid, missing, or non-positive page parameters fall back to page 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
