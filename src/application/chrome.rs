//! Static layout chrome: brand, navigation menus, footer.
//!
//! The two menus are fixed link maps; nothing here is fetched or stored.

use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};

const BRAND_TITLE: &str = "vetrina";
const META_TITLE: &str = "Posts";
const META_DESCRIPTION: &str = "Browse posts by author, tag, and category.";

/// Primary site navigation: home, about, blog.
pub fn main_menu() -> Vec<NavigationLinkView> {
    vec![
        internal_link("Home", "/"),
        external_link("About", "https://macai.studio"),
        internal_link("Blog", "/posts"),
    ]
}

/// Content navigation: the taxonomy index pages.
pub fn content_menu() -> Vec<NavigationLinkView> {
    vec![
        internal_link("Categories", "/posts/categories"),
        internal_link("Tags", "/posts/tags"),
        internal_link("Authors", "/posts/authors"),
    ]
}

pub fn layout_chrome() -> LayoutChrome {
    LayoutChrome {
        brand: BrandView {
            title: BRAND_TITLE.to_string(),
            href: "/".to_string(),
        },
        navigation: NavigationView {
            entries: main_menu(),
        },
        content_menu: NavigationView {
            entries: content_menu(),
        },
        footer: FooterView {
            copy: format!("© {BRAND_TITLE}"),
        },
        meta: PageMetaView {
            title: META_TITLE.to_string(),
            description: META_DESCRIPTION.to_string(),
        },
    }
}

fn internal_link(label: &str, href: &str) -> NavigationLinkView {
    NavigationLinkView {
        label: label.to_string(),
        href: href.to_string(),
        target: None,
        rel: None,
    }
}

fn external_link(label: &str, href: &str) -> NavigationLinkView {
    NavigationLinkView {
        label: label.to_string(),
        href: href.to_string(),
        target: Some("_blank".to_string()),
        rel: Some("noopener noreferrer".to_string()),
    }
}
