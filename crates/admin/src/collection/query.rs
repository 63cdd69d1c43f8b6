//! List query parameters and the links derived from them.

use serde::Deserialize;
use true_harvest_core::Page;
use url::form_urlencoded;

/// Search text, selector and page of a list screen.
///
/// The selector arrives as `category` on the products screen and `status`
/// elsewhere; both map to the same field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default, alias = "category", alias = "status")]
    pub selector: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl ListQuery {
    /// Search text with surrounding whitespace removed.
    #[must_use]
    pub fn search(&self) -> &str {
        self.q.trim()
    }

    /// The selector value, or `None` when it selects everything.
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        self.selector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !is_all(s))
    }

    /// Requested page, 1 when absent or unparseable.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1)
    }
}

/// Whether a selector value means "no restriction".
fn is_all(selector: &str) -> bool {
    selector.eq_ignore_ascii_case("all") || selector.eq_ignore_ascii_case("all products")
}

/// Builds hrefs for pager and selector links on a list screen.
///
/// Selector links never carry `page`, so changing the filter always lands
/// on page 1. The search form has no page input for the same reason.
#[derive(Debug, Clone)]
pub struct ListLinks {
    base: String,
    selector_key: &'static str,
    search: String,
    selector: Option<String>,
    current_page: usize,
}

impl ListLinks {
    /// Links for the list at `base`, carrying the current search/selector.
    #[must_use]
    pub fn new(base: &str, selector_key: &'static str, query: &ListQuery) -> Self {
        Self {
            base: base.to_string(),
            selector_key,
            search: query.search().to_string(),
            selector: query.selector().map(str::to_string),
            current_page: query.page(),
        }
    }

    fn build(&self, selector: Option<&str>, page: Option<usize>) -> String {
        self.build_at(&self.base, selector, page)
    }

    fn build_at(&self, path: &str, selector: Option<&str>, page: Option<usize>) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            serializer.append_pair("q", &self.search);
        }
        if let Some(selector) = selector {
            serializer.append_pair(self.selector_key, selector);
        }
        if let Some(page) = page.filter(|p| *p > 1) {
            serializer.append_pair("page", &page.to_string());
        }
        let query = serializer.finish();

        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }

    /// Href for page `page` of the current filter.
    #[must_use]
    pub fn page(&self, page: usize) -> String {
        self.build(self.selector.as_deref(), Some(page))
    }

    /// Pager links for `page`.
    #[must_use]
    pub fn pager<T>(&self, page: &Page<T>) -> Pager {
        Pager {
            summary: format!(
                "Showing {}-{} of {}",
                page.first_index(),
                page.last_index(),
                page.total_items
            ),
            prev: page.has_prev().then(|| self.page(page.page - 1)),
            next: page.has_next().then(|| self.page(page.page + 1)),
            links: page
                .page_numbers()
                .into_iter()
                .map(|number| PagerLink {
                    number,
                    href: self.page(number),
                    current: number == page.page,
                })
                .collect(),
        }
    }

    /// Href that switches the selector and resets to page 1.
    #[must_use]
    pub fn with_selector(&self, value: &str) -> String {
        let selector = (!is_all(value) && !value.is_empty()).then_some(value);
        self.build(selector, None)
    }

    /// Href of the list itself with the current filter, page 1.
    #[must_use]
    pub fn current(&self) -> String {
        self.build(self.selector.as_deref(), None)
    }

    /// Href of a sub-route (`/new`, `/{id}/edit`) that keeps the whole list
    /// state, page included, so the list renders unchanged behind the panel.
    #[must_use]
    pub fn at(&self, suffix: &str) -> String {
        let path = format!("{}{suffix}", self.base);
        self.build_at(&path, self.selector.as_deref(), Some(self.current_page))
    }

    /// Href of one record's panel, keeping the list state.
    #[must_use]
    pub fn record(&self, id: &str) -> String {
        self.at(&format!("/{id}"))
    }

    /// Href of a record sub-route such as `edit` or `delete`.
    #[must_use]
    pub fn record_action(&self, id: &str, action: &str) -> String {
        self.at(&format!("/{id}/{action}"))
    }

    /// Path of the list, without any query.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The active selector value, empty when none.
    #[must_use]
    pub fn selector_value(&self) -> &str {
        self.selector.as_deref().unwrap_or_default()
    }

    /// The selector form field name.
    #[must_use]
    pub const fn selector_key(&self) -> &'static str {
        self.selector_key
    }

    /// Whether `value` is the active selector ("All" when none).
    #[must_use]
    pub fn is_selected(&self, value: &str) -> bool {
        self.selector.as_deref().map_or_else(
            || is_all(value) || value.is_empty(),
            |current| current.eq_ignore_ascii_case(value),
        )
    }
}

/// One numbered pager link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

/// Pager row under a list: range summary, prev/next and numbered links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub summary: String,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub links: Vec<PagerLink>,
}

impl Pager {
    /// Whether the pager is worth showing.
    #[must_use]
    pub fn is_needed(&self) -> bool {
        self.links.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(q: &str, selector: Option<&str>, page: Option<&str>) -> ListQuery {
        ListQuery {
            q: q.to_string(),
            selector: selector.map(str::to_string),
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_all_selects_everything() {
        assert_eq!(query("", Some("All"), None).selector(), None);
        assert_eq!(query("", Some("All Products"), None).selector(), None);
        assert_eq!(query("", Some(""), None).selector(), None);
        assert_eq!(query("", Some("Shipped"), None).selector(), Some("Shipped"));
    }

    #[test]
    fn test_page_defaults() {
        assert_eq!(query("", None, None).page(), 1);
        assert_eq!(query("", None, Some("abc")).page(), 1);
        assert_eq!(query("", None, Some("3")).page(), 3);
    }

    #[test]
    fn test_selector_link_resets_page() {
        let links = ListLinks::new("/orders", "status", &query("ravi", Some("Pending"), Some("4")));
        assert_eq!(links.with_selector("Shipped"), "/orders?q=ravi&status=Shipped");
        assert_eq!(links.with_selector("All"), "/orders?q=ravi");
        assert_eq!(links.page(2), "/orders?q=ravi&status=Pending&page=2");
        assert_eq!(links.page(1), "/orders?q=ravi&status=Pending");
    }

    #[test]
    fn test_links_encode_values() {
        let links = ListLinks::new("/products", "category", &query("a&b", None, None));
        assert_eq!(
            links.with_selector("Milk Products"),
            "/products?q=a%26b&category=Milk+Products"
        );
        assert!(links.is_selected("All Products"));
        assert!(!links.is_selected("fruit"));
    }

    #[test]
    fn test_sub_route_keeps_page() {
        let links = ListLinks::new("/customers", "status", &query("", Some("Active"), Some("2")));
        assert_eq!(links.at("/new"), "/customers/new?status=Active&page=2");
        assert_eq!(links.current(), "/customers?status=Active");
        assert_eq!(links.record("u-1"), "/customers/u-1?status=Active&page=2");
        assert_eq!(
            links.record_action("u-1", "edit"),
            "/customers/u-1/edit?status=Active&page=2"
        );
    }

    #[test]
    fn test_pager_marks_current_page() {
        let items: Vec<usize> = (1..=25).collect();
        let page = Page::paginate(&items, 2, 10);
        let links = ListLinks::new("/orders", "status", &query("", None, Some("2")));
        let pager = links.pager(&page);

        assert!(pager.is_needed());
        assert_eq!(pager.summary, "Showing 11-20 of 25");
        assert_eq!(pager.prev.as_deref(), Some("/orders"));
        assert_eq!(pager.next.as_deref(), Some("/orders?page=3"));
        assert_eq!(pager.links.len(), 3);
        assert!(pager.links[1].current);
    }
}
