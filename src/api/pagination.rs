use serde::Serialize;

use crate::config::PaginationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Number(u64),
    Last,
}

impl PageRequest {
    /// A positive integer or `last`; anything else means the first page.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("last") => PageRequest::Last,
            Some(value) => match value.parse::<u64>() {
                Ok(n) if n >= 1 => PageRequest::Number(n),
                _ => PageRequest::Number(1),
            },
            None => PageRequest::Number(1),
        }
    }
}

/// Client `page_size` capped at the configured maximum; junk falls back to the default.
pub fn resolve_page_size(raw: Option<&str>, config: &PaginationConfig) -> u64 {
    match raw.and_then(|s| s.trim().parse::<u64>().ok()) {
        Some(n) if n >= 1 => n.min(config.max_page_size),
        _ => config.default_page_size,
    }
}

/// Where a requested page falls within `count` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub size: u64,
    pub offset: u64,
    pub last_page: u64,
}

impl PageWindow {
    pub fn compute(count: u64, size: u64, request: PageRequest) -> Self {
        let size = size.max(1);
        let last_page = count.div_ceil(size).max(1);
        let number = match request {
            PageRequest::Number(n) => n,
            PageRequest::Last => last_page,
        };
        Self {
            number,
            size,
            offset: (number - 1).saturating_mul(size),
            last_page,
        }
    }

    pub fn in_range(&self) -> bool {
        self.number <= self.last_page
    }

    pub fn next(&self) -> Option<u64> {
        (self.number < self.last_page).then_some(self.number + 1)
    }

    /// Past the end, "previous" points at the last real page.
    pub fn previous(&self) -> Option<u64> {
        (self.number > 1).then(|| (self.number - 1).min(self.last_page))
    }
}

/// One page of results plus the numbers needed to link its neighbours.
#[derive(Debug, Clone)]
pub struct PageSlice<T> {
    pub count: u64,
    pub window: PageWindow,
    pub results: Vec<T>,
}

impl<T> PageSlice<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageSlice<U> {
        PageSlice {
            count: self.count,
            window: self.window,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Wire shape: `{count, next, previous, results}`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: Serialize> Page<T> {
    /// Render links relative to the request `path` and its original `query`.
    pub fn from_slice(slice: PageSlice<T>, path: &str, query: Option<&str>) -> Self {
        Self {
            count: slice.count,
            next: slice.window.next().map(|n| page_link(path, query, n)),
            previous: slice.window.previous().map(|n| page_link(path, query, n)),
            results: slice.results,
        }
    }
}

/// The request URL with `page` replaced; page 1 drops the parameter.
pub fn page_link(path: &str, query: Option<&str>, page: u64) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in url::form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
        if key != "page" {
            serializer.append_pair(&key, &value);
        }
    }
    if page > 1 {
        serializer.append_pair("page", &page.to_string());
    }

    let encoded = serializer.finish();
    if encoded.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaginationConfig {
        PaginationConfig {
            default_page_size: 10,
            max_page_size: 100,
        }
    }

    #[test]
    fn page_parameter_parsing() {
        assert_eq!(PageRequest::parse(None), PageRequest::Number(1));
        assert_eq!(PageRequest::parse(Some("3")), PageRequest::Number(3));
        assert_eq!(PageRequest::parse(Some("last")), PageRequest::Last);
    }

    #[test]
    fn unusable_page_falls_back_to_first() {
        for raw in ["0", "-1", "two", "", "1.5"] {
            assert_eq!(PageRequest::parse(Some(raw)), PageRequest::Number(1), "{raw:?}");
        }
    }

    #[test]
    fn page_size_is_capped() {
        assert_eq!(resolve_page_size(None, &config()), 10);
        assert_eq!(resolve_page_size(Some("25"), &config()), 25);
        assert_eq!(resolve_page_size(Some("1000"), &config()), 100);
        assert_eq!(resolve_page_size(Some("0"), &config()), 10);
        assert_eq!(resolve_page_size(Some("x"), &config()), 10);
    }

    #[test]
    fn window_for_twelve_records() {
        let first = PageWindow::compute(12, 10, PageRequest::Number(1));
        assert_eq!((first.offset, first.next(), first.previous()), (0, Some(2), None));

        let second = PageWindow::compute(12, 10, PageRequest::Number(2));
        assert_eq!((second.offset, second.next(), second.previous()), (10, None, Some(1)));

        let beyond = PageWindow::compute(12, 10, PageRequest::Number(7));
        assert!(!beyond.in_range());
        assert_eq!((beyond.next(), beyond.previous()), (None, Some(2)));

        let last = PageWindow::compute(12, 10, PageRequest::Last);
        assert_eq!(last.number, 2);
    }

    #[test]
    fn empty_set_has_one_empty_page() {
        let window = PageWindow::compute(0, 10, PageRequest::Number(1));
        assert!(window.in_range());
        assert_eq!((window.next(), window.previous()), (None, None));
    }

    #[test]
    fn links_keep_other_parameters() {
        assert_eq!(
            page_link("/api/employees/", Some("department=HR&page=2&search=a%20b"), 3),
            "/api/employees/?department=HR&search=a+b&page=3"
        );
        assert_eq!(page_link("/api/employees/", Some("page=2"), 1), "/api/employees/");
    }
}
