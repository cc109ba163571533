use alloc::sync::Arc;

use crate::paginator::Paginator;

/// A callback fired when a paginator state update occurs.
pub type OnChangeCallback = Arc<dyn Fn(&Paginator) + Send + Sync>;

/// Page size used when a container does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Configuration for [`crate::Paginator`].
///
/// This type is designed to be cheap to clone: the callback is stored in an
/// `Arc` so adapters can update a few fields and call
/// `Paginator::set_options` without reallocating closures.
pub struct PaginatorOptions {
    /// Items per page. Non-positive values fall back to
    /// [`DEFAULT_PAGE_SIZE`] when the options are constructed or applied.
    pub page_size: usize,

    /// The page to start on. Clamped to `[1, total_pages]` like any other
    /// page value once items are counted.
    pub initial_page: usize,

    /// Optional callback fired when the paginator's state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl PaginatorOptions {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: normalize_page_size(page_size),
            initial_page: 1,
            on_change: None,
        }
    }

    /// Creates options from a raw page-size attribute value.
    ///
    /// Absent, non-numeric, and non-positive values all resolve to
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn from_page_size_attr(attr: Option<&str>) -> Self {
        Self::new(parse_page_size(attr))
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = normalize_page_size(page_size);
        self
    }

    pub fn with_initial_page(mut self, initial_page: usize) -> Self {
        self.initial_page = initial_page;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Paginator) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Clone for PaginatorOptions {
    fn clone(&self) -> Self {
        Self {
            page_size: self.page_size,
            initial_page: self.initial_page,
            on_change: self.on_change.clone(),
        }
    }
}

impl core::fmt::Debug for PaginatorOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PaginatorOptions")
            .field("page_size", &self.page_size)
            .field("initial_page", &self.initial_page)
            .finish_non_exhaustive()
    }
}

pub(crate) fn normalize_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

/// Resolves a page-size attribute value to an effective page size.
pub fn parse_page_size(attr: Option<&str>) -> usize {
    attr.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&n| n > 0)
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_PAGE_SIZE)
}
