//! Page-number windows for paginated lists.

use serde::Serialize;

/// Number of rows shown per page on list views.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Builds the list of page links to show. `None` marks an ellipsis gap.
///
/// Always shows `edge` pages at both ends and `around` pages on each side of
/// `current`.
fn page_window(total_pages: usize, current: usize, edge: usize, around: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();
    let mut last_pushed = 0;

    for page in 1..=total_pages {
        let near_start = page <= edge;
        let near_end = page + edge > total_pages;
        let near_current = page + around >= current && page <= current + around;

        if near_start || near_end || near_current {
            if page > last_pushed + 1 {
                pages.push(None);
            }
            pages.push(Some(page));
            last_pushed = page;
        }
    }

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    /// Wraps one page of `items` out of `total` rows split by `per_page`.
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = total.div_ceil(per_page.max(1));

        Self {
            items,
            pages: page_window(total_pages, current_page, 2, 2),
            page: current_page,
            total,
        }
    }
}
