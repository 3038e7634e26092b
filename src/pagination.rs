use serde::{Deserialize, Serialize};

/// Pagination controls list every page up to this many pages.
const MAX_VISIBLE_PAGES: usize = 7;

/// One slice of an ordered result set plus its position metadata.
///
/// Matches the page envelope emitted by the record service; unknown keys in
/// the payload are ignored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub size: usize,
    /// Zero-based page index.
    pub number: usize,
    pub first: bool,
    pub last: bool,
}

impl<T> PaginatedResponse<T> {
    /// Builds an envelope computing the derived counters from `content`.
    pub fn new(content: Vec<T>, number: usize, size: usize, total_elements: usize) -> Self {
        let total_pages = if size > 0 {
            total_elements.div_ceil(size)
        } else {
            0
        };
        let last = number.saturating_mul(size).saturating_add(content.len()) >= total_elements;

        Self {
            content,
            total_elements,
            total_pages,
            size,
            number,
            first: number == 0,
            last,
        }
    }

    /// Cuts page `number` of `size` items out of a complete result set.
    pub fn slice(items: Vec<T>, number: usize, size: usize) -> Self {
        let total_elements = items.len();
        let content = items
            .into_iter()
            .skip(number.saturating_mul(size))
            .take(size)
            .collect();
        Self::new(content, number, size, total_elements)
    }

}

/// Zero-based page numbers to render; `None` marks an ellipsis.
fn page_window(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (0..total_pages).map(Some).collect();
    }

    let last_page = total_pages - 1;
    let mut pages: Vec<Option<usize>> = Vec::new();

    for page in 0..total_pages {
        let visible = page == 0 || page == last_page || page.abs_diff(current_page) <= 1;
        if visible {
            pages.push(Some(page));
        } else if pages.last().is_some_and(Option::is_some) {
            pages.push(None);
        }
    }

    pages
}

/// View model for the pagination control under the client table.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageLinks {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_elements: usize,
    pub page_size: usize,
    /// One-based index of the first row shown.
    pub start_item: usize,
    /// One-based index of the last row shown.
    pub end_item: usize,
    pub pages: Vec<Option<usize>>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageLinks {
    /// Returns `None` when there is nothing to paginate.
    pub fn new<T>(response: &PaginatedResponse<T>) -> Option<Self> {
        if response.total_elements == 0 || response.total_pages == 0 {
            return None;
        }

        let current = response.number;
        Some(Self {
            current_page: current,
            total_pages: response.total_pages,
            total_elements: response.total_elements,
            page_size: response.size,
            start_item: current.saturating_mul(response.size).saturating_add(1),
            end_item: current
                .saturating_add(1)
                .saturating_mul(response.size)
                .min(response.total_elements),
            pages: page_window(response.total_pages, current),
            has_previous: current > 0,
            has_next: current.saturating_add(1) < response.total_pages,
        })
    }

    /// Footer line shown next to the page buttons.
    pub fn summary(&self) -> String {
        format!(
            "Mostrando {} a {} de {} resultados",
            self.start_item, self.end_item, self.total_elements
        )
    }
}
