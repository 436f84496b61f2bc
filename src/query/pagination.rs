use serde::Serialize;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: usize = 100;

/// Page metadata returned alongside every result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total_records: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
}

/// Slices one page out of `items`
///
/// `page` is clamped into `[1, total_pages]` (1 when there is nothing to
/// page through). `page_size` must be at least 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], Pagination) {
    let page_size = page_size.max(1);
    let total_records = items.len();
    let total_pages = total_records.div_ceil(page_size);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = ((current_page - 1) * page_size).min(total_records);
    let end = (start + page_size).min(total_records);

    let pagination = Pagination {
        total_records,
        current_page,
        total_pages,
        next_page: (current_page < total_pages).then_some(current_page + 1),
        prev_page: (current_page > 1).then_some(current_page - 1),
    };

    (&items[start..end], pagination)
}
