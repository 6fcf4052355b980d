//! Page arithmetic over the locally held list.

/// Largest number of rows shown per page.
pub const MAX_PAGE_SIZE: usize = 20;

/// `min(20, count)`; zero for an empty list.
pub fn page_size(count: usize) -> usize {
    count.min(MAX_PAGE_SIZE)
}

/// Number of pages for `count` rows; always at least 1.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(page_size(count).max(1)).max(1)
}

/// Clamp a requested page number into `1..=total_pages(count)`.
pub fn clamp_page(page: usize, count: usize) -> usize {
    page.clamp(1, total_pages(count))
}

/// Rows on the 1-based `page`; empty when the page is past the end.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let size = page_size(items.len()).max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}
