//! Page arithmetic shared by the table view and the JSON API.

/// Number of pages needed for `count` rows. An empty result still has one page.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// 1-based inclusive range of rows shown on `page`; `(0, 0)` when there are none.
pub fn display_range(page: usize, page_size: usize, count: usize) -> (usize, usize) {
    if count == 0 || page_size == 0 {
        return (0, 0);
    }
    let page = page.max(1);
    let first = (page - 1).saturating_mul(page_size).saturating_add(1);
    let last = page.saturating_mul(page_size).min(count);
    if first > last {
        return (0, 0);
    }
    (first, last)
}

/// Numbered page links with `None` marking a gap.
pub fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}
