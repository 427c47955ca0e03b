use serde::Serialize;

use crate::models::Row;

/// Largest number of page buttons shown between prev and next.
const PAGE_WINDOW: usize = 5;

/// One page of an already sorted result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub rows: &'a [Row],
    pub total_rows: usize,
    pub total_pages: usize,
    /// Page actually shown after clamping, 1-based
    pub current_page: usize,
    /// 1-based index of the first visible row, 0 when empty
    pub range_start: usize,
    pub range_end: usize,
}

/// An empty result set still counts as a single (empty) page.
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total_rows.div_ceil(page_size).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn paginate(rows: &[Row], page_size: usize, page: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let total_rows = rows.len();
    let total_pages = total_pages(total_rows, page_size);
    let current_page = clamp_page(page, total_pages);

    let start = ((current_page - 1) * page_size).min(total_rows);
    let end = (current_page * page_size).min(total_rows);

    Page {
        rows: &rows[start..end],
        total_rows,
        total_pages,
        current_page,
        range_start: if end > start { start + 1 } else { 0 },
        range_end: end,
    }
}

/// Which footer controls are usable, and the numbered buttons to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNavigation {
    pub can_go_first: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub can_go_last: bool,
    pub page_numbers: Vec<usize>,
}

pub fn navigation(current_page: usize, total_pages: usize) -> PageNavigation {
    let total_pages = total_pages.max(1);
    let current = clamp_page(current_page, total_pages);

    // Keep the current page centred once it is past the first few pages
    let first = if current <= 3 {
        1
    } else if current + 2 >= total_pages {
        total_pages.saturating_sub(PAGE_WINDOW - 1).max(1)
    } else {
        current - 2
    };

    let page_numbers = (first..first + PAGE_WINDOW)
        .filter(|page| *page <= total_pages)
        .collect();

    PageNavigation {
        can_go_first: current > 1,
        can_go_previous: current > 1,
        can_go_next: current < total_pages,
        can_go_last: current < total_pages,
        page_numbers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered(count: usize) -> Vec<Row> {
        (1..=count)
            .map(|i| json!({ "id": i }).as_object().cloned().unwrap())
            .collect()
    }

    fn ids(page: &Page<'_>) -> Vec<u64> {
        page.rows.iter().map(|r| r["id"].as_u64().unwrap()).collect()
    }

    #[test]
    fn page_row_count_matches_remaining_rows() {
        let rows = numbered(23);
        for page_size in [10, 25, 5, 7] {
            let pages = total_pages(rows.len(), page_size);
            for p in 1..=pages {
                let page = paginate(&rows, page_size, p);
                let expected = page_size.min(rows.len() - page_size * (p - 1));
                assert_eq!(page.rows.len(), expected, "size {} page {}", page_size, p);
            }
        }
    }

    #[test]
    fn slices_the_requested_page() {
        let rows = numbered(23);
        let page = paginate(&rows, 10, 3);
        assert_eq!(ids(&page), vec![21, 22, 23]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.range_start, 21);
        assert_eq!(page.range_end, 23);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let rows = numbered(23);
        let page = paginate(&rows, 10, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(ids(&page)[0], 1);

        let page = paginate(&rows, 10, 99);
        assert_eq!(page.current_page, 3);
        assert_eq!(ids(&page), vec![21, 22, 23]);
    }

    #[test]
    fn empty_result_set_has_one_empty_page() {
        let page = paginate(&[], 10, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.rows.is_empty());
        assert_eq!((page.range_start, page.range_end), (0, 0));
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(21, 10), 3);
        assert_eq!(total_pages(0, 10), 1);
    }

    #[test]
    fn navigation_window_follows_current_page() {
        assert_eq!(navigation(1, 10).page_numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(navigation(3, 10).page_numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(navigation(5, 10).page_numbers, vec![3, 4, 5, 6, 7]);
        assert_eq!(navigation(8, 10).page_numbers, vec![6, 7, 8, 9, 10]);
        assert_eq!(navigation(10, 10).page_numbers, vec![6, 7, 8, 9, 10]);
        assert_eq!(navigation(2, 3).page_numbers, vec![1, 2, 3]);
        assert_eq!(navigation(1, 1).page_numbers, vec![1]);
    }

    #[test]
    fn navigation_disables_edges() {
        let nav = navigation(1, 3);
        assert!(!nav.can_go_first && !nav.can_go_previous);
        assert!(nav.can_go_next && nav.can_go_last);

        let nav = navigation(3, 3);
        assert!(nav.can_go_first && nav.can_go_previous);
        assert!(!nav.can_go_next && !nav.can_go_last);

        let nav = navigation(1, 1);
        assert!(!nav.can_go_previous && !nav.can_go_next);
    }
}
