/// Page numbers to draw, with `None` marking an ellipsis gap.
fn get_pages(
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

    let left_end = (1 + left_edge).min(last_page.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current + 1)
        .min(last_page.saturating_add(1));

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

/// Pagination footer of a table. Totals always come from the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSummary {
    pub page: usize,
    pub limit: usize,
    pub count: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
}

impl PageSummary {
    pub fn new(page: usize, limit: usize, count: usize, total_pages: usize) -> Self {
        let page = if page == 0 { 1 } else { page };

        let pages = get_pages(total_pages, page, 2, 2, 4, 2);

        Self {
            page,
            limit,
            count,
            total_pages,
            pages,
        }
    }

    /// First row number shown, 1-based; 0 when there are no rows.
    pub fn from(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.page - 1)
                .saturating_mul(self.limit)
                .saturating_add(1)
                .min(self.count)
        }
    }

    pub fn to(&self) -> usize {
        self.page.saturating_mul(self.limit).min(self.count)
    }

    /// `from–to de count`, as shown under every table.
    pub fn label(&self) -> String {
        format!("{}–{} de {}", self.from(), self.to(), self.count)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
